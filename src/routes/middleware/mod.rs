mod guards;

pub use guards::{LOGIN_PATH, SessionRejection};
