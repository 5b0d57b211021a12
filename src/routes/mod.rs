mod entry;
pub mod middleware;
pub mod views;

pub use entry::{app, router};
pub use middleware::{LOGIN_PATH, SessionRejection};
