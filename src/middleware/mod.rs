mod error_page;
mod panic;

pub use error_page::error_page_middleware;
pub use panic::catch_panic_layer;
