pub mod auth_service;
pub mod context;
pub mod recipe_service;
pub mod task_service;
pub mod user_service;
pub mod weather_service;

pub use context::ServiceContext;
