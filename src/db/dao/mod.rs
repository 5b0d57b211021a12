pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod recipe_dao;
pub mod session_dao;
pub mod task_dao;
pub mod user_dao;

pub use base::DaoBase;
pub use base_traits::{HasIdColumn, TimestampedActiveModel};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use recipe_dao::{IngredientRow, RecipeDao};
pub use session_dao::SessionDao;
pub use task_dao::TaskDao;
pub use user_dao::UserDao;
