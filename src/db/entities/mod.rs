#[allow(unused_imports)]
pub mod prelude {
    pub use super::ingredient::Entity as Ingredient;
    pub use super::recipe::Entity as Recipe;
    pub use super::session::Entity as Session;
    pub use super::task::Entity as Task;
    pub use super::user::Entity as User;
}

pub mod ingredient;
pub mod recipe;
pub mod session;
pub mod task;
pub mod user;
