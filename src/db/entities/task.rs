use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

pub const DEFAULT_PRIORITY: &str = "Medium";

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    pub task: String,
    #[sea_orm(default_value = false)]
    pub done: bool,
    pub priority: String,
    #[sea_orm(indexed)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id", on_delete = "Cascade")]
    pub user: HasOne<super::user::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
