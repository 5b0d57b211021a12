use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::{prelude::Task, task};

#[derive(Clone)]
pub struct TaskDao {
    db: DatabaseConnection,
}

impl DaoBase for TaskDao {
    type Entity = Task;
    const ENTITY_NAME: &'static str = "task";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl TaskDao {
    pub async fn create_task(
        &self,
        user_id: i32,
        text: &str,
        priority: &str,
    ) -> DaoResult<task::Model> {
        let model = task::ActiveModel {
            task: Set(text.to_string()),
            done: Set(false),
            priority: Set(priority.to_string()),
            user_id: Set(user_id),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn list_for_user(&self, user_id: i32) -> DaoResult<Vec<task::Model>> {
        self.find_all(move |query| query.filter(task::Column::UserId.eq(user_id)))
            .await
    }

    /// Returns the task only when it belongs to `user_id`.
    pub async fn find_owned(&self, user_id: i32, task_id: i32) -> DaoResult<Option<task::Model>> {
        Task::find_by_id(task_id)
            .filter(task::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn mark_done(&self, task_id: i32) -> DaoResult<task::Model> {
        self.update(task_id, |active| {
            active.done = Set(true);
        })
        .await
    }

    pub async fn update_details(
        &self,
        task_id: i32,
        text: &str,
        priority: &str,
    ) -> DaoResult<task::Model> {
        let text = text.to_string();
        let priority = priority.to_string();
        self.update(task_id, move |active| {
            active.task = Set(text);
            active.priority = Set(priority);
        })
        .await
    }

    pub async fn count_for_user(&self, user_id: i32, done: bool) -> DaoResult<u64> {
        Task::find()
            .filter(task::Column::UserId.eq(user_id))
            .filter(task::Column::Done.eq(done))
            .count(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }
}
