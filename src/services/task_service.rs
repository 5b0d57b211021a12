use sea_orm::DbErr;
use serde::Serialize;

use crate::{
    db::dao::{DaoBase, DaoLayerError, DaoResult, TaskDao},
    db::entities::task::{self, DEFAULT_PRIORITY},
    error::AppError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub completed: u64,
    pub pending: u64,
}

/// Blank or missing priorities fall back to "Medium".
pub fn normalize_priority(priority: Option<&str>) -> String {
    match priority.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_PRIORITY.to_string(),
    }
}

/// A task deleted between the ownership check and the write counts as a no-op.
fn applied<T>(result: DaoResult<T>, task_id: i32) -> Result<bool, AppError> {
    match result {
        Ok(_) => Ok(true),
        Err(DaoLayerError::NotFound { .. } | DaoLayerError::Db(DbErr::RecordNotUpdated)) => {
            tracing::debug!(task_id, "task vanished before write");
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

#[derive(Clone)]
pub struct TaskService {
    task_dao: TaskDao,
}

impl TaskService {
    pub fn new(task_dao: TaskDao) -> Self {
        Self { task_dao }
    }

    pub async fn list_tasks(&self, user_id: i32) -> Result<Vec<task::Model>, AppError> {
        Ok(self.task_dao.list_for_user(user_id).await?)
    }

    /// Returns `None` without writing anything when `text` is blank.
    pub async fn create_task(
        &self,
        user_id: i32,
        text: &str,
        priority: Option<&str>,
    ) -> Result<Option<task::Model>, AppError> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!(user_id, "ignoring blank task");
            return Ok(None);
        }
        let priority = normalize_priority(priority);
        let created = self.task_dao.create_task(user_id, text, &priority).await?;
        Ok(Some(created))
    }

    /// The task, if it exists and belongs to `user_id`. Every per-task
    /// mutation goes through here first.
    pub async fn owned_task(
        &self,
        user_id: i32,
        task_id: i32,
    ) -> Result<Option<task::Model>, AppError> {
        let found = self.task_dao.find_owned(user_id, task_id).await?;
        if found.is_none() {
            tracing::debug!(user_id, task_id, "task not owned by user");
        }
        Ok(found)
    }

    pub async fn complete_task(&self, user_id: i32, task_id: i32) -> Result<bool, AppError> {
        let Some(task) = self.owned_task(user_id, task_id).await? else {
            return Ok(false);
        };
        applied(self.task_dao.mark_done(task.id).await, task.id)
    }

    pub async fn delete_task(&self, user_id: i32, task_id: i32) -> Result<bool, AppError> {
        let Some(task) = self.owned_task(user_id, task_id).await? else {
            return Ok(false);
        };
        applied(self.task_dao.delete(task.id).await, task.id)
    }

    /// Blank `text` keeps the current text; blank `priority` keeps the
    /// current priority.
    pub async fn edit_task(
        &self,
        user_id: i32,
        task_id: i32,
        text: &str,
        priority: Option<&str>,
    ) -> Result<bool, AppError> {
        let Some(task) = self.owned_task(user_id, task_id).await? else {
            return Ok(false);
        };

        let text = match text.trim() {
            "" => task.task.as_str(),
            trimmed => trimmed,
        };
        let priority = match priority.map(str::trim) {
            Some(value) if !value.is_empty() => value,
            _ => task.priority.as_str(),
        };
        applied(
            self.task_dao.update_details(task.id, text, priority).await,
            task.id,
        )
    }

    pub async fn dashboard_summary(&self, user_id: i32) -> Result<DashboardSummary, AppError> {
        let completed = self.task_dao.count_for_user(user_id, true).await?;
        let pending = self.task_dao.count_for_user(user_id, false).await?;
        Ok(DashboardSummary { completed, pending })
    }
}
