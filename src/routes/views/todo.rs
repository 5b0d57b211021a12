use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;

use super::page::{HtmlError, render};
use crate::{
    auth::CurrentUser, db::entities::task, error::AppError, services::ServiceContext,
    state::AppState,
};

const TODO_PATH: &str = "/todo";
const PRIORITIES: [&str; 3] = ["High", "Medium", "Low"];

#[derive(Debug, Deserialize)]
pub struct NewTaskForm {
    #[serde(default)]
    pub new_todo: String,
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditTaskForm {
    #[serde(default)]
    pub task: String,
    pub priority: Option<String>,
}

struct PriorityOption {
    value: String,
    selected: bool,
}

/// The standard priorities, plus `current` when it is something else.
fn priority_options(current: &str) -> Vec<PriorityOption> {
    let mut options: Vec<PriorityOption> = PRIORITIES
        .iter()
        .map(|value| PriorityOption {
            value: value.to_string(),
            selected: *value == current,
        })
        .collect();
    if !current.is_empty() && !PRIORITIES.contains(&current) {
        options.push(PriorityOption {
            value: current.to_string(),
            selected: true,
        });
    }
    options
}

#[derive(Template)]
#[template(path = "todo.html")]
struct TodoTemplate {
    username: Option<String>,
    tasks: Vec<task::Model>,
    priorities: Vec<PriorityOption>,
}

#[derive(Template)]
#[template(path = "edit.html")]
struct EditTemplate {
    username: Option<String>,
    task: task::Model,
    priorities: Vec<PriorityOption>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(TODO_PATH, get(list_tasks).post(create_task))
        .route("/complete/{id}", post(complete_task))
        .route("/delete/{id}", post(delete_task))
        .route("/edit/{id}", get(edit_view).post(edit_task))
        .with_state(state)
}

async fn list_tasks(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Html<String>, HtmlError> {
    let tasks = ServiceContext::from_state(state.as_ref())
        .task()
        .list_tasks(user.id)
        .await?;

    render(&TodoTemplate {
        username: Some(user.username),
        tasks,
        priorities: priority_options(task::DEFAULT_PRIORITY),
    })
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Form(form): Form<NewTaskForm>,
) -> Result<Redirect, HtmlError> {
    ServiceContext::from_state(state.as_ref())
        .task()
        .create_task(user.id, &form.new_todo, form.priority.as_deref())
        .await?;
    Ok(Redirect::to(TODO_PATH))
}

async fn complete_task(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Redirect, HtmlError> {
    ServiceContext::from_state(state.as_ref())
        .task()
        .complete_task(user.id, id)
        .await?;
    Ok(Redirect::to(TODO_PATH))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Redirect, HtmlError> {
    ServiceContext::from_state(state.as_ref())
        .task()
        .delete_task(user.id, id)
        .await?;
    Ok(Redirect::to(TODO_PATH))
}

async fn edit_view(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Html<String>, HtmlError> {
    let task = ServiceContext::from_state(state.as_ref())
        .task()
        .owned_task(user.id, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    let priorities = priority_options(&task.priority);
    render(&EditTemplate {
        username: Some(user.username),
        task,
        priorities,
    })
}

async fn edit_task(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Form(form): Form<EditTaskForm>,
) -> Result<Redirect, HtmlError> {
    ServiceContext::from_state(state.as_ref())
        .task()
        .edit_task(user.id, id, &form.task, form.priority.as_deref())
        .await?;
    Ok(Redirect::to(TODO_PATH))
}

#[cfg(test)]
mod tests {
    use super::priority_options;

    #[test]
    fn marks_current_priority_selected() {
        let options = priority_options("Low");
        let selected: Vec<&str> = options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value.as_str())
            .collect();
        assert_eq!(selected, vec!["Low"]);
    }

    #[test]
    fn keeps_custom_priority_as_extra_option() {
        let options = priority_options("Urgent");
        assert_eq!(options.len(), 4);
        let last = options.last().expect("custom option should be appended");
        assert_eq!(last.value, "Urgent");
        assert!(last.selected);
    }
}
