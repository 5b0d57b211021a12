use std::sync::Arc;

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};

use super::page::{HtmlError, render};
use crate::{auth::CurrentUser, services::ServiceContext, state::AppState};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    username: Option<String>,
    completed: u64,
    pending: u64,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .with_state(state)
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Html<String>, HtmlError> {
    let summary = ServiceContext::from_state(state.as_ref())
        .task()
        .dashboard_summary(user.id)
        .await?;

    render(&DashboardTemplate {
        username: Some(user.username),
        completed: summary.completed,
        pending: summary.pending,
    })
}
