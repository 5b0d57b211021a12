use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod cookbook;
pub mod dashboard;
pub mod page;
pub mod public;
pub mod todo;
pub mod weather;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(auth::router(state.clone()))
        .merge(todo::router(state.clone()))
        .merge(cookbook::router(state.clone()))
        .merge(dashboard::router(state.clone()))
        .merge(weather::router(state.clone()))
        .merge(public::router(state))
}
