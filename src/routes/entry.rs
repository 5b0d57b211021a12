use std::sync::Arc;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{catch_panic_layer, error_page_middleware},
    state::AppState,
};

use super::views;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().merge(views::router(state))
}

/// The full HTTP stack as served: routes plus error pages, panic recovery,
/// and request tracing.
pub fn app(state: Arc<AppState>) -> Router {
    router(state)
        .layer(middleware::from_fn(error_page_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
}
