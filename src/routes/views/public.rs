use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use askama::Template;
use axum::{Json, Router, response::Html, routing::get};
use serde_json::{Value, json};
use tower_http::services::ServeDir;

use super::page::{HtmlError, display_name, render};
use crate::{auth::CurrentUser, state::AppState};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    username: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    let public_dir = resolve_public_dir(state.config.general.public_dir.as_deref());
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route_service("/{*file}", ServeDir::new(public_dir))
        .with_state(state)
}

fn resolve_public_dir(configured: Option<&str>) -> PathBuf {
    if let Some(path) = configured.filter(|path| !path.trim().is_empty()) {
        return PathBuf::from(path);
    }

    if let Ok(current_dir) = std::env::current_dir() {
        let candidate = current_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let candidate = exe_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    Path::new(env!("CARGO_MANIFEST_DIR")).join("public")
}

async fn index(user: Option<CurrentUser>) -> Result<Html<String>, HtmlError> {
    render(&IndexTemplate {
        username: display_name(user.as_ref()),
    })
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::resolve_public_dir;

    #[test]
    fn configured_public_dir_wins() {
        assert_eq!(
            resolve_public_dir(Some("/srv/homebase/public")),
            PathBuf::from("/srv/homebase/public")
        );
    }

    #[test]
    fn blank_setting_falls_back_to_a_public_dir() {
        assert!(resolve_public_dir(Some("  ")).ends_with("public"));
    }
}
