use std::sync::Arc;

use axum::Router;

use crate::{
    config::{AppConfig, AuthConfig, DatabaseConfig},
    db::connection,
    routes::app,
    state::AppState,
};

pub const TEST_SECRET: &str = "integration-test-secret-key";

/// Defaults plus an in-memory SQLite database and a fixed signing secret.
pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_idle: 1,
        },
        auth: AuthConfig {
            secret_key: TEST_SECRET.to_string(),
            ..AuthConfig::default()
        },
        ..AppConfig::default()
    }
}

pub async fn test_state(cfg: AppConfig) -> Arc<AppState> {
    let db = connection::connect(&cfg.database)
        .await
        .expect("in-memory database should connect");
    AppState::new(cfg, db).expect("state should build")
}

/// The full application stack over a fresh, empty database.
pub async fn test_app_with(cfg: AppConfig) -> (Router, Arc<AppState>) {
    let state = test_state(cfg).await;
    (app(Arc::clone(&state)), state)
}

pub async fn test_app() -> (Router, Arc<AppState>) {
    test_app_with(test_config()).await
}
