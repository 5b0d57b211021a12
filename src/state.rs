use std::sync::Arc;

use anyhow::Context;
use sea_orm::DatabaseConnection;

use crate::{auth::jwt::SessionKeys, config::AppConfig};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub session_keys: SessionKeys,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<Arc<Self>> {
        let session_keys = SessionKeys::from_secret(config.auth.secret_key.as_bytes());
        let http = reqwest::Client::builder()
            .timeout(config.weather.timeout())
            .build()
            .context("failed to build http client")?;

        Ok(Arc::new(Self {
            config,
            db,
            session_keys,
            http,
        }))
    }
}
