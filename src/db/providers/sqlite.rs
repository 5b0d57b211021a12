use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use super::registry::{DbProvider, DbProviderId, connect_options};
use crate::config::DatabaseConfig;

const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;

pub struct SqliteDbProvider;

impl SqliteDbProvider {
    /// Every pooled connection to `:memory:` opens its own empty database, so
    /// in-memory URLs are pinned to a single connection.
    fn is_in_memory(url: &str) -> bool {
        url.to_ascii_lowercase().contains(":memory:") || url.contains("mode=memory")
    }
}

#[async_trait]
impl DbProvider for SqliteDbProvider {
    fn id(&self) -> DbProviderId {
        DbProviderId::Sqlite
    }

    fn supports_url(&self, url: &str) -> bool {
        url.trim().to_ascii_lowercase().starts_with("sqlite:")
    }

    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        let options = if Self::is_in_memory(&cfg.url) {
            connect_options(cfg, 1, 1)
        } else {
            connect_options(cfg, cfg.max_connections, cfg.min_idle)
        };
        Ok(Database::connect(options).await?)
    }

    async fn post_connect(&self, db: &DatabaseConnection, _cfg: &DatabaseConfig) -> Result<()> {
        db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
        db.execute_unprepared(&format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS}"))
            .await?;
        Ok(())
    }
}
