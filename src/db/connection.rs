use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::{self, redact_url};
use crate::config::DatabaseConfig;

/// Connects through the provider matching the URL scheme and brings the
/// schema in line with the entity definitions.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let registry = providers::default_registry()?;
    let provider = registry.provider_for_url(&cfg.url)?;
    info!(
        provider = provider.id().as_str(),
        url = %redact_url(&cfg.url),
        "connecting to database"
    );

    let db = provider.connect(cfg).await?;
    provider.post_connect(&db, cfg).await?;

    info!("syncing database schema from entities");
    db.get_schema_registry("homebase::db::entities::*")
        .sync(&db)
        .await?;
    Ok(db)
}
