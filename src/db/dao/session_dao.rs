use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::session::{self, Entity as Session};

#[derive(Clone)]
pub struct SessionDao {
    db: DatabaseConnection,
}

impl DaoBase for SessionDao {
    type Entity = Session;
    const ENTITY_NAME: &'static str = "session";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl SessionDao {
    /// Drops the user's revoked and expired rows before issuing a new one.
    pub async fn create_session(&self, user_id: i32, ttl: Duration) -> DaoResult<session::Model> {
        let now = Utc::now().fixed_offset();
        let purged = self.purge_stale(user_id, now).await?;
        if purged > 0 {
            tracing::debug!(user_id, purged, "purged stale sessions");
        }

        let model = session::ActiveModel {
            token: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id),
            expires_at: Set(now + ttl),
            revoked: Set(false),
            ..Default::default()
        };
        self.create(model).await
    }

    async fn purge_stale(
        &self,
        user_id: i32,
        now: chrono::DateTime<chrono::FixedOffset>,
    ) -> DaoResult<u64> {
        let result = Session::delete_many()
            .filter(session::Column::UserId.eq(user_id))
            .filter(
                Condition::any()
                    .add(session::Column::Revoked.eq(true))
                    .add(session::Column::ExpiresAt.lte(now)),
            )
            .exec(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(result.rows_affected)
    }

    /// Looks up a non-revoked, unexpired session by its token.
    pub async fn find_active_by_token(&self, token: &str) -> DaoResult<Option<session::Model>> {
        Session::find()
            .filter(session::Column::Token.eq(token))
            .filter(session::Column::Revoked.eq(false))
            .filter(session::Column::ExpiresAt.gt(Utc::now().fixed_offset()))
            .one(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn revoke(&self, token: &str) -> DaoResult<()> {
        Session::update_many()
            .col_expr(
                session::Column::Revoked,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(session::Column::Token.eq(token))
            .exec(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(())
    }
}
