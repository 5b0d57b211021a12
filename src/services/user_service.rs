use sea_orm::SqlErr;

use crate::{
    db::dao::{DaoBase, DaoLayerError, UserDao},
    db::entities::user,
    error::AppError,
};

#[derive(Clone)]
pub struct UserService {
    user_dao: UserDao,
}

impl UserService {
    pub fn new(user_dao: UserDao) -> Self {
        Self { user_dao }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, AppError> {
        Ok(self.user_dao.find_by_id(id).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, AppError> {
        Ok(self.user_dao.find_by_username(username).await?)
    }

    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<user::Model, AppError> {
        match self.user_dao.create_user(username, password_hash).await {
            Ok(user) => Ok(user),
            // Lost a race with a concurrent registration of the same name.
            Err(DaoLayerError::Db(err))
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                Err(AppError::conflict("Username already taken"))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn set_last_login(
        &self,
        user_id: i32,
        last_login: &chrono::DateTime<chrono::FixedOffset>,
    ) -> Result<(), AppError> {
        Ok(self.user_dao.set_last_login(user_id, last_login).await?)
    }
}
