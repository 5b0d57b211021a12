use chrono::{Duration, Utc};

use crate::{
    auth::{
        CurrentUser,
        jwt::{SessionKeys, decode_token, encode_token, make_session_claims},
        password::{MIN_PASSWORD_LEN, hash_password, verify_password},
    },
    config::{AuthConfig, defaults::MAX_SESSION_TTL_HOURS},
    db::{dao::SessionDao, entities::user},
    error::AppError,
    services::user_service::UserService,
};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// A freshly created session plus the signed value for the cookie.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub user: user::Model,
    pub cookie_token: String,
    pub max_age_secs: i64,
}

#[derive(Clone)]
pub struct AuthService<'a> {
    user_service: UserService,
    session_dao: SessionDao,
    keys: &'a SessionKeys,
    cfg: &'a AuthConfig,
}

impl<'a> AuthService<'a> {
    pub fn new(
        user_service: UserService,
        session_dao: SessionDao,
        keys: &'a SessionKeys,
        cfg: &'a AuthConfig,
    ) -> Self {
        Self {
            user_service,
            session_dao,
            keys,
            cfg,
        }
    }

    fn session_ttl(&self) -> Result<Duration, AppError> {
        let hours = self.cfg.session_ttl_hours;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
            tracing::error!(hours, "session ttl out of range");
            return Err(AppError::internal("Session lifetime is misconfigured"));
        }
        Duration::try_hours(hours)
            .ok_or_else(|| AppError::internal("Session lifetime is misconfigured"))
    }

    async fn issue_session(&self, user: user::Model) -> Result<IssuedSession, AppError> {
        let ttl = self.session_ttl()?;
        let session = self.session_dao.create_session(user.id, ttl).await?;

        let max_age_secs = ttl.num_seconds();
        let claims = make_session_claims(user.id, &session.token, max_age_secs as usize);
        let cookie_token = encode_token(self.keys, &claims)?;

        Ok(IssuedSession {
            user,
            cookie_token,
            max_age_secs,
        })
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<IssuedSession, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::bad_request("Username required"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::bad_request(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self.user_service.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict("Username already taken"));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .user_service
            .create_user(username, &password_hash)
            .await?;
        tracing::info!(user_id = user.id, "user registered");

        self.issue_session(user).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedSession, AppError> {
        let user = self
            .user_service
            .find_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "login rejected");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let now = Utc::now().fixed_offset();
        self.user_service.set_last_login(user.id, &now).await?;
        tracing::info!(user_id = user.id, "user logged in");

        self.issue_session(user).await
    }

    pub async fn logout(&self, current: &CurrentUser) -> Result<(), AppError> {
        self.session_dao.revoke(&current.session_token).await?;
        tracing::info!(user_id = current.id, "user logged out");
        Ok(())
    }

    /// Maps a cookie value to the user behind it. Any defect in the token
    /// or the session row yields `None`; only storage failures are errors.
    pub async fn resolve(&self, cookie_token: &str) -> Result<Option<CurrentUser>, AppError> {
        let Ok(claims) = decode_token(self.keys, cookie_token) else {
            return Ok(None);
        };
        let Some(user_id) = claims.user_id() else {
            return Ok(None);
        };

        let Some(session) = self.session_dao.find_active_by_token(&claims.sid).await? else {
            return Ok(None);
        };
        if session.user_id != user_id {
            return Ok(None);
        }

        let user = self.user_service.find_by_id(user_id).await?;
        Ok(user.map(|user| CurrentUser {
            id: user.id,
            username: user.username,
            session_token: session.token,
        }))
    }
}
