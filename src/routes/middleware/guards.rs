use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    auth::{
        CurrentUser,
        cookie::{SESSION_COOKIE, read_cookie},
    },
    error::AppError,
    routes::views::page::HtmlError,
    services::ServiceContext,
    state::AppState,
};

pub const LOGIN_PATH: &str = "/login";

/// Why a session-gated handler did not run.
#[derive(Debug)]
pub enum SessionRejection {
    LoginRequired,
    Failed(AppError),
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        match self {
            SessionRejection::LoginRequired => Redirect::to(LOGIN_PATH).into_response(),
            SessionRejection::Failed(err) => HtmlError::from(err).into_response(),
        }
    }
}

async fn resolve_current_user(
    parts: &mut Parts,
    state: &Arc<AppState>,
) -> Result<Option<CurrentUser>, AppError> {
    if let Some(user) = parts.extensions.get::<CurrentUser>().cloned() {
        return Ok(Some(user));
    }

    let Some(token) = read_cookie(&parts.headers, SESSION_COOKIE) else {
        return Ok(None);
    };

    let services = ServiceContext::from_state(state.as_ref());
    let user = services
        .auth(&state.session_keys, &state.config.auth)
        .resolve(&token)
        .await?;

    if let Some(user) = &user {
        parts.extensions.insert(user.clone());
    }
    Ok(user)
}

// Session guard: a live session or a redirect to the login page.
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match resolve_current_user(parts, state).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(SessionRejection::LoginRequired),
            Err(err) => Err(SessionRejection::Failed(err)),
        }
    }
}

// Public pages only want to know who is looking.
impl OptionalFromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = HtmlError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(resolve_current_user(parts, state).await?)
    }
}
