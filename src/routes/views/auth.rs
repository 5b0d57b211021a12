use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Redirect},
    routing::get,
};
use serde::Deserialize;

use super::page::{HtmlError, HtmlResult, display_name, render};
use crate::{
    auth::{
        CurrentUser,
        cookie::{cleared_session_cookie, session_cookie},
    },
    error::AppError,
    services::{ServiceContext, auth_service::IssuedSession},
    state::AppState,
};

const AFTER_LOGIN: &str = "/dashboard";

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate {
    username: Option<String>,
    form_username: String,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    username: Option<String>,
    form_username: String,
    error: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", get(register_view).post(register))
        .route("/login", get(login_view).post(login))
        .route("/logout", get(logout))
        .with_state(state)
}

fn signed_in_redirect(state: &AppState, issued: IssuedSession) -> HtmlResult {
    let cookie = session_cookie(
        &issued.cookie_token,
        issued.max_age_secs,
        state.config.auth.secure_cookie,
    )?;
    let mut response = Redirect::to(AFTER_LOGIN).into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

async fn register_view(user: Option<CurrentUser>) -> HtmlResult {
    Ok(render(&RegisterTemplate {
        username: display_name(user.as_ref()),
        form_username: String::new(),
        error: None,
    })?
    .into_response())
}

async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> HtmlResult {
    let services = ServiceContext::from_state(state.as_ref());
    let outcome = services
        .auth(&state.session_keys, &state.config.auth)
        .register(&form.username, &form.password)
        .await;

    match outcome {
        Ok(issued) => signed_in_redirect(&state, issued),
        Err(err @ (AppError::Conflict(_) | AppError::BadRequest(_))) => {
            tracing::warn!("registration rejected: {err}");
            Ok(render(&RegisterTemplate {
                username: None,
                form_username: form.username,
                error: Some(err.message().to_string()),
            })?
            .into_response())
        }
        Err(err) => Err(HtmlError::from(err)),
    }
}

async fn login_view(user: Option<CurrentUser>) -> HtmlResult {
    Ok(render(&LoginTemplate {
        username: display_name(user.as_ref()),
        form_username: String::new(),
        error: None,
    })?
    .into_response())
}

async fn login(State(state): State<Arc<AppState>>, Form(form): Form<CredentialsForm>) -> HtmlResult {
    let services = ServiceContext::from_state(state.as_ref());
    let outcome = services
        .auth(&state.session_keys, &state.config.auth)
        .login(&form.username, &form.password)
        .await;

    match outcome {
        Ok(issued) => signed_in_redirect(&state, issued),
        Err(err @ AppError::Unauthorized(_)) => Ok(render(&LoginTemplate {
            username: None,
            form_username: form.username,
            error: Some(err.message().to_string()),
        })?
        .into_response()),
        Err(err) => Err(HtmlError::from(err)),
    }
}

async fn logout(State(state): State<Arc<AppState>>, user: CurrentUser) -> HtmlResult {
    ServiceContext::from_state(state.as_ref())
        .auth(&state.session_keys, &state.config.auth)
        .logout(&user)
        .await?;

    let mut response = Redirect::to("/").into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, cleared_session_cookie());
    Ok(response)
}
