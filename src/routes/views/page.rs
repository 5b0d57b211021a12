use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    auth::CurrentUser,
    error::AppError,
    response::{log_app_error, status_for},
};

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    username: Option<String>,
    status: u16,
    reason: &'a str,
    message: &'a str,
}

/// Failure of an HTML handler, rendered as the error page.
#[derive(Debug)]
pub struct HtmlError {
    status: StatusCode,
    message: String,
}

impl HtmlError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            log_app_error(&err, status);
        }
        Self::new(status, err.message())
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        error_page(self.status, &self.message).into_response()
    }
}

pub type HtmlResult = Result<Response, HtmlError>;

pub fn render<T: Template>(template: &T) -> Result<Html<String>, HtmlError> {
    template.render().map(Html).map_err(|err| {
        tracing::error!("template render failed: {err}");
        HtmlError::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to render page")
    })
}

/// Renders `template` with a non-200 status.
pub fn render_with_status<T: Template>(status: StatusCode, template: &T) -> HtmlResult {
    Ok((status, render(template)?).into_response())
}

pub fn error_page(status: StatusCode, message: &str) -> (StatusCode, Html<String>) {
    let template = ErrorTemplate {
        username: None,
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Error"),
        message,
    };
    let body = template
        .render()
        .unwrap_or_else(|_| format!("<h1>{}</h1>", status.as_u16()));
    (status, Html(body))
}

pub fn display_name(user: Option<&CurrentUser>) -> Option<String> {
    user.map(|user| user.username.clone())
}
