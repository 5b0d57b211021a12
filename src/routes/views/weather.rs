use std::sync::Arc;

use askama::Template;
use axum::{Router, extract::State, response::IntoResponse, routing::get};

use super::page::{HtmlResult, display_name, render, render_with_status};
use crate::{
    auth::CurrentUser,
    error::AppError,
    response::status_for,
    services::{ServiceContext, weather_service::WeatherReport},
    state::AppState,
};

#[derive(Template)]
#[template(path = "weather.html")]
struct WeatherTemplate {
    username: Option<String>,
    city: String,
    report: Option<WeatherReport>,
    raw_json: String,
    error: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/weather", get(weather))
        .with_state(state)
}

async fn weather(State(state): State<Arc<AppState>>, user: Option<CurrentUser>) -> HtmlResult {
    let outcome = ServiceContext::from_state(state.as_ref())
        .weather(&state.http, &state.config.weather)
        .report()
        .await;
    let username = display_name(user.as_ref());
    let city = state.config.weather.city.clone();

    match outcome {
        Ok(report) => {
            let raw_json = serde_json::to_string_pretty(&report.raw).unwrap_or_default();
            Ok(render(&WeatherTemplate {
                username,
                city,
                report: Some(report),
                raw_json,
                error: None,
            })?
            .into_response())
        }
        Err(err) => {
            let err = AppError::from(err);
            render_with_status(
                status_for(&err),
                &WeatherTemplate {
                    username,
                    city,
                    report: None,
                    raw_json: String::new(),
                    error: Some(err.message().to_string()),
                },
            )
        }
    }
}
