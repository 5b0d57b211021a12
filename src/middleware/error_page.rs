use axum::{
    body::{Bytes, to_bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    error::AppError,
    response::{JsonApiResponse, log_app_error},
    routes::views::page::error_page,
};

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Rewrites bare error responses (extractor rejections, empty 404s from the
/// static file service) into an HTML error page for browsers and into the
/// JSON envelope for everyone else. Responses that already carry HTML or
/// JSON pass through untouched.
pub async fn error_page_middleware(req: Request, next: Next) -> Response {
    let wants_html = accepts_html(req.headers());
    let response = next.run(req).await;

    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }
    if has_content_type(&response, &["application/json", "+json", "text/html"]) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let message = match to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => body_bytes_to_message(status, bytes),
        Err(_) => default_message(status),
    };
    let app_error = app_error_from_status(status, message);
    if status.is_server_error() {
        log_app_error(&app_error, status);
    }

    let mut new_response = if wants_html {
        error_page(status, app_error.message()).into_response()
    } else {
        JsonApiResponse::from_error(&app_error).into_response()
    };
    copy_headers(&parts.headers, &mut new_response);
    new_response
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().contains("text/html"))
        .unwrap_or(false)
}

fn has_content_type(response: &Response, needles: &[&str]) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let value = value.to_ascii_lowercase();
            needles.iter().any(|needle| value.contains(needle))
        })
        .unwrap_or(false)
}

fn body_bytes_to_message(status: StatusCode, bytes: Bytes) -> String {
    let message = String::from_utf8_lossy(&bytes).trim().to_string();
    if message.is_empty() {
        return default_message(status);
    }
    message
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

fn app_error_from_status(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::BAD_REQUEST => AppError::bad_request(message),
        StatusCode::UNAUTHORIZED => AppError::unauthorized(message),
        StatusCode::FORBIDDEN => AppError::forbidden(message),
        StatusCode::NOT_FOUND => AppError::not_found(message),
        StatusCode::CONFLICT => AppError::conflict(message),
        StatusCode::UNPROCESSABLE_ENTITY => AppError::unprocessable(message),
        StatusCode::BAD_GATEWAY => AppError::bad_gateway(message),
        StatusCode::SERVICE_UNAVAILABLE => AppError::service_unavailable(message),
        _ if status.is_client_error() => AppError::bad_request(message),
        _ => AppError::internal(message),
    }
}

fn copy_headers(src: &HeaderMap, dest: &mut Response) {
    for (name, value) in src {
        if name == header::CONTENT_TYPE || name == header::CONTENT_LENGTH {
            continue;
        }
        dest.headers_mut().insert(name.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    use super::error_page_middleware;

    fn app() -> Router {
        Router::new()
            .route("/plain", get(|| async { (StatusCode::BAD_REQUEST, "bad id") }))
            .route("/ok", get(|| async { "fine" }))
            .layer(middleware::from_fn(error_page_middleware))
    }

    #[tokio::test]
    async fn plain_errors_become_json_for_api_clients() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/plain")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("request should run");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json["message"], "bad id");
        assert_eq!(json["status"], 400);
    }

    #[tokio::test]
    async fn plain_errors_become_html_for_browsers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/missing")
                    .header(header::ACCEPT, "text/html,application/xhtml+xml")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("request should run");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn successful_responses_pass_through() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/ok")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("request should run");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
