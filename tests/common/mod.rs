#![allow(dead_code)]

use axum::{
    Router,
    body::{self, Body},
    http::{Request, Response, StatusCode, header},
};
use tower::ServiceExt; // for `oneshot`

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("router should respond")
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).header(header::ACCEPT, "text/html");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request should build")
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// `name=value` of the session cookie set by `response`, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("homebase_session="))
        .and_then(|value| value.split(';').next())
        .filter(|pair| pair.len() > "homebase_session=".len())
        .map(str::to_string)
}

/// Registers `username` and returns the session cookie to send back.
pub async fn register(app: &Router, username: &str, password: &str) -> String {
    let response = send(
        app,
        post_form(
            "/register",
            &format!("username={username}&password={password}"),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("registration should set a session cookie")
}

pub async fn login(app: &Router, username: &str, password: &str) -> Response<Body> {
    send(
        app,
        post_form(
            "/login",
            &format!("username={username}&password={password}"),
            None,
        ),
    )
    .await
}
