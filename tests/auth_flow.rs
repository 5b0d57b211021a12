mod common;

use axum::http::StatusCode;

use common::{body_text, get, location, login, post_form, register, send, session_cookie};
use homebase::{db::entities::session, services::ServiceContext, test_helpers::test_app};
use sea_orm::EntityTrait;

#[tokio::test]
async fn health_reports_ok() {
    let (app, _state) = test_app().await;

    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("health should be json");
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn register_signs_in_and_redirects_to_dashboard() {
    let (app, _state) = test_app().await;

    let response = send(
        &app,
        post_form("/register", "username=alice&password=password123", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/dashboard"));
    let cookie = session_cookie(&response).expect("session cookie should be set");

    let dashboard = send(&app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    assert!(body_text(dashboard).await.contains("alice"));
}

#[tokio::test]
async fn duplicate_username_rerenders_form_without_session() {
    let (app, state) = test_app().await;
    register(&app, "alice", "password123").await;

    let response = send(
        &app,
        post_form("/register", "username=alice&password=another-pass", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    assert!(body_text(response).await.contains("Username already taken"));

    // The original password still works; the second one never took effect.
    let ok = login(&app, "alice", "password123").await;
    assert_eq!(ok.status(), StatusCode::SEE_OTHER);
    let rejected = login(&app, "alice", "another-pass").await;
    assert_eq!(rejected.status(), StatusCode::OK);

    let services = ServiceContext::new(&state.db);
    assert!(
        services
            .user()
            .find_by_username("alice")
            .await
            .expect("lookup should succeed")
            .is_some()
    );
}

#[tokio::test]
async fn short_password_is_rejected() {
    let (app, state) = test_app().await;

    let response = send(
        &app,
        post_form("/register", "username=bob&password=short", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());

    let user = ServiceContext::new(&state.db)
        .user()
        .find_by_username("bob")
        .await
        .expect("lookup should succeed");
    assert!(user.is_none());
}

#[tokio::test]
async fn login_with_wrong_password_shows_generic_notice() {
    let (app, _state) = test_app().await;
    register(&app, "alice", "password123").await;

    let response = login(&app, "alice", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    assert!(
        body_text(response)
            .await
            .contains("Invalid username or password")
    );

    let unknown = login(&app, "nobody", "password123").await;
    assert_eq!(unknown.status(), StatusCode::OK);
    assert!(
        body_text(unknown)
            .await
            .contains("Invalid username or password")
    );
}

#[tokio::test]
async fn login_stamps_last_login_and_sets_cookie() {
    let (app, state) = test_app().await;
    register(&app, "alice", "password123").await;

    let response = login(&app, "alice", "password123").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/dashboard"));
    assert!(session_cookie(&response).is_some());

    let user = ServiceContext::new(&state.db)
        .user()
        .find_by_username("alice")
        .await
        .expect("lookup should succeed")
        .expect("user should exist");
    assert!(user.last_login_at.is_some());
}

#[tokio::test]
async fn gated_pages_redirect_to_login() {
    let (app, _state) = test_app().await;

    for uri in ["/todo", "/dashboard", "/edit/1", "/recipes/1", "/logout"] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response).as_deref(), Some("/login"), "{uri}");
    }
}

#[tokio::test]
async fn tampered_cookie_is_not_a_session() {
    let (app, _state) = test_app().await;
    let cookie = register(&app, "alice", "password123").await;

    let tampered = format!("{cookie}x");
    let response = send(&app, get("/todo", Some(&tampered))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/login"));
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let (app, _state) = test_app().await;
    let cookie = register(&app, "alice", "password123").await;

    let response = send(&app, get("/logout", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));
    assert!(session_cookie(&response).is_none());

    // The old cookie is still validly signed but its session row is revoked.
    let after = send(&app, get("/todo", Some(&cookie))).await;
    assert_eq!(after.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&after).as_deref(), Some("/login"));
}

#[tokio::test]
async fn other_sessions_survive_a_logout() {
    let (app, _state) = test_app().await;
    let first = register(&app, "alice", "password123").await;
    let second = session_cookie(&login(&app, "alice", "password123").await)
        .expect("login should set a cookie");

    send(&app, get("/logout", Some(&first))).await;

    let response = send(&app, get("/todo", Some(&second))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_purges_revoked_sessions() {
    let (app, state) = test_app().await;
    let first = register(&app, "alice", "password123").await;
    send(&app, get("/logout", Some(&first))).await;

    let response = login(&app, "alice", "password123").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let rows = session::Entity::find()
        .all(&state.db)
        .await
        .expect("query should succeed");
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].revoked);
}
