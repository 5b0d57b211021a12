mod common;

use std::sync::Arc;

use axum::http::StatusCode;

use common::{body_text, get, location, post_form, register, send};
use homebase::{
    db::entities::task, services::ServiceContext, state::AppState, test_helpers::test_app,
};

async fn user_id(state: &Arc<AppState>, username: &str) -> i32 {
    ServiceContext::new(&state.db)
        .user()
        .find_by_username(username)
        .await
        .expect("lookup should succeed")
        .expect("user should exist")
        .id
}

async fn tasks_of(state: &Arc<AppState>, username: &str) -> Vec<task::Model> {
    let id = user_id(state, username).await;
    ServiceContext::new(&state.db)
        .task()
        .list_tasks(id)
        .await
        .expect("list should succeed")
}

#[tokio::test]
async fn new_task_defaults_to_medium_priority() {
    let (app, state) = test_app().await;
    let cookie = register(&app, "alice", "password123").await;

    let response = send(&app, post_form("/todo", "new_todo=Buy+milk", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/todo"));

    let blank = send(
        &app,
        post_form("/todo", "new_todo=Call+mom&priority=", Some(&cookie)),
    )
    .await;
    assert_eq!(blank.status(), StatusCode::SEE_OTHER);

    let tasks = tasks_of(&state, "alice").await;
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|task| task.priority == "Medium"));
    assert!(tasks.iter().all(|task| !task.done));

    let page = body_text(send(&app, get("/todo", Some(&cookie))).await).await;
    assert!(page.contains("Buy milk"));
    assert!(page.contains("Call mom"));
}

#[tokio::test]
async fn explicit_priority_is_kept() {
    let (app, state) = test_app().await;
    let cookie = register(&app, "alice", "password123").await;

    send(
        &app,
        post_form("/todo", "new_todo=Pay+rent&priority=High", Some(&cookie)),
    )
    .await;

    let tasks = tasks_of(&state, "alice").await;
    assert_eq!(tasks[0].priority, "High");
}

#[tokio::test]
async fn task_lists_are_per_user() {
    let (app, _state) = test_app().await;
    let alice = register(&app, "alice", "password123").await;
    let bob = register(&app, "bob", "password123").await;

    send(&app, post_form("/todo", "new_todo=Alice+secret", Some(&alice))).await;

    let page = body_text(send(&app, get("/todo", Some(&bob))).await).await;
    assert!(!page.contains("Alice secret"));
}

#[tokio::test]
async fn owner_can_complete_edit_and_delete() {
    let (app, state) = test_app().await;
    let cookie = register(&app, "alice", "password123").await;
    send(&app, post_form("/todo", "new_todo=Laundry", Some(&cookie))).await;
    let id = tasks_of(&state, "alice").await[0].id;

    let done = send(&app, post_form(&format!("/complete/{id}"), "", Some(&cookie))).await;
    assert_eq!(done.status(), StatusCode::SEE_OTHER);
    assert!(tasks_of(&state, "alice").await[0].done);

    let edit_view = send(&app, get(&format!("/edit/{id}"), Some(&cookie))).await;
    assert_eq!(edit_view.status(), StatusCode::OK);
    assert!(body_text(edit_view).await.contains("Laundry"));

    send(
        &app,
        post_form(
            &format!("/edit/{id}"),
            "task=Fold+laundry&priority=Low",
            Some(&cookie),
        ),
    )
    .await;
    let edited = &tasks_of(&state, "alice").await[0];
    assert_eq!(edited.task, "Fold laundry");
    assert_eq!(edited.priority, "Low");

    send(&app, post_form(&format!("/delete/{id}"), "", Some(&cookie))).await;
    assert!(tasks_of(&state, "alice").await.is_empty());
}

#[tokio::test]
async fn foreign_tasks_are_untouchable() {
    let (app, state) = test_app().await;
    let alice = register(&app, "alice", "password123").await;
    let bob = register(&app, "bob", "password123").await;
    send(&app, post_form("/todo", "new_todo=Alice+only", Some(&alice))).await;
    let original = tasks_of(&state, "alice").await[0].clone();
    let id = original.id;

    for (uri, body) in [
        (format!("/complete/{id}"), ""),
        (format!("/edit/{id}"), "task=Hijacked&priority=High"),
        (format!("/delete/{id}"), ""),
    ] {
        let response = send(&app, post_form(&uri, body, Some(&bob))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response).as_deref(), Some("/todo"), "{uri}");
    }

    let after = tasks_of(&state, "alice").await;
    assert_eq!(after, vec![original]);

    let edit_view = send(&app, get(&format!("/edit/{id}"), Some(&bob))).await;
    assert_eq!(edit_view.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_task_mutations_are_noops() {
    let (app, _state) = test_app().await;
    let cookie = register(&app, "alice", "password123").await;

    let response = send(&app, post_form("/complete/4040", "", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let edit_view = send(&app, get("/edit/4040", Some(&cookie))).await;
    assert_eq!(edit_view.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_counts_completed_and_pending() {
    let (app, state) = test_app().await;
    let cookie = register(&app, "alice", "password123").await;
    for text in ["One", "Two", "Three"] {
        send(
            &app,
            post_form("/todo", &format!("new_todo={text}"), Some(&cookie)),
        )
        .await;
    }
    let first = tasks_of(&state, "alice").await[0].id;
    send(&app, post_form(&format!("/complete/{first}"), "", Some(&cookie))).await;

    let page = body_text(send(&app, get("/dashboard", Some(&cookie))).await).await;
    assert!(page.contains(r#"id="completed-count">1<"#));
    assert!(page.contains(r#"id="pending-count">2<"#));
}
