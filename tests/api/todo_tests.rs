//! Todo API Tests

use axum::http::StatusCode;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

use todo_api::application::dto::TodoResponse;
use todo_api::domain::{TodoCriterion, TodoRepository};

use crate::common::{InMemoryTodoRepository, TestApp};

async fn create(app: &TestApp, title: &str, description: Option<&str>) -> TodoResponse {
    let response = app
        .server
        .post("/todo")
        .json(&json!({ "title": title, "description": description }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<TodoResponse>()
}

/// Test listing on an empty store returns an empty array
#[tokio::test]
async fn test_list_todos_empty() {
    let app = TestApp::new();

    let response = app.server.get("/todo").await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
}

/// Test creating a todo returns 201 with defaults filled in
#[tokio::test]
async fn test_create_todo() {
    let app = TestApp::new();
    let description: String = Sentence(3..6).fake();

    let created = create(&app, "Learn Rust", Some(&description)).await;

    assert_eq!(created.title, "Learn Rust");
    assert_eq!(created.description.as_deref(), Some(description.as_str()));
    assert!(!created.completed);
    assert!(created.id > 0);
}

/// Test creating a todo without a description
#[tokio::test]
async fn test_create_todo_without_description() {
    let app = TestApp::new();

    let response = app.server.post("/todo").json(&json!({ "title": "Bare" })).await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert!(body["description"].is_null());
}

/// Test duplicate titles are rejected regardless of other fields
#[tokio::test]
async fn test_create_todo_duplicate_title_fails() {
    let app = TestApp::new();
    create(&app, "Learn Rust", Some("first")).await;

    let response = app
        .server
        .post("/todo")
        .json(&json!({ "title": "Learn Rust", "description": "second" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Todo exists");
}

/// Test missing or empty titles are rejected
#[test_case(json!({}) ; "missing title")]
#[test_case(json!({ "title": "" }) ; "empty title")]
#[test_case(json!({ "title": 42 }) ; "non-string title")]
#[tokio::test]
async fn test_create_todo_invalid_body_fails(body: Value) {
    let app = TestApp::new();

    let response = app.server.post("/todo").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

/// Test titles are only required to be non-empty
#[test_case("   ".to_string() ; "whitespace title")]
#[test_case("x".repeat(256) ; "long title")]
#[tokio::test]
async fn test_create_todo_accepts_any_non_empty_title(title: String) {
    let app = TestApp::new();

    let description = "d".repeat(2000);

    let created = create(&app, &title, Some(&description)).await;

    assert_eq!(created.title, title);
}

/// Test malformed JSON is a 400, not a framework-specific status
#[tokio::test]
async fn test_create_todo_malformed_json_fails() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/todo")
        .text("{ not json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

/// Test fetching a created todo returns the same record
#[tokio::test]
async fn test_get_todo_by_id() {
    let app = TestApp::new();
    let created = create(&app, "Fetch me", None).await;

    let response = app.server.get(&format!("/todo/{}", created.id)).await;

    response.assert_status_ok();
    assert_eq!(response.json::<TodoResponse>(), created);
}

/// Test fetching a missing id is a 404
#[tokio::test]
async fn test_get_todo_not_found() {
    let app = TestApp::new();

    let response = app.server.get("/todo/999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Todo not found.");
}

/// Test invalid ids are rejected before reaching the service
#[test_case("abc" ; "letters")]
#[test_case("1.5" ; "decimal")]
#[tokio::test]
async fn test_invalid_id_is_bad_request(id: &str) {
    let app = TestApp::new();
    let path = format!("/todo/{}", id);

    app.server.get(&path).await.assert_status(StatusCode::BAD_REQUEST);
    app.server
        .patch(&path)
        .json(&json!({ "completed": true }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server.delete(&path).await.assert_status(StatusCode::BAD_REQUEST);
}

/// Test integer ids with no record are a 404, not a 400
#[test_case("0" ; "zero")]
#[test_case("-1" ; "negative")]
#[tokio::test]
async fn test_unknown_integer_id_is_not_found(id: &str) {
    let app = TestApp::new();
    let path = format!("/todo/{}", id);

    app.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    app.server
        .patch(&path)
        .json(&json!({ "completed": true }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}

/// Test updating description/completed only changes those fields
#[tokio::test]
async fn test_update_todo_partial() {
    let app = TestApp::new();
    let created = create(&app, "Patch me", Some("before")).await;

    let response = app
        .server
        .patch(&format!("/todo/{}", created.id))
        .json(&json!({ "completed": true }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<TodoResponse>();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Patch me");
    assert_eq!(updated.description.as_deref(), Some("before"));
    assert!(updated.completed);
    assert_eq!(updated.created_at, created.created_at);
}

/// Test an explicit null clears the description
#[tokio::test]
async fn test_update_todo_null_description_clears_it() {
    let app = TestApp::new();
    let created = create(&app, "Clear me", Some("before")).await;

    let response = app
        .server
        .patch(&format!("/todo/{}", created.id))
        .json(&json!({ "description": null }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<TodoResponse>();
    assert_eq!(updated.description, None);
    assert_eq!(updated.title, "Clear me");
}

/// Test renaming to a free title succeeds
#[tokio::test]
async fn test_update_todo_title() {
    let app = TestApp::new();
    let created = create(&app, "Old title", None).await;

    let response = app
        .server
        .patch(&format!("/todo/{}", created.id))
        .json(&json!({ "title": "New title" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<TodoResponse>().title, "New title");

    let stored = app
        .repo
        .find_one(&TodoCriterion::Title("Old title".into()))
        .await
        .unwrap();
    assert!(stored.is_none());
}

/// Test renaming onto another todo's title fails
#[tokio::test]
async fn test_update_todo_title_collision_fails() {
    let app = TestApp::new();
    create(&app, "Taken", None).await;
    let other = create(&app, "Mine", None).await;

    let response = app
        .server
        .patch(&format!("/todo/{}", other.id))
        .json(&json!({ "title": "Taken" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let unchanged = app.server.get(&format!("/todo/{}", other.id)).await;
    assert_eq!(unchanged.json::<TodoResponse>().title, "Mine");
}

/// Test re-submitting a todo's own title is not a collision
#[tokio::test]
async fn test_update_todo_same_title_succeeds() {
    let app = TestApp::new();
    let created = create(&app, "Stay", None).await;

    let response = app
        .server
        .patch(&format!("/todo/{}", created.id))
        .json(&json!({ "title": "Stay", "description": "now with text" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<TodoResponse>().description.as_deref(),
        Some("now with text")
    );
}

/// Test updating a missing id is a 404
#[tokio::test]
async fn test_update_todo_not_found() {
    let app = TestApp::new();

    let response = app
        .server
        .patch("/todo/7")
        .json(&json!({ "completed": true }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

/// Test deleting succeeds once, then 404s
#[tokio::test]
async fn test_delete_todo_twice() {
    let app = TestApp::new();
    let created = create(&app, "Delete me", None).await;
    let path = format!("/todo/{}", created.id);

    let response = app.server.delete(&path).await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    app.server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}

/// Test list returns todos in id order
#[tokio::test]
async fn test_list_todos_in_creation_order() {
    let app = TestApp::new();
    let first = create(&app, "one", None).await;
    let second = create(&app, "two", None).await;

    let response = app.server.get("/todo").await;

    response.assert_status_ok();
    let todos = response.json::<Vec<TodoResponse>>();
    assert_eq!(todos, vec![first, second]);
}

/// Test storage failures surface as a generic 500
#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let app = TestApp::with_repo(InMemoryTodoRepository::offline());

    let response = app.server.get("/todo").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["message"], "Internal server error");
}

/// Full lifecycle of a single todo over HTTP
#[tokio::test]
async fn test_todo_lifecycle() {
    let app = TestApp::new();
    let body = json!({ "title": "Learn X", "description": "d" });

    let response = app.server.post("/todo").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    let created = response.json::<TodoResponse>();

    app.server
        .post("/todo")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let path = format!("/todo/{}", created.id);
    let fetched = app.server.get(&path).await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<TodoResponse>(), created);

    let listed = app.server.get("/todo").await;
    listed.assert_status_ok();
    assert_eq!(listed.json::<Vec<TodoResponse>>().len(), 1);

    let patched = app
        .server
        .patch(&path)
        .json(&json!({ "description": "Start with services", "completed": true }))
        .await;
    patched.assert_status_ok();
    assert!(patched.json::<TodoResponse>().completed);

    app.server
        .delete(&path)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&path)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
