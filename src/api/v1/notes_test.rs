//! Integration tests for Note API endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, create_router};
use crate::db::{Database, NewNote, NoteRepository, SqliteDatabase};
use crate::extract::Extractor;

/// Create a test app with an in-memory database
async fn test_app() -> axum::Router {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let state = AppState::new(db, Extractor::default());
    create_router(state, false)
}

/// Helper to parse JSON response body
async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> axum::response::Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn create_note(app: &axum::Router, title: &str, content: &str) -> Value {
    let response = send(
        app,
        "POST",
        "/api/v1/notes",
        Some(json!({"title": title, "content": content})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_notes_starts_empty() {
    let app = test_app().await;

    let response = send(&app, "GET", "/api/v1/notes", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_note() {
    let app = test_app().await;

    let response = send(
        &app,
        "POST",
        "/api/v1/notes",
        Some(json!({"title": "Standup", "content": "- [ ] Set up database", "tags": ["b", "a", "b"]})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["title"], "Standup");
    assert_eq!(created["content"], "- [ ] Set up database");
    assert_eq!(created["tags"], json!(["a", "b"]));
    let id = created["id"].as_i64().unwrap();

    let response = send(&app, "GET", &format!("/api/v1/notes/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_body(response).await;
    assert_eq!(fetched, created);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_note_rejects_empty_fields() {
    let app = test_app().await;

    let response = send(
        &app,
        "POST",
        "/api/v1/notes",
        Some(json!({"title": "", "content": "body"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("title:"));

    let response = send(
        &app,
        "POST",
        "/api/v1/notes",
        Some(json!({"title": "Title", "content": ""})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("content:"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_notes_newest_first() {
    let app = test_app().await;
    create_note(&app, "first", "one").await;
    create_note(&app, "second", "two").await;

    let response = send(&app, "GET", "/api/v1/notes", None).await;
    let body = json_body(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_missing_note_is_404() {
    let app = test_app().await;

    let response = send(&app, "GET", "/api/v1/notes/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Note '999' not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_note_is_partial() {
    let app = test_app().await;
    let created = create_note(&app, "Original", "Body stays").await;
    let id = created["id"].as_i64().unwrap();

    let response = send(
        &app,
        "PUT",
        &format!("/api/v1/notes/{}", id),
        Some(json!({"title": "Renamed"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["content"], "Body stays");

    let response = send(
        &app,
        "PUT",
        &format!("/api/v1/notes/{}", id),
        Some(json!({"content": ""})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = send(
        &app,
        "PUT",
        "/api/v1/notes/999",
        Some(json!({"title": "Ghost"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_note() {
    let app = test_app().await;
    let created = create_note(&app, "Doomed", "bye").await;
    let id = created["id"].as_i64().unwrap();

    let response = send(&app, "DELETE", &format!("/api/v1/notes/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &format!("/api/v1/notes/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", &format!("/api/v1/notes/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn search_matches_title_or_content_case_insensitively() {
    let app = test_app().await;
    create_note(&app, "Sprint Planning", "agenda").await;
    create_note(&app, "Retro", "discuss PLANNING poker").await;
    create_note(&app, "Groceries", "milk").await;

    let response = send(&app, "GET", "/api/v1/notes/search?q=planning", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Retro", "Sprint Planning"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn search_without_query_returns_all() {
    let app = test_app().await;
    create_note(&app, "One", "a").await;
    create_note(&app, "Two", "b").await;

    for uri in ["/api/v1/notes/search", "/api/v1/notes/search?q=", "/api/v1/notes/search?q=%20"] {
        let response = send(&app, "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 2, "{}", uri);
    }
}

// =============================================================================
// Extraction from a stored note
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn extract_note_reports_without_persisting() {
    let app = test_app().await;
    let created = create_note(
        &app,
        "Release",
        "Ship it!\nTODO: write notes #docs #release\njust a remark",
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = send(&app, "POST", &format!("/api/v1/notes/{}/extract", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["action_items"],
        json!(["Ship it!", "TODO: write notes #docs #release"])
    );
    assert_eq!(body["tags"], json!(["docs", "release"]));

    let items = send(&app, "GET", &format!("/api/v1/action-items?note_id={}", id), None).await;
    assert_eq!(json_body(items).await, json!([]));

    let note = send(&app, "GET", &format!("/api/v1/notes/{}", id), None).await;
    assert_eq!(json_body(note).await["tags"], json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn extract_note_with_apply_persists_items_and_tags() {
    let app = test_app().await;
    let created = create_note(&app, "Release", "Ship it!\nShip it!\n#release").await;
    let id = created["id"].as_i64().unwrap();

    let response = send(
        &app,
        "POST",
        &format!("/api/v1/notes/{}/extract?apply=true", id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    // Keyword rules keep duplicates.
    assert_eq!(body["action_items"].as_array().unwrap().len(), 2);

    let items = send(&app, "GET", &format!("/api/v1/action-items?note_id={}", id), None).await;
    let items = json_body(items).await;
    assert_eq!(items.as_array().unwrap().len(), 2);
    assert!(items.as_array().unwrap().iter().all(|i| i["note_id"] == id));

    let note = send(&app, "GET", &format!("/api/v1/notes/{}", id), None).await;
    assert_eq!(json_body(note).await["tags"], json!(["release"]));
}

#[tokio::test(flavor = "multi_thread")]
async fn extract_missing_note_is_404() {
    let app = test_app().await;

    let response = send(&app, "POST", "/api/v1/notes/42/extract", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn extract_note_with_apply_is_all_or_nothing() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let note = db
        .notes()
        .create(&NewNote::new("Release", "Ship it!\n#release"))
        .await
        .unwrap();
    sqlx::query(
        "CREATE TRIGGER reject_note_updates BEFORE UPDATE ON note \
         BEGIN SELECT RAISE(ABORT, 'rejected'); END",
    )
    .execute(db.pool())
    .await
    .unwrap();
    let app = create_router(AppState::new(db, Extractor::default()), false);

    let response = send(
        &app,
        "POST",
        &format!("/api/v1/notes/{}/extract?apply=true", note.id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let items = send(&app, "GET", "/api/v1/action-items", None).await;
    assert_eq!(json_body(items).await, json!([]));
    let stored = send(&app, "GET", &format!("/api/v1/notes/{}", note.id), None).await;
    assert_eq!(json_body(stored).await["tags"], json!([]));
}
