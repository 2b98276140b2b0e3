//! Tests for OpenLibraryClient against a local stand-in server.

use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use crate::books::{BookError, IdType, OpenLibraryClient};
use crate::config::BooksConfig;

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
    limit: usize,
}

async fn search(Query(query): Query<SearchQuery>) -> impl IntoResponse {
    if query.q == "nothing" {
        return Json(json!({ "numFound": 0, "docs": [] }));
    }
    let docs: Vec<_> = (0..query.limit + 2)
        .map(|i| {
            json!({
                "title": format!("{} {}", query.q, i),
                "author_name": ["Tolkien"],
                "first_publish_year": 1950 + i,
                "key": format!("/works/OL{}W", i)
            })
        })
        .collect();
    Json(json!({ "numFound": docs.len(), "docs": docs }))
}

async fn work(Path(file): Path<String>) -> impl IntoResponse {
    match file.as_str() {
        "OL1W.json" => Json(json!({
            "title": "The Fellowship of the Ring",
            "description": { "type": "/type/text", "value": "Frodo leaves." },
            "subjects": ["Fantasy", "Quests"]
        }))
        .into_response(),
        "BROKEN.json" => (StatusCode::OK, "not json").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn isbn(Path(file): Path<String>) -> impl IntoResponse {
    let id = file.trim_end_matches(".json");
    Redirect::permanent(&format!("/books/{}.json", id))
}

async fn edition(Path(file): Path<String>) -> impl IntoResponse {
    Json(json!({ "title": format!("Edition {}", file.trim_end_matches(".json")) }))
}

async fn spawn_catalog() -> String {
    let app = Router::new()
        .route("/search.json", get(search))
        .route("/works/{file}", get(work))
        .route("/isbn/{file}", get(isbn))
        .route("/books/{file}", get(edition));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: String) -> OpenLibraryClient {
    OpenLibraryClient::new(&BooksConfig {
        base_url,
        timeout: Duration::from_secs(5),
    })
    .expect("client should build")
}

#[tokio::test(flavor = "multi_thread")]
async fn search_renders_limited_lines() {
    let client = client(spawn_catalog().await);

    let text = client.search_text("hobbit", 3).await;
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "- hobbit 0 by Tolkien (1950) [Work ID: OL0W]");
}

#[tokio::test(flavor = "multi_thread")]
async fn search_without_hits() {
    let client = client(spawn_catalog().await);
    assert_eq!(
        client.search_text("nothing", 5).await,
        "No books found for that query."
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn work_details_are_formatted() {
    let client = client(spawn_catalog().await);

    let text = client.details_text("OL1W", IdType::Work).await;
    assert_eq!(
        text,
        "Title: The Fellowship of the Ring\n\nDescription: Frodo leaves.\n\nSubjects: Fantasy, Quests"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn isbn_lookup_follows_redirects() {
    let client = client(spawn_catalog().await);

    let details = client
        .details("9780618640157", IdType::Isbn)
        .await
        .expect("redirect should be followed");
    assert_eq!(details.title.as_deref(), Some("Edition 9780618640157"));
}

#[tokio::test(flavor = "multi_thread")]
async fn http_status_errors_degrade_to_text() {
    let client = client(spawn_catalog().await);

    let err = client.details("MISSING", IdType::Work).await.unwrap_err();
    assert!(matches!(err, BookError::Status { status: 404 }));

    assert_eq!(
        client.details_text("MISSING", IdType::Work).await,
        "Error: API returned status 404"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn undecodable_body_is_internal_error() {
    let client = client(spawn_catalog().await);

    let text = client.details_text("BROKEN", IdType::Work).await;
    assert!(text.starts_with("Error: Internal error: "), "{}", text);
}

#[tokio::test(flavor = "multi_thread")]
async fn connection_failures_degrade_to_text() {
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(format!("http://{}", addr));
    let text = client.search_text("anything", 5).await;
    assert!(text.starts_with("Error: Connection error: "), "{}", text);
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = OpenLibraryClient::new(&BooksConfig {
        base_url: "not a url".to_string(),
        timeout: Duration::from_secs(1),
    })
    .unwrap_err();
    assert!(matches!(err, BookError::Client { .. }));
}

#[test]
fn id_type_deserializes_lowercase() {
    let id: IdType = serde_json::from_str(r#""isbn""#).unwrap();
    assert_eq!(id, IdType::Isbn);
    assert_eq!(IdType::default(), IdType::Work);
}
