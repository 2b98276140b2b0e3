use crate::api::{AppState, create_router};
use crate::cli::api_client::ApiClient;
use crate::cli::commands::note::*;
use crate::cli::error::CliError;
use crate::db::{Database, SqliteDatabase};
use crate::extract::Extractor;
use tokio::net::TcpListener;

// =============================================================================
// Integration Tests - Test CLI commands against real HTTP server
// =============================================================================

/// Spawn a test HTTP server with in-memory database
async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");

    let app = create_router(AppState::new(db, Extractor::default()), false);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (url, handle)
}

fn request(title: &str, content: &str, tags: &[&str]) -> CreateNoteRequest {
    CreateNoteRequest {
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_show_and_list_notes() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = create_note(&api_client, request("Standup", "- Ship release", &["team"]))
        .await
        .expect("create should succeed");
    assert_eq!(output, "✓ Created note: Standup (1)");

    let shown = get_note(&api_client, 1, "json").await.unwrap();
    let note: Note = serde_json::from_str(&shown).unwrap();
    assert_eq!(note.title, "Standup");
    assert_eq!(note.tags, vec!["team".to_string()]);

    let table = get_note(&api_client, 1, "table").await.unwrap();
    assert!(table.contains("Standup"));
    assert!(table.contains("- Ship release"));

    let listed = list_notes(&api_client, "table").await.unwrap();
    assert!(listed.contains("Standup"));
    assert!(listed.contains("team"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_notes_empty() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    assert_eq!(list_notes(&api_client, "table").await.unwrap(), "No notes found.");
    assert_eq!(list_notes(&api_client, "json").await.unwrap(), "[]");
}

#[tokio::test(flavor = "multi_thread")]
async fn search_notes_filters() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));
    create_note(&api_client, request("Sprint Planning", "agenda", &[]))
        .await
        .unwrap();
    create_note(&api_client, request("Groceries", "milk", &[]))
        .await
        .unwrap();

    let json = search_notes(&api_client, "PLANNING", "json").await.unwrap();
    let notes: Vec<Note> = serde_json::from_str(&json).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Sprint Planning");
}

#[tokio::test(flavor = "multi_thread")]
async fn show_missing_note_reports_api_error() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    match get_note(&api_client, 99, "table").await {
        Err(CliError::ApiError { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Note '99' not found");
        }
        other => panic!("expected ApiError, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_note_validation_error() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let err = create_note(&api_client, request("", "body", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::ApiError { status: 422, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_requires_force() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));
    create_note(&api_client, request("Doomed", "bye", &[]))
        .await
        .unwrap();

    assert!(matches!(
        delete_note(&api_client, 1, false).await,
        Err(CliError::Usage { .. })
    ));

    let output = delete_note(&api_client, 1, true).await.unwrap();
    assert_eq!(output, "✓ Deleted note: 1");

    assert!(matches!(
        delete_note(&api_client, 1, true).await,
        Err(CliError::ApiError { status: 404, .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_connection_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api_client = ApiClient::new(Some(format!("http://{}", addr)));
    assert!(matches!(
        list_notes(&api_client, "table").await,
        Err(CliError::ConnectionFailed { .. })
    ));
}
