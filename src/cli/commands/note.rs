use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, format_tags, truncate_with_ellipsis};
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

#[derive(Debug, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Tabled)]
pub(crate) struct NoteDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Title")]
    pub(crate) title: String,
    #[tabled(rename = "Tags")]
    pub(crate) tags: String,
    #[tabled(rename = "Created")]
    pub(crate) created_at: String,
}

impl From<&Note> for NoteDisplay {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: truncate_with_ellipsis(&note.title, 50),
            tags: format_tags(&note.tags),
            created_at: note.created_at.clone(),
        }
    }
}

fn render_list(notes: &[Note], format: &str) -> CliResult<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(notes)?),
        _ => Ok(format_table(notes)),
    }
}

pub(crate) fn format_table(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes found.".to_string();
    }

    let display_notes: Vec<NoteDisplay> = notes.iter().map(|n| n.into()).collect();
    let mut table = Table::new(display_notes);
    apply_table_style(&mut table);
    table.to_string()
}

/// List all notes, newest first
pub async fn list_notes(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let response = api_client.get("/api/v1/notes").send().await?;
    let notes: Vec<Note> = ApiClient::handle_response(response).await?;
    render_list(&notes, format)
}

/// Case-insensitive search over titles and bodies
pub async fn search_notes(api_client: &ApiClient, query: &str, format: &str) -> CliResult<String> {
    let response = api_client
        .get("/api/v1/notes/search")
        .query(&[("q", query)])
        .send()
        .await?;
    let notes: Vec<Note> = ApiClient::handle_response(response).await?;
    render_list(&notes, format)
}

/// Get a single note by ID
pub async fn get_note(api_client: &ApiClient, id: i64, format: &str) -> CliResult<String> {
    let response = api_client
        .get(&format!("/api/v1/notes/{}", id))
        .send()
        .await?;

    let note: Note = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&note)?),
        _ => {
            use tabled::builder::Builder;

            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            builder.push_record(["ID", &note.id.to_string()]);
            builder.push_record(["Title", &note.title]);
            builder.push_record(["Content", &truncate_with_ellipsis(&note.content, 200)]);
            builder.push_record(["Tags", &format_tags(&note.tags)]);
            builder.push_record(["Created", &note.created_at]);
            builder.push_record(["Updated", &note.updated_at]);

            let mut table = builder.build();
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}

/// Create a new note
pub async fn create_note(api_client: &ApiClient, request: CreateNoteRequest) -> CliResult<String> {
    let response = api_client
        .post("/api/v1/notes")
        .json(&request)
        .send()
        .await?;

    let note: Note = ApiClient::handle_response(response).await?;
    Ok(format!("✓ Created note: {} ({})", note.title, note.id))
}

/// Delete a note (requires --force flag for safety)
pub async fn delete_note(api_client: &ApiClient, id: i64, force: bool) -> CliResult<String> {
    if !force {
        return Err(CliError::Usage {
            message: "Delete operation requires --force flag. This action is destructive and cannot be undone.".to_string(),
        });
    }

    let response = api_client
        .delete(&format!("/api/v1/notes/{}", id))
        .send()
        .await?;
    ApiClient::handle_empty(response).await?;
    Ok(format!("✓ Deleted note: {}", id))
}
