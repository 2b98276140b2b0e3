//! Note management handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

use super::{ApiResult, ErrorResponse, ExtractionResponse, db_failure, validation_failure};
use crate::api::AppState;
use crate::db::{ActionItemRepository, Database, Id, NewNote, Note, NoteRepository, NoteUpdate};
use crate::extract::Extraction;
use crate::validation::Validate;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = "Standup")]
    pub title: String,
    #[schema(example = "- [ ] Set up database\nTODO: write tests #backend")]
    pub content: String,
    #[schema(example = json!(["backend"]))]
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Note> for NoteResponse {
    fn from(n: Note) -> Self {
        Self {
            id: n.id,
            title: n.title,
            content: n.content,
            tags: n.tags,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    #[schema(example = "Standup", min_length = 1)]
    pub title: String,
    #[schema(example = "- [ ] Set up database", min_length = 1)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<CreateNoteRequest> for NewNote {
    fn from(req: CreateNoteRequest) -> Self {
        NewNote {
            title: req.title,
            content: req.content,
            tags: req.tags,
        }
    }
}

/// Partial update. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    #[schema(example = "Renamed", min_length = 1)]
    pub title: Option<String>,
    #[schema(example = "New body", min_length = 1)]
    pub content: Option<String>,
    /// Replaces the tag list when present.
    pub tags: Option<Vec<String>>,
}

impl From<UpdateNoteRequest> for NoteUpdate {
    fn from(req: UpdateNoteRequest) -> Self {
        NoteUpdate {
            title: req.title,
            content: req.content,
            tags: req.tags,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchNotesQuery {
    /// Case-insensitive substring of title or content. Blank returns all notes.
    #[param(example = "planning")]
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ExtractNoteQuery {
    /// Persist the found action items and merge tags into the note.
    #[serde(default)]
    pub apply: bool,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/notes",
    tag = "notes",
    responses(
        (status = 200, description = "All notes, newest first", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_notes<D: Database>(
    State(state): State<AppState<D>>,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    let notes = state.db().notes().list().await.map_err(db_failure)?;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/notes/search",
    tag = "notes",
    params(SearchNotesQuery),
    responses(
        (status = 200, description = "Matching notes, newest first", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn search_notes<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<SearchNotesQuery>,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    let q = query.q.unwrap_or_default();
    let notes = state.db().notes().search(&q).await.map_err(db_failure)?;
    Ok(Json(notes.into_iter().map(NoteResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/notes/{id}",
    tag = "notes",
    params(("id" = i64, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_note<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<NoteResponse>> {
    let note = state.db().notes().get(id).await.map_err(db_failure)?;
    Ok(Json(NoteResponse::from(note)))
}

#[utoipa::path(
    post,
    path = "/api/v1/notes",
    tag = "notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 422, description = "Empty title or content", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_note<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteResponse>)> {
    let new_note = NewNote::from(req);
    new_note.validate().map_err(validation_failure)?;

    let created = state
        .db()
        .notes()
        .create(&new_note)
        .await
        .map_err(db_failure)?;

    info!("Created note {}", created.id);
    Ok((StatusCode::CREATED, Json(NoteResponse::from(created))))
}

#[utoipa::path(
    put,
    path = "/api/v1/notes/{id}",
    tag = "notes",
    params(("id" = i64, Path, description = "Note ID")),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 422, description = "Empty title or content", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_note<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    let update = NoteUpdate::from(req);
    update.validate().map_err(validation_failure)?;

    let note = state
        .db()
        .notes()
        .update(id, &update)
        .await
        .map_err(db_failure)?;

    Ok(Json(NoteResponse::from(note)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/notes/{id}",
    tag = "notes",
    params(("id" = i64, Path, description = "Note ID")),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_note<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> ApiResult<StatusCode> {
    state.db().notes().delete(id).await.map_err(db_failure)?;
    info!("Deleted note {}", id);
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/notes/{id}/extract",
    tag = "notes",
    params(("id" = i64, Path, description = "Note ID"), ExtractNoteQuery),
    responses(
        (status = 200, description = "Action items and tags found in the note", body = ExtractionResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn extract_note<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
    Query(query): Query<ExtractNoteQuery>,
) -> ApiResult<Json<ExtractionResponse>> {
    let note = state.db().notes().get(id).await.map_err(db_failure)?;
    let extraction: Extraction = state.extractor().keywords(&note.content);

    if query.apply {
        state
            .db()
            .action_items()
            .apply_to_note(note.id, &extraction.action_items, &extraction.tags)
            .await
            .map_err(db_failure)?;
        info!(
            "Applied {} action item(s) and {} tag(s) to note {}",
            extraction.action_items.len(),
            extraction.tags.len(),
            note.id
        );
    }

    Ok(Json(ExtractionResponse::from(extraction)))
}
