//! Action item handlers, including extract-and-persist.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

use super::{ApiResult, ErrorResponse, db_failure, failure, validation_failure};
use crate::api::AppState;
use crate::db::{
    ActionItem, ActionItemQuery, ActionItemRepository, ActionItemUpdate, Database, Id,
    NewActionItem, NewNote, NoteRepository,
};
use crate::validation::Validate;

/// Longest derived note title, in characters.
pub const DERIVED_TITLE_MAX_CHARS: usize = 80;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActionItemResponse {
    #[schema(example = 1)]
    pub id: Id,
    /// Note this item was extracted from, if any.
    #[schema(example = 1)]
    pub note_id: Option<Id>,
    #[schema(example = "Set up database")]
    pub description: String,
    pub completed: bool,
    pub created_at: String,
    pub completed_at: Option<String>,
}

impl From<ActionItem> for ActionItemResponse {
    fn from(i: ActionItem) -> Self {
        Self {
            id: i.id,
            note_id: i.note_id,
            description: i.description,
            completed: i.completed,
            created_at: i.created_at,
            completed_at: i.completed_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateActionItemRequest {
    #[schema(example = "Write tests", min_length = 1)]
    pub description: String,
    #[serde(default)]
    pub note_id: Option<Id>,
}

/// Partial update. `note_id: null` unlinks the item from its note.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PatchActionItemRequest {
    #[schema(example = "Write more tests", min_length = 1)]
    pub description: Option<String>,
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
    #[schema(value_type = Option<i64>)]
    pub note_id: Option<Option<Id>>,
}

impl From<PatchActionItemRequest> for ActionItemUpdate {
    fn from(req: PatchActionItemRequest) -> Self {
        ActionItemUpdate {
            description: req.description,
            completed: req.completed,
            note_id: req.note_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListActionItemsQuery {
    /// Only items extracted from this note.
    #[param(example = 1)]
    pub note_id: Option<Id>,
    /// Only open (`false`) or done (`true`) items.
    #[param(example = false)]
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtractAndSaveRequest {
    #[schema(example = "- [ ] Set up database\n* implement API extract endpoint")]
    pub text: String,
    /// Store the text as a new note and link the items to it.
    #[serde(default)]
    pub save_note: bool,
    /// Title for the saved note. Defaults to the first non-empty line.
    pub title: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExtractAndSaveResponse {
    /// ID of the saved note, or null when `save_note` was false.
    pub note_id: Option<Id>,
    pub items: Vec<ActionItemResponse>,
}

/// First non-empty line, trimmed and cut to [`DERIVED_TITLE_MAX_CHARS`].
pub fn derive_title(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(DERIVED_TITLE_MAX_CHARS).collect())
        .unwrap_or_default()
}

async fn ensure_note_exists<D: Database>(state: &AppState<D>, note_id: Option<Id>) -> ApiResult<()> {
    if let Some(id) = note_id {
        state.db().notes().get(id).await.map_err(db_failure)?;
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/v1/action-items",
    tag = "action-items",
    params(ListActionItemsQuery),
    responses(
        (status = 200, description = "Matching action items, newest first", body = Vec<ActionItemResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_action_items<D: Database>(
    State(state): State<AppState<D>>,
    Query(query): Query<ListActionItemsQuery>,
) -> ApiResult<Json<Vec<ActionItemResponse>>> {
    let db_query = ActionItemQuery {
        note_id: query.note_id,
        completed: query.completed,
    };
    let items = state
        .db()
        .action_items()
        .list(&db_query)
        .await
        .map_err(db_failure)?;
    Ok(Json(items.into_iter().map(ActionItemResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/action-items",
    tag = "action-items",
    request_body = CreateActionItemRequest,
    responses(
        (status = 201, description = "Action item created", body = ActionItemResponse),
        (status = 404, description = "Linked note not found", body = ErrorResponse),
        (status = 422, description = "Empty description", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_action_item<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<CreateActionItemRequest>,
) -> ApiResult<(StatusCode, Json<ActionItemResponse>)> {
    let new_item = NewActionItem {
        note_id: req.note_id,
        description: req.description,
    };
    new_item.validate().map_err(validation_failure)?;
    ensure_note_exists(&state, new_item.note_id).await?;

    let created = state
        .db()
        .action_items()
        .create(&new_item)
        .await
        .map_err(db_failure)?;

    Ok((StatusCode::CREATED, Json(ActionItemResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/api/v1/action-items/{id}",
    tag = "action-items",
    params(("id" = i64, Path, description = "Action item ID")),
    responses(
        (status = 200, description = "Action item found", body = ActionItemResponse),
        (status = 404, description = "Action item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_action_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<ActionItemResponse>> {
    let item = state.db().action_items().get(id).await.map_err(db_failure)?;
    Ok(Json(ActionItemResponse::from(item)))
}

#[utoipa::path(
    put,
    path = "/api/v1/action-items/{id}/complete",
    tag = "action-items",
    params(("id" = i64, Path, description = "Action item ID")),
    responses(
        (status = 200, description = "Action item marked complete", body = ActionItemResponse),
        (status = 404, description = "Action item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn complete_action_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<ActionItemResponse>> {
    let item = state
        .db()
        .action_items()
        .set_completed(id, true)
        .await
        .map_err(db_failure)?;
    info!("Completed action item {}", id);
    Ok(Json(ActionItemResponse::from(item)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/action-items/{id}",
    tag = "action-items",
    params(("id" = i64, Path, description = "Action item ID")),
    request_body = PatchActionItemRequest,
    responses(
        (status = 200, description = "Action item updated", body = ActionItemResponse),
        (status = 404, description = "Action item or linked note not found", body = ErrorResponse),
        (status = 422, description = "Empty description", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn patch_action_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
    Json(req): Json<PatchActionItemRequest>,
) -> ApiResult<Json<ActionItemResponse>> {
    let update = ActionItemUpdate::from(req);
    update.validate().map_err(validation_failure)?;
    ensure_note_exists(&state, update.note_id.flatten()).await?;

    let item = state
        .db()
        .action_items()
        .update(id, &update)
        .await
        .map_err(db_failure)?;
    Ok(Json(ActionItemResponse::from(item)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/action-items/{id}",
    tag = "action-items",
    params(("id" = i64, Path, description = "Action item ID")),
    responses(
        (status = 204, description = "Action item deleted"),
        (status = 404, description = "Action item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_action_item<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> ApiResult<StatusCode> {
    state
        .db()
        .action_items()
        .delete(id)
        .await
        .map_err(db_failure)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/action-items/extract",
    tag = "action-items",
    request_body = ExtractAndSaveRequest,
    responses(
        (status = 201, description = "Action items extracted and stored", body = ExtractAndSaveResponse),
        (status = 400, description = "Blank text", body = ErrorResponse),
        (status = 422, description = "Empty title", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn extract_action_items<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<ExtractAndSaveRequest>,
) -> ApiResult<(StatusCode, Json<ExtractAndSaveResponse>)> {
    if req.text.trim().is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "text is required"));
    }

    let descriptions = state.extractor().action_items(&req.text);

    let (note_id, items) = if req.save_note {
        let title = req.title.clone().unwrap_or_else(|| derive_title(&req.text));
        let new_note = NewNote::new(title, req.text.clone());
        new_note.validate().map_err(validation_failure)?;

        let (note, items) = state
            .db()
            .action_items()
            .create_with_note(&new_note, &descriptions)
            .await
            .map_err(db_failure)?;
        (Some(note.id), items)
    } else {
        let items = state
            .db()
            .action_items()
            .create_many(None, &descriptions)
            .await
            .map_err(db_failure)?;
        (None, items)
    };

    info!(
        "Extracted {} action item(s){}",
        items.len(),
        note_id.map(|id| format!(" into note {}", id)).unwrap_or_default()
    );

    Ok((
        StatusCode::CREATED,
        Json(ExtractAndSaveResponse {
            note_id,
            items: items.into_iter().map(ActionItemResponse::from).collect(),
        }),
    ))
}
