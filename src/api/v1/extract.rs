//! Transient extraction: nothing is persisted.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use super::{ApiResult, ErrorResponse};
use crate::api::AppState;
use crate::db::Database;
use crate::extract::{ExtractMode, Extraction};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtractRequest {
    #[schema(example = "- [ ] Set up database\nShip it!\n#release")]
    pub text: String,
    /// `lines` (default) or `keywords`.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "lines")]
    pub mode: ExtractMode,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExtractionResponse {
    #[schema(example = json!(["Set up database", "Ship it!"]))]
    pub action_items: Vec<String>,
    /// Unique tags without the leading `#`, sorted.
    #[schema(example = json!(["release"]))]
    pub tags: Vec<String>,
}

impl From<Extraction> for ExtractionResponse {
    fn from(e: Extraction) -> Self {
        Self {
            action_items: e.action_items,
            tags: e.tags.into_iter().collect(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/extract",
    tag = "extract",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Action items and tags found in the text", body = ExtractionResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn extract_text<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<ExtractRequest>,
) -> ApiResult<Json<ExtractionResponse>> {
    let extraction = state.extractor().extract(&req.text, req.mode);
    debug!(
        "Found {} action item(s) in {} bytes using {} mode",
        extraction.action_items.len(),
        req.text.len(),
        req.mode
    );
    Ok(Json(ExtractionResponse::from(extraction)))
}
