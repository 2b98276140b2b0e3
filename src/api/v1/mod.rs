//! V1 API handlers.

mod action_items;
mod extract;
mod notes;

#[cfg(test)]
mod notes_test;

pub use action_items::*;
pub use extract::*;
pub use notes::*;

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::DbError;
use crate::validation::ValidationError;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Note '42' not found")]
    pub error: String,
}

pub type ApiFailure = (StatusCode, Json<ErrorResponse>);

pub type ApiResult<T> = Result<T, ApiFailure>;

pub(crate) fn failure(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a storage error: not found → 404, validation → 422, anything else → 500.
pub(crate) fn db_failure(e: DbError) -> ApiFailure {
    match e {
        DbError::NotFound { entity_type, id } => failure(
            StatusCode::NOT_FOUND,
            format!("{} '{}' not found", entity_type, id),
        ),
        DbError::Validation { message } => failure(StatusCode::UNPROCESSABLE_ENTITY, message),
        other => failure(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) fn validation_failure(e: ValidationError) -> ApiFailure {
    failure(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}
