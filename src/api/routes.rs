//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, HealthResponse};
use super::state::AppState;
use super::static_assets::serve_frontend;
use super::v1::{
    self, ActionItemResponse, CreateActionItemRequest, CreateNoteRequest, ErrorResponse,
    ExtractAndSaveRequest, ExtractAndSaveResponse, ExtractRequest, ExtractionResponse,
    NoteResponse, PatchActionItemRequest, UpdateNoteRequest,
};
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "jot API",
        version = "0.1.0",
        description = "Notes with action items extracted from free text",
        license(name = "MIT")
    ),
    paths(
        handlers::health,
        v1::list_notes,
        v1::search_notes,
        v1::get_note,
        v1::create_note,
        v1::update_note,
        v1::delete_note,
        v1::extract_note,
        v1::list_action_items,
        v1::create_action_item,
        v1::get_action_item,
        v1::complete_action_item,
        v1::patch_action_item,
        v1::delete_action_item,
        v1::extract_action_items,
        v1::extract_text,
    ),
    components(
        schemas(
            HealthResponse,
            NoteResponse,
            CreateNoteRequest,
            UpdateNoteRequest,
            ActionItemResponse,
            CreateActionItemRequest,
            PatchActionItemRequest,
            ExtractAndSaveRequest,
            ExtractAndSaveResponse,
            ExtractRequest,
            ExtractionResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "notes", description = "Note management endpoints"),
        (name = "action-items", description = "Action item management endpoints"),
        (name = "extract", description = "Stateless action item extraction")
    )
)]
pub struct ApiDoc;

/// Create the API router.
///
/// Unmatched paths fall through to the embedded frontend, which answers
/// 404 for anything it does not serve.
pub fn create_router<D: Database + 'static>(state: AppState<D>, enable_docs: bool) -> Router {
    let system_routes = Router::new().route("/health", get(handlers::health));

    let note_routes = routes!(D => {
        get "/api/v1/notes" => v1::list_notes,
        post "/api/v1/notes" => v1::create_note,
        get "/api/v1/notes/search" => v1::search_notes,
        get "/api/v1/notes/{id}" => v1::get_note,
        put "/api/v1/notes/{id}" => v1::update_note,
        delete "/api/v1/notes/{id}" => v1::delete_note,
        post "/api/v1/notes/{id}/extract" => v1::extract_note,
    });

    let action_item_routes = routes!(D => {
        get "/api/v1/action-items" => v1::list_action_items,
        post "/api/v1/action-items" => v1::create_action_item,
        post "/api/v1/action-items/extract" => v1::extract_action_items,
        get "/api/v1/action-items/{id}" => v1::get_action_item,
        patch "/api/v1/action-items/{id}" => v1::patch_action_item,
        delete "/api/v1/action-items/{id}" => v1::delete_action_item,
        put "/api/v1/action-items/{id}/complete" => v1::complete_action_item,
    });

    let extract_routes = routes!(D => {
        post "/api/v1/extract" => v1::extract_text,
    });

    let mut router = system_routes
        .merge(note_routes)
        .merge(action_item_routes)
        .merge(extract_routes);

    if enable_docs {
        router = router.merge(Scalar::with_url("/docs", ApiDoc::openapi()));
    }

    router.fallback(serve_frontend).with_state(state)
}
