//! Embedded browser UI.
//!
//! In release mode the files under `frontend/` are compiled into the binary;
//! in debug mode rust-embed reads them from disk at request time.

use axum::{
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "frontend/"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
struct FrontendAssets;

const STATIC_PREFIX: &str = "static/";

/// Serve `/` as `index.html` and `/static/{file}` from the embedded folder.
///
/// Mounted as the router fallback, so unknown API paths land here too and
/// get a plain 404.
pub async fn serve_frontend(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    let asset_path = if path.is_empty() || path == "index.html" {
        "index.html"
    } else if let Some(file) = path.strip_prefix(STATIC_PREFIX) {
        file
    } else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match FrontendAssets::get(asset_path) {
        Some(content) => {
            let mime = mime_guess::from_path(asset_path).first_or_octet_stream();
            let cache = if asset_path == "index.html" {
                "no-cache"
            } else {
                "public, max-age=3600"
            };
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime.as_ref().to_string()),
                    (header::CACHE_CONTROL, cache.to_string()),
                ],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
