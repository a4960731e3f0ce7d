//! Embedded dashboard frontend.

use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use rust_embed::RustEmbed;

/// Embedded dashboard assets from static/ directory
#[derive(RustEmbed)]
#[folder = "static/"]
struct DashboardAssets;

/// Serves the dashboard HTML page
pub async fn index_handler() -> Response {
    match DashboardAssets::get("index.html") {
        Some(content) => match std::str::from_utf8(&content.data) {
            Ok(html) => Html(html.to_string()).into_response(),
            Err(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Invalid HTML encoding").into_response()
            }
        },
        None => (StatusCode::INTERNAL_SERVER_ERROR, "Dashboard HTML not found").into_response(),
    }
}

/// Serves embedded static assets by path
pub async fn asset_handler(Path(path): Path<String>) -> Response {
    match DashboardAssets::get(&path) {
        Some(content) => {
            let mime = match path.rsplit('.').next() {
                Some("html") => "text/html; charset=utf-8",
                Some("css") => "text/css",
                Some("js") => "application/javascript",
                Some("json") => "application/json",
                Some("svg") => "image/svg+xml",
                _ => "application/octet-stream",
            };
            ([(header::CONTENT_TYPE, mime)], content.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
