//! Landing page and dashboard, embedded from `public/` at build time.

use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use include_dir::{include_dir, Dir};

static PUBLIC: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/../../public");

/// `GET /`
pub async fn index() -> Response {
    serve_file("index.html")
}

/// `GET /dashboard`
pub async fn dashboard() -> Response {
    serve_file("dashboard.html")
}

/// Fallback for every other path: serve a matching embedded asset or 404.
pub async fn asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    if path.is_empty() {
        return serve_file("index.html");
    }
    serve_file(path)
}

fn serve_file(path: &str) -> Response {
    match PUBLIC.get_file(path) {
        Some(file) => (
            [(header::CONTENT_TYPE, content_type(path))],
            file.contents(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

fn content_type(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
