//! The request handler: maps GET/HEAD requests onto the serving root.
//!
//! Dispatch on the resolved path:
//! - regular file → 200 with streamed bytes, inferred content type, exact
//!   content length;
//! - directory without a trailing slash → 301 redirect adding the slash;
//! - directory with `index.html`/`index.htm` → the index file;
//! - directory otherwise → auto-generated HTML listing;
//! - anything else → 404.
//!
//! Methods other than GET and HEAD receive 501. HEAD responses carry the
//! same headers as GET with an empty body.

use std::path::Path;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

use super::state::AppState;
use crate::error::{error_page, ServeError};
use crate::fs::{content_type, listing, resolve};

const INDEX_NAMES: [&str; 2] = ["index.html", "index.htm"];

/// Fallback handler for every request path.
pub async fn serve_path(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        let body = error_page(StatusCode::NOT_IMPLEMENTED, &format!("unsupported method ({method})"));
        return (
            StatusCode::NOT_IMPLEMENTED,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            body,
        )
            .into_response();
    }
    let head_only = method == Method::HEAD;

    let path = match resolve::resolve(&state.root, uri.path()) {
        Ok(p) => p,
        Err(e) => return e.into_response(),
    };

    let meta = match tokio::fs::metadata(&path).await {
        Ok(m) => m,
        Err(e) => return ServeError::from(e).into_response(),
    };

    if meta.is_dir() {
        // Directories are addressed with a trailing slash so that relative
        // hrefs in the listing resolve correctly.
        if !uri.path().ends_with('/') {
            let location = format!("{}/", uri.path());
            return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)])
                .into_response();
        }
        for index in INDEX_NAMES {
            let candidate = path.join(index);
            if let Ok(m) = tokio::fs::metadata(&candidate).await {
                if m.is_file() {
                    return serve_file(&candidate, m.len(), head_only).await;
                }
            }
        }
        return serve_listing(&path, uri.path(), head_only).await;
    }

    if meta.is_file() {
        return serve_file(&path, meta.len(), head_only).await;
    }

    // Sockets, FIFOs, and other non-servable entries.
    ServeError::NotFound(uri.path().to_owned()).into_response()
}

/// Respond with the file's bytes, streamed from disk.
async fn serve_file(path: &Path, len: u64, head_only: bool) -> Response {
    let body = if head_only {
        Body::empty()
    } else {
        match tokio::fs::File::open(path).await {
            Ok(file) => Body::from_stream(ReaderStream::new(file)),
            Err(e) => return ServeError::from(e).into_response(),
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type::from_path(path).to_owned()),
            (header::CONTENT_LENGTH, len.to_string()),
        ],
        body,
    )
        .into_response()
}

/// Respond with the auto-generated listing for `dir`.
async fn serve_listing(dir: &Path, request_path: &str, head_only: bool) -> Response {
    let html = match listing::render(dir, request_path).await {
        Ok(h) => h,
        Err(e) => return e.into_response(),
    };
    let len = html.len();
    let body = if head_only { Body::empty() } else { Body::from(html) };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_owned()),
            (header::CONTENT_LENGTH, len.to_string()),
        ],
        body,
    )
        .into_response()
}
