//! Per-request error type mapped to HTTP responses.
//!
//! Two error tiers exist in this service. Startup failures (bad bind address,
//! missing PEM) propagate as `anyhow` errors out of `main` and terminate the
//! process. Everything after the accept loop starts is a [`ServeError`]: it
//! affects a single response and the server keeps running.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::fs::listing::escape_html;

/// Error produced while handling one request.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServeError::Forbidden`] → 403
/// - [`ServeError::NotFound`] → 404
/// - [`ServeError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServeError {
    /// The resolved path would escape the serving root, or the file is not
    /// readable by this process.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The request path names nothing under the serving root.
    #[error("not found: {0}")]
    NotFound(String),

    /// An unexpected I/O error occurred while building the response.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServeError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ServeError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServeError::NotFound(_) => StatusCode::NOT_FOUND,
            ServeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<std::io::Error> for ServeError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => ServeError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => ServeError::Forbidden(e.to_string()),
            _ => ServeError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let body = error_page(status, &self.to_string());
        (
            status,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

/// Render the small HTML body sent with every error response.
pub(crate) fn error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown");
    format!(
        "<!DOCTYPE HTML>\n\
         <html lang=\"en\">\n\
         <head>\n<meta charset=\"utf-8\">\n<title>Error response</title>\n</head>\n\
         <body>\n\
         <h1>Error response</h1>\n\
         <p>Error code: {code}</p>\n\
         <p>Message: {} ({reason}).</p>\n\
         </body>\n\
         </html>\n",
        escape_html(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServeError::Forbidden("x".into()).http_status(), 403);
        assert_eq!(ServeError::NotFound("x".into()).http_status(), 404);
        assert_eq!(ServeError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn display_includes_message() {
        let e = ServeError::NotFound("/missing.html".into());
        assert!(e.to_string().contains("/missing.html"));
    }

    #[test]
    fn io_not_found_maps_to_404() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        assert_eq!(ServeError::from(io).http_status(), 404);
    }

    #[test]
    fn io_permission_denied_maps_to_403() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(ServeError::from(io).http_status(), 403);
    }

    #[test]
    fn error_page_escapes_message() {
        let page = error_page(StatusCode::NOT_FOUND, "/<script>");
        assert!(page.contains("Error code: 404"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
