//! Shared application state injected into the request handler.

use std::path::PathBuf;
use std::sync::Arc;

/// State shared across all requests.
///
/// Cheaply cloneable so Axum can clone it per request without copying the
/// path itself.
#[derive(Clone)]
pub struct AppState {
    /// Canonical serving root, fixed at startup.
    pub root: Arc<PathBuf>,
}

impl AppState {
    /// Create an [`AppState`] serving `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root: Arc::new(root) }
    }
}
