//! Axum router construction.

use axum::Router;
use tower_http::trace::TraceLayer;

use super::{handlers, state::AppState};

/// Build the application [`Router`]: every path falls through to the
/// static-file handler, with per-request tracing attached.
pub fn build(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::serve_path)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
