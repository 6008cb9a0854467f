//! `static-tls-svc` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the tracing subscriber.
//! 3. Load the combined certificate + key PEM and build the rustls config.
//! 4. Build the Axum router over the serving root.
//! 5. Bind the listener and run the accept loop until the process is killed.
//!
//! Any failure before step 5 is fatal: the error chain is printed and the
//! process exits non-zero. There is no retry and no supervisor.

mod config;
mod error;
mod fs;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. TLS material
    // -----------------------------------------------------------------------
    let pem = std::fs::read(&cfg.tls_pem_path)
        .with_context(|| format!("failed to read TLS PEM file: {}", cfg.tls_pem_path))?;
    let tls = server::tls::build_server_config(&pem)?;

    // -----------------------------------------------------------------------
    // 4. Router
    // -----------------------------------------------------------------------
    let root = cfg.canonical_root()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        root = %root.display(),
        "static-tls-svc starting"
    );
    let router = server::router::build(AppState::new(root));

    // -----------------------------------------------------------------------
    // 5. Serve
    // -----------------------------------------------------------------------
    let addr = cfg.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    server::accept::serve(listener, tls, router).await
}
