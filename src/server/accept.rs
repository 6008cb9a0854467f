//! The sequential TLS accept/serve loop.
//!
//! Connections are handled one at a time to completion: there is no shared
//! mutable state across connections and no concurrency tuning, so nothing is
//! spawned per connection. A stalled client blocks subsequent connections;
//! accepted limitation. No timeouts are configured.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{info, warn};

/// Serve `router` over TLS on a pre-bound `listener` until the process is
/// killed. The caller binds so that the address (including an ephemeral
/// port) is known before serving starts.
///
/// # Errors
///
/// Accept-loop failures are fatal. Per-connection failures — a failed
/// handshake, a client that never speaks TLS, an I/O error mid-response —
/// are logged at `warn` and the loop continues.
pub async fn serve(
    listener: TcpListener,
    tls: Arc<rustls::ServerConfig>,
    router: Router,
) -> Result<()> {
    let addr = listener
        .local_addr()
        .context("listener has no local address")?;
    info!(addr = %addr, "listening");

    let acceptor = TlsAcceptor::from(tls);
    let service = TowerToHyperService::new(router);

    loop {
        let (stream, peer) = listener.accept().await.context("accept failed")?;

        // TLS termination happens before any HTTP byte is parsed; a plain
        // TCP client fails here and never reaches the router.
        let tls_stream = match acceptor.accept(stream).await {
            Ok(s) => s,
            Err(e) => {
                warn!(peer = %peer, error = %e, "TLS handshake failed");
                continue;
            }
        };

        // hyper drives the HTTP/1.x keep-alive loop on this connection.
        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
            .serve_connection(TokioIo::new(tls_stream), service.clone())
            .await
        {
            warn!(peer = %peer, error = %e, "connection error");
        }
    }
}
