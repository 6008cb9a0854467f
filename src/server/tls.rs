//! TLS listener configuration from a combined certificate + key PEM file.
//!
//! The deployment keeps the certificate chain and the private key in a single
//! `localhost.pem`, so both are parsed out of the same byte buffer. The
//! protocol policy is an explicit choice rather than an inherited default:
//! TLS 1.2 and 1.3 only, rustls's default cipher suites from the ring
//! provider, no client certificate verification.

use std::sync::Arc;

use anyhow::{Context, Result};
use rustls::ServerConfig;

/// Build a [`rustls::ServerConfig`] from PEM bytes holding both the
/// certificate chain and the private key.
///
/// # Errors
///
/// Returns an error if the buffer contains no certificate, no private key,
/// or if rustls rejects the pairing.
pub fn build_server_config(pem: &[u8]) -> Result<Arc<ServerConfig>> {
    let certs = rustls_pemfile::certs(&mut std::io::BufReader::new(pem))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to parse TLS certificate chain")?;
    if certs.is_empty() {
        anyhow::bail!("no certificate found in PEM data");
    }

    let key = rustls_pemfile::private_key(&mut std::io::BufReader::new(pem))
        .context("failed to read TLS private key")?
        .context("no private key found in PEM data")?;

    let config = ServerConfig::builder_with_protocol_versions(&[
        &rustls::version::TLS13,
        &rustls::version::TLS12,
    ])
    .with_no_client_auth()
    .with_single_cert(certs, key)
    .context("failed to build rustls ServerConfig")?;

    Ok(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_pem() {
        assert!(build_server_config(b"").is_err());
    }

    #[test]
    fn rejects_garbage_pem() {
        assert!(build_server_config(b"not a pem at all").is_err());
    }

    #[test]
    fn rejects_certificate_without_key() {
        // A lone certificate block; the key lookup must fail.
        let pem = b"-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";
        let err = build_server_config(pem).unwrap_err();
        assert!(err.to_string().contains("no private key"));
    }
}
