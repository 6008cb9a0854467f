//! Configuration loading and validation.
//!
//! All values are read from environment variables at startup; every field has
//! a default, and with nothing set the server binds loopback port 443, reads
//! `./localhost.pem`, and serves the working directory. The process exits
//! with a clear error message if a value cannot be parsed.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address the server binds. Loopback by default; the server is not
    /// meant to be exposed beyond the local host.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port the HTTPS server listens on.
    #[serde(default = "default_tls_port")]
    pub tls_port: u16,

    /// PEM file holding both the certificate chain and the private key.
    #[serde(default = "default_tls_pem_path")]
    pub tls_pem_path: String,

    /// Directory served as the root of the HTTP namespace.
    #[serde(default = "default_serve_root")]
    pub serve_root: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1".into()
}
fn default_tls_port() -> u16 {
    443
}
fn default_tls_pem_path() -> String {
    "./localhost.pem".into()
}
fn default_serve_root() -> String {
    ".".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.tls_pem_path, "TLS_PEM_PATH")?;
        ensure_non_empty(&self.serve_root, "SERVE_ROOT")?;
        self.bind_addr
            .parse::<IpAddr>()
            .with_context(|| format!("BIND_ADDR is not a valid IP address: {}", self.bind_addr))?;
        Ok(())
    }

    /// Socket address the listener binds.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR is not a valid IP address: {}", self.bind_addr))?;
        Ok(SocketAddr::new(ip, self.tls_port))
    }

    /// Canonical serving root. Startup-fatal if the directory does not exist.
    pub fn canonical_root(&self) -> Result<PathBuf> {
        let root = PathBuf::from(&self.serve_root)
            .canonicalize()
            .with_context(|| format!("serving root does not exist: {}", self.serve_root))?;
        if !root.is_dir() {
            anyhow::bail!("serving root is not a directory: {}", root.display());
        }
        Ok(root)
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            bind_addr: default_bind_addr(),
            tls_port: default_tls_port(),
            tls_pem_path: default_tls_pem_path(),
            serve_root: default_serve_root(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_bind_addr(), "127.0.0.1");
        assert_eq!(default_tls_port(), 443);
        assert_eq!(default_tls_pem_path(), "./localhost.pem");
        assert_eq!(default_serve_root(), ".");
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn default_config_validates() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_pem_path() {
        let mut cfg = base();
        cfg.tls_pem_path = "  ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_serve_root() {
        let mut cfg = base();
        cfg.serve_root = "".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_bind_addr() {
        let mut cfg = base();
        cfg.bind_addr = "not-an-ip".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn socket_addr_combines_addr_and_port() {
        let addr = base().socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:443");
    }

    #[test]
    fn canonical_root_rejects_missing_directory() {
        let mut cfg = base();
        cfg.serve_root = "/definitely/not/a/real/dir".into();
        assert!(cfg.canonical_root().is_err());
    }
}
