//! HTTPS server: TLS termination, routing, and request handling.
//!
//! # Responsibilities
//! - Build the rustls config from the combined certificate + key PEM file.
//! - Define the Axum router that maps every request path onto the serving root.
//! - Run the sequential accept/serve loop.

pub mod accept;
pub mod handlers;
pub mod router;
pub mod state;
pub mod tls;
