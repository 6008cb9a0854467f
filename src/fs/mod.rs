//! Filesystem side of the server: request-path resolution, directory
//! listings, and content-type inference.

pub mod content_type;
pub mod listing;
pub mod resolve;
