//! Error types for the journal server.
//!
//! None of these ever stop the publisher loop or the router: roster errors
//! degrade to an empty snapshot, tag errors become a `500` for the caller and
//! asset errors are replaced with fallback bytes at startup.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;

/// The host's roster could not be read this tick.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("host session object is unavailable")]
    Unavailable,

    #[error("host torn down mid-read: {0}")]
    TornDown(String),
}

/// A tag write that was rejected before touching the note book.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("malformed tag body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unreadable tag body: {0}")]
    Body(#[from] BytesRejection),
}

impl IntoResponse for TagError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read asset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
