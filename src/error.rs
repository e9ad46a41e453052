//! Error taxonomy for the fetch pipeline.
//!
//! Keyed-backend failures are always surfaced to the caller. Failures of the
//! aggregation client never leave the keyless adapter: they are folded into a
//! [`PrimaryOutcome`](crate::backends::keyless::PrimaryOutcome) and trigger the
//! feed fallback instead.

use crate::feed::FeedError;
use reqwest::StatusCode;

/// Errors produced while fetching or normalizing articles.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A required credential could not be resolved.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The upstream service answered with a non-success status.
    #[error("upstream returned HTTP {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream body did not have the expected JSON shape.
    #[error("could not decode upstream response: {0}")]
    Decode(String),

    /// A record lacked one of the fields every canonical article must carry.
    #[error("{backend} record is missing required field `{field}`")]
    MissingField {
        field: &'static str,
        backend: &'static str,
    },

    /// The aggregation client could not make sense of the feed it pulled.
    #[error(transparent)]
    Feed(#[from] FeedError),
}

pub type Result<T, E = FetchError> = std::result::Result<T, E>;
