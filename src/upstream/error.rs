//! Error taxonomy for one backend call.

use reqwest::StatusCode;
use thiserror::Error;

/// Boxed transport-level error source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Classified outcome of a failed call. Exactly one variant applies per
/// call; nothing here is retried.
#[derive(Debug, Error)]
pub enum CallError {
    /// The request body failed to serialize before sending.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Connection, dial, or timeout failure before a usable response.
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    /// The backend answered with a status other than 200.
    #[error("backend returned status {status}")]
    BackendStatus {
        status: StatusCode,
        /// Drained body, truncated, kept for diagnosis only.
        body: String,
    },

    /// Status was 200 but the body was not the expected JSON.
    #[error("failed to decode backend response: {0}")]
    Decode(#[source] serde_json::Error),
}
