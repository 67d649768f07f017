//! Error types for completion calls.

use thiserror::Error;

/// Per-item failures surfaced by a completion client.
///
/// Each call is attempted exactly once; retry policy, if any, belongs to
/// the caller. None of these abort a batch.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success status.
    #[error("completion endpoint returned HTTP {status}")]
    Api { status: u16 },
    /// The response body was not valid JSON.
    #[error("failed to decode completion response: {0}")]
    Decode(String),
    /// The response was well-formed but carried no completion text.
    #[error("no content returned")]
    NoContent,
}
