//! Chat-completion client for the promptdeck gateway.

mod client;
mod error;

/// Completion client interface and HTTP implementation.
pub use client::{Completer, DEFAULT_TIMEOUT_SECS, HttpCompletionClient};
/// Per-item completion failures.
pub use error::CompletionError;
