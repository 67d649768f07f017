//! Durable request/response logging for promptdeck.

pub mod error;
pub mod model;
pub mod provider;

/// Store error type.
pub use error::StoreError;
/// Persisted row model.
pub use model::ResponseRecord;
/// Store interface and default SQLite implementation.
pub use provider::{ResponseStore, SqliteResponseStore};
