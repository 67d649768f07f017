//! Persisted response record model.

use serde::{Deserialize, Serialize};

/// One appended request/response row.
///
/// Rows are append-only; nothing ever updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseRecord {
    /// Auto-incremented row id.
    pub id: i64,
    /// UTC timestamp the row was written, `%Y-%m-%d %H:%M:%S`.
    pub created_at: String,
    /// Sanitized user instruction that produced the completion.
    pub input_data: String,
    /// JSON-encoded completion payload.
    pub response_json: String,
}
