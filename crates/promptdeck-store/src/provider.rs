//! Response store implementations.

use crate::error::StoreError;
use crate::model::ResponseRecord;
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use std::path::Path;

/// Schema created lazily on first open; `IF NOT EXISTS` makes duplicate
/// creation by independent processes a no-op.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS responses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    datetime TEXT NOT NULL,
    input_data TEXT NOT NULL,
    gpt_response TEXT NOT NULL
)";

/// Append-only log of request/response pairs.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Append one immutable row.
    async fn append(&self, input_data: &str, response_json: &str) -> Result<(), StoreError>;

    /// Most recent rows, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<ResponseRecord>, StoreError>;

    /// Total number of appended rows.
    async fn len(&self) -> Result<u64, StoreError>;
}

/// SQLite-backed response store.
///
/// The connection sits behind a mutex so writes from one process are
/// serialized; SQLite itself isolates independent processes.
pub struct SqliteResponseStore {
    conn: Mutex<Connection>,
}

impl SqliteResponseStore {
    /// Open (or create) the backing database and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch(SCHEMA)?;
        info!("opened response store (path={})", path.as_ref().display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store for tests and ephemeral runs.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl ResponseStore for SqliteResponseStore {
    async fn append(&self, input_data: &str, response_json: &str) -> Result<(), StoreError> {
        let created_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO responses (datetime, input_data, gpt_response) VALUES (?1, ?2, ?3)",
            params![created_at, input_data, response_json],
        )?;
        debug!(
            "appended response row (input_len={}, response_len={})",
            input_data.len(),
            response_json.len()
        );
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ResponseRecord>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, datetime, input_data, gpt_response FROM responses
             ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(ResponseRecord {
                id: row.get(0)?,
                created_at: row.get(1)?,
                input_data: row.get(2)?,
                response_json: row.get(3)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    async fn len(&self) -> Result<u64, StoreError> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::{ResponseStore, SqliteResponseStore};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[tokio::test]
    async fn append_and_recent_round_trip() {
        let store = SqliteResponseStore::open_in_memory().expect("store");
        store
            .append("a poem about rust", r#"{"response":"Ode"}"#)
            .await
            .expect("append one");
        store
            .append("a poem about tests", r#"{"response":"Assert"}"#)
            .await
            .expect("append two");

        let records = store.recent(10).await.expect("recent");
        assert_eq!(records.len(), 2);
        // newest first
        assert_eq!(records[0].input_data, "a poem about tests");
        assert_eq!(records[1].input_data, "a poem about rust");
        assert_eq!(records[1].response_json, r#"{"response":"Ode"}"#);
        assert!(records[0].id > records[1].id);
        assert_eq!(store.len().await.expect("len"), 2);
    }

    #[tokio::test]
    async fn recent_respects_limit() {
        let store = SqliteResponseStore::open_in_memory().expect("store");
        for idx in 0..5 {
            store
                .append(&format!("input {idx}"), "{}")
                .await
                .expect("append");
        }
        let records = store.recent(2).await.expect("recent");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].input_data, "input 4");
    }

    #[tokio::test]
    async fn reopening_an_existing_database_is_a_no_op_for_the_schema() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("responses.db");
        {
            let store = SqliteResponseStore::open(&path).expect("first open");
            store.append("one", "{}").await.expect("append");
        }
        let store = SqliteResponseStore::open(&path).expect("second open");
        store.append("two", "{}").await.expect("append");
        assert_eq!(store.len().await.expect("len"), 2);
    }

    #[tokio::test]
    async fn timestamps_use_the_expected_format() {
        let store = SqliteResponseStore::open_in_memory().expect("store");
        store.append("input", "{}").await.expect("append");
        let records = store.recent(1).await.expect("recent");
        // 2026-08-07 12:34:56
        assert_eq!(records[0].created_at.len(), 19);
        assert_eq!(&records[0].created_at[4..5], "-");
        assert_eq!(&records[0].created_at[10..11], " ");
    }
}
