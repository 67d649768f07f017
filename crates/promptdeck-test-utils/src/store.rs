//! Response stores for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use promptdeck_store::{ResponseRecord, ResponseStore, StoreError};

/// Store recording appended rows in memory.
#[derive(Default)]
pub struct RecordingStore {
    rows: Mutex<Vec<(String, String)>>,
}

impl RecordingStore {
    /// Appended (input_data, response_json) pairs, in order.
    pub fn rows(&self) -> Vec<(String, String)> {
        self.rows.lock().clone()
    }
}

#[async_trait]
impl ResponseStore for RecordingStore {
    async fn append(&self, input_data: &str, response_json: &str) -> Result<(), StoreError> {
        self.rows
            .lock()
            .push((input_data.to_string(), response_json.to_string()));
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ResponseRecord>, StoreError> {
        let rows = self.rows.lock();
        let records = rows
            .iter()
            .enumerate()
            .rev()
            .take(limit)
            .map(|(idx, (input_data, response_json))| ResponseRecord {
                id: idx as i64 + 1,
                created_at: "1970-01-01 00:00:00".to_string(),
                input_data: input_data.clone(),
                response_json: response_json.clone(),
            })
            .collect();
        Ok(records)
    }

    async fn len(&self) -> Result<u64, StoreError> {
        Ok(self.rows.lock().len() as u64)
    }
}

/// Store failing every operation, for persistence-failure tests.
#[derive(Default)]
pub struct FailingStore;

#[async_trait]
impl ResponseStore for FailingStore {
    async fn append(&self, _input_data: &str, _response_json: &str) -> Result<(), StoreError> {
        Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<ResponseRecord>, StoreError> {
        Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
    }

    async fn len(&self) -> Result<u64, StoreError> {
        Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
    }
}
