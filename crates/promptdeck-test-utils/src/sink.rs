//! Outcome sinks for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use promptdeck_protocol::{ItemEvent, OutcomeSink, SinkClosed};

/// Sink recording every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ItemEvent>>,
}

impl RecordingSink {
    /// Events emitted so far, in order.
    pub fn events(&self) -> Vec<ItemEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl OutcomeSink for RecordingSink {
    async fn emit(&self, event: ItemEvent) -> Result<(), SinkClosed> {
        self.events.lock().push(event);
        Ok(())
    }
}

/// Sink behaving like a disconnected peer.
#[derive(Default)]
pub struct ClosedSink;

#[async_trait]
impl OutcomeSink for ClosedSink {
    async fn emit(&self, _event: ItemEvent) -> Result<(), SinkClosed> {
        Err(SinkClosed)
    }
}
