//! Channel-backed SSE emission.

use async_trait::async_trait;
use axum::response::sse::Event;
use log::error;
use promptdeck_protocol::{ItemEvent, OutcomeSink, SinkClosed};
use std::convert::Infallible;
use tokio::sync::mpsc;

/// Sink that forwards item events into the SSE response stream.
///
/// Every emitted event becomes its own channel item, which hyper writes and
/// flushes as a discrete chunk the moment it is produced; the peer observes
/// each result before the next item starts processing.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Result<Event, Infallible>>,
}

impl ChannelSink {
    /// Create a sink and the receiver feeding the SSE response.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Result<Event, Infallible>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl OutcomeSink for ChannelSink {
    async fn emit(&self, event: ItemEvent) -> Result<(), SinkClosed> {
        let data = match event.data() {
            Ok(data) => data,
            Err(err) => {
                // An unencodable payload is dropped; the batch keeps going.
                error!("failed to encode stream event: {err}");
                return Ok(());
            }
        };
        let frame = Event::default().event(event.name()).data(data);
        self.tx.send(Ok(frame)).map_err(|_| SinkClosed)
    }
}
