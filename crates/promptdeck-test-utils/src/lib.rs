//! Test utilities for promptdeck crates.

mod completer;
mod sink;
mod store;

pub use completer::ScriptedCompleter;
pub use sink::{ClosedSink, RecordingSink};
pub use store::{FailingStore, RecordingStore};
