//! Public SDK surface for promptdeck.
//!
//! This crate re-exports the gateway building blocks and provides a small
//! initialization helper to keep binary setup consistent.

/// Re-export for convenience.
pub use promptdeck_client as client;
pub use promptdeck_config as config;
/// Re-export for convenience.
pub use promptdeck_core as core;
/// Re-export for convenience.
pub use promptdeck_protocol as protocol;
pub use promptdeck_server as server;
/// Re-export for convenience.
pub use promptdeck_store as store;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
