//! HTTP server and event-stream delivery for promptdeck.

mod error;
mod routes;
mod sse;
mod state;

pub use error::ServerError;
pub use routes::router;
pub use sse::ChannelSink;
pub use state::AppState;

use anyhow::Context;
use log::info;
use promptdeck_client::HttpCompletionClient;
use promptdeck_config::GatewayConfig;
use promptdeck_store::SqliteResponseStore;
use std::sync::Arc;
use std::time::Duration;

/// Build the gateway from config and serve until shutdown.
pub async fn serve(config: GatewayConfig) -> anyhow::Result<()> {
    let api_key = config
        .completion
        .resolve_api_key()
        .context("resolve completion api key")?;
    let completer = HttpCompletionClient::new(
        reqwest::Client::new(),
        config.completion.endpoint.clone(),
        api_key,
    )
    .with_timeout(Duration::from_secs(config.completion.timeout_secs));
    let store = SqliteResponseStore::open(&config.store.path)
        .with_context(|| format!("open response store at {}", config.store.path))?;

    let state = AppState::new(Arc::new(completer), Arc::new(store));
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("bind {}", config.server.bind))?;
    info!("listening (addr={})", config.server.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
