//! Stopwatch Deck - several independent stopwatches behind one HTTP API
//!
//! This is the main entry point for the stopwatch-deck server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use stopwatch_deck::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("stopwatch_deck={},tower_http=info", config.log_level()))
        .init();

    info!("Starting stopwatch-deck server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, timers={}",
          config.host, config.port, config.tick_ms, config.timers);

    // Create application state; this starts the display flush loop
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.tick_interval(),
        config.initial_timers(),
    )?);

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /timers              - Latest stopwatch frame");
    info!("  GET    /timers/stream       - Frames as server-sent events");
    info!("  POST   /timers              - Add a stopwatch");
    info!("  DELETE /timers/:index       - Remove a stopwatch");
    info!("  POST   /timers/:index/toggle - Start or stop a stopwatch");
    info!("  POST   /timers/:index/reset  - Reset a stopwatch");
    info!("  POST   /all/start|stop|reset - Apply to every stopwatch");
    info!("  GET    /status              - Collection and server status");
    info!("  GET    /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.coordinator.shutdown() {
        tracing::error!("Failed to stop stopwatches cleanly: {}", e);
    }
    info!("Server shutdown complete");
    Ok(())
}
