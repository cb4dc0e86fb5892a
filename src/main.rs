//! Countdown Timer - a background countdown with an HTTP control surface
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    api::create_router,
    config::Config,
    engine::CountdownEngine,
    services::{LogNotifier, TerminalAlerter},
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    let engine = CountdownEngine::new(
        config.tick_interval(),
        Arc::new(LogNotifier),
        Arc::new(TerminalAlerter),
    );
    let state = Arc::new(AppState::new(engine, config.port, config.host.clone()));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /digits         - Current entry and preview");
    info!("  POST   /digits/:digit  - Append a digit");
    info!("  DELETE /digits/last    - Remove the last digit");
    info!("  DELETE /digits         - Clear the entry");
    info!("  POST   /timer/start    - Start the countdown");
    info!("  POST   /timer/stop     - Stop the countdown");
    info!("  GET    /status         - Current timer status");
    info!("  GET    /events         - Live countdown events (SSE)");
    info!("  GET    /health         - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            match signal {
                Ok(signal) => info!("Shutdown signal {} received", signal),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    // Clear the countdown indicator for a session cut short by shutdown
    if state.stop_timer().is_ok() {
        info!("Running countdown stopped for shutdown");
    }

    info!("Server shutdown complete");
    Ok(())
}
