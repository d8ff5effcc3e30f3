//! Countdown Timer - A countdown timer controlled over HTTP
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    config::Config,
    engine::CountdownEngine,
    state::AppState,
    api::create_router,
    tasks::TokioScheduler,
    utils::{register_shutdown_signals, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, while_running={:?}",
          config.host, config.port, config.while_running);

    let scheduler = TokioScheduler::current().map_err(anyhow::Error::msg)?;
    let engine = CountdownEngine::with_policy(Arc::new(scheduler), config.while_running);
    let state = Arc::new(AppState::new(config.port, config.host.clone(), engine));

    if let Some(seconds) = config.duration {
        let view = state.set_input(&seconds.to_string()).map_err(anyhow::Error::msg)?;
        info!("Loaded initial duration {}", view.display);
    }

    let signals = register_shutdown_signals()?;

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /duration - Set duration from input text");
    info!("  POST /start    - Start the countdown");
    info!("  POST /stop     - Stop the countdown");
    info!("  POST /reset    - Reset the countdown and clear input");
    info!("  GET  /status   - Current countdown and server status");
    info!("  GET  /events   - Server-sent events on every change");
    info!("  GET  /health   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal(signals) => {
            info!("Shutdown signal received");
        }
    }

    // cancel any outstanding tick before the runtime goes away
    state.engine.reset();

    info!("Server shutdown complete");
    Ok(())
}
