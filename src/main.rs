mod bootstrap;

use crate::bootstrap::{config, logging, router, server, storage};
use anyhow::Result;
use mountfs_api::AppState;
use mountfs_config::CONFIG_PATH_ENV;
use mountfs_events::{AppEvent, EventBus};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let events = EventBus::new(false);
    events.emit(AppEvent::Starting);

    let config_path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
    let config = match config::load(&config_path, &events).await {
        Ok(config) => Arc::new(config),
        Err(e) => {
            events.emit(AppEvent::Error {
                context: "Configuration".to_string(),
                error: e.to_string(),
            });
            return Err(e);
        }
    };

    let facade = Arc::new(storage::initialize(&config, &events).await?);

    let app = router::build(&config, AppState::new(facade));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = server::bind(&addr).await?;

    events.emit(AppEvent::Ready { addr });

    axum::serve(listener, app.into_make_service())
        .tcp_nodelay(config.server.tcp_nodelay)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    events.emit(AppEvent::Shutdown);
    Ok(())
}
