use anyhow::Result;
use mountfs_config::Config;
use mountfs_events::{AppEvent, EventBus};
use std::path::Path;
use std::sync::Arc;

pub async fn load(config_path: &str, events: &Arc<EventBus>) -> Result<Config> {
    let abs_config_path = std::path::absolute(config_path)?
        .display()
        .to_string();

    events.emit(AppEvent::ConfigLoading {
        path: abs_config_path.clone(),
    });

    let config_exists = Path::new(config_path).exists();
    let config = Config::from_file_with_events(config_path, Some(events)).await?;

    if !config_exists {
        events.emit(AppEvent::ConfigCreated {
            path: abs_config_path,
        });
    }

    events.emit(AppEvent::ConfigLoaded {
        uploads_root: config.filesystem.uploads_root.clone(),
        remote_enabled: config.filesystem.remote_enabled,
    });

    Ok(config)
}
