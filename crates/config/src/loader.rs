use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::migration::migrate_config_if_needed;
use super::models::Config;
use super::ConfigError;
use mountfs_models::FsPath;
use std::path::Path;
use std::sync::Arc;

/// Overrides the config file location
pub const CONFIG_PATH_ENV: &str = "MOUNTFS_CONFIG";

/// Overrides `filesystem.remote_enabled` once at startup
pub const REMOTE_ENABLED_ENV: &str = "MOUNTFS_REMOTE_ENABLED";

impl Config {
    /// Loads configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Self::from_file_with_events(path, None).await
    }

    /// Loads configuration from a file with optional event bus for notifications
    pub async fn from_file_with_events<P: AsRef<Path>>(
        path: P,
        events: Option<&Arc<mountfs_events::EventBus>>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();

        // Create default config if it doesn't exist
        if !path.exists() {
            create_default_config(path).await?;
        }

        migrate_config_if_needed(path, events).await?;

        let content = tokio::fs::read_to_string(path).await?;
        let mut config = Self::parse(&content)?;

        let remote_override = std::env::var(REMOTE_ENABLED_ENV).ok();
        config.apply_remote_override(remote_override.as_deref())?;
        config.validate()?;

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies the `MOUNTFS_REMOTE_ENABLED` value, if any
    pub fn apply_remote_override(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        let Some(raw) = value else {
            return Ok(());
        };

        let enabled = match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            _ => {
                return Err(ConfigError::InvalidEnvValue {
                    name: REMOTE_ENABLED_ENV.to_string(),
                    value: raw.to_string(),
                })
            }
        };

        if enabled != self.filesystem.remote_enabled {
            tracing::info!("{} overrides remote_enabled: {}", REMOTE_ENABLED_ENV, enabled);
        }
        self.filesystem.remote_enabled = enabled;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.uploads_root()?;

        if self.filesystem.max_path_length == 0 {
            return Err(ConfigError::InvalidConfig(
                "filesystem.max_path_length must be greater than 0".to_string(),
            ));
        }

        if self.filesystem.remote_enabled
            && self.remote.client == super::RemoteClientKind::S3
            && self.remote.bucket_name.trim().is_empty()
        {
            return Err(ConfigError::InvalidConfig(
                "remote.bucket_name is required when remote storage is enabled".to_string(),
            ));
        }

        Ok(())
    }

    /// The configured uploads root in normalized form
    pub fn uploads_root(&self) -> Result<FsPath, ConfigError> {
        FsPath::parse(&self.filesystem.uploads_root).map_err(|e| {
            ConfigError::InvalidConfig(format!(
                "filesystem.uploads_root '{}': {}",
                self.filesystem.uploads_root, e
            ))
        })
    }
}

/// Creates a default configuration file
async fn create_default_config<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}
