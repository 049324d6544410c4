use anyhow::Result;
use mountfs_config::{Config, RemoteClientKind};
use mountfs_events::{AppEvent, EventBus};
use mountfs_filesystem::{BackendRouter, FilesystemFacade};
#[cfg(feature = "s3")]
use mountfs_storage::S3ObjectClient;
use mountfs_storage::{Backend, LocalBackend, MemoryObjectClient, ObjectClient, RemoteObjectBackend};
use std::sync::Arc;

/// Builds both backends, the router and the facade from the frozen config
pub async fn initialize(config: &Config, events: &Arc<EventBus>) -> Result<FilesystemFacade> {
    let uploads_root = config.uploads_root()?;

    let local = initialize_local(config, events).await?;
    events.emit(AppEvent::BackendReady {
        routing: "local".to_string(),
        backend: local.describe(),
    });

    let remote = if config.filesystem.remote_enabled {
        let client = initialize_object_client(config).await?;
        let backend: Arc<dyn Backend> = Arc::new(RemoteObjectBackend::new(client, uploads_root.clone()));
        events.emit(AppEvent::BackendReady {
            routing: "remote".to_string(),
            backend: backend.describe(),
        });
        Some(backend)
    } else {
        events.emit(AppEvent::RemoteDisabled);
        None
    };

    let router = BackendRouter::new(uploads_root, config.filesystem.remote_enabled, local, remote);
    Ok(FilesystemFacade::new(router, config.filesystem.max_path_length)
        .with_yearmonth_folders(config.filesystem.uploads_use_yearmonth_folders))
}

async fn initialize_local(config: &Config, events: &Arc<EventBus>) -> Result<Arc<dyn Backend>> {
    let root = &config.local.root;
    if !root.exists() {
        tokio::fs::create_dir_all(root).await?;
        events.emit(AppEvent::LocalRootCreated {
            path: root.display().to_string(),
        });
    }

    let backend = LocalBackend::new(root.clone()).with_modes(config.local.file_mode, config.local.dir_mode);
    Ok(Arc::new(backend))
}

async fn initialize_object_client(config: &Config) -> Result<Arc<dyn ObjectClient>> {
    let remote = &config.remote;

    match remote.client {
        RemoteClientKind::Memory => {
            tracing::warn!("Using the in-memory object store; uploads are lost on shutdown");
            Ok(Arc::new(MemoryObjectClient::new()))
        }
        #[cfg(feature = "s3")]
        RemoteClientKind::S3 => {
            let client = S3ObjectClient::new(
                remote.endpoint_url.clone(),
                remote.region.clone(),
                remote.access_key_id.clone(),
                remote.secret_access_key.clone(),
                remote.bucket_name.clone(),
                remote.bucket_prefix.clone(),
            )
            .await?;

            tracing::info!(
                "Initialized S3 object client: bucket={}, endpoint={}",
                remote.bucket_name,
                remote.endpoint_url
            );

            Ok(Arc::new(client))
        }
        #[cfg(not(feature = "s3"))]
        RemoteClientKind::S3 => {
            anyhow::bail!(
                "S3 remote storage selected but not compiled. Rebuild with --features s3 to enable S3 support,\n\
                or set remote.client = \"memory\" for local development."
            )
        }
    }
}
