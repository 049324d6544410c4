use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode},
    routing::{delete, get, post, put},
    Router,
};
use mountfs_api::{
    chgrp_path, chmod_path, chown_path, delete_path, exists_path, list_path, make_dir, read_file,
    rename_path, route_path,
    sanitize_filename, stat_path, touch_path, upload_file, write_file, AppState,
};
use mountfs_config::Config;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
};

pub fn build(config: &Config, app_state: AppState) -> Router {
    let max_body_size = config.server.max_body_size_mb * 1024 * 1024;
    let timeout = Duration::from_secs(config.server.timeout_secs);
    let max_concurrent_requests = config.server.max_concurrent_requests;

    let mut router = Router::new()
        .route("/fs/read", get(read_file))
        .route("/fs/write", put(write_file))
        .route("/fs/delete", delete(delete_path))
        .route("/fs/list", get(list_path))
        .route("/fs/stat", get(stat_path))
        .route("/fs/exists", get(exists_path))
        .route("/fs/mkdir", post(make_dir))
        .route("/fs/rename", post(rename_path))
        .route("/fs/touch", post(touch_path))
        .route("/fs/chmod", post(chmod_path))
        .route("/fs/chown", post(chown_path))
        .route("/fs/chgrp", post(chgrp_path))
        .route("/fs/route", get(route_path))
        .route("/sanitize", post(sanitize_filename))
        .route("/uploads", put(upload_file))
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests))
        // The extractor's own 2 MiB cap would shadow max_body_size_mb
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout));

    // Optionally enable compression based on config
    if config.server.enable_compression {
        router = router.layer(CompressionLayer::new());
    }

    router
        .layer(build_cors_layer(&config.server.allowed_origins))
        .with_state(app_state)
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::storage;
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use mountfs_config::{RemoteClientKind, DEFAULT_CONFIG_TEMPLATE};
    use mountfs_events::EventBus;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn app(max_body_size_mb: usize) -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::parse(DEFAULT_CONFIG_TEMPLATE).unwrap();
        config.server.max_body_size_mb = max_body_size_mb;
        config.filesystem.remote_enabled = true;
        config.remote.client = RemoteClientKind::Memory;
        config.local.root = dir.path().to_path_buf();

        let facade = storage::initialize(&config, &EventBus::new(true)).await.unwrap();
        let router = build(&config, AppState::new(Arc::new(facade)));
        (dir, router)
    }

    fn upload(size: usize) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri("/uploads?filename=big.bin")
            .header(header::CONTENT_LENGTH, size)
            .body(Body::from(vec![0u8; size]))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_above_extractor_default_is_accepted() {
        let (_dir, router) = app(100).await;

        let response = router.oneshot(upload(3 * 1024 * 1024)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_upload_above_configured_limit_is_rejected() {
        let (_dir, router) = app(1).await;

        let response = router.oneshot(upload(2 * 1024 * 1024)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_route_endpoint() {
        let (_dir, router) = app(100).await;

        let request = Request::builder()
            .uri("/fs/route?path=wp-content/uploads/2024/a.png")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
