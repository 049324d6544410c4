use super::models::AppState;
use crate::errors::ApiError;
use crate::models::{PathResponse, UploadQuery};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use bytes::Bytes;
use chrono::Utc;

/// Stores an upload under the uploads root, in the current year/month folder
pub async fn upload_file(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<PathResponse>), ApiError> {
    let stored = state.facade.upload(&query.filename, body, Utc::now()).await?;
    tracing::info!("Stored upload '{}' at {}", query.filename, stored);
    Ok((StatusCode::CREATED, Json(state.path_response(stored))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::TestServer;
    use mountfs_models::RoutingDecision;

    #[tokio::test]
    async fn test_upload_lands_in_year_month_folder() {
        let server = TestServer::new();

        let (status, Json(stored)) = upload_file(
            State(server.state.clone()),
            Query(UploadQuery {
                filename: "Holiday Photo.JPG".to_string(),
            }),
            Bytes::from_static(b"jpeg"),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(stored.backend, RoutingDecision::Remote);

        assert!(stored.path.as_str().starts_with("wp-content/uploads/"));
        assert_eq!(stored.path.file_name(), Some("Holiday-Photo.JPG"));
        assert_eq!(server.objects.len(), 1);
    }
}
