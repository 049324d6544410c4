use super::models::AppState;
use crate::models::{SanitizeRequest, SanitizeResponse};
use axum::{extract::State, response::Json};

/// Filename hook a host CMS calls before accepting an upload name
pub async fn sanitize_filename(
    State(state): State<AppState>,
    Json(request): Json<SanitizeRequest>,
) -> Json<SanitizeResponse> {
    let filename = state.facade.sanitize_filename(&request.filename);
    let changed = filename != request.filename;
    Json(SanitizeResponse { filename, changed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::TestServer;

    #[tokio::test]
    async fn test_sanitize_reports_change() {
        let server = TestServer::new();

        let Json(response) = sanitize_filename(
            State(server.state.clone()),
            Json(SanitizeRequest {
                filename: "Ünïcode name.png".to_string(),
            }),
        )
        .await;
        assert_eq!(response.filename, "Unicode-name.png");
        assert!(response.changed);

        let Json(response) = sanitize_filename(
            State(server.state.clone()),
            Json(SanitizeRequest {
                filename: "plain.png".to_string(),
            }),
        )
        .await;
        assert!(!response.changed);
    }
}
