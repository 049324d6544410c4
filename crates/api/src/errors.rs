use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use mountfs_filesystem::FsError;
use mountfs_models::ReasonCode;
use thiserror::Error;

use crate::models::{ErrorDetail, ErrorResponse};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Filesystem(#[from] FsError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Filesystem(err) => status_for(err.reason()),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Filesystem(err) => err.reason().as_str(),
            ApiError::BadRequest(_) => "bad-request",
        }
    }
}

fn status_for(reason: ReasonCode) -> StatusCode {
    match reason {
        ReasonCode::PathTooLong | ReasonCode::UnsafeCharacters | ReasonCode::InvalidPath => {
            StatusCode::BAD_REQUEST
        }
        ReasonCode::NotFound => StatusCode::NOT_FOUND,
        ReasonCode::CrossBackendRenameUnsupported => StatusCode::CONFLICT,
        ReasonCode::UnimplementedMethod => StatusCode::NOT_IMPLEMENTED,
        ReasonCode::BackendUnavailable => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}
