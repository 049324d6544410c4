use super::models::AppState;
use crate::errors::ApiError;
use crate::models::{
    ChgrpRequest, ChmodRequest, ChownRequest, ExistsResponse, ListResponse, PathQuery, PathResponse, RecursiveQuery,
    RenameRequest, RouteResponse,
};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use mountfs_filesystem::parse_path;
use mountfs_models::{FileMetadata, FsPath};

impl AppState {
    pub(super) fn path_response(&self, path: FsPath) -> PathResponse {
        let backend = self.facade.router().route(&path);
        PathResponse { path, backend }
    }
}

pub async fn read_file(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Response, ApiError> {
    let content = state.facade.read(&query.path).await?;
    let mime_type = mime_guess::from_path(&query.path)
        .first_or_octet_stream()
        .to_string();

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, mime_type)], content).into_response())
}

pub async fn write_file(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<PathResponse>), ApiError> {
    let written = state.facade.write(&query.path, body).await?;
    Ok((StatusCode::CREATED, Json(state.path_response(written))))
}

pub async fn delete_path(
    State(state): State<AppState>,
    Query(query): Query<RecursiveQuery>,
) -> Result<StatusCode, ApiError> {
    state.facade.delete(&query.path, query.recursive).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_path(
    State(state): State<AppState>,
    Query(query): Query<RecursiveQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let entries = state.facade.list(&query.path, query.recursive).await?;
    Ok(Json(ListResponse {
        path: parse_path(&query.path)?,
        entries,
    }))
}

pub async fn stat_path(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<FileMetadata>, ApiError> {
    Ok(Json(state.facade.stat(&query.path).await?))
}

pub async fn exists_path(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let exists = state.facade.exists(&query.path).await?;
    Ok(Json(ExistsResponse {
        path: query.path,
        exists,
    }))
}

pub async fn make_dir(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<(StatusCode, Json<PathResponse>), ApiError> {
    let created = state.facade.mkdir(&query.path).await?;
    Ok((StatusCode::CREATED, Json(state.path_response(created))))
}

pub async fn rename_path(
    State(state): State<AppState>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<PathResponse>, ApiError> {
    let moved = state.facade.rename(&request.from, &request.to).await?;
    Ok(Json(state.path_response(moved)))
}

pub async fn touch_path(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PathResponse>, ApiError> {
    let touched = state.facade.touch(&query.path).await?;
    Ok(Json(state.path_response(touched)))
}

pub async fn chmod_path(
    State(state): State<AppState>,
    Json(request): Json<ChmodRequest>,
) -> Result<StatusCode, ApiError> {
    let mode = parse_mode(&request.mode)?;
    state.facade.chmod(&request.path, mode).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn chown_path(
    State(state): State<AppState>,
    Json(request): Json<ChownRequest>,
) -> Result<StatusCode, ApiError> {
    state.facade.chown(&request.path, request.uid).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn chgrp_path(
    State(state): State<AppState>,
    Json(request): Json<ChgrpRequest>,
) -> Result<StatusCode, ApiError> {
    state.facade.chgrp(&request.path, request.gid).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Where a path would be served from, without touching any backend
pub async fn route_path(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<RouteResponse>, ApiError> {
    let (path, backend) = state.facade.route(&query.path)?;
    Ok(Json(RouteResponse { path, backend }))
}

fn parse_mode(raw: &str) -> Result<u32, ApiError> {
    let digits = raw.trim().trim_start_matches("0o");
    match u32::from_str_radix(digits, 8) {
        Ok(mode) if mode <= 0o7777 => Ok(mode),
        _ => Err(ApiError::BadRequest(format!("invalid octal mode '{}'", raw))),
    }
}
