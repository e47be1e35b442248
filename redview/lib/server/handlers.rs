//! HTTP request handlers for the REST API.
//!
//! Each handler parses its parameters, runs one catalog query and wraps the result in the JSON
//! envelope the viewer expects. Failures become `{ "error": message }` with the status the error
//! maps to.

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{
    state::ServerState,
    types::{
        ErrorResponse, HealthResponse, LatestPhotosResponse, LatestSolResponse, PageQuery,
        PhotosQuery, PhotosResponse, SolQuery,
    },
};
use crate::{
    catalog::{PageOptions, Photo, PhotoPage},
    RedviewError, RedviewResult,
};

//-------------------------------------------------------------------------------------------------
// Functions: Handlers
//-------------------------------------------------------------------------------------------------

/// Handler for the GET /api/{rover}/latest endpoint
pub async fn latest_handler(
    State(state): State<ServerState>,
    Path(rover): Path<String>,
) -> impl IntoResponse {
    match state.scanner().latest_by_rover(&rover).await {
        Ok(photos) => (
            StatusCode::OK,
            Json(LatestPhotosResponse {
                latest_photos: photos,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for the GET /api/{rover}/photos endpoint
///
/// Returns the photos of one camera at one sol
pub async fn photos_handler(
    State(state): State<ServerState>,
    Path(rover): Path<String>,
    Query(query): Query<PhotosQuery>,
) -> impl IntoResponse {
    match handle_photos(state, rover, query).await {
        Ok(photos) => (StatusCode::OK, Json(PhotosResponse { photos })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for the GET /api/{rover}/all endpoint
pub async fn all_handler(
    State(state): State<ServerState>,
    Path(rover): Path<String>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    match handle_all(state, rover, query).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for the GET /api/{rover}/sol endpoint
///
/// Returns the photos of every camera at one sol
pub async fn sol_handler(
    State(state): State<ServerState>,
    Path(rover): Path<String>,
    Query(query): Query<SolQuery>,
) -> impl IntoResponse {
    match handle_sol(state, rover, query).await {
        Ok(photos) => (StatusCode::OK, Json(PhotosResponse { photos })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for the GET /api/{rover}/latest_sol endpoint
pub async fn latest_sol_handler(
    State(state): State<ServerState>,
    Path(rover): Path<String>,
) -> impl IntoResponse {
    match state.scanner().latest_sol(&rover).await {
        Ok(latest_sol) => (StatusCode::OK, Json(LatestSolResponse { latest_sol })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for the GET /health endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse { ok: true })
}

/// Converts an error into a JSON error response
pub fn error_response(error: RedviewError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        tracing::error!("request failed: {}", error);
    } else {
        tracing::debug!("request rejected: {}", error);
    }

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

//-------------------------------------------------------------------------------------------------
// Functions: Helpers
//-------------------------------------------------------------------------------------------------

/// Implementation of the photos operation
async fn handle_photos(
    state: ServerState,
    rover: String,
    query: PhotosQuery,
) -> RedviewResult<Vec<Photo>> {
    let camera = non_empty(query.camera);
    let sol = parse_param("sol", query.sol)?;

    state
        .scanner()
        .by_sol_and_camera(&rover, camera.as_deref(), sol)
        .await
}

/// Implementation of the all operation
async fn handle_all(
    state: ServerState,
    rover: String,
    query: PageQuery,
) -> RedviewResult<PhotoPage> {
    let limit = parse_param("limit", query.limit)?;
    let offset = parse_param("offset", query.offset)?.unwrap_or(0);

    state
        .scanner()
        .all_by_rover(&rover, PageOptions::new(limit, offset))
        .await
}

/// Implementation of the sol operation
async fn handle_sol(
    state: ServerState,
    rover: String,
    query: SolQuery,
) -> RedviewResult<Vec<Photo>> {
    let sol = parse_param("sol", query.sol)?;
    state.scanner().by_sol(&rover, sol).await
}

/// Treats an empty query value the same as a missing one
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses an optional numeric query value
fn parse_param<T: FromStr>(name: &'static str, value: Option<String>) -> RedviewResult<Option<T>> {
    match non_empty(value) {
        Some(value) => value.trim().parse().map(Some).map_err(|_| {
            RedviewError::invalid_parameter(name, format!("'{value}' is not a number"))
        }),
        None => Ok(None),
    }
}

//-------------------------------------------------------------------------------------------------
// Tests
//-------------------------------------------------------------------------------------------------
