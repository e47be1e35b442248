//! Type definitions for the server module.
//!
//! This module contains the query parameters and JSON envelopes used by the REST API endpoints.

use serde::{Deserialize, Serialize};

use crate::catalog::Photo;

//-------------------------------------------------------------------------------------------------
// Types: Requests
//-------------------------------------------------------------------------------------------------

/// Query parameters for the /{rover}/photos endpoint
#[derive(Debug, Default, Deserialize)]
pub struct PhotosQuery {
    /// Camera directory name
    pub camera: Option<String>,
    /// Sol number
    pub sol: Option<String>,
}

/// Query parameters for the /{rover}/sol endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SolQuery {
    /// Sol number
    pub sol: Option<String>,
}

/// Query parameters for the /{rover}/all endpoint
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Maximum number of photos to return
    pub limit: Option<String>,
    /// Number of photos to skip
    pub offset: Option<String>,
}

//-------------------------------------------------------------------------------------------------
// Types: Responses
//-------------------------------------------------------------------------------------------------

/// Response body for the /{rover}/latest endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct LatestPhotosResponse {
    /// Every photo at the rover's latest sol
    pub latest_photos: Vec<Photo>,
}

/// Response body for the /{rover}/photos and /{rover}/sol endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct PhotosResponse {
    /// Photos matching the query
    pub photos: Vec<Photo>,
}

/// Response body for the /{rover}/latest_sol endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct LatestSolResponse {
    /// The rover's latest sol with data, if it has any
    pub latest_sol: Option<u32>,
}

/// Response body for the /health endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always true while the server is answering
    pub ok: bool,
}

/// Error response returned when an operation fails
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}
