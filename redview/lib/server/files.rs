//! Static serving of the media root, so each photo's `img_src` resolves to its bytes.

use std::path::{Path as FsPath, PathBuf};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use tokio::fs::{self, File};
use tokio_util::io::ReaderStream;

use super::{handlers::error_response, state::ServerState};
use crate::{catalog, RedviewError, RedviewResult};

//-------------------------------------------------------------------------------------------------
// Functions: Handlers
//-------------------------------------------------------------------------------------------------

/// Handler for the GET /files/{*path} endpoint
///
/// The file is streamed in chunks rather than read into memory up front.
pub async fn files_handler(
    State(state): State<ServerState>,
    Path(path): Path<String>,
) -> impl IntoResponse {
    match open_media_file(state.scanner().get_media_root(), &path).await {
        Ok((path, file, len)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type(&path).to_string()),
                (header::CONTENT_LENGTH, len.to_string()),
            ],
            Body::from_stream(ReaderStream::new(file)),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

//-------------------------------------------------------------------------------------------------
// Functions: Helpers
//-------------------------------------------------------------------------------------------------

/// Resolves a `/`-separated, already decoded path against the media root.
///
/// Only plain child segments are accepted, so the result can never leave the root.
pub fn resolve_media_path(media_root: &FsPath, relative: &str) -> RedviewResult<PathBuf> {
    let mut path = media_root.to_path_buf();
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        catalog::validate_segment("path", segment)
            .map_err(|_| RedviewError::FileNotFound(relative.to_string()))?;
        path.push(segment);
    }

    if path == media_root {
        return Err(RedviewError::FileNotFound(relative.to_string()));
    }

    Ok(path)
}

/// Opens a regular file under the media root, returning its path, handle and length.
async fn open_media_file(
    media_root: &FsPath,
    relative: &str,
) -> RedviewResult<(PathBuf, File, u64)> {
    let path = resolve_media_path(media_root, relative)?;
    let len = match fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => metadata.len(),
        _ => return Err(RedviewError::FileNotFound(relative.to_string())),
    };

    let file = File::open(&path).await?;
    Ok((path, file, len))
}

/// Returns the content type for a media file from its extension.
pub fn content_type(file: &FsPath) -> &'static str {
    let ext = file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

//-------------------------------------------------------------------------------------------------
// Tests
//-------------------------------------------------------------------------------------------------
