//! Directory probing primitives the catalog queries are built from.
//!
//! Nothing here caches: every call lists or stats the filesystem afresh.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, Utc};
use tokio::fs;

use crate::{RedviewError, RedviewResult};

use super::paths;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A sol directory under a camera directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolDir {
    /// The sol parsed from the directory name.
    pub sol: u32,

    /// The full path of the directory.
    pub path: PathBuf,
}

/// What a sol directory holds at the time it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolContents {
    /// The directory exists and holds these image files, in listing order.
    HasImages(Vec<PathBuf>),

    /// The directory exists but holds no image files.
    Empty,

    /// There is no directory at that path.
    Absent,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Fails with [`RedviewError::NotFound`] unless `path` is an existing directory.
pub async fn ensure_dir(path: &Path) -> RedviewResult<()> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(RedviewError::NotFound(path.to_path_buf())),
    }
}

/// Lists the names of the immediate subdirectories of `dir`, in listing order.
pub async fn list_dirs(dir: &Path) -> RedviewResult<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => {}
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!("skipping entry {}: {}", entry.path().display(), e);
                continue;
            }
        }

        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => tracing::warn!("skipping non utf-8 directory name: {:?}", name),
        }
    }

    Ok(names)
}

/// Lists the image files directly inside `dir`, in listing order.
pub async fn list_images(dir: &Path) -> RedviewResult<Vec<PathBuf>> {
    let mut images = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let is_file = match entry.file_type().await {
            Ok(file_type) => file_type.is_file(),
            Err(e) => {
                tracing::debug!("skipping entry {}: {}", entry.path().display(), e);
                false
            }
        };

        let path = entry.path();
        if is_file && paths::is_image_file_name(&path) {
            images.push(path);
        }
    }

    Ok(images)
}

/// Lists the sol directories of a camera, newest sol first.
///
/// Subdirectories whose names don't parse as a sol are left out. Directories that parse to the
/// same sol keep their listing order.
pub async fn list_sol_dirs(camera_dir: &Path) -> RedviewResult<Vec<SolDir>> {
    let mut sols: Vec<SolDir> = list_dirs(camera_dir)
        .await?
        .into_iter()
        .filter_map(|name| {
            paths::parse_sol(&name).map(|sol| SolDir {
                sol,
                path: camera_dir.join(&name),
            })
        })
        .collect();

    sols.sort_by(|a, b| b.sol.cmp(&a.sol));
    Ok(sols)
}

/// Reads a sol directory.
///
/// Only a missing directory is reported as [`SolContents::Absent`] silently; a directory that can't be
/// read is logged and treated the same way, so one bad camera never aborts an aggregate query.
pub async fn read_sol_dir(dir: &Path) -> SolContents {
    match fs::metadata(dir).await {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => return SolContents::Absent,
        Err(e) if e.kind() == ErrorKind::NotFound => return SolContents::Absent,
        Err(e) => {
            tracing::warn!("failed to stat {}: {}", dir.display(), e);
            return SolContents::Absent;
        }
    }

    match list_images(dir).await {
        Ok(images) if images.is_empty() => SolContents::Empty,
        Ok(images) => SolContents::HasImages(images),
        Err(e) => {
            tracing::warn!("failed to list {}: {}", dir.display(), e);
            SolContents::Absent
        }
    }
}

/// Returns the newest sol among `sols` whose directory holds at least one image.
///
/// `sols` must be ordered newest first, as [`list_sol_dirs`] returns them. Empty newer sols are
/// skipped over.
pub async fn latest_with_data(sols: &[SolDir]) -> Option<u32> {
    for sol_dir in sols {
        if let SolContents::HasImages(_) = read_sol_dir(&sol_dir.path).await {
            return Some(sol_dir.sol);
        }
    }

    None
}

/// Returns the latest sol with data for a camera directory.
pub async fn latest_sol_dir(camera_dir: &Path) -> RedviewResult<Option<u32>> {
    let sols = list_sol_dirs(camera_dir).await?;
    Ok(latest_with_data(&sols).await)
}

/// Returns the calendar date of a file, preferring its creation time over its modification time.
///
/// Returns `None` if the file can't be stat'd.
pub async fn earth_date(file: &Path) -> Option<String> {
    let metadata = match fs::metadata(file).await {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!("failed to stat {}: {}", file.display(), e);
            return None;
        }
    };

    let time = metadata
        .created()
        .ok()
        .filter(|created| *created > UNIX_EPOCH)
        .or_else(|| metadata.modified().ok())?;

    Some(format_date(time))
}

fn format_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format("%Y-%m-%d").to_string()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
