use std::path::{Component, Path};

use crate::{config::FILES_ROUTE_PREFIX, RedviewError, RedviewResult};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// File extensions, lowercased and without the dot, that count as catalog images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Builds the browser URL for a file under the media root.
///
/// Each segment of the root-relative path is percent-encoded on its own, so the result never
/// contains an absolute filesystem path.
pub fn to_url(media_root: &Path, file: &Path) -> RedviewResult<String> {
    let relative = file
        .strip_prefix(media_root)
        .map_err(|_| RedviewError::PathOutsideRoot(file.to_path_buf()))?;

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                segments.push(urlencoding::encode(&segment.to_string_lossy()).into_owned())
            }
            Component::CurDir => continue,
            _ => return Err(RedviewError::PathOutsideRoot(file.to_path_buf())),
        }
    }

    Ok(format!("{}{}", FILES_ROUTE_PREFIX, segments.join("/")))
}

/// Renders a path with `/` separators regardless of platform.
pub fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Parses a sol directory name.
///
/// The leading run of ASCII digits is the sol, so `"007"` is sol 7 and `"12b"` is sol 12. Names
/// without leading digits (`"draft"`) are not sols.
pub fn parse_sol(name: &str) -> Option<u32> {
    let trimmed = name.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    unsigned[..end].parse().ok()
}

/// Checks whether a file name carries a recognized image extension, ignoring case.
pub fn is_image_file_name(name: &Path) -> bool {
    name.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Validates a caller-supplied directory name before it is joined onto the media root.
///
/// Rejects anything that could name more than a single child directory.
pub fn validate_segment<'a>(name: &'static str, value: &'a str) -> RedviewResult<&'a str> {
    if value.is_empty() {
        return Err(RedviewError::invalid_parameter(name, "must not be empty"));
    }

    if value == "." || value == ".." {
        return Err(RedviewError::invalid_parameter(
            name,
            format!("'{value}' is not a directory name"),
        ));
    }

    if value.contains(['/', '\\', '\0']) {
        return Err(RedviewError::invalid_parameter(
            name,
            "must not contain path separators",
        ));
    }

    Ok(value)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
