use serde::{Deserialize, Serialize};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A photo discovered on disk by a catalog query.
///
/// Records are synthesized fresh for every query and never stored. The `id` is only unique within
/// the result set of the query that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Sequence number within a single query result, starting at 1.
    pub id: u64,

    /// The sol the file was found under.
    pub sol: u32,

    /// The camera the file was found under.
    pub camera: CameraMeta,

    /// The rover the query was made for.
    pub rover: RoverMeta,

    /// URL path the static file route serves the image from.
    pub img_src: String,

    /// Absolute filesystem path, with `/` separators.
    pub local_path: String,

    /// `YYYY-MM-DD`, or `None` if the file could not be stat'd.
    pub earth_date: Option<String>,
}

/// Camera details attached to a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraMeta {
    /// The camera directory name.
    pub name: String,

    /// Display name. There is no canonical name table, so this is the directory name too.
    pub full_name: String,
}

/// Rover details attached to a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverMeta {
    /// The rover directory name.
    pub name: String,
}

/// Offset/limit slicing applied to the full-history query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    /// Maximum number of photos to return. `None` returns everything.
    pub limit: Option<usize>,

    /// Number of photos to skip. Only honored together with `limit`.
    #[serde(default)]
    pub offset: usize,
}

/// A slice of a rover's full photo history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPage {
    /// The photos in the requested slice.
    pub photos: Vec<Photo>,

    /// Number of photos in the unsliced history.
    pub total: usize,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl CameraMeta {
    /// Creates camera details from a camera directory name.
    pub fn from_dir_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            full_name: name.to_string(),
        }
    }
}

impl PageOptions {
    /// Creates page options with a limit and offset.
    pub fn new(limit: Option<usize>, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Slices the full sequence of photos into a page.
    pub fn apply(&self, photos: Vec<Photo>) -> PhotoPage {
        let total = photos.len();
        let photos = match self.limit {
            Some(limit) => photos.into_iter().skip(self.offset).take(limit).collect(),
            None => photos,
        };

        PhotoPage { photos, total }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
