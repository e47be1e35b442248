use std::path::PathBuf;
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result of a redview-related operation.
pub type RedviewResult<T> = Result<T, RedviewError>;

/// An error that occurred while scanning the catalog or serving it.
#[derive(Debug, Error)]
pub enum RedviewError {
    /// An I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory a query depends on does not exist.
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A required query parameter was not supplied.
    #[error("{0} query param is required")]
    MissingParameter(&'static str),

    /// A query parameter was supplied but cannot be used.
    #[error("invalid {name} parameter: {reason}")]
    InvalidParameter {
        /// The name of the offending parameter.
        name: &'static str,

        /// Why the value was rejected.
        reason: String,
    },

    /// A path that was expected to live under the media root does not.
    #[error("path is outside the media root: {}", .0.display())]
    PathOutsideRoot(PathBuf),

    /// A requested media file does not exist or is not a regular file.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// The service configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl RedviewError {
    /// Creates an `InvalidParameter` error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> RedviewError {
        RedviewError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status code this error maps to.
    ///
    /// Bad caller input (an unknown rover, a missing or malformed parameter) is a client error.
    /// Everything else is reported as a server fault.
    pub fn status_code(&self) -> u16 {
        match self {
            RedviewError::NotFound(_)
            | RedviewError::MissingParameter(_)
            | RedviewError::InvalidParameter { .. }
            | RedviewError::PathOutsideRoot(_) => 400,
            RedviewError::FileNotFound(_) => 404,
            _ => 500,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
