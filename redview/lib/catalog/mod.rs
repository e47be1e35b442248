//! Photo catalog derived from a media directory tree.
//!
//! The catalog has no index. Rovers, cameras and sols are whatever directories exist under the
//! media root, laid out as `{rover}/{camera}/{sol}/{image}`, and every query walks them again.

mod layout;
mod models;
mod paths;
mod scanner;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use layout::*;
pub use models::*;
pub use paths::*;
pub use scanner::*;
