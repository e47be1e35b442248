//! `redview` serves a Mars rover photo catalog derived directly from a media directory tree.
//!
//! # Overview
//!
//! There is no database. The media root is laid out as
//!
//! ```text
//! {media_root}/{rover}/{camera}/{sol}/{image}
//! ```
//!
//! and every query walks that tree afresh, turning the image files it finds into [`catalog::Photo`]
//! records. Rovers and cameras are whatever directories exist. Sols are the subdirectories of a
//! camera whose names start with digits.
//!
//! # Modules
//!
//! - [`catalog`] - The directory scanner and the photo records it produces
//! - [`server`] - REST API and media file server
//! - [`config`] - Service configuration and defaults
//! - [`cli`] - Command-line interface and argument parsing
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use redview::catalog::{CatalogScanner, PageOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let scanner = CatalogScanner::new("/srv/media")?;
//!
//!     let latest = scanner.latest_by_rover("curiosity").await?;
//!     println!("{} photos at the latest sol", latest.len());
//!
//!     let page = scanner
//!         .all_by_rover("curiosity", PageOptions::new(Some(50), 0))
//!         .await?;
//!     println!("showing {} of {}", page.photos.len(), page.total);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_inception)]

mod error;
mod log;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub mod catalog;
pub mod cli;
pub mod config;
pub mod server;

pub use error::*;
pub use log::*;
