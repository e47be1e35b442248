//! HTTP server for the rover photo catalog.
//!
//! This module exposes the catalog queries as a small REST API:
//! - `GET /api/{rover}/latest` - every photo at the rover's latest sol
//! - `GET /api/{rover}/photos?camera=&sol=` - one camera at one sol
//! - `GET /api/{rover}/all?limit=&offset=` - the rover's full history, sliced
//! - `GET /api/{rover}/sol?sol=` - every camera at one sol
//! - `GET /api/{rover}/latest_sol` - the rover's latest sol number
//!
//! It also serves the media root under `/files/` and answers `/health`.

mod files;
mod handlers;
mod routes;
mod server;
mod state;
mod types;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use files::*;
pub use handlers::*;
pub use routes::*;
pub use server::*;
pub use state::*;
pub use types::*;
