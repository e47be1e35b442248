//! Server state management.

use std::sync::Arc;

use crate::catalog::CatalogScanner;

//-------------------------------------------------------------------------------------------------
// Types
//-------------------------------------------------------------------------------------------------

/// Shared server state handed to every request handler.
///
/// The scanner holds no mutable state, so it is shared without a lock.
#[derive(Clone)]
pub struct ServerState {
    /// The catalog scanner rooted at the configured media root.
    scanner: Arc<CatalogScanner>,
}

impl ServerState {
    /// Creates a new ServerState instance
    pub fn new(scanner: CatalogScanner) -> Self {
        Self {
            scanner: Arc::new(scanner),
        }
    }

    /// Gets a reference to the scanner
    pub fn scanner(&self) -> &CatalogScanner {
        &self.scanner
    }
}
