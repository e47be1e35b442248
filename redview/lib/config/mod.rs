//! Service configuration and defaults.

mod defaults;
mod service;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use defaults::*;
pub use service::*;
