//! Shared plumbing for the hbnb workspace: logging setup, startup
//! directory checks and small response types.

pub mod types;
pub mod utils;
pub mod env;
