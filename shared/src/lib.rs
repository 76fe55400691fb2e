//! Shared types for the prompt optimization service
//!
//! Contains the wire types exchanged with callers, the provider failure
//! kinds shared between the optimizer core and the web layer, and the
//! tracing setup used by service binaries.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
