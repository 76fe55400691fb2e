//! PromptLab web service
//!
//! HTTP surface for the prompt optimizer: the optimization and playground
//! endpoints plus best-effort optimization history.

pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use services::RealRecordStore;
pub use state::AppState;
pub use traits::RecordStore;
pub use webserver_impl::WebServer;
