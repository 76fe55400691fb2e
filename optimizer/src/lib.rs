//! Prompt optimization core
//!
//! Routes a caller-supplied model identifier to one of several LLM
//! providers, normalizes the provider's answer into scored prompt
//! variations, and guarantees a usable result even when every provider
//! step fails.

pub mod core;
pub mod services;
pub mod traits;

// Re-export main types
pub use crate::core::{PromptOptimizer, DEFAULT_GOAL, DEFAULT_MODEL};
pub use crate::services::*;
pub use crate::traits::*;
