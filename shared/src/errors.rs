//! Shared error types for provider calls

use thiserror::Error;

use crate::types::ProviderId;

/// Failure kinds for a single provider call-and-parse chain.
///
/// Every variant is eligible for the optimizer's fallback conversion; the
/// raw completion path propagates them unmodified. `Network` covers
/// transport failures including the per-provider timeout and is handled
/// identically to `Http` everywhere.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The selected provider has no configured credential. Raised before
    /// any network I/O.
    #[error("{provider} API key missing")]
    CredentialMissing { provider: ProviderId },

    /// Non-success HTTP status; the body is surfaced as diagnostic detail.
    #[error("{provider} API error {status}: {body}")]
    Http {
        provider: ProviderId,
        status: u16,
        body: String,
    },

    /// Transport failure (connect, timeout).
    #[error("{provider} request failed: {message}")]
    Network { provider: ProviderId, message: String },

    /// Success response that cannot be navigated to the expected content
    /// field.
    #[error("unexpected {provider} response: {detail}")]
    Shape { provider: ProviderId, detail: String },

    /// Structured output that cannot be decoded into a variation list.
    #[error("malformed variation response: {detail}")]
    Malformed { detail: String },
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
