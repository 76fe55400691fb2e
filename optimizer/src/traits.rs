//! Optimizer trait definitions for dependency injection

use async_trait::async_trait;

use shared::ProviderResult;

/// A single upstream LLM provider.
///
/// One invocation issues exactly one outbound HTTP call, bounded by the
/// provider's timeout tier; the credential is checked before any network
/// I/O. No retries at this layer.
#[mockall::automock]
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Free-form completion for playground use.
    async fn complete_raw(&self, message: &str) -> ProviderResult<String>;

    /// Completion expected to yield a JSON array of variations. Prepends
    /// the JSON-only system instruction and requests a larger output
    /// budget than the raw variant.
    async fn complete_structured(&self, message: &str) -> ProviderResult<String>;
}

/// Maps free-form model identifiers onto provider calls.
///
/// A given identifier selects the same provider for both call shapes.
/// The per-request key override applies to the default provider only.
#[mockall::automock]
#[async_trait]
pub trait ModelRouter: Send + Sync {
    /// Raw completion through the provider selected for `model`.
    async fn complete_raw(
        &self,
        model: &str,
        message: &str,
        api_key: Option<String>,
    ) -> ProviderResult<String>;

    /// Structured completion through the provider selected for `model`.
    async fn complete_structured(
        &self,
        model: &str,
        message: &str,
        api_key: Option<String>,
    ) -> ProviderResult<String>;
}
