//! Web service trait definitions

use async_trait::async_trait;

use shared::OptimizationRecord;

/// Record store gateway.
///
/// Both operations are best-effort: failures are logged and swallowed at
/// this boundary and never surface to callers.
#[mockall::automock]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist one optimization record; a no-op when the store is
    /// disabled.
    async fn save(&self, record: OptimizationRecord);

    /// All records, newest first; empty when the store is disabled or
    /// erroring.
    async fn list(&self) -> Vec<OptimizationRecord>;
}
