//! Shared request-handler state

use std::sync::Arc;

use optimizer::traits::ModelRouter;
use optimizer::PromptOptimizer;

use crate::traits::RecordStore;

/// Dependencies shared by all request handlers.
pub struct AppState<R, S>
where
    R: ModelRouter,
    S: RecordStore,
{
    pub optimizer: Arc<PromptOptimizer<R>>,
    pub store: Arc<S>,
}

impl<R, S> AppState<R, S>
where
    R: ModelRouter,
    S: RecordStore,
{
    pub fn new(optimizer: PromptOptimizer<R>, store: S) -> Self {
        Self {
            optimizer: Arc::new(optimizer),
            store: Arc::new(store),
        }
    }
}

impl<R, S> Clone for AppState<R, S>
where
    R: ModelRouter,
    S: RecordStore,
{
    fn clone(&self) -> Self {
        Self {
            optimizer: Arc::clone(&self.optimizer),
            store: Arc::clone(&self.store),
        }
    }
}
