//! Main webserver implementation
//!
//! Wires the optimizer and record store into an axum router.

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use optimizer::traits::ModelRouter;

use crate::error::{WebServerError, WebServerResult};
use crate::state::AppState;
use crate::traits::RecordStore;
use crate::web::handlers::api;

/// HTTP front for the prompt optimizer.
pub struct WebServer<R, S>
where
    R: ModelRouter + 'static,
    S: RecordStore + 'static,
{
    state: AppState<R, S>,
    port: u16,
}

impl<R, S> WebServer<R, S>
where
    R: ModelRouter + 'static,
    S: RecordStore + 'static,
{
    pub fn new(state: AppState<R, S>, port: u16) -> Self {
        Self { state, port }
    }

    /// Build the axum router with all routes.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(api::welcome))
            .route("/optimize", post(api::optimize::<R, S>))
            .route("/generate", post(api::generate::<R, S>))
            .route("/history", get(api::history::<R, S>))
            .route("/health", get(api::health))
            .layer(
                // Browser clients live on a different origin.
                ServiceBuilder::new()
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.state.clone())
    }

    /// Serve until the process is stopped.
    pub async fn run(&self) -> WebServerResult<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            WebServerError::ServerStartupFailed {
                port: self.port,
                message: e.to_string(),
            }
        })?;

        tracing::info!(%addr, "PromptLab API listening");
        axum::serve(listener, self.build_router()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use optimizer::traits::MockModelRouter;
    use optimizer::PromptOptimizer;

    use super::*;
    use crate::services::RealRecordStore;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let state = AppState::new(
            PromptOptimizer::new(MockModelRouter::new()),
            RealRecordStore::disabled(),
        );

        // Route registration panics on conflicts; building is the check.
        let _router = WebServer::new(state, 0).build_router();
    }
}
