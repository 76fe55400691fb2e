//! REST API handlers
//!
//! The optimization endpoint never surfaces provider-side failures; the
//! playground endpoint propagates them as an error response.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use optimizer::traits::ModelRouter;
use shared::{GenerationRequest, OptimizationRecord, OptimizationRequest, OptimizationResponse};

use crate::state::AppState;
use crate::traits::RecordStore;

/// API root greeting
pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to PromptLab API" }))
}

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Optimize a draft prompt - POST /optimize
pub async fn optimize<R, S>(
    State(state): State<AppState<R, S>>,
    Json(request): Json<OptimizationRequest>,
) -> Json<OptimizationResponse>
where
    R: ModelRouter + 'static,
    S: RecordStore + 'static,
{
    let response = state.optimizer.optimize(&request).await;

    // Persistence happens off the request path; the response is already
    // final and must not wait on or observe store failures.
    let record = OptimizationRecord::from_response(&response);
    let store = Arc::clone(&state.store);
    tokio::spawn(async move { store.save(record).await });

    Json(response)
}

/// Raw playground completion - POST /generate
pub async fn generate<R, S>(
    State(state): State<AppState<R, S>>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)>
where
    R: ModelRouter + 'static,
    S: RecordStore + 'static,
{
    match state
        .optimizer
        .generate(&request.prompt, &request.model)
        .await
    {
        Ok(result) => Ok(Json(json!({ "result": result }))),
        Err(error) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": error.to_string() })),
        )),
    }
}

/// Optimization history, newest first - GET /history
pub async fn history<R, S>(State(state): State<AppState<R, S>>) -> Json<Vec<OptimizationRecord>>
where
    R: ModelRouter + 'static,
    S: RecordStore + 'static,
{
    Json(state.store.list().await)
}
