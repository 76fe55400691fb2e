//! Optimization orchestration and fallback policy

use chrono::Utc;
use tracing::warn;

use shared::{OptimizationRequest, OptimizationResponse, ProviderError, ProviderResult, Variation};

use crate::core::prompt::{build_optimization_message, effective_goal, DEFAULT_MODEL};
use crate::services::parser::parse_variations;
use crate::traits::ModelRouter;

/// Score assigned to the degraded fallback variation.
const FALLBACK_SCORE: i32 = 50;

/// Orchestrates one optimization call: message construction, provider
/// dispatch, normalization, ranking, and the guaranteed fallback.
pub struct PromptOptimizer<R: ModelRouter> {
    router: R,
}

impl<R: ModelRouter> PromptOptimizer<R> {
    pub fn new(router: R) -> Self {
        Self { router }
    }

    /// Produce ranked variations for a draft prompt.
    ///
    /// Never fails for provider-side reasons: any error in the
    /// call-and-parse chain degrades into the single fallback variation,
    /// so the returned list always has at least one element.
    pub async fn optimize(&self, request: &OptimizationRequest) -> OptimizationResponse {
        let goal = effective_goal(request.goal.as_deref());
        let model = request.model.as_deref().unwrap_or(DEFAULT_MODEL);
        let message = build_optimization_message(&request.prompt, goal);

        let mut variations = match self
            .generate_variations(model, &message, request.api_key.clone())
            .await
        {
            Ok(variations) => variations,
            Err(error) => {
                warn!(model, %error, "variation generation failed, returning fallback");
                vec![fallback_variation(model, &error)]
            }
        };

        // Stable sort keeps parser order among equal scores.
        variations.sort_by(|a, b| b.score.cmp(&a.score));

        OptimizationResponse {
            original_prompt: request.prompt.clone(),
            optimized_prompt: variations[0].text.clone(),
            improvements: variations[0].critique.clone(),
            variations,
            created_at: Utc::now(),
        }
    }

    async fn generate_variations(
        &self,
        model: &str,
        message: &str,
        api_key: Option<String>,
    ) -> ProviderResult<Vec<Variation>> {
        let content = self
            .router
            .complete_structured(model, message, api_key)
            .await?;
        let variations = parse_variations(&content)?;
        if variations.is_empty() {
            return Err(ProviderError::Malformed {
                detail: "empty variation array".to_string(),
            });
        }
        Ok(variations)
    }

    /// Raw completion for playground use; provider errors propagate to the
    /// caller unmodified.
    pub async fn generate(&self, prompt: &str, model: &str) -> ProviderResult<String> {
        self.router.complete_raw(model, prompt, None).await
    }
}

/// The single conversion point from a captured failure to the degraded
/// result. Every `ProviderError` kind is eligible; the error text is kept
/// verbatim in the critique for diagnosability.
fn fallback_variation(model: &str, error: &ProviderError) -> Variation {
    Variation {
        text: format!("Fallback Variation (Error in {model})"),
        critique: format!("Error: {error}"),
        score: FALLBACK_SCORE,
    }
}
