//! Orchestrator tests against a mocked router
//!
//! Verifies goal resolution, ranking, and the fallback policy without any
//! network access.

use optimizer::traits::MockModelRouter;
use optimizer::{PromptOptimizer, DEFAULT_GOAL};
use shared::{OptimizationRequest, ProviderError, ProviderId};

const THREE_VARIATIONS: &str = r#"[
    {"variation": "structured rewrite", "critique": "clear sections", "score": 80},
    {"variation": "precise rewrite", "critique": "tight constraints", "score": 95},
    {"variation": "persuasive rewrite", "critique": "engaging tone", "score": 60}
]"#;

fn request(prompt: &str, goal: Option<&str>, model: Option<&str>) -> OptimizationRequest {
    OptimizationRequest {
        prompt: prompt.to_string(),
        goal: goal.map(str::to_string),
        model: model.map(str::to_string),
        api_key: None,
    }
}

#[tokio::test]
async fn optimize_ranks_variations_by_score_descending() {
    let mut router = MockModelRouter::new();
    router
        .expect_complete_structured()
        .withf(|model, message, api_key| {
            model == "gemini-flash"
                && message.contains(r#"DRAFT PROMPT: "write a poem""#)
                && message.contains(DEFAULT_GOAL)
                && api_key.is_none()
        })
        .returning(|_, _, _| Ok(THREE_VARIATIONS.to_string()));

    let optimizer = PromptOptimizer::new(router);
    let response = optimizer
        .optimize(&request("write a poem", Some(""), Some("gemini-flash")))
        .await;

    let scores: Vec<i32> = response.variations.iter().map(|v| v.score).collect();
    assert_eq!(scores, vec![95, 80, 60]);
    assert_eq!(response.original_prompt, "write a poem");
    assert_eq!(response.optimized_prompt, "precise rewrite");
    assert_eq!(response.improvements, "tight constraints");
}

#[tokio::test]
async fn response_head_always_matches_the_top_variation() {
    let mut router = MockModelRouter::new();
    router
        .expect_complete_structured()
        .returning(|_, _, _| Ok(THREE_VARIATIONS.to_string()));

    let optimizer = PromptOptimizer::new(router);
    let response = optimizer.optimize(&request("draft", None, None)).await;

    assert_eq!(response.optimized_prompt, response.variations[0].text);
    assert_eq!(response.improvements, response.variations[0].critique);
}

#[tokio::test]
async fn equal_scores_keep_parser_order() {
    let tied = r#"[
        {"variation": "first of tie", "critique": "a", "score": 90},
        {"variation": "second of tie", "critique": "b", "score": 90},
        {"variation": "lower", "critique": "c", "score": 70}
    ]"#;

    let mut router = MockModelRouter::new();
    router
        .expect_complete_structured()
        .returning(move |_, _, _| Ok(tied.to_string()));

    let optimizer = PromptOptimizer::new(router);
    let response = optimizer.optimize(&request("draft", None, None)).await;

    assert_eq!(response.variations[0].text, "first of tie");
    assert_eq!(response.variations[1].text, "second of tie");
    assert_eq!(response.variations[2].text, "lower");
}

#[tokio::test]
async fn non_blank_goal_is_trimmed_into_the_message() {
    let mut router = MockModelRouter::new();
    router
        .expect_complete_structured()
        .withf(|_, message, _| message.contains(r#"OPTIMIZATION GOAL: "be concise""#))
        .returning(|_, _, _| Ok(THREE_VARIATIONS.to_string()));

    let optimizer = PromptOptimizer::new(router);
    optimizer
        .optimize(&request("draft", Some("  be concise  "), None))
        .await;
}

#[tokio::test]
async fn missing_model_defaults_to_the_canonical_alias() {
    let mut router = MockModelRouter::new();
    router
        .expect_complete_structured()
        .withf(|model, _, _| model == "gemini-flash")
        .returning(|_, _, _| Ok(THREE_VARIATIONS.to_string()));

    let optimizer = PromptOptimizer::new(router);
    optimizer.optimize(&request("draft", None, None)).await;
}

#[tokio::test]
async fn api_key_override_is_forwarded() {
    let mut router = MockModelRouter::new();
    router
        .expect_complete_structured()
        .withf(|_, _, api_key| api_key.as_deref() == Some("override-key"))
        .returning(|_, _, _| Ok(THREE_VARIATIONS.to_string()));

    let optimizer = PromptOptimizer::new(router);
    let mut req = request("draft", None, None);
    req.api_key = Some("override-key".to_string());
    optimizer.optimize(&req).await;
}

#[tokio::test]
async fn provider_failures_degrade_into_the_fallback_variation() {
    let failures = vec![
        ProviderError::CredentialMissing {
            provider: ProviderId::Groq,
        },
        ProviderError::Http {
            provider: ProviderId::Groq,
            status: 500,
            body: "internal error".to_string(),
        },
        ProviderError::Network {
            provider: ProviderId::OpenRouter,
            message: "connection timed out".to_string(),
        },
        ProviderError::Shape {
            provider: ProviderId::Gemini,
            detail: "no candidates".to_string(),
        },
    ];

    for failure in failures {
        let expected_text = failure.to_string();

        let mut router = MockModelRouter::new();
        let returned = failure.clone();
        router
            .expect_complete_structured()
            .returning(move |_, _, _| Err(returned.clone()));

        let optimizer = PromptOptimizer::new(router);
        let response = optimizer
            .optimize(&request("draft", None, Some("llama-fast")))
            .await;

        assert_eq!(response.variations.len(), 1, "failure {expected_text}");
        let fallback = &response.variations[0];
        assert_eq!(fallback.score, 50);
        assert!(fallback.text.contains("llama-fast"));
        assert!(
            fallback.critique.contains(&expected_text),
            "critique {:?} should embed {:?}",
            fallback.critique,
            expected_text
        );
        assert_eq!(response.optimized_prompt, fallback.text);
    }
}

#[tokio::test]
async fn unparseable_content_degrades_into_the_fallback_variation() {
    let mut router = MockModelRouter::new();
    router
        .expect_complete_structured()
        .returning(|_, _, _| Ok("Sorry, I cannot answer in JSON.".to_string()));

    let optimizer = PromptOptimizer::new(router);
    let response = optimizer
        .optimize(&request("draft", None, Some("qwen-7b")))
        .await;

    assert_eq!(response.variations.len(), 1);
    assert_eq!(response.variations[0].score, 50);
    assert!(response.variations[0].text.contains("qwen-7b"));
}

#[tokio::test]
async fn empty_variation_array_degrades_into_the_fallback_variation() {
    let mut router = MockModelRouter::new();
    router
        .expect_complete_structured()
        .returning(|_, _, _| Ok("[]".to_string()));

    let optimizer = PromptOptimizer::new(router);
    let response = optimizer.optimize(&request("draft", None, None)).await;

    assert_eq!(response.variations.len(), 1);
    assert_eq!(response.variations[0].score, 50);
    assert!(response.variations[0]
        .critique
        .contains("empty variation array"));
}

#[tokio::test]
async fn generate_returns_the_raw_completion() {
    let mut router = MockModelRouter::new();
    router
        .expect_complete_raw()
        .withf(|model, message, api_key| {
            model == "llama-fast" && message == "say hi" && api_key.is_none()
        })
        .returning(|_, _, _| Ok("hi".to_string()));

    let optimizer = PromptOptimizer::new(router);
    let result = optimizer.generate("say hi", "llama-fast").await.unwrap();
    assert_eq!(result, "hi");
}

#[tokio::test]
async fn generate_propagates_provider_errors() {
    let mut router = MockModelRouter::new();
    router.expect_complete_raw().returning(|_, _, _| {
        Err(ProviderError::CredentialMissing {
            provider: ProviderId::Groq,
        })
    });

    let optimizer = PromptOptimizer::new(router);
    let error = optimizer.generate("say hi", "llama-fast").await.unwrap_err();
    assert!(matches!(error, ProviderError::CredentialMissing { .. }));
}
