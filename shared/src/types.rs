//! Core shared types for prompt optimization

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for downstream LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    Gemini,
    Groq,
    OpenRouter,
    HuggingFace,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini",
            ProviderId::Groq => "groq",
            ProviderId::OpenRouter => "openrouter",
            ProviderId::HuggingFace => "huggingface",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn env_key(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "GEMINI_API_KEY",
            ProviderId::Groq => "GROQ_API_KEY",
            ProviderId::OpenRouter => "OPENROUTER_API_KEY",
            ProviderId::HuggingFace => "HUGGINGFACE_API_KEY",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One candidate rewrite of a draft prompt.
///
/// The rewritten text is serialized as `variation`, the field name the UI
/// contract uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    #[serde(rename = "variation")]
    pub text: String,
    pub critique: String,
    /// Quality score for relative ranking; producers emit 0-100.
    pub score: i32,
}

/// Caller input for one optimization call; immutable once deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub prompt: String,
    /// Optimization objective; blank or absent falls back to the default
    /// clarity/structure/effectiveness goal.
    #[serde(default)]
    pub goal: Option<String>,
    /// Free-form model alias; absent routes to the default provider.
    #[serde(default)]
    pub model: Option<String>,
    /// Override credential, honored for the default provider only.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Playground input for raw completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: String,
}

/// Ranked optimization result.
///
/// `optimized_prompt` and `improvements` always come from `variations[0]`
/// after the descending-score sort; `variations` is never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResponse {
    pub original_prompt: String,
    pub optimized_prompt: String,
    pub improvements: String,
    pub variations: Vec<Variation>,
    pub created_at: DateTime<Utc>,
}

/// Persisted projection of an optimization run. `id` and `created_at` are
/// assigned by the store and absent before persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub original_prompt: String,
    pub optimized_prompt: String,
    pub improvement_score: i32,
    pub improvements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl OptimizationRecord {
    /// Project a finished response into its persisted form; the top
    /// variation's score becomes `improvement_score`.
    pub fn from_response(response: &OptimizationResponse) -> Self {
        Self {
            id: None,
            original_prompt: response.original_prompt.clone(),
            optimized_prompt: response.optimized_prompt.clone(),
            improvement_score: response.variations.first().map(|v| v.score).unwrap_or(0),
            improvements: response.improvements.clone(),
            created_at: None,
        }
    }
}

/// Per-provider credentials, resolved once at startup.
///
/// Absence of a credential only matters when that provider is selected for
/// a call.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub gemini: Option<String>,
    pub groq: Option<String>,
    pub openrouter: Option<String>,
    pub huggingface: Option<String>,
}

impl ProviderCredentials {
    /// Read every provider key from the environment.
    pub fn from_env() -> Self {
        Self {
            gemini: std::env::var(ProviderId::Gemini.env_key()).ok(),
            groq: std::env::var(ProviderId::Groq.env_key()).ok(),
            openrouter: std::env::var(ProviderId::OpenRouter.env_key()).ok(),
            huggingface: std::env::var(ProviderId::HuggingFace.env_key()).ok(),
        }
    }

    pub fn get(&self, provider: ProviderId) -> Option<&str> {
        match provider {
            ProviderId::Gemini => self.gemini.as_deref(),
            ProviderId::Groq => self.groq.as_deref(),
            ProviderId::OpenRouter => self.openrouter.as_deref(),
            ProviderId::HuggingFace => self.huggingface.as_deref(),
        }
    }

    /// Providers that have a configured credential.
    pub fn configured(&self) -> Vec<ProviderId> {
        [
            ProviderId::Gemini,
            ProviderId::Groq,
            ProviderId::OpenRouter,
            ProviderId::HuggingFace,
        ]
        .into_iter()
        .filter(|provider| self.get(*provider).is_some())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variation_text_serializes_as_variation() {
        let variation = Variation {
            text: "rewritten".to_string(),
            critique: "tightened wording".to_string(),
            score: 90,
        };

        let json = serde_json::to_value(&variation).unwrap();
        assert_eq!(json["variation"], "rewritten");
        assert!(json.get("text").is_none());

        let parsed: Variation =
            serde_json::from_str(r#"{"variation":"v","critique":"c","score":7}"#).unwrap();
        assert_eq!(parsed.text, "v");
        assert_eq!(parsed.score, 7);
    }

    #[test]
    fn record_projection_uses_top_variation_score() {
        let response = OptimizationResponse {
            original_prompt: "draft".to_string(),
            optimized_prompt: "better".to_string(),
            improvements: "why".to_string(),
            variations: vec![
                Variation {
                    text: "better".to_string(),
                    critique: "why".to_string(),
                    score: 95,
                },
                Variation {
                    text: "other".to_string(),
                    critique: "meh".to_string(),
                    score: 60,
                },
            ],
            created_at: Utc::now(),
        };

        let record = OptimizationRecord::from_response(&response);
        assert_eq!(record.improvement_score, 95);
        assert!(record.id.is_none());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn record_insert_serialization_skips_store_assigned_fields() {
        let record = OptimizationRecord {
            id: None,
            original_prompt: "a".to_string(),
            optimized_prompt: "b".to_string(),
            improvement_score: 80,
            improvements: "c".to_string(),
            created_at: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn credentials_report_configured_providers() {
        let credentials = ProviderCredentials {
            groq: Some("gk".to_string()),
            ..Default::default()
        };

        assert_eq!(credentials.get(ProviderId::Groq), Some("gk"));
        assert_eq!(credentials.get(ProviderId::Gemini), None);
        assert_eq!(credentials.configured(), vec![ProviderId::Groq]);
    }
}
