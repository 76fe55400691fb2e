//! Provider HTTP clients
//!
//! One client per upstream provider family. Each knows its endpoint, its
//! credential, its request envelope, and the JSON path that carries the
//! generated text. A client issues exactly one outbound call per
//! invocation and never retries.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use shared::{ProviderError, ProviderId, ProviderResult};

use crate::traits::ProviderClient;

/// System instruction prepended to structured calls.
pub const JSON_ONLY_INSTRUCTION: &str =
    "You are a JSON-only API. You must return ONLY a JSON array.";

/// Output budget for raw completions.
const RAW_MAX_TOKENS: u32 = 1024;
/// Output budget for structured completions; must carry three full
/// variations plus critiques.
const STRUCTURED_MAX_TOKENS: u32 = 2048;

const TEMPERATURE: f64 = 0.7;

/// Base URLs for each provider, overridable for fake-server tests and
/// local proxies.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub gemini: String,
    pub groq: String,
    pub openrouter: String,
    pub huggingface: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            gemini: "https://generativelanguage.googleapis.com".to_string(),
            groq: "https://api.groq.com/openai".to_string(),
            openrouter: "https://openrouter.ai/api".to_string(),
            huggingface: "https://router.huggingface.co".to_string(),
        }
    }
}

impl ProviderEndpoints {
    /// Resolve endpoints from `*_BASE_URL` variables, falling back to the
    /// real provider URLs.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gemini: std::env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini),
            groq: std::env::var("GROQ_BASE_URL").unwrap_or(defaults.groq),
            openrouter: std::env::var("OPENROUTER_BASE_URL").unwrap_or(defaults.openrouter),
            huggingface: std::env::var("HUGGINGFACE_BASE_URL").unwrap_or(defaults.huggingface),
        }
    }
}

/// Per-provider request timeout tier. Gemini and Groq answer fast;
/// OpenRouter and the HuggingFace router are aggregators with added
/// latency.
fn request_timeout(provider: ProviderId) -> Duration {
    match provider {
        ProviderId::Gemini => Duration::from_secs(30),
        ProviderId::Groq => Duration::from_secs(30),
        ProviderId::OpenRouter => Duration::from_secs(45),
        ProviderId::HuggingFace => Duration::from_secs(60),
    }
}

/// Surface a non-success status with its body, or decode the payload.
async fn into_payload(provider: ProviderId, response: reqwest::Response) -> ProviderResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Http {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    response.json().await.map_err(|e| ProviderError::Shape {
        provider,
        detail: e.to_string(),
    })
}

/// Google Gemini client; the default provider.
///
/// Auth travels as a `key` query parameter and the model name is part of
/// the URL, unlike the chat-completions providers.
pub struct GeminiClient {
    model: String,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiClient {
    pub fn new(model: &str, api_key: Option<String>, base_url: &str) -> Self {
        Self {
            model: model.to_string(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn generate(&self, text: &str, max_tokens: u32) -> ProviderResult<String> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::CredentialMissing {
                provider: ProviderId::Gemini,
            })?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": {
                "maxOutputTokens": max_tokens,
                "temperature": TEMPERATURE
            }
        });

        let response = reqwest::Client::new()
            .post(&url)
            .timeout(request_timeout(ProviderId::Gemini))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                provider: ProviderId::Gemini,
                message: e.to_string(),
            })?;

        let payload = into_payload(ProviderId::Gemini, response).await?;
        payload
            .get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.get(0))
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::Shape {
                provider: ProviderId::Gemini,
                detail: payload.to_string(),
            })
    }
}

#[async_trait]
impl ProviderClient for GeminiClient {
    async fn complete_raw(&self, message: &str) -> ProviderResult<String> {
        self.generate(message, RAW_MAX_TOKENS).await
    }

    async fn complete_structured(&self, message: &str) -> ProviderResult<String> {
        // generateContent carries no system role; fold the instruction
        // into the user text instead.
        let text = format!("{JSON_ONLY_INSTRUCTION}\n\n{message}");
        self.generate(&text, STRUCTURED_MAX_TOKENS).await
    }
}

/// Client for the OpenAI-compatible chat-completions providers (Groq,
/// OpenRouter, HuggingFace router). Bearer auth, `choices[0].message.content`
/// extraction.
pub struct ChatCompletionsClient {
    provider: ProviderId,
    model: String,
    api_key: Option<String>,
    base_url: String,
}

impl ChatCompletionsClient {
    fn new(provider: ProviderId, model: &str, api_key: Option<String>, base_url: &str) -> Self {
        Self {
            provider,
            model: model.to_string(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn groq(model: &str, api_key: Option<String>, base_url: &str) -> Self {
        Self::new(ProviderId::Groq, model, api_key, base_url)
    }

    pub fn openrouter(model: &str, api_key: Option<String>, base_url: &str) -> Self {
        Self::new(ProviderId::OpenRouter, model, api_key, base_url)
    }

    pub fn huggingface(model: &str, api_key: Option<String>, base_url: &str) -> Self {
        Self::new(ProviderId::HuggingFace, model, api_key, base_url)
    }

    async fn chat(&self, messages: Value, max_tokens: u32) -> ProviderResult<String> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::CredentialMissing {
                provider: self.provider,
            })?;

        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": TEMPERATURE,
            "max_tokens": max_tokens
        });

        let response = reqwest::Client::new()
            .post(&url)
            .timeout(request_timeout(self.provider))
            .header("Authorization", format!("Bearer {key}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                provider: self.provider,
                message: e.to_string(),
            })?;

        let payload = into_payload(self.provider, response).await?;
        payload
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::Shape {
                provider: self.provider,
                detail: payload.to_string(),
            })
    }
}

#[async_trait]
impl ProviderClient for ChatCompletionsClient {
    async fn complete_raw(&self, message: &str) -> ProviderResult<String> {
        let messages = json!([{ "role": "user", "content": message }]);
        self.chat(messages, RAW_MAX_TOKENS).await
    }

    async fn complete_structured(&self, message: &str) -> ProviderResult<String> {
        let messages = json!([
            { "role": "system", "content": JSON_ONLY_INSTRUCTION },
            { "role": "user", "content": message }
        ]);
        self.chat(messages, STRUCTURED_MAX_TOKENS).await
    }
}
