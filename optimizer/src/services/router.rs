//! Keyword routing from model identifiers to provider clients
//!
//! The identifier space is open-ended (UI aliases), so matching is
//! tolerant: case-insensitive substring keywords evaluated top-down, first
//! rule wins, default last. Raw and structured completion share the same
//! table, so a given identifier always reaches the same provider for both
//! call shapes.

use async_trait::async_trait;

use shared::{ProviderCredentials, ProviderId, ProviderResult};

use crate::services::providers::{ChatCompletionsClient, GeminiClient, ProviderEndpoints};
use crate::traits::{ModelRouter, ProviderClient};

const OPENROUTER_MODEL: &str = "xiaomi/mimo-v2-flash:free";
const HUGGINGFACE_MODEL: &str = "Qwen/Qwen2.5-7B-Instruct";

/// Resolved routing target: which provider to call and which upstream
/// model name to ask it for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRoute {
    pub provider: ProviderId,
    pub model: &'static str,
}

/// One routing rule; every keyword must appear in the identifier.
struct RouteRule {
    keywords: &'static [&'static str],
    provider: ProviderId,
    model: &'static str,
}

/// Ordered match rules, evaluated top-down.
const ROUTE_TABLE: &[RouteRule] = &[
    RouteRule {
        keywords: &["llama"],
        provider: ProviderId::Groq,
        model: "llama-3.3-70b-versatile",
    },
    RouteRule {
        keywords: &["gemma", "groq"],
        provider: ProviderId::Groq,
        model: "gemma2-9b-it",
    },
    RouteRule {
        keywords: &["mimo"],
        provider: ProviderId::OpenRouter,
        model: OPENROUTER_MODEL,
    },
    RouteRule {
        keywords: &["openrouter"],
        provider: ProviderId::OpenRouter,
        model: OPENROUTER_MODEL,
    },
    RouteRule {
        keywords: &["qwen"],
        provider: ProviderId::HuggingFace,
        model: HUGGINGFACE_MODEL,
    },
    RouteRule {
        keywords: &["huggingface"],
        provider: ProviderId::HuggingFace,
        model: HUGGINGFACE_MODEL,
    },
];

/// Route used when no rule matches. Unrecognized identifiers are accepted
/// on purpose; callers pass unvetted aliases from a UI dropdown.
const DEFAULT_ROUTE: ModelRoute = ModelRoute {
    provider: ProviderId::Gemini,
    model: "gemini-flash-latest",
};

/// Map a free-form model identifier onto a provider and upstream model.
pub fn resolve(model_id: &str) -> ModelRoute {
    let needle = model_id.to_lowercase();
    for rule in ROUTE_TABLE {
        if rule.keywords.iter().all(|keyword| needle.contains(keyword)) {
            return ModelRoute {
                provider: rule.provider,
                model: rule.model,
            };
        }
    }
    DEFAULT_ROUTE
}

/// Router backed by real provider clients.
pub struct RealModelRouter {
    credentials: ProviderCredentials,
    endpoints: ProviderEndpoints,
}

impl RealModelRouter {
    /// Create a router from startup-resolved credentials and endpoints.
    pub fn new(credentials: ProviderCredentials, endpoints: ProviderEndpoints) -> Self {
        Self {
            credentials,
            endpoints,
        }
    }

    /// Build the client for a resolved route. The per-request key override
    /// applies only to the default provider; other providers always use
    /// their configured credential.
    fn client_for(&self, route: &ModelRoute, api_key: Option<&str>) -> Box<dyn ProviderClient> {
        match route.provider {
            ProviderId::Gemini => {
                let key = api_key
                    .map(str::to_string)
                    .or_else(|| self.credentials.gemini.clone());
                Box::new(GeminiClient::new(route.model, key, &self.endpoints.gemini))
            }
            ProviderId::Groq => Box::new(ChatCompletionsClient::groq(
                route.model,
                self.credentials.groq.clone(),
                &self.endpoints.groq,
            )),
            ProviderId::OpenRouter => Box::new(ChatCompletionsClient::openrouter(
                route.model,
                self.credentials.openrouter.clone(),
                &self.endpoints.openrouter,
            )),
            ProviderId::HuggingFace => Box::new(ChatCompletionsClient::huggingface(
                route.model,
                self.credentials.huggingface.clone(),
                &self.endpoints.huggingface,
            )),
        }
    }
}

#[async_trait]
impl ModelRouter for RealModelRouter {
    async fn complete_raw(
        &self,
        model: &str,
        message: &str,
        api_key: Option<String>,
    ) -> ProviderResult<String> {
        let route = resolve(model);
        tracing::debug!(provider = %route.provider, model = route.model, "dispatching raw completion");
        self.client_for(&route, api_key.as_deref())
            .complete_raw(message)
            .await
    }

    async fn complete_structured(
        &self,
        model: &str,
        message: &str,
        api_key: Option<String>,
    ) -> ProviderResult<String> {
        let route = resolve(model);
        tracing::debug!(provider = %route.provider, model = route.model, "dispatching structured completion");
        self.client_for(&route, api_key.as_deref())
            .complete_structured(message)
            .await
    }
}
