//! Normalization of structured provider output into variations

use shared::{ProviderError, ProviderResult, Variation};

/// Strip a leading/trailing triple-backtick fence, and the language tag
/// that commonly follows the opening fence, before JSON decoding.
fn strip_code_fences(content: &str) -> &str {
    let mut cleaned = content.trim();
    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = match rest.split_once('\n') {
            Some((_tag, body)) => body,
            None => rest,
        };
    }
    if let Some(rest) = cleaned.trim_end().strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

/// Decode a provider's structured answer into a variation list.
///
/// The payload must be a JSON array whose elements each carry the
/// `variation`, `critique`, and `score` fields with the right kinds;
/// anything else is `Malformed`. Pure function of its input.
pub fn parse_variations(content: &str) -> ProviderResult<Vec<Variation>> {
    let cleaned = strip_code_fences(content);
    serde_json::from_str(cleaned).map_err(|e| ProviderError::Malformed {
        detail: e.to_string(),
    })
}
