//! Pulls the suggested domain list out of free-form model output.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static DOMAINS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{[\s\S]*?"domains"[\s\S]*?\}"#).expect("domains block pattern is valid")
});

static EMPTY_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*```").expect("empty fence pattern is valid"));

#[derive(Debug, Deserialize)]
struct SuggestedDomains {
    domains: serde_json::Value,
}

/// Domain names from the first `{"domains": [...]}` object in `response`.
///
/// Non-string and blank entries are skipped. Anything unparseable yields
/// an empty list.
pub fn extract_domains(response: &str, limit: usize) -> Vec<String> {
    let Some(block) = DOMAINS_BLOCK.find(response) else {
        return Vec::new();
    };

    let parsed: SuggestedDomains = match serde_json::from_str(block.as_str()) {
        Ok(parsed) => parsed,
        Err(error) => {
            tracing::warn!(error = %error, "failed to parse domains from model response");
            return Vec::new();
        }
    };

    let Some(items) = parsed.domains.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|domain| !domain.is_empty())
        .take(limit)
        .map(str::to_owned)
        .collect()
}

/// The response text with the domains block (and its emptied code fence)
/// removed.
pub fn clean_response(response: &str) -> String {
    let without_block = DOMAINS_BLOCK.replace(response, "");
    let without_fence = EMPTY_FENCE.replace(&without_block, "");

    without_fence.trim().to_owned()
}
