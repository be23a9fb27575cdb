use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

pub const DEFAULT_AVAILABILITY_URL: &str = "https://domain-availability.whoisxmlapi.com/api/v1";
pub const DEFAULT_LLM_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CACHE_EXPIRY_MS: u64 = 86_400_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub availability: AvailabilityConfig,
    pub cache: CacheConfig,
    pub llm: LlmConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Log file; stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailabilityConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Credit type passed to the lookup API.
    pub credits: String,
    /// Per-request timeout; the HTTP client default applies when unset.
    pub request_timeout_ms: Option<u64>,
}

impl AvailabilityConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_AVAILABILITY_URL.to_owned(),
            credits: "DA".to_owned(),
            request_timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Cache file; resolved from the storage layout when unset.
    pub path: Option<PathBuf>,
    pub expiry_ms: u64,
}

impl CacheConfig {
    pub fn expiry(&self) -> Duration {
        Duration::from_millis(self.expiry_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: None,
            expiry_ms: DEFAULT_CACHE_EXPIRY_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Number of most recent conversation messages sent per request.
    pub history_window: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_LLM_URL.to_owned(),
            model: "gpt-4o".to_owned(),
            temperature: 0.7,
            history_window: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    pub default_limit: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { default_limit: 5 }
    }
}
