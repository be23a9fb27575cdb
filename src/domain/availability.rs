use serde::{Deserialize, Serialize};

/// Upstream token for a domain that can be registered.
pub const STATUS_AVAILABLE: &str = "AVAILABLE";
#[cfg_attr(not(test), allow(dead_code))]
pub const STATUS_UNAVAILABLE: &str = "UNAVAILABLE";
/// Reported whenever no upstream verdict could be obtained.
pub const STATUS_ERROR: &str = "ERROR";

/// Last known verdict for one domain, as persisted in the cache file.
///
/// The domain name itself is the key of the persisted map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub available: bool,
    pub status: String,
    /// Milliseconds since the unix epoch when the entry was written.
    pub timestamp: i64,
}

impl CacheEntry {
    /// Builds an entry from the raw upstream availability token.
    ///
    /// A missing token is recorded as `ERROR` and never counts as available.
    pub fn from_status(status: Option<&str>, timestamp: i64) -> Self {
        Self {
            available: status == Some(STATUS_AVAILABLE),
            status: status.unwrap_or(STATUS_ERROR).to_owned(),
            timestamp,
        }
    }
}

/// Outcome of checking one domain within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainResult {
    pub domain: String,
    pub available: bool,
    pub status: String,
    /// True when served from a still-valid cache entry.
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DomainResult {
    pub fn from_cache(domain: impl Into<String>, entry: &CacheEntry) -> Self {
        Self {
            domain: domain.into(),
            available: entry.available,
            status: entry.status.clone(),
            cached: true,
            error: None,
        }
    }

    pub fn fetched(domain: impl Into<String>, entry: &CacheEntry) -> Self {
        Self {
            domain: domain.into(),
            available: entry.available,
            status: entry.status.clone(),
            cached: false,
            error: None,
        }
    }

    pub fn failed(domain: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            available: false,
            status: STATUS_ERROR.to_owned(),
            cached: false,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some() || self.status == STATUS_ERROR
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResults {
    pub results: Vec<DomainResult>,
}
