//! Batch availability check backed by the domain cache.
//!
//! Candidates with a valid cache entry are answered locally. The rest are
//! looked up concurrently, successful verdicts are written back, and the
//! cache is flushed once per batch that reached the network.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use futures::future::join_all;

use crate::{
    domain::{
        availability::{BatchResults, CacheEntry, DomainResult},
        clock::now_unix_ms,
        name::normalize_domain,
    },
    infra::domain_cache::DomainCache,
    usecases::contracts::AvailabilitySource,
};

pub const DEFAULT_BATCH_LIMIT: usize = 10;
pub const API_KEY_NOT_CONFIGURED: &str = "API key not configured";
pub const INVALID_DOMAIN_NAME: &str = "invalid domain name";

const AVAILABILITY_API_KEY_MISSING: &str = "AVAILABILITY_API_KEY_MISSING";

pub struct BatchChecker {
    source: Arc<dyn AvailabilitySource>,
    cache: Arc<DomainCache>,
    api_key_configured: bool,
}

impl BatchChecker {
    pub fn new(
        source: Arc<dyn AvailabilitySource>,
        cache: Arc<DomainCache>,
        api_key_configured: bool,
    ) -> Self {
        Self {
            source,
            cache,
            api_key_configured,
        }
    }

    /// Checks at most `limit` of `domains`, in the order given.
    ///
    /// Never fails: lookup problems are reported per domain. Cache hits come
    /// first in the output, fetched results after them.
    pub async fn check_batch(&self, domains: &[String], limit: usize) -> BatchResults {
        if domains.is_empty() {
            return BatchResults::default();
        }

        let requested = &domains[..domains.len().min(limit)];

        if !self.api_key_configured {
            tracing::error!(
                code = AVAILABILITY_API_KEY_MISSING,
                requested = requested.len(),
                "availability api key is not configured"
            );
            return BatchResults {
                results: requested
                    .iter()
                    .map(|raw| {
                        let domain = normalize_domain(raw).unwrap_or_else(|| raw.trim().to_owned());
                        DomainResult::failed(domain, API_KEY_NOT_CONFIGURED)
                    })
                    .collect(),
            };
        }

        let now = now_unix_ms();
        let mut results = Vec::with_capacity(requested.len());
        let mut misses = Vec::new();

        for raw in requested {
            let Some(domain) = normalize_domain(raw) else {
                results.push(DomainResult::failed(raw.trim(), INVALID_DOMAIN_NAME));
                continue;
            };

            match self.cache.get(&domain) {
                Some(entry) if self.cache.is_valid_at(Some(&entry), now) => {
                    results.push(DomainResult::from_cache(domain, &entry));
                }
                _ => misses.push(domain),
            }
        }

        if misses.is_empty() {
            tracing::debug!(hits = results.len(), "domain batch served from cache");
            return BatchResults { results };
        }

        let mut seen = HashSet::new();
        let fetch_set: Vec<&str> = misses
            .iter()
            .map(String::as_str)
            .filter(|domain| seen.insert(*domain))
            .collect();

        tracing::debug!(
            hits = results.len(),
            misses = misses.len(),
            fetches = fetch_set.len(),
            "checking domain batch"
        );

        let fetched: HashMap<String, DomainResult> =
            join_all(fetch_set.iter().map(|domain| self.fetch_one(domain)))
                .await
                .into_iter()
                .map(|result| (result.domain.clone(), result))
                .collect();

        results.extend(
            misses
                .iter()
                .filter_map(|domain| fetched.get(domain).cloned()),
        );

        self.cache.save();

        BatchResults { results }
    }

    async fn fetch_one(&self, domain: &str) -> DomainResult {
        match self.source.check(domain).await {
            Ok(report) => {
                let entry = CacheEntry::from_status(report.status.as_deref(), now_unix_ms());
                self.cache.set(domain, entry.clone());
                DomainResult::fetched(domain, &entry)
            }
            Err(error) => {
                tracing::warn!(domain, error = %error, "domain availability check failed");
                DomainResult::failed(domain, error.to_string())
            }
        }
    }
}
