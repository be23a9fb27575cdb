//! Plain-text rendering of chat replies, batch results, and cache contents.

use chrono::{DateTime, Local};

use crate::{
    domain::{
        availability::{CacheEntry, DomainResult},
        clock::now_unix_ms,
    },
    infra::domain_cache::DomainCache,
    usecases::chat_turn::ChatReply,
};

/// Available domains first, then alphabetical.
pub fn sort_results(results: &mut [DomainResult]) {
    results.sort_by(|left, right| {
        right
            .available
            .cmp(&left.available)
            .then_with(|| left.domain.cmp(&right.domain))
    });
}

pub fn render_result(result: &DomainResult) -> String {
    let marker = if result.is_error() {
        "[error]"
    } else if result.available {
        "[available]"
    } else {
        "[taken]"
    };

    let mut line = format!("{marker} {} {}", result.domain, result.status);
    if result.cached {
        line.push_str(" (cached)");
    }
    if let Some(error) = &result.error {
        line.push_str(": ");
        line.push_str(error);
    }

    line
}

pub fn render_results(results: &[DomainResult]) -> Vec<String> {
    let mut sorted = results.to_vec();
    sort_results(&mut sorted);
    sorted.iter().map(render_result).collect()
}

pub fn render_reply(reply: &ChatReply) -> Vec<String> {
    let mut lines = Vec::new();
    if !reply.message.is_empty() {
        lines.push(reply.message.clone());
    }

    if !reply.domains.results.is_empty() {
        lines.push(String::new());
        lines.extend(render_results(&reply.domains.results));
    }

    lines
}

pub fn render_cache_entries(cache: &DomainCache) -> Vec<String> {
    if cache.is_empty() {
        return vec![format!("cache at {} is empty", cache.path().display())];
    }

    let now = now_unix_ms();
    let mut lines = vec![format!(
        "{} cached domains in {} (valid for {} minutes)",
        cache.len(),
        cache.path().display(),
        cache.expiry().as_secs() / 60
    )];
    lines.extend(cache.entries().iter().map(|(domain, entry)| {
        let validity = if cache.is_valid_at(Some(entry), now) {
            "valid"
        } else {
            "expired"
        };
        format!(
            "{domain} {} checked {} ({validity})",
            entry.status,
            format_checked_at(entry)
        )
    }));

    lines
}

fn format_checked_at(entry: &CacheEntry) -> String {
    DateTime::from_timestamp_millis(entry.timestamp)
        .map(|at| {
            at.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "at an unknown time".to_owned())
}
