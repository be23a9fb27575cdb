/// Canonical form used as cache key and lookup parameter.
///
/// Surrounding whitespace is dropped and ASCII letters are lowercased, so
/// `" Example.COM "` and `"example.com"` share one cache entry. Returns
/// `None` when nothing is left after trimming.
pub fn normalize_domain(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(trimmed.to_ascii_lowercase())
}
