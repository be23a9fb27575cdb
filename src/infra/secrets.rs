use std::panic;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_MARKERS: [&str; 6] = [
    "apikey",
    "api_key",
    "api-key",
    "authorization",
    "bearer",
    "secret",
];

/// Replaces whitespace-separated fragments that look like credentials.
///
/// Used on upstream error bodies and panic payloads, which may echo back
/// the API keys this binary sends.
pub fn redact_text(input: &str) -> String {
    input
        .split_whitespace()
        .map(redact_chunk)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn install_panic_redaction_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic payload omitted".to_owned());

        let scrubbed = redact_text(&payload);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "domain-finder panic: {} at {}:{}:{}",
                scrubbed,
                location.file(),
                location.line(),
                location.column()
            );
        } else {
            eprintln!("domain-finder panic: {}", scrubbed);
        }
    }));
}

fn redact_chunk(chunk: &str) -> String {
    let lowered = chunk.to_ascii_lowercase();
    if SENSITIVE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
        || looks_like_secret_value(chunk)
    {
        REDACTED.to_owned()
    } else {
        chunk.to_owned()
    }
}

fn looks_like_secret_value(value: &str) -> bool {
    let cleaned = value.trim_matches(|ch: char| !ch.is_ascii_alphanumeric());

    if cleaned.starts_with("sk-") {
        return true;
    }

    let has_mixed = cleaned.chars().any(|ch| ch.is_ascii_alphabetic())
        && cleaned.chars().any(|ch| ch.is_ascii_digit());

    cleaned.len() >= 32
        && has_mixed
        && cleaned
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_text_scrubs_keys_and_key_parameters() {
        let input = "Incorrect API key provided: sk-proj-abc123. url apiKey=at_live_1";
        let output = redact_text(input);

        assert!(!output.contains("sk-proj-abc123"));
        assert!(!output.contains("at_live_1"));
        assert!(output.contains("[REDACTED]"));
        assert!(output.contains("Incorrect"));
    }

    #[test]
    fn redact_text_scrubs_long_opaque_tokens() {
        let output = redact_text("token at_9f8e7d6c5b4a39281706f5e4d3c2b1a0 rejected");

        assert_eq!(output, "token [REDACTED] rejected");
    }

    #[test]
    fn redact_text_keeps_domain_names() {
        let output = redact_text("checking freecoolname123.com failed");

        assert_eq!(output, "checking freecoolname123.com failed");
    }
}
