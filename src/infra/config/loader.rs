use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

const ENV_AVAILABILITY_API_KEY: &str = "WHOISXML_API_KEY";
const ENV_LLM_API_KEY: &str = "OPENAI_API_KEY";
const ENV_LLM_MODEL: &str = "OPENAI_MODEL";
const ENV_LLM_TEMPERATURE: &str = "OPENAI_TEMPERATURE";

/// Loads the config file (defaults when missing), then applies process
/// environment overrides.
pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut config = load_file(path)?;
    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    Ok(config)
}

fn load_file(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = AppConfig::default();

    if !config_path.exists() {
        return Ok(config);
    }

    let raw = fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
        path: config_path.clone(),
        source,
    })?;

    let file_config: FileConfig = toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: config_path,
        source,
    })?;

    file_config.merge_into(&mut config);
    Ok(config)
}

/// Blank variables are ignored so an empty export does not wipe a key
/// configured in the file.
fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(api_key) = read(ENV_AVAILABILITY_API_KEY) {
        config.availability.api_key = Some(api_key);
    }

    if let Some(api_key) = read(ENV_LLM_API_KEY) {
        config.llm.api_key = Some(api_key);
    }

    if let Some(model) = read(ENV_LLM_MODEL) {
        config.llm.model = model;
    }

    if let Some(raw) = read(ENV_LLM_TEMPERATURE) {
        config.llm.temperature = raw.trim().parse().map_err(|_| AppError::InvalidEnv {
            key: ENV_LLM_TEMPERATURE,
            value: raw.clone(),
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn returns_defaults_when_file_is_missing() {
        let config = load_file(Some(Path::new("./missing-config.toml"))).expect("config must load");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn merges_file_values_over_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            r#"[logging]
level = "debug"

[availability]
api_key = "at_file"
credits = "DA"
request_timeout_ms = 2500

[cache]
path = "/tmp/finder/cache.json"
expiry_ms = 60000

[llm]
model = "gpt-4o-mini"
history_window = 4

[chat]
default_limit = 8
"#,
        )
        .expect("must write test config");

        let config = load_file(Some(&config_path)).expect("config must load");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.availability.api_key.as_deref(), Some("at_file"));
        assert_eq!(config.availability.request_timeout_ms, Some(2500));
        assert_eq!(
            config.cache.path,
            Some(PathBuf::from("/tmp/finder/cache.json"))
        );
        assert_eq!(config.cache.expiry_ms, 60_000);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.history_window, 4);
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.chat.default_limit, 8);
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config_path = dir.path().join("broken.toml");
        fs::write(&config_path, "[cache\nexpiry_ms = ").expect("must write test config");

        let error = load_file(Some(&config_path)).expect_err("parse must fail");

        assert!(matches!(error, AppError::ConfigParse { ref path, .. } if path == &config_path));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = AppConfig::default();
        config.availability.api_key = Some("at_file".to_owned());

        apply_env_overrides(
            &mut config,
            lookup_from(&[
                ("WHOISXML_API_KEY", "at_env"),
                ("OPENAI_API_KEY", "sk-env"),
                ("OPENAI_MODEL", "gpt-4.1"),
                ("OPENAI_TEMPERATURE", "0.2"),
            ]),
        )
        .expect("overrides apply");

        assert_eq!(config.availability.api_key.as_deref(), Some("at_env"));
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.llm.model, "gpt-4.1");
        assert_eq!(config.llm.temperature, 0.2);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.availability.api_key = Some("at_file".to_owned());

        apply_env_overrides(&mut config, lookup_from(&[("WHOISXML_API_KEY", "  ")]))
            .expect("overrides apply");

        assert_eq!(config.availability.api_key.as_deref(), Some("at_file"));
    }

    #[test]
    fn rejects_non_numeric_temperature() {
        let mut config = AppConfig::default();

        let error = apply_env_overrides(
            &mut config,
            lookup_from(&[("OPENAI_TEMPERATURE", "warm")]),
        )
        .expect_err("must fail");

        assert!(matches!(
            error,
            AppError::InvalidEnv {
                key: "OPENAI_TEMPERATURE",
                ..
            }
        ));
    }
}
