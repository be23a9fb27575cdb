use std::{path::Path, sync::Arc};

use crate::{
    infra::{
        self,
        config::{AppConfig, FileConfigAdapter},
        contracts::ConfigAdapter,
        domain_cache::DomainCache,
        error::AppError,
        storage_layout::StorageLayout,
    },
    llm::OpenAiClient,
    usecases::{check_batch::BatchChecker, context::AppContext},
    whois::WhoisXmlClient,
};

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config_adapter = FileConfigAdapter::new(config_path);
    let config = config_adapter.load().map_err(AppError::Other)?;
    let log_guard = infra::logging::init(&config.logging)?;
    report_missing_credentials(&config);

    Ok(build_context(config)?.with_log_guard(log_guard))
}

fn build_context(config: AppConfig) -> Result<AppContext, AppError> {
    let cache_path = match &config.cache.path {
        Some(path) => path.clone(),
        None => StorageLayout::resolve()?.cache_file(),
    };
    let cache = Arc::new(DomainCache::open(cache_path, config.cache.expiry()));

    let availability = Arc::new(WhoisXmlClient::new(&config.availability)?);
    let checker = BatchChecker::new(
        availability,
        cache.clone(),
        config.availability.has_api_key(),
    );
    let suggester = Arc::new(OpenAiClient::new(&config.llm)?);

    Ok(AppContext::new(config, cache, checker, suggester))
}

fn report_missing_credentials(config: &AppConfig) {
    let mut missing = Vec::new();
    if !config.availability.has_api_key() {
        missing.push("WHOISXML_API_KEY");
    }
    if config
        .llm
        .api_key
        .as_deref()
        .is_none_or(|key| key.trim().is_empty())
    {
        missing.push("OPENAI_API_KEY");
    }

    if !missing.is_empty() {
        tracing::warn!(
            missing = %missing.join(", "),
            "credentials missing, some functionality will be limited"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::stubs::StubConfigAdapter;

    fn stub_config(dir: &tempfile::TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.cache.path = Some(dir.path().join("cache").join("domain-cache.json"));
        config
    }

    #[test]
    fn builds_context_and_creates_cache_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let adapter = StubConfigAdapter {
            config: stub_config(&dir),
        };

        let context =
            build_context(adapter.load().expect("stub loads")).expect("context should build");

        assert!(context.cache.is_empty());
        assert!(dir.path().join("cache").join("domain-cache.json").exists());
        assert!(!context.suggester.is_ready());
    }

    #[tokio::test]
    async fn context_without_availability_key_reports_configuration_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let context = build_context(stub_config(&dir)).expect("context should build");

        let batch = context
            .checker
            .check_batch(&["a.com".to_owned(), "b.ai".to_owned()], 5)
            .await;

        assert_eq!(batch.results.len(), 2);
        assert!(batch
            .results
            .iter()
            .all(|result| result.error.as_deref() == Some("API key not configured")));
    }
}
