use std::sync::Arc;

use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    infra::{config::AppConfig, domain_cache::DomainCache},
    usecases::{check_batch::BatchChecker, contracts::SuggestionSource},
};

pub struct AppContext {
    pub config: AppConfig,
    pub cache: Arc<DomainCache>,
    pub checker: BatchChecker,
    pub suggester: Arc<dyn SuggestionSource>,
    _log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        cache: Arc<DomainCache>,
        checker: BatchChecker,
        suggester: Arc<dyn SuggestionSource>,
    ) -> Self {
        Self {
            config,
            cache,
            checker,
            suggester,
            _log_guard: None,
        }
    }

    /// Keeps the file logger flushing for as long as the context lives.
    pub fn with_log_guard(mut self, guard: Option<WorkerGuard>) -> Self {
        self._log_guard = guard;
        self
    }
}
