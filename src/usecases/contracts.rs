//! Async seams to the external services the workflows depend on.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chat::ChatMessage;

/// Verdict returned by the availability lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvailabilityReport {
    /// Raw availability token, `None` when the response omitted it.
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },
    #[error("invalid response body: {0}")]
    Decode(String),
}

#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// Looks up whether `domain` can currently be registered.
    async fn check(&self, domain: &str) -> Result<AvailabilityReport, AvailabilityError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    #[error("language model is not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("response contained no message")]
    EmptyResponse,
}

#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Whether credentials are present; `complete` fails fast otherwise.
    fn is_ready(&self) -> bool;

    /// Produces the assistant reply for the conversation so far.
    ///
    /// `domain_context` summarizes earlier availability results and is
    /// folded into the system prompt.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        domain_context: &str,
    ) -> Result<String, SuggestionError>;
}
