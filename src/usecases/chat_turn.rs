//! One conversational turn: ask the model, pull out its domain
//! suggestions, and check their availability.

use thiserror::Error;

use crate::{
    domain::{
        availability::{BatchResults, DomainResult},
        chat::ChatMessage,
    },
    infra::secrets::redact_text,
    usecases::{
        check_batch::BatchChecker,
        contracts::SuggestionSource,
        domain_context::build_domain_context,
        extract::{clean_response, extract_domains},
    },
};

pub const DEFAULT_CHAT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    /// Results shown for the previous turn, fed back as prompt context.
    pub last_results: Vec<DomainResult>,
    pub limit: usize,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            last_results: Vec::new(),
            limit: DEFAULT_CHAT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Model text with the machine-readable domains block removed.
    pub message: String,
    pub domains: BatchResults,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("valid conversation history is required")]
    EmptyConversation,
    #[error("language model is not configured")]
    SuggestionsUnavailable,
    #[error("failed to generate suggestions: {0}")]
    SuggestionFailed(String),
}

pub async fn chat_turn(
    suggester: &dyn SuggestionSource,
    checker: &BatchChecker,
    request: ChatRequest,
) -> Result<ChatReply, ChatError> {
    if request.messages.is_empty() {
        return Err(ChatError::EmptyConversation);
    }

    if !suggester.is_ready() {
        return Err(ChatError::SuggestionsUnavailable);
    }

    let context = build_domain_context(&request.last_results);
    let response = suggester
        .complete(&request.messages, &context)
        .await
        .map_err(|error| ChatError::SuggestionFailed(redact_text(&error.to_string())))?;

    let suggested = extract_domains(&response, request.limit);
    let message = clean_response(&response);

    let domains = if suggested.is_empty() {
        BatchResults::default()
    } else {
        checker.check_batch(&suggested, request.limit).await
    };

    tracing::info!(
        suggested = suggested.len(),
        checked = domains.results.len(),
        "chat turn completed"
    );

    Ok(ChatReply { message, domains })
}
