use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    domain::chat::ChatMessage,
    infra::{config::LlmConfig, error::AppError, secrets::redact_text},
    llm::prompt::system_prompt,
    usecases::contracts::{SuggestionError, SuggestionSource},
};

const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";
const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    history_window: usize,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(AppError::HttpClientInit)?;

        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
            .map(str::to_owned);

        if api_key.is_none() {
            tracing::warn!("language model api key is not properly configured");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            history_window: config.history_window,
        })
    }

    /// System prompt followed by the most recent `history_window` messages.
    fn build_messages(&self, messages: &[ChatMessage], domain_context: &str) -> Vec<ChatMessage> {
        let start = messages.len().saturating_sub(self.history_window);

        std::iter::once(ChatMessage::system(system_prompt(domain_context)))
            .chain(messages[start..].iter().cloned())
            .collect()
    }
}

#[async_trait]
impl SuggestionSource for OpenAiClient {
    fn is_ready(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        domain_context: &str,
    ) -> Result<String, SuggestionError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SuggestionError::NotConfigured);
        };

        let request = CompletionRequest {
            model: &self.model,
            messages: self.build_messages(messages, domain_context),
            temperature: self.temperature,
        };

        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            "requesting chat completion"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|error| SuggestionError::Transport(error.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestionError::Status {
                status: status.as_u16(),
                message: upstream_error_message(&body),
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|error| SuggestionError::Decode(error.without_url().to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(SuggestionError::EmptyResponse)
    }
}

fn upstream_error_message(body: &str) -> String {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.chars().take(MAX_ERROR_DETAIL_CHARS).collect());

    redact_text(&message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    fn config_for(base_url: String, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            api_key: api_key.map(str::to_owned),
            base_url,
            history_window: 2,
            ..LlmConfig::default()
        }
    }

    #[test]
    fn placeholder_or_missing_key_is_not_ready() {
        let missing = OpenAiClient::new(&config_for("http://x".into(), None)).expect("client");
        let placeholder =
            OpenAiClient::new(&config_for("http://x".into(), Some(PLACEHOLDER_API_KEY)))
                .expect("client");
        let real = OpenAiClient::new(&config_for("http://x".into(), Some("sk-real"))).expect("client");

        assert!(!missing.is_ready());
        assert!(!placeholder.is_ready());
        assert!(real.is_ready());
    }

    #[test]
    fn keeps_only_recent_history_after_system_prompt() {
        let client = OpenAiClient::new(&config_for("http://x".into(), Some("sk-real"))).expect("client");
        let history = vec![
            ChatMessage::user("one"),
            ChatMessage::assistant("two"),
            ChatMessage::user("three"),
        ];

        let messages = client.build_messages(&history, "");

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, crate::domain::chat::ChatRole::System);
        assert_eq!(messages[1], ChatMessage::assistant("two"));
        assert_eq!(messages[2], ChatMessage::user("three"));
    }

    #[test]
    fn error_message_prefers_structured_detail_and_redacts_keys() {
        let message = upstream_error_message(
            r#"{"error":{"message":"Incorrect API key provided: sk-abc123"}}"#,
        );

        assert!(message.starts_with("Incorrect"));
        assert!(!message.contains("sk-abc123"));
    }

    #[tokio::test]
    async fn not_configured_fails_without_request() {
        let client = OpenAiClient::new(&config_for("http://127.0.0.1:9".into(), None)).expect("client");

        let error = client
            .complete(&[ChatMessage::user("hi")], "")
            .await
            .expect_err("must fail");

        assert_eq!(error, SuggestionError::NotConfigured);
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"Try these."}}]}"#,
        )
        .await;
        let client =
            OpenAiClient::new(&config_for(format!("{}/v1/", server.url), Some("sk-real")))
                .expect("client");

        let reply = client
            .complete(&[ChatMessage::user("names for a bakery")], "")
            .await
            .expect("completion succeeds");
        let request = server.request().await;

        assert_eq!(reply, "Try these.");
        assert!(request.starts_with("POST /v1/chat/completions"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer sk-real"));
        assert!(request.contains(r#""model":"gpt-4o""#));
        assert!(request.contains("names for a bakery"));
    }

    #[tokio::test]
    async fn empty_choices_are_reported() {
        let server = serve_once("200 OK", r#"{"choices":[]}"#).await;
        let client =
            OpenAiClient::new(&config_for(server.url.clone(), Some("sk-real"))).expect("client");

        let error = client
            .complete(&[ChatMessage::user("hi")], "")
            .await
            .expect_err("must fail");

        assert_eq!(error, SuggestionError::EmptyResponse);
    }

    #[tokio::test]
    async fn http_failure_carries_upstream_message() {
        let server = serve_once(
            "429 Too Many Requests",
            r#"{"error":{"message":"Rate limit reached"}}"#,
        )
        .await;
        let client =
            OpenAiClient::new(&config_for(server.url.clone(), Some("sk-real"))).expect("client");

        let error = client
            .complete(&[ChatMessage::user("hi")], "")
            .await
            .expect_err("must fail");

        assert_eq!(
            error,
            SuggestionError::Status {
                status: 429,
                message: "Rate limit reached".to_owned(),
            }
        );
    }
}
