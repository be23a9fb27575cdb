//! Language model integration: chat-completion client and prompt.

mod client;
mod prompt;

pub use client::OpenAiClient;

/// Returns the llm module name for smoke checks.
pub fn module_name() -> &'static str {
    "llm"
}
