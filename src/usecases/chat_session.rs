use std::io;

use crate::{
    domain::{availability::DomainResult, chat::ChatMessage},
    ui::render::render_reply,
    usecases::{
        chat_turn::{chat_turn, ChatRequest},
        check_batch::BatchChecker,
        contracts::SuggestionSource,
    },
};

const PROMPT: &str = "> ";
const QUIT_COMMAND: &str = "/quit";
const RESET_COMMAND: &str = "/reset";

pub trait ChatTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()>;
    /// Next input line, or `None` at end of input.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

pub struct StdTerminal;

impl ChatTerminal for StdTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        println!("{line}");
        Ok(())
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        use std::io::Write;

        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSessionOptions {
    /// Maximum number of suggested domains checked per turn.
    pub limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSessionSummary {
    pub turns: usize,
    pub failed_turns: usize,
}

/// Runs the interactive conversation until end of input or `/quit`.
///
/// The transcript holds user messages and cleaned assistant replies. The
/// results of the latest turn that checked domains are sent back as
/// context with the next request.
pub async fn run_chat_session(
    terminal: &mut dyn ChatTerminal,
    suggester: &dyn SuggestionSource,
    checker: &BatchChecker,
    options: &ChatSessionOptions,
) -> io::Result<ChatSessionSummary> {
    terminal.print_line("Describe your project and I will suggest domain names.")?;
    terminal.print_line("Commands: /reset clears the conversation, /quit exits.")?;
    if !suggester.is_ready() {
        terminal.print_line(
            "Warning: the language model is not configured; set OPENAI_API_KEY to chat.",
        )?;
    }

    let mut transcript: Vec<ChatMessage> = Vec::new();
    let mut last_results: Vec<DomainResult> = Vec::new();
    let mut summary = ChatSessionSummary::default();

    while let Some(line) = terminal.prompt_line(PROMPT)? {
        let input = line.trim();
        match input {
            "" => continue,
            QUIT_COMMAND => break,
            RESET_COMMAND => {
                transcript.clear();
                last_results.clear();
                terminal.print_line("Conversation cleared.")?;
                continue;
            }
            _ => {}
        }

        transcript.push(ChatMessage::user(input));
        let request = ChatRequest {
            last_results: last_results.clone(),
            limit: options.limit,
            ..ChatRequest::new(transcript.clone())
        };

        match chat_turn(suggester, checker, request).await {
            Ok(reply) => {
                transcript.push(ChatMessage::assistant(reply.message.clone()));
                for rendered in render_reply(&reply) {
                    terminal.print_line(&rendered)?;
                }
                if !reply.domains.results.is_empty() {
                    last_results = reply.domains.results;
                }
                summary.turns += 1;
            }
            Err(error) => {
                // Drop the unanswered message so a retry does not repeat it.
                transcript.pop();
                tracing::warn!(error = %error, "chat turn failed");
                terminal.print_line(&format!("error: {error}"))?;
                summary.failed_turns += 1;
            }
        }
    }

    Ok(summary)
}
