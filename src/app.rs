use anyhow::Result;

use crate::{
    cli::{CacheCommand, Cli, Command},
    domain::{self, availability::BatchResults},
    infra::{self, error::AppError},
    llm, ui,
    usecases::{
        self, bootstrap,
        chat_session::{run_chat_session, ChatSessionOptions, StdTerminal},
    },
    whois,
};

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        whois = whois::module_name(),
        llm = llm::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;

    match cli.command_or_default() {
        Command::Chat { limit } => {
            let options = ChatSessionOptions {
                limit: limit.unwrap_or(context.config.chat.default_limit),
            };
            let mut terminal = StdTerminal;
            let summary = runtime.block_on(run_chat_session(
                &mut terminal,
                context.suggester.as_ref(),
                &context.checker,
                &options,
            ))?;
            tracing::info!(
                turns = summary.turns,
                failed_turns = summary.failed_turns,
                "chat session ended"
            );
        }
        Command::Check {
            domains,
            limit,
            json,
        } => {
            let batch = runtime.block_on(context.checker.check_batch(&domains, limit));
            for line in check_output_lines(&batch, json)? {
                println!("{line}");
            }
        }
        Command::Cache { action } => match action {
            CacheCommand::Show => {
                for line in ui::render::render_cache_entries(&context.cache) {
                    println!("{line}");
                }
            }
            CacheCommand::Path => println!("{}", context.cache.path().display()),
        },
    }

    Ok(())
}

fn check_output_lines(batch: &BatchResults, json: bool) -> Result<Vec<String>> {
    if json {
        return Ok(vec![serde_json::to_string_pretty(batch)?]);
    }

    if batch.results.is_empty() {
        return Ok(vec!["no domains checked".to_owned()]);
    }

    Ok(ui::render::render_results(&batch.results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::{CacheEntry, DomainResult};

    fn batch() -> BatchResults {
        BatchResults {
            results: vec![
                DomainResult::failed("z.com", "upstream returned HTTP 503"),
                DomainResult::fetched("a.ai", &CacheEntry::from_status(Some("AVAILABLE"), 1)),
            ],
        }
    }

    #[test]
    fn text_output_is_sorted_by_availability() {
        let lines = check_output_lines(&batch(), false).expect("renders");

        assert_eq!(
            lines,
            vec![
                "[available] a.ai AVAILABLE".to_owned(),
                "[error] z.com ERROR: upstream returned HTTP 503".to_owned(),
            ]
        );
    }

    #[test]
    fn json_output_wraps_results() {
        let lines = check_output_lines(&batch(), true).expect("renders");
        let value: serde_json::Value = serde_json::from_str(&lines[0]).expect("valid json");

        assert_eq!(value["results"][0]["domain"], "z.com");
        assert_eq!(value["results"][0]["error"], "upstream returned HTTP 503");
        assert_eq!(value["results"][1]["cached"], false);
    }

    #[test]
    fn empty_batch_says_so() {
        let lines = check_output_lines(&BatchResults::default(), false).expect("renders");

        assert_eq!(lines, vec!["no domains checked".to_owned()]);
    }
}
