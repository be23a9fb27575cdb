use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::usecases::check_batch::DEFAULT_BATCH_LIMIT;

#[derive(Debug, Parser)]
#[command(
    name = "domain-finder",
    about = "Conversational domain name finder with cached availability checks"
)]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start an interactive suggestion chat
    Chat {
        /// Maximum suggested domains checked per reply
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Check availability of the given domains
    Check {
        #[arg(required = true)]
        domains: Vec<String>,
        /// Maximum number of domains checked
        #[arg(short, long, default_value_t = DEFAULT_BATCH_LIMIT)]
        limit: usize,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect the availability cache
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CacheCommand {
    /// List cached verdicts and whether they are still valid
    Show,
    /// Print the cache file location
    Path,
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Chat { limit: None })
    }
}
