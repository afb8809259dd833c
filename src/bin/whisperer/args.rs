use clap::{Parser, Subcommand};
use std::path::PathBuf;

use whisperer::config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "whisperer",
    about = "Score your prompts with an LLM and learn from your prompt history"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, short = 'm', global = true)]
    pub model: Option<String>,
    #[arg(long, global = true)]
    pub api_key: Option<String>,
    /// History CSV file (default: prompt_history.csv)
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one prompt, read from the argument or stdin
    Evaluate {
        prompt: Option<String>,
        /// Persist history after evaluating
        #[arg(long)]
        save: bool,
    },
    /// Show saved prompt history
    History,
    /// Show the golden rules for better prompting
    Rules,
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

impl CliArgs {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(model) = &self.model {
            config.model.model = model.clone();
        }
        if let Some(path) = &self.history {
            config.history.path = path.clone();
        }
    }
}
