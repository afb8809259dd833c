use std::io::{self, IsTerminal, Read};

use clap::Parser;
use whisperer::api::Server;
use whisperer::config::{load_config, AppConfig};
use whisperer::history::load_history;
use whisperer::CritiqueSession;

use crate::args::{CliArgs, Command};
use crate::interactive;
use crate::logging::init_logging;
use crate::output::{print_evaluation, print_history, print_rules};

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let mut loaded = load_config(args.config.clone())?;
    let _logger = init_logging(&loaded.config.logging, &loaded.paths)?;
    if !loaded.config_exists {
        log::info!(
            "no config file at {}, using defaults",
            loaded.paths.config_file.display()
        );
    }
    args.apply_overrides(&mut loaded.config);
    let config = loaded.config;

    match &args.command {
        Some(Command::Rules) => {
            print_rules();
            Ok(())
        }
        Some(Command::History) => {
            print_history(&load_history(&config.history.path)?);
            Ok(())
        }
        Some(Command::Evaluate { prompt, save }) => {
            let prompt = resolve_prompt(prompt.clone())?;
            let mut session = open_session(&args, &config)?;
            let result = session.evaluate(&prompt).await?;
            print_evaluation(&result);
            if *save {
                let count = session.save()?;
                println!("History saved to CSV! ({count} entries)");
            }
            Ok(())
        }
        Some(Command::Serve { addr }) => {
            let session = open_session(&args, &config)?;
            Server::new(session).run(addr).await?;
            Ok(())
        }
        None => {
            let mut session = open_session(&args, &config)?;
            interactive::run(&mut session).await
        }
    }
}

fn open_session(args: &CliArgs, config: &AppConfig) -> anyhow::Result<CritiqueSession> {
    let api_key = config.model.resolve_api_key(args.api_key.as_deref());
    if api_key.is_none() {
        eprintln!(
            "warning: API key not found. Set {} in your environment or .env file.",
            config.model.api_key_env
        );
    }
    let client = config.model.build_client(api_key)?;
    let session = CritiqueSession::open(
        config.history.store(),
        Box::new(client),
        config.history.max_context_items,
    )?;
    log::info!(
        "session opened with {} history entries from {}",
        session.history().len(),
        config.history.path.display()
    );
    Ok(session)
}

fn resolve_prompt(flag: Option<String>) -> anyhow::Result<String> {
    if let Some(prompt) = flag {
        return Ok(prompt);
    }
    if io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "no prompt provided; pass it as an argument or pipe it in"
        ));
    }
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input.trim_end().to_string())
}
