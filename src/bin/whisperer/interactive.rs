use std::io::{self, BufRead, IsTerminal, Write};

use whisperer::{CritiqueSession, WhispererError};

use crate::output::{print_evaluation, print_history, print_rules};

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    History,
    Save,
    Rules,
    Quit,
    Prompt(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    match line.trim() {
        ":history" | ":h" => Input::History,
        ":save" | ":s" => Input::Save,
        ":rules" | ":r" => Input::Rules,
        ":quit" | ":q" | ":exit" => Input::Quit,
        _ => Input::Prompt(line),
    }
}

/// Reads prompts line by line until EOF or `:quit`. Each line runs to
/// completion before the next one is read.
pub async fn run(session: &mut CritiqueSession) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        println!("Enter a prompt to evaluate. Commands: :history, :save, :rules, :quit");
    }
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        match classify(&line) {
            Input::Quit => break,
            Input::History => print_history(session.history()),
            Input::Rules => print_rules(),
            Input::Save => match session.save() {
                Ok(count) => println!("History saved to CSV! ({count} entries)"),
                Err(err) => eprintln!("error: {err}"),
            },
            Input::Prompt(prompt) => match session.evaluate(prompt).await {
                Ok(result) => print_evaluation(&result),
                Err(err @ WhispererError::InvalidInput(_)) => eprintln!("{err}"),
                Err(err) => {
                    log::error!("evaluation failed: {err}");
                    eprintln!("error: {err}");
                }
            },
        }
    }
    Ok(())
}
