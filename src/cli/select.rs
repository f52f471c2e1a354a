//! Interactive operation picker, used when no subcommand is given.

use std::io::{self, IsTerminal};

use dialoguer::Select;

use crate::cli::{output, Command};
use crate::error::{ConfigError, Result};

const CHOICES: [&str; 2] = ["Export secrets to CSV", "Import secrets from CSV"];

/// Ask which operation to run.
///
/// # Errors
///
/// Returns `ConfigError::NoOperation` when stdin is not a terminal.
pub fn execute() -> Result<Command> {
    if !io::stdin().is_terminal() {
        return Err(ConfigError::NoOperation.into());
    }

    let choice = Select::new()
        .with_prompt("What do you want to do?")
        .items(&CHOICES)
        .default(0)
        .interact()?;

    output::blank();
    Ok(command_for(choice))
}

fn command_for(choice: usize) -> Command {
    if choice == 0 {
        Command::Export {
            output: None,
            names_only: false,
        }
    } else {
        Command::Import { input: None }
    }
}
