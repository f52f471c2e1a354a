//! Command-line interface.

pub mod completions;
pub mod export;
pub mod import;
pub mod output;
pub mod select;
pub mod session;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;

/// kvsync - Export and bulk-import Azure Key Vault secrets through CSV files.
#[derive(Parser)]
#[command(
    name = "kvsync",
    about = "Export and bulk-import Azure Key Vault secrets through CSV files",
    version,
    after_help = "The exported CSV holds plaintext secrets. Keep it out of version control."
)]
pub struct Cli {
    #[command(flatten)]
    pub globals: Globals,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct Globals {
    /// Vault URI (https://<name>.vault.azure.net/) or vault name
    #[arg(long, global = true, env = "KVSYNC_VAULT")]
    pub vault: Option<String>,

    /// Config file (default: ./kvsync.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// CSV delimiter (default: ,)
    #[arg(long, global = true)]
    pub delimiter: Option<String>,

    /// Fail instead of running `az login` when not signed in
    #[arg(long, global = true)]
    pub no_login: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Export all vault secrets to a CSV file
    Export {
        /// Destination file (default: Outputs/SecretKeys.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write secret names only, without values
        #[arg(long)]
        names_only: bool,
    },

    /// Import secrets from a CSV file, writing only changed values
    Import {
        /// Source file (default: Outputs/SecretKeys.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
///
/// Without a subcommand the operation is chosen interactively.
pub fn execute(command: Option<Command>, globals: &Globals) -> Result<()> {
    let command = match command {
        Some(command) => command,
        None => select::execute()?,
    };

    match command {
        Command::Export { output, names_only } => export::execute(globals, output, names_only),
        Command::Import { input } => import::execute(globals, input),
        Command::Completions { shell } => completions::execute(shell),
    }
}
