//! kvsync - Export and bulk-import Azure Key Vault secrets through CSV files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kvsync::cli::output;
use kvsync::cli::{execute, Cli};
use kvsync::core::constants;
use kvsync::error::{AuthError, ConfigError, Error, VaultError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.globals.verbose {
            EnvFilter::new("kvsync=debug")
        } else {
            EnvFilter::new("kvsync=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, &cli.globals) {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingVault) => {
                Some("pass --vault <uri>, set KVSYNC_VAULT, or add [vault] uri to kvsync.toml")
            }
            Error::Config(ConfigError::NoOperation) => Some("run: kvsync export  or  kvsync import"),
            Error::Vault(VaultError::CliUnavailable) => {
                Some("install the Azure CLI: https://aka.ms/installazurecli")
            }
            Error::Auth(AuthError::NotSignedIn) => Some("run: az login"),
            Error::NotFound(_) => Some("run: kvsync export  to create one"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
