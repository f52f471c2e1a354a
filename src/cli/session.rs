//! Settings resolution and vault connection for CLI commands.

use tracing::info;

use crate::cli::{output, Globals};
use crate::core::auth::{Authenticator, AzureCliAuth};
use crate::core::azcli::AzCli;
use crate::core::config::{Config, Overrides, Settings};
use crate::core::vault::AzureCli;
use crate::error::Result;

/// Resolve settings from the config file, flags and environment.
///
/// `overrides` carries the command-specific paths; global flags are filled
/// in here.
pub fn settings(globals: &Globals, overrides: Overrides) -> Result<Settings> {
    let config = Config::load(globals.config.as_deref())?;
    Settings::resolve(
        config,
        Overrides {
            vault: globals.vault.clone(),
            delimiter: globals.delimiter.clone(),
            ..overrides
        },
    )
}

/// Sign in once and build the vault client.
pub fn connect(settings: &Settings, globals: &Globals) -> Result<AzureCli> {
    let cli = AzCli::locate()?;
    let auth = AzureCliAuth::new(cli.clone(), !globals.no_login);
    let credential = auth.ensure_signed_in()?;

    info!(
        user = %credential.user,
        subscription = %credential.subscription,
        vault = %settings.vault,
        "connected"
    );
    output::kv("vault:", &settings.vault);
    if !credential.user.is_empty() {
        output::kv("account:", &credential.user);
    }

    Ok(AzureCli::new(cli, settings.vault.clone(), &credential))
}
