//! Sign-in handling.
//!
//! An [`Authenticator`] is invoked once before any vault call and yields the
//! [`Credential`] the vault client is built from. There is no global session
//! state; the credential is passed along explicitly.

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::core::azcli::AzCli;
use crate::error::{AuthError, Error, Result, VaultError};

/// The signed-in account a vault client acts as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// User or service principal name
    pub user: String,
    /// Subscription id vault calls are scoped to
    pub subscription: String,
    /// Directory (tenant) id
    pub tenant: String,
}

impl Credential {
    /// Parse the JSON printed by `az account show`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidAccount` if required fields are missing.
    pub fn from_account_json(json: &[u8]) -> Result<Self> {
        let account: Account = serde_json::from_slice(json)
            .map_err(|e| AuthError::InvalidAccount(e.to_string()))?;

        if account.id.trim().is_empty() {
            return Err(AuthError::InvalidAccount("empty subscription id".to_string()).into());
        }

        Ok(Self {
            user: account.user.map(|u| u.name).unwrap_or_default(),
            subscription: account.id,
            tenant: account.tenant_id.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    id: String,
    #[serde(default)]
    tenant_id: Option<String>,
    #[serde(default)]
    user: Option<AccountUser>,
}

#[derive(Deserialize)]
struct AccountUser {
    name: String,
}

/// Establishes a signed-in session.
pub trait Authenticator {
    /// Check for a session, signing in if needed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if no session exists and one cannot be created.
    fn ensure_signed_in(&self) -> Result<Credential>;
}

/// Signs in through the Azure CLI.
///
/// Runs `az account show`; when that fails and login is allowed, runs
/// `az login` attached to the terminal once and checks again.
#[derive(Debug, Clone)]
pub struct AzureCliAuth {
    cli: AzCli,
    allow_login: bool,
}

impl AzureCliAuth {
    /// Create an authenticator using `cli`.
    pub fn new(cli: AzCli, allow_login: bool) -> Self {
        Self { cli, allow_login }
    }

    fn account(&self) -> Result<Credential> {
        let output = self
            .cli
            .run("account show", ["account", "show", "--output", "json"])?;
        Credential::from_account_json(&output.stdout)
    }

    fn login(&self) -> Result<()> {
        info!("starting azure login");
        let status = self.cli.run_interactive("login", ["login"])?;
        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("az login exited with status {}", code),
                None => "az login was interrupted".to_string(),
            };
            return Err(AuthError::LoginFailed(reason).into());
        }
        Ok(())
    }
}

impl Authenticator for AzureCliAuth {
    fn ensure_signed_in(&self) -> Result<Credential> {
        match self.account() {
            Ok(credential) => {
                debug!(user = %credential.user, "already signed in");
                return Ok(credential);
            }
            Err(Error::Vault(VaultError::CommandFailed { stderr, .. })) => {
                warn!(reason = %stderr, "no active azure session");
            }
            Err(e) => return Err(e),
        }

        if !self.allow_login {
            return Err(AuthError::NotSignedIn.into());
        }

        self.login()?;

        self.account().map_err(|e| match e {
            Error::Vault(VaultError::CommandFailed { stderr, .. }) => {
                AuthError::LoginFailed(stderr).into()
            }
            other => other,
        })
    }
}
