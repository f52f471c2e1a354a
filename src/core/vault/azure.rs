//! Azure Key Vault backend.
//!
//! Drives `az keyvault secret` through [`AzCli`] and parses its JSON output.
//!
//! ## Usage
//!
//! ```bash
//! kvsync --vault https://my-vault.vault.azure.net/ export
//! ```
//!
//! Calls are scoped to the subscription of the signed-in [`Credential`].

use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;

use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use super::{VaultClient, VaultLocator};
use crate::core::auth::Credential;
use crate::core::azcli::{self, AzCli};
use crate::core::domain::SecretRecord;
use crate::error::{Result, VaultError};

/// Vault client backed by the Azure CLI.
#[derive(Debug, Clone)]
pub struct AzureCli {
    cli: AzCli,
    locator: VaultLocator,
    subscription: String,
}

#[derive(Deserialize)]
struct SecretItem {
    name: String,
}

#[derive(Deserialize)]
struct SecretBundle {
    #[serde(default)]
    value: Option<String>,
}

impl AzureCli {
    /// Create a client for `locator`, acting as `credential`.
    pub fn new(cli: AzCli, locator: VaultLocator, credential: &Credential) -> Self {
        Self {
            cli,
            locator,
            subscription: credential.subscription.clone(),
        }
    }

    /// Arguments for `az keyvault secret set`, reading the value from `file`.
    fn set_args<'a>(&'a self, name: &'a str, file: &'a Path) -> Vec<&'a OsStr> {
        let mut args: Vec<&OsStr> = ["keyvault", "secret", "set", "--name", name, "--file"]
            .map(OsStr::new)
            .into();
        args.push(file.as_os_str());
        args.extend(["--encoding", "utf-8"].map(OsStr::new));
        args.extend(self.scope().map(OsStr::new));
        args.extend(["--output", "none"].map(OsStr::new));
        args
    }

    /// Arguments shared by every `az keyvault secret` call.
    fn scope(&self) -> [&str; 4] {
        [
            "--vault-name",
            self.locator.name(),
            "--subscription",
            &self.subscription,
        ]
    }
}

impl VaultClient for AzureCli {
    fn list_names(&self) -> Result<Vec<String>> {
        let mut args = vec!["keyvault", "secret", "list"];
        args.extend(self.scope());
        args.extend(["--output", "json"]);

        let items: Vec<SecretItem> = self.cli.run_json("secret list", args)?;
        debug!(vault = %self.locator, count = items.len(), "listed secrets");

        Ok(items.into_iter().map(|item| item.name).collect())
    }

    fn get(&self, name: &str) -> Result<SecretRecord> {
        let mut args = vec!["keyvault", "secret", "show", "--name", name];
        args.extend(self.scope());
        args.extend(["--output", "json"]);

        let operation = format!("secret show {}", name);
        let output = self.cli.capture(&operation, args)?;

        if !output.status.success() {
            let stderr = azcli::stderr_text(&output);
            if is_not_found(&stderr) {
                trace!(name, "secret not in vault");
                return Err(VaultError::SecretNotFound(name.to_string()).into());
            }
            return Err(VaultError::CommandFailed { operation, stderr }.into());
        }

        let bundle: SecretBundle = azcli::parse_json(&operation, &output.stdout)?;
        let value = bundle.value.ok_or_else(|| VaultError::InvalidResponse {
            operation: operation.clone(),
            reason: "missing value".to_string(),
        })?;

        trace!(name, value_len = value.len(), "fetched secret");
        Ok(SecretRecord::new(name, value))
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        // `az` expands `@file` argument values and other users can read
        // command lines, so the value only travels through a private file.
        let mut file = NamedTempFile::new()?;
        file.write_all(value.as_bytes())?;
        file.flush()?;

        self.cli
            .run(&format!("secret set {}", name), self.set_args(name, file.path()))?;
        trace!(name, value_len = value.len(), "stored secret");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "azure-keyvault"
    }
}

/// Whether `az keyvault secret show` stderr reports a missing secret.
fn is_not_found(stderr: &str) -> bool {
    stderr.contains("SecretNotFound") || stderr.to_ascii_lowercase().contains("was not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AzureCli {
        let credential = Credential {
            user: "alice@example.com".to_string(),
            subscription: "sub-1".to_string(),
            tenant: "tenant-1".to_string(),
        };
        AzureCli::new(
            AzCli::with_program("az"),
            VaultLocator::parse("my-vault").unwrap(),
            &credential,
        )
    }

    #[test]
    fn test_scope_args() {
        let client = client();

        assert_eq!(
            client.scope(),
            ["--vault-name", "my-vault", "--subscription", "sub-1"]
        );
        assert_eq!(client.name(), "azure-keyvault");
    }

    #[test]
    fn test_set_args_read_value_from_file() {
        let client = client();
        let file = Path::new("/tmp/kvsync-value");

        let args = client.set_args("api-key", file);

        assert_eq!(
            args,
            [
                "keyvault",
                "secret",
                "set",
                "--name",
                "api-key",
                "--file",
                "/tmp/kvsync-value",
                "--encoding",
                "utf-8",
                "--vault-name",
                "my-vault",
                "--subscription",
                "sub-1",
                "--output",
                "none",
            ]
        );
        assert!(!args.iter().any(|a| a.to_string_lossy().starts_with("--value")));
    }

    #[test]
    fn test_not_found_detection() {
        assert!(is_not_found(
            "ERROR: (SecretNotFound) A secret with (name/id) api-key was not found in this key vault."
        ));
        assert!(is_not_found("ERROR: Secret api-key Was Not Found"));
        assert!(!is_not_found("ERROR: (Forbidden) The user does not have secrets get permission."));
    }

    #[test]
    fn test_secret_bundle_parsing() {
        let bundle: SecretBundle = serde_json::from_str(
            r#"{"id": "https://my-vault.vault.azure.net/secrets/a/1", "value": "abc", "attributes": {}}"#,
        )
        .unwrap();

        assert_eq!(bundle.value.as_deref(), Some("abc"));
    }
}
