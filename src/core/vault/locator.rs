//! Vault locator parsing.
//!
//! Accepts either a vault URI (`https://my-vault.vault.azure.net/`) or a bare
//! vault name (`my-vault`).

use crate::core::constants::VAULT_DNS_SUFFIX;
use crate::error::{ConfigError, Result};

const MIN_NAME_LEN: usize = 3;
const MAX_NAME_LEN: usize = 24;

/// Identifies one Azure Key Vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultLocator {
    name: String,
    uri: String,
}

impl VaultLocator {
    /// Parse a vault URI or bare vault name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidVault` if the input is neither a
    /// `https://<name>.vault.azure.net` URI nor a valid vault name.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ConfigError::MissingVault.into());
        }

        let Some(rest) = input.strip_prefix("https://") else {
            if input.contains("://") {
                return Err(invalid(input, "only https URIs are supported"));
            }
            validate_name(input)?;
            return Ok(Self {
                name: input.to_string(),
                uri: format!("https://{}{}/", input, VAULT_DNS_SUFFIX),
            });
        };

        let host = rest.strip_suffix('/').unwrap_or(rest);
        if host.contains('/') {
            return Err(invalid(input, "URI must not contain a path"));
        }

        let (name, domain) = host
            .split_once('.')
            .ok_or_else(|| invalid(input, "expected <name>.vault.<domain>"))?;
        if !domain.starts_with("vault.") {
            return Err(invalid(input, "expected <name>.vault.<domain>"));
        }
        // Only the name reaches `az`, which targets its configured cloud.
        if host != format!("{}{}", name, VAULT_DNS_SUFFIX) {
            return Err(invalid(
                input,
                "only public cloud URIs are supported; pass the vault name and select the cloud with `az cloud set`",
            ));
        }

        validate_name(name)?;

        Ok(Self {
            name: name.to_string(),
            uri: format!("https://{}/", host),
        })
    }

    /// Vault name (first DNS label).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized vault URI with a trailing slash.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl std::fmt::Display for VaultLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri)
    }
}

/// Check Azure Key Vault naming rules.
///
/// 3-24 characters of ASCII letters, digits and hyphens; starts with a
/// letter, ends with a letter or digit, no consecutive hyphens.
fn validate_name(name: &str) -> Result<()> {
    if name.len() < MIN_NAME_LEN || name.len() > MAX_NAME_LEN {
        return Err(invalid(
            name,
            &format!(
                "name must be {}-{} characters",
                MIN_NAME_LEN, MAX_NAME_LEN
            ),
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid(name, "only letters, digits and hyphens are allowed"));
    }

    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(invalid(name, "name must start with a letter"));
    }

    if name.ends_with('-') || name.contains("--") {
        return Err(invalid(
            name,
            "name must not end with a hyphen or contain consecutive hyphens",
        ));
    }

    Ok(())
}

fn invalid(value: &str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidVault {
        value: value.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uri() {
        let locator = VaultLocator::parse("https://my-vault.vault.azure.net/").unwrap();

        assert_eq!(locator.name(), "my-vault");
        assert_eq!(locator.uri(), "https://my-vault.vault.azure.net/");
    }

    #[test]
    fn test_parse_uri_without_trailing_slash() {
        let locator = VaultLocator::parse("https://my-vault.vault.azure.net").unwrap();

        assert_eq!(locator.uri(), "https://my-vault.vault.azure.net/");
    }

    #[test]
    fn test_parse_rejects_sovereign_cloud_uri() {
        let err = VaultLocator::parse("https://prod-kv.vault.azure.cn/").unwrap_err();

        assert!(err.to_string().contains("az cloud set"));
        assert_eq!(VaultLocator::parse("prod-kv").unwrap().name(), "prod-kv");
    }

    #[test]
    fn test_parse_bare_name() {
        let locator = VaultLocator::parse("prodkv01").unwrap();

        assert_eq!(locator.name(), "prodkv01");
        assert_eq!(locator.uri(), "https://prodkv01.vault.azure.net/");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(VaultLocator::parse("").is_err());
        assert!(VaultLocator::parse("http://my-vault.vault.azure.net").is_err());
        assert!(VaultLocator::parse("https://my-vault.blob.core.windows.net").is_err());
        assert!(VaultLocator::parse("https://my-vault.vault.azure.net/secrets/x").is_err());
        assert!(VaultLocator::parse("kv").is_err());
        assert!(VaultLocator::parse("1vault").is_err());
        assert!(VaultLocator::parse("my_vault").is_err());
        assert!(VaultLocator::parse("my--vault").is_err());
        assert!(VaultLocator::parse("my-vault-").is_err());
        assert!(VaultLocator::parse("a-very-long-vault-name-over-24").is_err());
    }

    #[test]
    fn test_empty_is_missing() {
        let err = VaultLocator::parse("   ").unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::MissingVault)
        ));
    }
}
