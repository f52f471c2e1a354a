//! Constants used throughout kvsync.
//!
//! Centralizes file names and defaults.

/// Project-local configuration file name.
pub const CONFIG_FILE: &str = "kvsync.toml";

/// Directory under the user config dir holding the global config.
pub const CONFIG_DIR: &str = "kvsync";

/// Global configuration file name inside [`CONFIG_DIR`].
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Canonical CSV delimiter, shared by export and import.
pub const DEFAULT_DELIMITER: char = ',';

/// Default CSV path for both export and import.
pub const DEFAULT_CSV_PATH: &str = "Outputs/SecretKeys.csv";

/// Environment variable for the tracing filter.
pub const LOG_ENV: &str = "KVSYNC_LOG";

/// Azure Key Vault DNS suffix for the public cloud.
pub const VAULT_DNS_SUFFIX: &str = ".vault.azure.net";
