//! Error types.
//!
//! Each concern has its own enum; [`Error`] wraps them so callers can use a
//! single `Result` type and still match on the specific failure.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for all kvsync operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The import source file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Whether this is a vault "secret not found" condition.
    pub fn is_secret_not_found(&self) -> bool {
        matches!(self, Error::Vault(VaultError::SecretNotFound(_)))
    }
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no vault configured")]
    MissingVault,

    #[error("invalid vault '{value}': {reason}")]
    InvalidVault { value: String, reason: String },

    #[error("invalid delimiter {0:?}: must be one character other than a quote or newline")]
    InvalidDelimiter(String),

    #[error("failed to read config {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no operation selected")]
    NoOperation,
}

/// Errors reported by a vault client.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("secret not found: {0}")]
    SecretNotFound(String),

    #[error("azure cli not found on PATH")]
    CliUnavailable,

    #[error("{operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },

    #[error("unexpected response from {operation}: {reason}")]
    InvalidResponse { operation: String, reason: String },
}

/// Sign-in errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("not signed in to azure")]
    NotSignedIn,

    #[error("azure login failed: {0}")]
    LoginFailed(String),

    #[error("could not read signed-in account: {0}")]
    InvalidAccount(String),
}

/// A CSV record that could not be turned into a secret.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("line {line}: missing delimiter")]
    MissingDelimiter { line: usize },

    #[error("line {line}: empty secret name")]
    EmptyName { line: usize },

    #[error("line {line}: empty value for '{name}'")]
    EmptyValue { line: usize, name: String },

    #[error("line {line}: unterminated quoted value for '{name}'")]
    UnterminatedQuote { line: usize, name: String },
}

impl DecodeError {
    /// Line number (1-based) the record started on.
    pub fn line(&self) -> usize {
        match self {
            DecodeError::MissingDelimiter { line }
            | DecodeError::EmptyName { line }
            | DecodeError::EmptyValue { line, .. }
            | DecodeError::UnterminatedQuote { line, .. } => *line,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
