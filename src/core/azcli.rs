//! Azure CLI process runner.
//!
//! Every call to Azure goes through the `az` executable, the same way a user
//! would run it. This keeps sign-in, token caching and cloud selection in the
//! CLI's hands.
//!
//! ## Requirements
//!
//! - `az` must be installed and on `PATH`
//! - The signed-in principal needs `get`, `list` and `set` secret permissions
//!   on the target vault

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Output, Stdio};

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::{Result, VaultError};

/// Handle on the `az` executable.
#[derive(Debug, Clone)]
pub struct AzCli {
    program: PathBuf,
}

impl AzCli {
    /// Locate `az` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::CliUnavailable` if it cannot be found.
    pub fn locate() -> Result<Self> {
        let program = which::which("az").map_err(|_| VaultError::CliUnavailable)?;
        debug!(program = %program.display(), "found azure cli");
        Ok(Self { program })
    }

    /// Use a specific executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run with captured output and fail on a non-zero exit.
    ///
    /// `operation` names the call in error messages.
    pub fn run<I, S>(&self, operation: &str, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.capture(operation, args)?;
        if !output.status.success() {
            return Err(VaultError::CommandFailed {
                operation: operation.to_string(),
                stderr: stderr_text(&output),
            }
            .into());
        }
        Ok(output)
    }

    /// Run with captured output, returning it whatever the exit status.
    pub fn capture<I, S>(&self, operation: &str, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        trace!(operation, "running az");
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| VaultError::CommandFailed {
                operation: operation.to_string(),
                stderr: format!("failed to spawn az: {}", e),
            })?;
        trace!(operation, status = ?output.status.code(), "az finished");
        Ok(output)
    }

    /// Run and parse stdout as JSON.
    pub fn run_json<T, I, S>(&self, operation: &str, args: I) -> Result<T>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.run(operation, args)?;
        parse_json(operation, &output.stdout)
    }

    /// Run attached to the terminal so the user can interact with it.
    pub fn run_interactive<I, S>(&self, operation: &str, args: I) -> Result<ExitStatus>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        debug!(operation, "running az interactively");
        Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|e| {
                VaultError::CommandFailed {
                    operation: operation.to_string(),
                    stderr: format!("failed to spawn az: {}", e),
                }
                .into()
            })
    }
}

/// Parse JSON produced by an az command.
pub fn parse_json<T: DeserializeOwned>(operation: &str, stdout: &[u8]) -> Result<T> {
    serde_json::from_slice(stdout).map_err(|e| {
        VaultError::InvalidResponse {
            operation: operation.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Trimmed, lossy stderr of a finished command.
pub fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
