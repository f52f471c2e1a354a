//! In-process vault.
//!
//! Keeps secrets in insertion order and records every write. Faults can be
//! injected per secret name to exercise the fail-fast paths of the flows.

use std::collections::HashSet;

use tracing::trace;
use zeroize::Zeroizing;

use super::VaultClient;
use crate::core::domain::SecretRecord;
use crate::error::{Result, VaultError};

/// Vault held entirely in memory.
#[derive(Default)]
pub struct Memory {
    secrets: Vec<(String, Zeroizing<String>)>,
    writes: Vec<String>,
    failing_gets: HashSet<String>,
    failing_sets: HashSet<String>,
    failing_list: bool,
}

impl Memory {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a vault seeded with `pairs`, in order.
    ///
    /// Seeding does not count as a write.
    pub fn with_secrets<N, V>(pairs: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        let mut vault = Self::new();
        for (name, value) in pairs {
            vault.upsert(name.into(), value.into());
        }
        vault
    }

    /// Make `get` fail for `name` with a service error.
    pub fn fail_get(mut self, name: impl Into<String>) -> Self {
        self.failing_gets.insert(name.into());
        self
    }

    /// Make `set` fail for `name` with a service error.
    pub fn fail_set(mut self, name: impl Into<String>) -> Self {
        self.failing_sets.insert(name.into());
        self
    }

    /// Make `list_names` fail.
    pub fn fail_list(mut self) -> Self {
        self.failing_list = true;
        self
    }

    /// Names passed to `set`, in call order.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    /// Forget the recorded writes, keeping the secrets.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Current value of `name`, if present.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.secrets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of secrets stored.
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Whether the vault holds no secrets.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    fn upsert(&mut self, name: String, value: String) {
        match self.secrets.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = Zeroizing::new(value),
            None => self.secrets.push((name, Zeroizing::new(value))),
        }
    }
}

impl VaultClient for Memory {
    fn list_names(&self) -> Result<Vec<String>> {
        if self.failing_list {
            return Err(VaultError::CommandFailed {
                operation: "list".to_string(),
                stderr: "simulated failure".to_string(),
            }
            .into());
        }
        Ok(self.secrets.iter().map(|(n, _)| n.clone()).collect())
    }

    fn get(&self, name: &str) -> Result<SecretRecord> {
        trace!(name, "memory get");
        if self.failing_gets.contains(name) {
            return Err(VaultError::CommandFailed {
                operation: format!("get {}", name),
                stderr: "simulated failure".to_string(),
            }
            .into());
        }
        self.value(name)
            .map(|value| SecretRecord::new(name, value))
            .ok_or_else(|| VaultError::SecretNotFound(name.to_string()).into())
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        trace!(name, value_len = value.len(), "memory set");
        if self.failing_sets.contains(name) {
            return Err(VaultError::CommandFailed {
                operation: format!("set {}", name),
                stderr: "simulated failure".to_string(),
            }
            .into());
        }
        self.upsert(name.to_string(), value.to_string());
        self.writes.push(name.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_memory_preserves_insertion_order() {
        let vault = Memory::with_secrets([("b", "2"), ("a", "1"), ("c", "3")]);

        assert_eq!(vault.list_names().unwrap(), vec!["b", "a", "c"]);
        assert!(vault.writes().is_empty());
    }

    #[test]
    fn test_memory_get_missing_is_not_found() {
        let vault = Memory::new();

        let err = vault.get("missing").unwrap_err();
        assert!(err.is_secret_not_found());
    }

    #[test]
    fn test_memory_set_overwrites_and_records() {
        let mut vault = Memory::with_secrets([("a", "1")]);

        vault.set("a", "2").unwrap();
        vault.set("b", "3").unwrap();

        assert_eq!(vault.value("a"), Some("2"));
        assert_eq!(vault.value("b"), Some("3"));
        assert_eq!(vault.len(), 2);
        assert_eq!(vault.writes(), ["a", "b"]);
    }

    #[test]
    fn test_memory_injected_faults() {
        let mut vault = Memory::with_secrets([("a", "1")])
            .fail_get("a")
            .fail_set("b")
            .fail_list();

        assert!(matches!(
            vault.get("a"),
            Err(Error::Vault(VaultError::CommandFailed { .. }))
        ));
        assert!(vault.set("b", "x").is_err());
        assert!(vault.list_names().is_err());
        assert!(vault.writes().is_empty());
    }
}
