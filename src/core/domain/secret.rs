//! Secret record type.
//!
//! One name/value pair, either fetched from the vault or decoded from CSV.

use zeroize::Zeroizing;

/// A vault secret with its plaintext value.
///
/// The value is zeroed on drop and never shown by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretRecord {
    name: String,
    value: Zeroizing<String>,
}

impl SecretRecord {
    /// Create a record from a name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Zeroizing::new(value.into()),
        }
    }

    /// Secret name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plaintext value.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Whether `other` is byte-for-byte the stored value.
    pub fn matches(&self, other: &str) -> bool {
        self.value.as_bytes() == other.as_bytes()
    }
}

impl std::fmt::Debug for SecretRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretRecord")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Display for SecretRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
