//! Vault client adapters.
//!
//! The export and import flows only need three operations from a vault:
//! enumerate names, read one secret, write one secret. [`VaultClient`]
//! captures that surface so the flows can run against Azure Key Vault or an
//! in-process store alike.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `VaultClient` trait
//! 2. Report absent secrets from `get` as `VaultError::SecretNotFound`
//! 3. Re-export from this module
//!
//! ## Example
//!
//! ```ignore
//! struct Hashicorp { /* ... */ }
//!
//! impl VaultClient for Hashicorp {
//!     fn list_names(&self) -> Result<Vec<String>> {
//!         // GET /v1/secret/metadata?list=true
//!     }
//!     fn get(&self, name: &str) -> Result<SecretRecord> {
//!         // GET /v1/secret/data/{name}
//!     }
//!     fn set(&mut self, name: &str, value: &str) -> Result<()> {
//!         // POST /v1/secret/data/{name}
//!     }
//! }
//! ```

mod azure;
mod locator;
mod memory;

pub use azure::AzureCli;
pub use locator::VaultLocator;
pub use memory::Memory;

use crate::core::domain::SecretRecord;
use crate::error::Result;

/// Minimal vault surface used by the sync flows.
pub trait VaultClient {
    /// Names of every secret in the vault, in the order the vault returns them.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` on authentication or transport failure.
    fn list_names(&self) -> Result<Vec<String>>;

    /// Fetch the current value of a secret.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::SecretNotFound` if the secret does not exist,
    /// or another `VaultError` on failure.
    fn get(&self, name: &str) -> Result<SecretRecord>;

    /// Create or overwrite a secret.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` if the write is rejected.
    fn set(&mut self, name: &str, value: &str) -> Result<()>;

    /// Backend name for logs and messages.
    fn name(&self) -> &'static str;
}
