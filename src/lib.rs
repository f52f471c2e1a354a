//! kvsync - Export and bulk-import Azure Key Vault secrets through CSV files.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── export        # Vault -> CSV
//! │   ├── import        # CSV -> vault
//! │   ├── select        # Interactive operation picker
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── auth          # Sign-in check and login
//!     ├── azcli         # `az` process runner
//!     ├── codec         # CSV encode/decode
//!     ├── config        # kvsync.toml and setting resolution
//!     ├── domain/       # SecretRecord and reports
//!     ├── sync          # Export and import flows
//!     └── vault/        # VaultClient trait and backends
//! ```
//!
//! # Example
//!
//! ```
//! use kvsync::core::codec::Codec;
//! use kvsync::core::sync::{self, ExportFormat};
//! use kvsync::core::vault::Memory;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("secrets.csv");
//! let vault = Memory::with_secrets([("db-pass", "abc123")]);
//!
//! let report = sync::export(&vault, &path, &Codec::default(), ExportFormat::Records).unwrap();
//! assert_eq!(report.exported, 1);
//! assert_eq!(std::fs::read_to_string(&path).unwrap(), "db-pass,abc123\n");
//! ```

pub mod cli;
pub mod core;
pub mod error;
