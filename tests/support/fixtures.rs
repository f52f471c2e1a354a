//! Test fixtures and constants.

pub use super::commands::VAULT;

/// Vault contents used by the end-to-end import scenario.
pub const EXISTING_SECRETS: &[(&str, &str)] = &[("db-pass", "abc123")];

/// Import file for the end-to-end scenario: one unchanged, one new.
pub const SAMPLE_CSV: &str = "db-pass,abc123\napi-key,xyz789\n";

/// Import file with comments, blank lines and a malformed line.
pub const SAMPLE_CSV_MIXED: &str = "# exported from staging\n\nredis-url,redis://cache:6379\nnot-a-record\n  storage-key  ,k3y\n";
