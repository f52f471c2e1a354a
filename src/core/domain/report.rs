//! Outcomes of the export and import flows.

use std::path::PathBuf;

/// Result of an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Number of secrets written to the file
    pub exported: usize,
    /// File that was written
    pub path: PathBuf,
}

/// Result of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Records written to the vault
    pub synced: usize,
    /// Records whose vault value already matched
    pub skipped: usize,
    /// Lines that could not be decoded
    pub rejected: usize,
}

impl ImportReport {
    /// Number of records that reached reconciliation.
    pub fn processed(&self) -> usize {
        self.synced + self.skipped
    }
}
