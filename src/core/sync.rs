//! Export and import flows.
//!
//! Export reads every secret from a vault into a CSV file. Import reads a CSV
//! file and writes each record to the vault unless the vault already holds
//! the same value, so re-running an import against an unchanged vault
//! performs no writes.
//!
//! Both flows are sequential and fail fast on vault errors. The only
//! recovered conditions are undecodable CSV records and secrets that do not
//! exist yet.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::core::codec::Codec;
use crate::core::domain::{ExportReport, ImportReport, SecretRecord};
use crate::core::vault::VaultClient;
use crate::error::{DecodeError, Error, Result};

/// What an export writes for each secret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// `name<delimiter>value` records
    #[default]
    Records,
    /// One secret name per line, values are not fetched
    NamesOnly,
}

/// Per-record notification from [`import`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent<'a> {
    /// The vault already holds this exact value.
    Skipped { name: &'a str },
    /// The value was written. `created` is true when the secret was new.
    Synced { name: &'a str, created: bool },
    /// A CSV record could not be decoded and was left out.
    Rejected { error: &'a DecodeError },
}

/// Receives progress from [`import`].
pub trait ImportObserver {
    /// Called once the batch has been parsed, before any vault call.
    fn batch(&mut self, _records: usize) {}

    /// Called for every rejected line and every reconciled record.
    fn notify(&mut self, event: ImportEvent<'_>);
}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Default)]
pub struct LogObserver;

impl ImportObserver for LogObserver {
    fn batch(&mut self, records: usize) {
        info!(records, "parsed import batch");
    }

    fn notify(&mut self, event: ImportEvent<'_>) {
        match event {
            ImportEvent::Skipped { name } => info!(name, "unchanged"),
            ImportEvent::Synced { name, created } => info!(name, created, "synced"),
            ImportEvent::Rejected { error } => info!(%error, "rejected"),
        }
    }
}

/// Export every secret in `vault` to `destination`.
///
/// Lists names, fetches each value in list order, encodes one line per
/// secret and overwrites `destination` in a single write. Parent
/// directories are created as needed. On unix the file is created with mode
/// `0600`.
///
/// # Errors
///
/// Returns the first vault error encountered. Nothing is written in that
/// case, so a failed export never leaves a partial file behind.
pub fn export(
    vault: &dyn VaultClient,
    destination: &Path,
    codec: &Codec,
    format: ExportFormat,
) -> Result<ExportReport> {
    let names = vault.list_names()?;
    debug!(backend = vault.name(), count = names.len(), "exporting secrets");

    let mut content = String::new();
    for name in &names {
        match format {
            ExportFormat::Records => {
                let record = vault.get(name)?;
                content.push_str(&codec.encode(record.name(), record.value()));
            }
            ExportFormat::NamesOnly => content.push_str(name),
        }
        content.push('\n');
    }

    write_private(destination, content.as_bytes())?;
    info!(path = %destination.display(), count = names.len(), "export written");

    Ok(ExportReport {
        exported: names.len(),
        path: destination.to_path_buf(),
    })
}

/// Parse `source` into an import batch.
///
/// Undecodable records are passed to `observer` and counted in the returned
/// rejection total rather than failing the parse.
///
/// # Errors
///
/// Returns `Error::NotFound` if `source` does not exist.
pub fn read_batch(
    source: &Path,
    codec: &Codec,
    observer: &mut dyn ImportObserver,
) -> Result<(Vec<SecretRecord>, usize)> {
    if !source.exists() {
        return Err(Error::NotFound(source.to_path_buf()));
    }

    let content = fs::read_to_string(source)?;
    let mut batch = Vec::new();
    let mut rejected = 0;

    for (line, record) in codec.records(&content) {
        match codec.decode(record, line) {
            Ok(secret) => batch.push(secret),
            Err(error) => {
                debug!(%error, "skipping record");
                rejected += 1;
                observer.notify(ImportEvent::Rejected { error: &error });
            }
        }
    }

    Ok((batch, rejected))
}

/// Import `source` into `vault`, writing only records whose value differs.
///
/// Records are processed in file order. Duplicate names are not merged;
/// each occurrence is reconciled on its own, so the last one wins.
///
/// # Errors
///
/// Returns `Error::NotFound` if `source` does not exist. Any vault error
/// other than a missing secret aborts the import; records processed before
/// the failure stay written.
pub fn import(
    vault: &mut dyn VaultClient,
    source: &Path,
    codec: &Codec,
    observer: &mut dyn ImportObserver,
) -> Result<ImportReport> {
    let (batch, rejected) = read_batch(source, codec, observer)?;
    observer.batch(batch.len());

    let mut report = ImportReport {
        rejected,
        ..ImportReport::default()
    };

    if batch.is_empty() {
        debug!(path = %source.display(), "nothing to import");
        return Ok(report);
    }

    for record in &batch {
        match reconcile(vault, record)? {
            Outcome::Unchanged => {
                report.skipped += 1;
                observer.notify(ImportEvent::Skipped {
                    name: record.name(),
                });
            }
            Outcome::Written { created } => {
                report.synced += 1;
                observer.notify(ImportEvent::Synced {
                    name: record.name(),
                    created,
                });
            }
        }
    }

    info!(
        synced = report.synced,
        skipped = report.skipped,
        rejected = report.rejected,
        "import finished"
    );
    Ok(report)
}

enum Outcome {
    Unchanged,
    Written { created: bool },
}

fn reconcile(vault: &mut dyn VaultClient, record: &SecretRecord) -> Result<Outcome> {
    let created = match vault.get(record.name()) {
        Ok(current) if current.matches(record.value()) => return Ok(Outcome::Unchanged),
        Ok(_) => false,
        Err(e) if e.is_secret_not_found() => true,
        Err(e) => return Err(e),
    };

    vault.set(record.name(), record.value())?;
    Ok(Outcome::Written { created })
}

/// Overwrite `path` with `content`, owner-readable only on unix.
fn write_private(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(content)?;
        file.flush()?;

        // Tighten permissions when overwriting an existing file.
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    #[cfg(not(unix))]
    {
        let mut file = fs::File::create(path)?;
        file.write_all(content)?;
        file.flush()?;
    }

    Ok(())
}
