//! Import command - write CSV records to the vault when their value differs.

use std::path::PathBuf;

use crate::cli::{output, session, Globals};
use crate::core::config::Overrides;
use crate::core::sync::{self, ImportEvent, ImportObserver};
use crate::error::{Error, Result};

/// Prints one line per record as the import progresses.
#[derive(Debug, Default)]
struct Progress;

impl ImportObserver for Progress {
    fn batch(&mut self, records: usize) {
        if records > 0 {
            output::section(&format!("importing {} secrets", records));
        }
    }

    fn notify(&mut self, event: ImportEvent<'_>) {
        match event {
            ImportEvent::Skipped { name } => output::record('=', name, "unchanged"),
            ImportEvent::Synced {
                name,
                created: true,
            } => output::record('+', name, "created"),
            ImportEvent::Synced {
                name,
                created: false,
            } => output::record('~', name, "updated"),
            ImportEvent::Rejected { error } => output::warn(&format!("skipped {}", error)),
        }
    }
}

/// Import secrets from a CSV file.
pub fn execute(globals: &Globals, source: Option<PathBuf>) -> Result<()> {
    let settings = session::settings(
        globals,
        Overrides {
            import: source,
            ..Overrides::default()
        },
    )?;

    // Checked before sign-in so a typo does not trigger a login.
    if !settings.import_path.exists() {
        return Err(Error::NotFound(settings.import_path));
    }

    let mut vault = session::connect(&settings, globals)?;
    let report = sync::import(
        &mut vault,
        &settings.import_path,
        &settings.codec,
        &mut Progress,
    )?;

    if report.processed() == 0 {
        output::dimmed(&format!(
            "no secrets found in {}",
            settings.import_path.display()
        ));
    } else {
        output::blank();
        output::success(&format!(
            "{} synced, {} unchanged",
            report.synced, report.skipped
        ));
    }
    if report.rejected > 0 {
        output::warn(&format!("{} lines could not be read", report.rejected));
    }

    Ok(())
}
