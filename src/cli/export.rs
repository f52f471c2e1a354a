//! Export command - write every vault secret to a CSV file.

use std::path::PathBuf;

use tracing::info;

use crate::cli::{output, session, Globals};
use crate::core::config::Overrides;
use crate::core::sync::{self, ExportFormat};
use crate::error::Result;

/// Export secrets (or only their names) to a CSV file.
pub fn execute(globals: &Globals, destination: Option<PathBuf>, names_only: bool) -> Result<()> {
    let settings = session::settings(
        globals,
        Overrides {
            export: destination,
            ..Overrides::default()
        },
    )?;
    let vault = session::connect(&settings, globals)?;

    let format = if names_only {
        ExportFormat::NamesOnly
    } else {
        ExportFormat::Records
    };
    info!(path = %settings.export_path.display(), ?format, "exporting");

    let report = sync::export(&vault, &settings.export_path, &settings.codec, format)?;

    let what = if names_only { "secret names" } else { "secrets" };
    output::success(&format!(
        "exported {} {} to {}",
        report.exported,
        what,
        output::path(report.path.display())
    ));
    if !names_only && report.exported > 0 {
        output::hint("this file contains plaintext secrets; delete it when done");
    }

    Ok(())
}
