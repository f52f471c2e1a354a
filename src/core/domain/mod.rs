//! Domain types.

mod report;
mod secret;

pub use report::{ExportReport, ImportReport};
pub use secret::SecretRecord;
