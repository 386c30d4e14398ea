use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use orderhistory_generate::GenerationReport;

use super::{RegistryError, RegistryResult};

pub const REPORT_FILE: &str = "generation_report.json";

/// Report location for a database: same directory, fixed file name.
pub fn report_path_for(database: &Path) -> PathBuf {
    match database.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(REPORT_FILE),
        _ => PathBuf::from(REPORT_FILE),
    }
}

pub fn write_report(path: &Path, report: &GenerationReport) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, report).map_err(RegistryError::from)
}
