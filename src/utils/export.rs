//! Record export: CSV and JSON serialization of document records.

use chrono::Local;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::DocumentRecord;

/// Errors that can occur while exporting records
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write records as a CSV table with one flat row per document.
pub fn export_csv(records: &[DocumentRecord], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(DocumentRecord::csv_header())?;
    for record in records {
        writer.write_record(record.csv_row())?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), rows = records.len(), "wrote CSV export");
    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn export_json(records: &[DocumentRecord], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    tracing::info!(path = %path.display(), rows = records.len(), "wrote JSON export");
    Ok(())
}

/// Build a timestamped export path like `dir/prefix_20240131_235959.csv`.
pub fn timestamped_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{}_{}.{}", prefix, stamp, extension))
}
