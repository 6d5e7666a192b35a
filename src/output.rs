use std::path::{Path, PathBuf};

use crate::errors::OutputError;
use crate::records::{CleanedRecord, SNAPSHOT_HEADERS};

pub fn snapshot_path(dir: &Path, date: &str) -> PathBuf {
    dir.join(format!("output_{}.csv", date))
}

/// Write one run's snapshot. The header row is always present, even with no records.
pub fn write_snapshot(dir: &Path, date: &str, records: &[CleanedRecord]) -> Result<PathBuf, OutputError> {
    let path = snapshot_path(dir, date);
    let io_err = |source| OutputError::Io {
        path: path.clone(),
        source,
    };
    let csv_err = |source| OutputError::Csv {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(io_err)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .map_err(csv_err)?;

    writer.write_record(SNAPSHOT_HEADERS).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(io_err)?;
    Ok(path)
}
