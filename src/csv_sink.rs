use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::types::{ProductRow, PRODUCT_COLUMNS};

/// Delimited copy of every row written during a run. The header goes out
/// once, when the file is created.
pub struct CsvWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvWriter {
    /// Truncates any existing file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(PRODUCT_COLUMNS)?;
        writer.flush()?;
        Ok(Self { writer, path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows hit the file before this returns.
    pub fn append(&mut self, rows: &[ProductRow]) -> Result<()> {
        for row in rows {
            self.writer.write_record(row.cells().iter().map(|c| c.to_string()))?;
        }
        self.writer.flush()?;
        debug!(rows = rows.len(), path = %self.path.display(), "appended to csv");
        Ok(())
    }

    pub fn close(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
