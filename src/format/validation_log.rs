//! CSV audit log of every exported defect.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::constants::VALIDATION_LOG_FILENAME;
use crate::format::error::ExportError;

/// Column headers, written once when the log file is created.
pub const HEADER: [&str; 7] = [
    "Date",
    "Time",
    "Original Filename",
    "New Filename",
    "Category",
    "Defect Name",
    "Rectangle Count",
];

/// One exported defect.
#[derive(Debug, Clone)]
pub struct LogRow<'a> {
    /// When the defect was saved
    pub timestamp: NaiveDateTime,
    /// Source filename without extension
    pub original_filename: &'a str,
    /// Output filename without extension
    pub new_filename: &'a str,
    /// Category label
    pub category: &'a str,
    /// Defect display name
    pub defect_name: &'a str,
    /// Number of rectangles drawn
    pub rectangle_count: usize,
}

impl LogRow<'_> {
    fn to_record(&self) -> [String; 7] {
        [
            self.timestamp.format("%Y-%m-%d").to_string(),
            self.timestamp.format("%H:%M:%S").to_string(),
            self.original_filename.to_string(),
            self.new_filename.to_string(),
            self.category.to_string(),
            self.defect_name.to_string(),
            self.rectangle_count.to_string(),
        ]
    }
}

/// Append-only `validation_log.csv` in the destination root.
#[derive(Debug, Clone)]
pub struct ValidationLog {
    path: PathBuf,
}

impl ValidationLog {
    /// Log located in the given destination folder.
    pub fn in_folder(destination: &Path) -> Self {
        Self {
            path: destination.join(VALIDATION_LOG_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a row, writing the header first if the file is new.
    pub fn append(&self, row: &LogRow<'_>) -> Result<(), ExportError> {
        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::Writer::from_writer(file);
        if is_new {
            writer.write_record(HEADER)?;
        }
        writer.write_record(row.to_record())?;
        writer.flush()?;

        log::debug!("Logged {} to {:?}", row.defect_name, self.path);
        Ok(())
    }
}
