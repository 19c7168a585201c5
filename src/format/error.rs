//! Error types for defect export operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting a defect.
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Annotated image could not be encoded or written
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Validation log could not be written
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Existing result spreadsheet could not be read
    #[error("Spreadsheet read error: {0}")]
    SheetRead(#[from] calamine::XlsxError),

    /// Result spreadsheet could not be written
    #[error("Spreadsheet write error: {0}")]
    SheetWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Defect has no rectangles to draw
    #[error("No rectangles found in defect: {defect}")]
    NoRectangles {
        /// Name of the defect
        defect: String,
    },

    /// Defect has an empty output filename
    #[error("Defect '{defect}' has no output filename")]
    EmptyRename {
        /// Name of the defect
        defect: String,
    },

    /// Destination folder does not exist and could not be used
    #[error("Destination folder not available: {path:?}")]
    MissingDestination {
        /// Configured destination
        path: PathBuf,
    },
}

impl ExportError {
    /// Create a no-rectangles error.
    pub fn no_rectangles(defect: impl Into<String>) -> Self {
        Self::NoRectangles {
            defect: defect.into(),
        }
    }

    /// Create an empty-rename error.
    pub fn empty_rename(defect: impl Into<String>) -> Self {
        Self::EmptyRename {
            defect: defect.into(),
        }
    }
}
