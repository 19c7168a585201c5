//! Per-category result spreadsheet (`ui_defects.xlsx`).
//!
//! The workbook is read back with calamine and rewritten in full with
//! rust_xlsxwriter, since the writer cannot append to an existing file. Only
//! the cell text of the first worksheet is carried over.

use std::path::{Path, PathBuf};

use calamine::{Reader, Xlsx, open_workbook};
use rust_xlsxwriter::Workbook;

use crate::constants::{RESULT_SHEET_FILENAME, RESULT_SHEET_NAME};
use crate::format::error::ExportError;

/// Column headers, written once when the workbook is created.
pub const HEADER: [&str; 4] = ["Filename", "Title", "Result", "Defect URL"];

/// Result spreadsheet inside a category folder.
#[derive(Debug, Clone)]
pub struct ResultSheet {
    path: PathBuf,
}

impl ResultSheet {
    /// Spreadsheet located in the given category folder.
    pub fn in_folder(category_folder: &Path) -> Self {
        Self {
            path: category_folder.join(RESULT_SHEET_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the name and rows of the first worksheet.
    ///
    /// A missing file reads as no rows.
    pub fn read_rows(&self) -> Result<(String, Vec<Vec<String>>), ExportError> {
        if !self.path.exists() {
            return Ok((RESULT_SHEET_NAME.to_string(), Vec::new()));
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path)?;
        let name = workbook
            .sheet_names()
            .first()
            .cloned()
            .unwrap_or_else(|| RESULT_SHEET_NAME.to_string());

        let rows = match workbook.worksheet_range_at(0) {
            Some(range) => range?
                .rows()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
            None => Vec::new(),
        };
        Ok((name, rows))
    }

    /// Append a result row, creating the workbook with a header if needed.
    pub fn append(&self, filename: &str, result_text: &str) -> Result<(), ExportError> {
        let (name, mut rows) = self.read_rows()?;
        if rows.is_empty() {
            rows.push(HEADER.iter().map(|h| h.to_string()).collect());
        }
        rows.push(vec![
            filename.to_string(),
            String::new(),
            result_text.to_string(),
            String::new(),
        ]);

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name.as_str())?;
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(r as u32, c as u16, value.as_str())?;
                }
            }
        }
        workbook.save(&self.path)?;

        log::debug!("Recorded result for {} in {:?}", filename, self.path);
        Ok(())
    }
}
