//! Saving annotated copies of the current image, one per defect.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::format::error::ExportError;
use crate::format::overlay::draw_defect_overlay;
use crate::format::result_sheet::ResultSheet;
use crate::format::validation_log::{LogRow, ValidationLog};
use crate::model::{Category, Defect};
use crate::state::ImageData;

/// Writes annotated images and their log rows under a destination folder.
#[derive(Debug, Clone)]
pub struct DefectExporter {
    destination: PathBuf,
}

impl DefectExporter {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Folder that defects of `category` are saved into.
    pub fn category_folder(&self, category: Category) -> PathBuf {
        self.destination.join(category.folder_name())
    }

    /// Create the subfolder of every category.
    pub fn ensure_category_folders(&self) -> Result<(), ExportError> {
        for category in Category::all() {
            std::fs::create_dir_all(self.category_folder(*category))?;
        }
        Ok(())
    }

    /// The audit log in the destination root.
    pub fn validation_log(&self) -> ValidationLog {
        ValidationLog::in_folder(&self.destination)
    }

    /// Save one defect: annotated image, CSV row, and spreadsheet row.
    ///
    /// A spreadsheet failure is logged and does not fail the defect.
    /// Returns the path of the written image.
    pub fn export_defect(
        &self,
        source: &ImageData,
        defect: &Defect,
        timestamp: NaiveDateTime,
    ) -> Result<PathBuf, ExportError> {
        if !self.destination.is_dir() {
            return Err(ExportError::MissingDestination {
                path: self.destination.clone(),
            });
        }
        if !defect.is_exportable() {
            return Err(ExportError::no_rectangles(&defect.name));
        }

        log::info!(
            "Saving defect: {}, Category: {}, Rectangle count: {}",
            defect.name,
            defect.category,
            defect.rectangles.len()
        );

        let (annotated, drawn) = draw_defect_overlay(&source.image, defect);
        if drawn == 0 {
            return Err(ExportError::no_rectangles(&defect.name));
        }

        let category_folder = self.category_folder(defect.category);
        std::fs::create_dir_all(&category_folder)?;

        if defect.rename.is_empty() {
            return Err(ExportError::empty_rename(&defect.name));
        }
        let output = category_folder.join(format!("{}{}", defect.rename, source.extension()));
        annotated.save(&output)?;

        let original_stem = source.stem();
        self.validation_log().append(&LogRow {
            timestamp,
            original_filename: &original_stem,
            new_filename: &defect.rename,
            category: defect.category.label(),
            defect_name: &defect.name,
            rectangle_count: drawn,
        })?;

        let sheet = ResultSheet::in_folder(&category_folder);
        if let Err(e) = sheet.append(&defect.rename, &defect.result_text) {
            log::warn!("Failed to update result spreadsheet for {}: {}", defect.rename, e);
        }

        Ok(output)
    }

    /// Save every exportable defect, continuing past individual failures.
    pub fn export_all(&self, source: &ImageData, defects: &[Defect]) -> SaveReport {
        self.export_all_at(source, defects, chrono::Local::now().naive_local())
    }

    /// Same as [`DefectExporter::export_all`] with an explicit timestamp.
    pub fn export_all_at(
        &self,
        source: &ImageData,
        defects: &[Defect],
        timestamp: NaiveDateTime,
    ) -> SaveReport {
        let mut report = SaveReport {
            total: defects.len(),
            ..Default::default()
        };

        for defect in defects {
            if !defect.is_exportable() {
                log::info!("Skipping defect {} because it has no rectangles", defect.name);
                report.skipped.push(defect.name.clone());
                continue;
            }
            match self.export_defect(source, defect, timestamp) {
                Ok(path) => {
                    report.saved += 1;
                    report.files_created.push(path);
                }
                Err(e) => {
                    log::warn!("Failed to save {}: {}", defect.name, e);
                    report.failures.push(SaveFailure {
                        defect: defect.name.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        log::info!("Save finished for {}: {}", source.filename(), report.summary());
        report
    }
}

/// A defect that could not be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFailure {
    /// Defect display name
    pub defect: String,
    /// Human-readable reason
    pub message: String,
}

/// Outcome of saving all defects of an image.
#[derive(Debug, Clone, Default)]
pub struct SaveReport {
    /// Number of defects on the image
    pub total: usize,
    /// Number of defects written successfully
    pub saved: usize,
    /// Defects skipped because they had no rectangles
    pub skipped: Vec<String>,
    /// Defects that were attempted and failed
    pub failures: Vec<SaveFailure>,
    /// Annotated images written
    pub files_created: Vec<PathBuf>,
}

impl SaveReport {
    /// Number of defects an export was attempted for.
    pub fn attempted(&self) -> usize {
        self.total - self.skipped.len()
    }

    /// True when every attempted defect was written.
    pub fn all_saved(&self) -> bool {
        self.failures.is_empty()
    }

    /// Short "Saved: X/Y" summary.
    pub fn summary(&self) -> String {
        format!("Saved: {}/{}", self.saved, self.total)
    }

    /// Message shown to the user after a save.
    pub fn message(&self) -> String {
        if self.all_saved() {
            format!("All defects saved successfully. {}", self.summary())
        } else {
            format!("Some defects could not be saved. {}", self.summary())
        }
    }
}
