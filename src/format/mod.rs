//! Defect export.
//!
//! Saving the current image writes, for every defect that has at least one
//! rectangle:
//!
//! - **Annotated image**: `<destination>/<Category_Folder>/<rename><ext>`, a copy
//!   of the source with the defect's rectangles drawn on it
//! - **Validation log**: one row in `<destination>/validation_log.csv`
//! - **Result sheet**: one row in `<Category_Folder>/ui_defects.xlsx`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bug_validator::format::DefectExporter;
//!
//! let exporter = DefectExporter::new("/data/validated");
//! exporter.ensure_category_folders()?;
//! let report = exporter.export_all(&image, store.defects());
//! println!("{}", report.summary());
//! ```

mod error;
mod exporter;
mod overlay;
mod result_sheet;
mod validation_log;

#[cfg(test)]
mod tests;

pub use error::ExportError;
pub use exporter::{DefectExporter, SaveFailure, SaveReport};
pub use overlay::draw_defect_overlay;
pub use result_sheet::ResultSheet;
pub use validation_log::{LogRow, ValidationLog};
