//! Global constants for the Bug Validator application

/// Zoom limits and step for the image view.
pub mod zoom {
    /// Smallest zoom multiplier (10% of the fitted size)
    pub const MIN: f64 = 0.1;
    /// Largest zoom multiplier (200% of the fitted size)
    pub const MAX: f64 = 2.0;
    /// Zoom change per zoom in/out step
    pub const STEP: f64 = 0.1;
    /// Zoom level that fits the whole image into the canvas
    pub const FIT: f64 = 1.0;
}

/// Minimum drag distance (display pixels, per axis) for a rectangle to be kept.
pub const MIN_DRAG_DISTANCE: i32 = 5;

/// Canvas size assumed until the front end reports its own.
pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (1280, 800);

/// Default number of snapshots kept by the undo history.
pub const DEFAULT_MAX_HISTORY: usize = 20;

/// Extensions (lowercase, without dots) recognised as reviewable images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

/// Audit log written to the destination root on every saved defect.
pub const VALIDATION_LOG_FILENAME: &str = "validation_log.csv";

/// Per-category spreadsheet holding defect results.
pub const RESULT_SHEET_FILENAME: &str = "ui_defects.xlsx";

/// Worksheet name used when the result spreadsheet is created.
pub const RESULT_SHEET_NAME: &str = "Defect Result";

/// Overlay colours used when exporting annotated images.
pub mod overlay {
    /// Semi-transparent fill (alpha 90 of 255, roughly 35%)
    pub const FILL: [u8; 4] = [255, 255, 0, 90];
    /// Solid outline
    pub const OUTLINE: [u8; 4] = [255, 255, 0, 255];
}
