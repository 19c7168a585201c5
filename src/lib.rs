//! Bug Validator - defect annotation for UI screenshots
//!
//! Reviewers step through a folder of screenshots, mark defects as groups of
//! rectangles, and save annotated copies sorted into category folders together
//! with a CSV audit log and a per-category result spreadsheet.

pub mod annotation;
pub mod config;
pub mod constants;
pub mod format;
pub mod gesture;
pub mod model;
pub mod script;
pub mod session;
pub mod state;
pub mod transform;
pub mod undo;

pub use annotation::{AnnotationStore, Snapshot};
pub use config::{AppConfig, ConfigError, LogLevel};
pub use format::{DefectExporter, ExportError, SaveReport};
pub use gesture::{DrawOutcome, Gesture};
pub use model::{Category, Defect, OverlayHandle, RectCoords, Rectangle};
pub use session::{NullPresenter, Presenter, SessionController};
pub use state::{ImageData, ProjectState, StateError};
pub use transform::ViewTransform;
pub use undo::{HistoryLog, UndoConfig};
