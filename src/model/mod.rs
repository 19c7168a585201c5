//! Data models for the Bug Validator application.

mod category;
mod defect;

pub use category::Category;
pub use defect::{Defect, OverlayHandle, RectCoords, Rectangle};
