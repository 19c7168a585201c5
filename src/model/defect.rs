//! Defect and rectangle data structures.

use super::Category;

/// Opaque reference to an overlay drawn by the presenter.
///
/// The core never owns or disposes what this points to; it only hands it back
/// to the presenter for highlight and delete requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Corner coordinates of an axis-aligned rectangle.
///
/// The corners are not necessarily ordered (`x1` may exceed `x2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RectCoords {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectCoords {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create from the anchor and end point of a drag.
    pub fn from_corners(start: (i32, i32), end: (i32, i32)) -> Self {
        Self::new(start.0, start.1, end.0, end.1)
    }

    /// Reorder corners so that `x1 <= x2` and `y1 <= y2`.
    pub fn normalized(&self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    /// Normalize and clamp every corner to `[0, dimension - 1]`.
    pub fn clamped(&self, width: u32, height: u32) -> Self {
        let max_x = width.saturating_sub(1).min(i32::MAX as u32) as i32;
        let max_y = height.saturating_sub(1).min(i32::MAX as u32) as i32;
        let n = self.normalized();
        Self {
            x1: n.x1.clamp(0, max_x),
            y1: n.y1.clamp(0, max_y),
            x2: n.x2.clamp(0, max_x),
            y2: n.y2.clamp(0, max_y),
        }
    }

    /// Absolute horizontal extent.
    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).abs()
    }

    /// Absolute vertical extent.
    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).abs()
    }

    pub fn as_array(&self) -> [i32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

impl From<(i32, i32, i32, i32)> for RectCoords {
    fn from((x1, y1, x2, y2): (i32, i32, i32, i32)) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

/// A rectangle belonging to a defect, stored in original image pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    /// Corners in original image space
    pub coords: RectCoords,
    /// Overlay currently showing this rectangle, if it is drawn
    pub overlay: Option<OverlayHandle>,
}

impl Rectangle {
    pub fn new(coords: RectCoords) -> Self {
        Self {
            coords,
            overlay: None,
        }
    }
}

/// One labeled issue on the current image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defect {
    /// Stable display label ("Defect N")
    pub name: String,
    /// Output base filename used on export
    pub rename: String,
    /// Category the defect is filed under
    pub category: Category,
    /// Free-form result text
    pub result_text: String,
    /// Rectangles in insertion order
    pub rectangles: Vec<Rectangle>,
}

impl Defect {
    /// Create a defect with no rectangles and empty result text.
    pub fn new(name: impl Into<String>, rename: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            rename: rename.into(),
            category,
            result_text: String::new(),
            rectangles: Vec::new(),
        }
    }

    /// Display label for the `n`th defect (1-based).
    pub fn default_name(n: usize) -> String {
        format!("Defect {}", n)
    }

    /// Default output filename for a defect of an image with the given stem.
    pub fn default_rename(image_stem: &str, name: &str) -> String {
        format!("{}_{}", image_stem, name)
    }

    /// Whether this defect has anything to export.
    pub fn is_exportable(&self) -> bool {
        !self.rectangles.is_empty()
    }

    /// Copy of this defect with every overlay handle dropped.
    pub fn detached(&self) -> Self {
        Self {
            rectangles: self
                .rectangles
                .iter()
                .map(|r| Rectangle::new(r.coords))
                .collect(),
            ..self.clone()
        }
    }

    /// Overlay handles currently attached to this defect's rectangles.
    pub fn overlays(&self) -> impl Iterator<Item = OverlayHandle> + '_ {
        self.rectangles.iter().filter_map(|r| r.overlay)
    }
}
