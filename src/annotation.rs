//! Per-image defect storage and selection bookkeeping.
//!
//! The store owns the ordered defects of the current image together with the
//! selected defect and the selected rectangle inside it. Every index-taking
//! operation validates its bounds and reports failure through its return value;
//! nothing here panics on bad input.

use crate::model::{Category, Defect, OverlayHandle, RectCoords, Rectangle};

/// Independent copy of the defect list, as kept by the undo history.
pub type Snapshot = Vec<Defect>;

/// Defects marked on the current image.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    /// All defects in creation order.
    defects: Vec<Defect>,
    /// Index of the selected defect.
    selected_defect: Option<usize>,
    /// Index of the selected rectangle inside the selected defect.
    selected_rectangle: Option<usize>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Defects
    // ========================================================================

    /// Append a defect with no rectangles. Selection is unchanged.
    pub fn add_defect(
        &mut self,
        name: impl Into<String>,
        rename: impl Into<String>,
        category: Category,
    ) -> &Defect {
        self.defects.push(Defect::new(name, rename, category));
        let index = self.defects.len() - 1;
        log::debug!("Added defect {} at index {}", self.defects[index].name, index);
        &self.defects[index]
    }

    /// Remove a defect. Out of range indices are ignored.
    ///
    /// Removing the selected defect clears both selections; the caller picks
    /// the next defect to select.
    pub fn remove_defect(&mut self, index: usize) {
        if index >= self.defects.len() {
            return;
        }
        let removed = self.defects.remove(index);
        log::debug!("Removed defect {} at index {}", removed.name, index);

        match self.selected_defect {
            Some(selected) if selected == index => {
                self.selected_defect = None;
                self.selected_rectangle = None;
            }
            Some(selected) if selected > index => {
                self.selected_defect = Some(selected - 1);
            }
            _ => {}
        }
    }

    /// Get a defect by index.
    pub fn defect(&self, index: usize) -> Option<&Defect> {
        self.defects.get(index)
    }

    /// Get a mutable defect by index.
    pub fn defect_mut(&mut self, index: usize) -> Option<&mut Defect> {
        self.defects.get_mut(index)
    }

    /// Get all defects.
    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    /// Get the number of defects.
    pub fn len(&self) -> usize {
        self.defects.len()
    }

    /// Check if there are no defects.
    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }

    /// Remove all defects and clear the selection.
    pub fn clear(&mut self) {
        self.defects.clear();
        self.selected_defect = None;
        self.selected_rectangle = None;
    }

    // ========================================================================
    // Rectangles
    // ========================================================================

    /// Append a rectangle to a defect. Returns false if the defect doesn't exist.
    pub fn add_rectangle(
        &mut self,
        defect_index: usize,
        coords: RectCoords,
        overlay: Option<OverlayHandle>,
    ) -> bool {
        let Some(defect) = self.defects.get_mut(defect_index) else {
            return false;
        };
        defect.rectangles.push(Rectangle { coords, overlay });
        true
    }

    /// Remove a rectangle from a defect. Returns false if either index is invalid.
    ///
    /// The rectangle selection follows the removal: removing the selected
    /// rectangle clears it, removing one before it shifts it down by one.
    pub fn remove_rectangle(&mut self, defect_index: usize, rectangle_index: usize) -> bool {
        let Some(defect) = self.defects.get_mut(defect_index) else {
            return false;
        };
        if rectangle_index >= defect.rectangles.len() {
            return false;
        }
        defect.rectangles.remove(rectangle_index);

        match self.selected_rectangle {
            Some(selected) if selected == rectangle_index => self.selected_rectangle = None,
            Some(selected) if selected > rectangle_index => {
                self.selected_rectangle = Some(selected - 1)
            }
            _ => {}
        }
        true
    }

    /// Get a rectangle of a defect.
    pub fn rectangle(&self, defect_index: usize, rectangle_index: usize) -> Option<&Rectangle> {
        self.defects
            .get(defect_index)
            .and_then(|d| d.rectangles.get(rectangle_index))
    }

    /// Get the rectangles of a defect (empty for an invalid index).
    pub fn rectangles(&self, defect_index: usize) -> &[Rectangle] {
        self.defects
            .get(defect_index)
            .map(|d| d.rectangles.as_slice())
            .unwrap_or(&[])
    }

    /// Get the number of rectangles of a defect (0 for an invalid index).
    pub fn rectangle_count(&self, defect_index: usize) -> usize {
        self.rectangles(defect_index).len()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Select a defect. Out of range indices are ignored.
    ///
    /// The first rectangle becomes selected if the defect has any.
    pub fn select_defect(&mut self, index: usize) {
        let Some(defect) = self.defects.get(index) else {
            return;
        };
        self.selected_defect = Some(index);
        self.selected_rectangle = if defect.rectangles.is_empty() {
            None
        } else {
            Some(0)
        };
    }

    /// Select a rectangle of the selected defect.
    pub fn select_rectangle(&mut self, index: usize) -> bool {
        match self.selected_defect() {
            Some(defect) if index < defect.rectangles.len() => {
                self.selected_rectangle = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Clear both the defect and the rectangle selection.
    pub fn deselect_defect(&mut self) {
        self.selected_defect = None;
        self.selected_rectangle = None;
    }

    pub fn selected_defect_index(&self) -> Option<usize> {
        self.selected_defect
    }

    pub fn selected_rectangle_index(&self) -> Option<usize> {
        self.selected_rectangle
    }

    /// Get the selected defect.
    pub fn selected_defect(&self) -> Option<&Defect> {
        self.selected_defect.and_then(|i| self.defects.get(i))
    }

    /// Get the selected defect for property edits.
    pub fn selected_defect_mut(&mut self) -> Option<&mut Defect> {
        self.selected_defect.and_then(|i| self.defects.get_mut(i))
    }

    /// Get the selected rectangle of the selected defect.
    pub fn selected_rectangle(&self) -> Option<&Rectangle> {
        let defect = self.selected_defect()?;
        self.selected_rectangle.and_then(|i| defect.rectangles.get(i))
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Independent copy of all defects, without overlay handles.
    pub fn snapshot(&self) -> Snapshot {
        self.defects.iter().map(Defect::detached).collect()
    }

    /// Replace all defects and clear the selection.
    ///
    /// Overlay handles of the restored defects are dropped; they have to be
    /// regenerated from the coordinates before use.
    pub fn restore(&mut self, defects: Snapshot) {
        self.defects = defects.iter().map(Defect::detached).collect();
        self.selected_defect = None;
        self.selected_rectangle = None;
    }
}

// ============================================================================
// Tests
// ============================================================================
