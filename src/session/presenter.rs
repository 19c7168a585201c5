//! The seam between the session and whatever renders it.

use crate::model::{Defect, OverlayHandle, RectCoords, Rectangle};

/// Receives everything the session wants shown.
///
/// Only [`Presenter::draw_overlay`] is required; every other method defaults
/// to doing nothing so headless front ends stay small.
pub trait Presenter {
    /// Remove every overlay from the canvas.
    fn clear_overlays(&mut self) {}

    /// Draw a rectangle overlay in display coordinates.
    fn draw_overlay(&mut self, coords: RectCoords, highlighted: bool) -> OverlayHandle;

    /// Emphasize one overlay and drop the emphasis from the others.
    fn highlight_overlay(&mut self, _handle: OverlayHandle) {}

    /// Remove a single overlay.
    fn delete_overlay(&mut self, _handle: OverlayHandle) {}

    fn refresh_defect_list(&mut self, _defects: &[Defect], _selected: Option<usize>) {}

    fn refresh_rectangle_list(&mut self, _rectangles: &[Rectangle], _selected: Option<usize>) {}

    /// Show the rename, category and result text of the selected defect.
    fn refresh_defect_details(&mut self, _defect: Option<&Defect>) {}

    /// Transient status bar text.
    fn show_status(&mut self, _message: &str) {}

    fn show_info(&mut self, _message: &str) {}

    fn show_warning(&mut self, _message: &str) {}
}

/// Presenter that renders nothing and hands out sequential handles.
#[derive(Debug, Default)]
pub struct NullPresenter {
    next_handle: u64,
}

impl NullPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for NullPresenter {
    fn draw_overlay(&mut self, _coords: RectCoords, _highlighted: bool) -> OverlayHandle {
        self.next_handle += 1;
        OverlayHandle(self.next_handle)
    }
}
