//! Mapping between original image pixels and the zoomed display.
//!
//! The display scale is the ratio that fits the whole image into the canvas
//! multiplied by the zoom level. Coordinates are truncated toward zero in both
//! directions, so a round trip may drift by a pixel; overlays are therefore
//! always recomputed from the original-space coordinates rather than tracked
//! in display space.

use crate::constants::zoom;
use crate::model::RectCoords;

/// Current zoom and the sizes the display scale is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Original image size in pixels
    image_size: (u32, u32),
    /// Canvas size in pixels
    canvas_size: (u32, u32),
    /// Zoom multiplier on top of the fit ratio
    zoom_level: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            image_size: (0, 0),
            canvas_size: (0, 0),
            zoom_level: zoom::FIT,
        }
    }
}

impl ViewTransform {
    pub fn new(image_size: (u32, u32), canvas_size: (u32, u32)) -> Self {
        Self {
            image_size,
            canvas_size,
            zoom_level: zoom::FIT,
        }
    }

    /// Set the size of a newly loaded image. Resets zoom to fit.
    pub fn set_image_size(&mut self, width: u32, height: u32) {
        self.image_size = (width, height);
        self.zoom_level = zoom::FIT;
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_size = (width, height);
    }

    pub fn image_size(&self) -> (u32, u32) {
        self.image_size
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas_size
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    /// Ratio that fits the whole image into the canvas, aspect preserved.
    ///
    /// Returns 0 while either size is unknown.
    pub fn fit_ratio(&self) -> f64 {
        let (w, h) = self.image_size;
        let (cw, ch) = self.canvas_size;
        if w == 0 || h == 0 || cw == 0 || ch == 0 {
            return 0.0;
        }
        (f64::from(cw) / f64::from(w)).min(f64::from(ch) / f64::from(h))
    }

    /// Scale from original image pixels to display pixels.
    pub fn display_scale(&self) -> f64 {
        self.fit_ratio() * self.zoom_level
    }

    /// Size the image is rendered at on the canvas.
    pub fn display_size(&self) -> (u32, u32) {
        let scale = self.display_scale();
        let (w, h) = self.image_size;
        (
            (f64::from(w) * scale) as u32,
            (f64::from(h) * scale) as u32,
        )
    }

    /// Convert original image coordinates to display coordinates.
    pub fn to_display(&self, coords: RectCoords) -> Option<RectCoords> {
        let scale = self.display_scale();
        if scale <= 0.0 {
            return None;
        }
        Some(scale_coords(coords, scale))
    }

    /// Convert display coordinates to original image coordinates.
    pub fn to_original(&self, coords: RectCoords) -> Option<RectCoords> {
        let scale = self.display_scale();
        if scale <= 0.0 {
            return None;
        }
        Some(scale_coords(coords, 1.0 / scale))
    }

    /// Zoom in one step, up to 200%.
    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.zoom_level + zoom::STEP);
        log::debug!("Zoom in: {:.1}x", self.zoom_level);
        self.zoom_level
    }

    /// Zoom out one step, down to 10%.
    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.zoom_level - zoom::STEP);
        log::debug!("Zoom out: {:.1}x", self.zoom_level);
        self.zoom_level
    }

    /// Back to fit-to-canvas (not native 100%).
    pub fn reset_zoom(&mut self) {
        self.zoom_level = zoom::FIT;
        log::debug!("Zoom reset");
    }

    fn set_zoom(&mut self, level: f64) {
        // Snap to the step grid so repeated steps don't accumulate float error
        let snapped = (level / zoom::STEP).round() * zoom::STEP;
        self.zoom_level = snapped.clamp(zoom::MIN, zoom::MAX);
    }
}

fn scale_coords(coords: RectCoords, scale: f64) -> RectCoords {
    let s = |v: i32| (f64::from(v) * scale) as i32;
    RectCoords::new(s(coords.x1), s(coords.y1), s(coords.x2), s(coords.y2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: RectCoords, b: RectCoords, tolerance: i32) {
        for (x, y) in a.as_array().iter().zip(b.as_array().iter()) {
            assert!((x - y).abs() <= tolerance, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_identity_at_fit() {
        let view = ViewTransform::new((800, 600), (800, 600));
        assert_eq!(view.display_scale(), 1.0);
        let coords = RectCoords::new(10, 10, 200, 150);
        assert_eq!(view.to_display(coords), Some(coords));
        assert_eq!(view.to_original(coords), Some(coords));
    }

    #[test]
    fn test_half_zoom() {
        let mut view = ViewTransform::new((800, 600), (800, 600));
        for _ in 0..5 {
            view.zoom_out();
        }
        assert!((view.zoom_level() - 0.5).abs() < 1e-9);
        assert!((view.display_scale() - 0.5).abs() < 1e-9);
        assert_eq!(
            view.to_display(RectCoords::new(10, 10, 200, 150)),
            Some(RectCoords::new(5, 5, 100, 75))
        );
    }

    #[test]
    fn test_fit_ratio_uses_smaller_axis() {
        let view = ViewTransform::new((1000, 500), (500, 500));
        assert_eq!(view.fit_ratio(), 0.5);
        assert_eq!(view.display_size(), (500, 250));
    }

    #[test]
    fn test_round_trip_within_one_pixel() {
        let mut view = ViewTransform::new((1920, 1080), (1013, 677));
        let original = RectCoords::new(123, 456, 1800, 999);
        for _ in 0..3 {
            let display = view.to_display(original).unwrap();
            let back = view.to_original(display).unwrap();
            assert_close(back, original, 2);
            view.zoom_in();
        }
    }

    #[test]
    fn test_unknown_size_yields_none() {
        let view = ViewTransform::default();
        assert_eq!(view.to_display(RectCoords::new(1, 1, 2, 2)), None);
        assert_eq!(view.to_original(RectCoords::new(1, 1, 2, 2)), None);
        assert_eq!(view.display_size(), (0, 0));
    }

    #[test]
    fn test_zoom_in_plateaus_at_max() {
        let mut view = ViewTransform::new((800, 600), (800, 600));
        for _ in 0..11 {
            view.zoom_in();
        }
        assert_eq!(view.zoom_level(), zoom::MAX);
        view.zoom_in();
        assert_eq!(view.zoom_level(), zoom::MAX);
    }

    #[test]
    fn test_zoom_out_plateaus_at_min() {
        let mut view = ViewTransform::new((800, 600), (800, 600));
        for _ in 0..11 {
            view.zoom_in();
        }
        for _ in 0..20 {
            view.zoom_out();
        }
        assert!((view.zoom_level() - zoom::MIN).abs() < 1e-9);
        assert!(view.zoom_level() > 0.0);
    }

    #[test]
    fn test_reset_and_new_image() {
        let mut view = ViewTransform::new((800, 600), (800, 600));
        view.zoom_in();
        view.reset_zoom();
        assert_eq!(view.zoom_level(), 1.0);

        view.zoom_out();
        view.set_image_size(400, 300);
        assert_eq!(view.zoom_level(), 1.0);
        assert_eq!(view.display_scale(), 2.0);
    }
}
