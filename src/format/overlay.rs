//! Drawing defect rectangles onto a copy of the source image.

use image::{DynamicImage, GenericImageView, Pixel, Rgba, RgbaImage};

use crate::constants::overlay;
use crate::model::{Defect, RectCoords};

/// Draw every rectangle of `defect` onto a copy of `image`.
///
/// Rectangles are normalized and clamped to the image bounds, then filled with
/// semi-transparent yellow and outlined in solid yellow. Returns the annotated
/// image (in the source's colour layout, alpha only if the source had it) and
/// the number of rectangles drawn.
pub fn draw_defect_overlay(image: &DynamicImage, defect: &Defect) -> (DynamicImage, usize) {
    let (width, height) = image.dimensions();
    let mut canvas = image.to_rgba8();
    let mut drawn = 0;

    if width > 0 && height > 0 {
        for rectangle in &defect.rectangles {
            let bounds = rectangle.coords.clamped(width, height);
            log::debug!(
                "Drawing rectangle {:?} (from {:?}) for {}",
                bounds,
                rectangle.coords,
                defect.name
            );
            fill_rectangle(&mut canvas, bounds);
            drawn += 1;
        }
    }

    let output = if image.color().has_alpha() {
        DynamicImage::ImageRgba8(canvas)
    } else {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8())
    };
    (output, drawn)
}

/// Fill an inclusive, already clamped rectangle and stroke a 1 px outline.
fn fill_rectangle(canvas: &mut RgbaImage, bounds: RectCoords) {
    let fill = Rgba(overlay::FILL);
    let outline = Rgba(overlay::OUTLINE);

    for y in bounds.y1..=bounds.y2 {
        for x in bounds.x1..=bounds.x2 {
            let on_border =
                x == bounds.x1 || x == bounds.x2 || y == bounds.y1 || y == bounds.y2;
            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            if on_border {
                *pixel = outline;
            } else {
                pixel.blend(&fill);
            }
        }
    }
}
