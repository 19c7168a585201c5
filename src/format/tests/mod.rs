//! Unit tests for defect export.
//!
//! These tests write into temporary destination folders and read the produced
//! images, CSV log, and spreadsheets back.

mod exporter_tests;

use chrono::{NaiveDate, NaiveDateTime};
use image::{DynamicImage, Rgb, RgbImage};

use crate::model::{Category, Defect, RectCoords, Rectangle};
use crate::state::ImageData;

/// Fixed save time used by all export tests.
fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(14, 5, 7)
        .unwrap()
}

/// An 800x600 gray PNG source image.
fn source_image(filename: &str) -> ImageData {
    ImageData::from_image(
        format!("/source/{}", filename),
        DynamicImage::ImageRgb8(RgbImage::from_pixel(800, 600, Rgb([90, 90, 90]))),
    )
}

fn defect(n: usize, category: Category, rectangles: &[RectCoords]) -> Defect {
    let name = Defect::default_name(n);
    let mut defect = Defect::new(&name, Defect::default_rename("board", &name), category);
    defect
        .rectangles
        .extend(rectangles.iter().copied().map(Rectangle::new));
    defect
}
