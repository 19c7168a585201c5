//! The decoded image currently under review.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};

use super::StateError;

/// A decoded source image and the names derived from its filename.
#[derive(Clone, Debug)]
pub struct ImageData {
    /// Full path of the source file
    pub path: PathBuf,
    /// Decoded pixels
    pub image: DynamicImage,
}

impl ImageData {
    /// Decode an image file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| StateError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Loaded image {:?} ({}x{})",
            path,
            image.width(),
            image.height()
        );
        Ok(Self::from_image(path, image))
    }

    /// Wrap an already decoded image.
    pub fn from_image(path: impl Into<PathBuf>, image: DynamicImage) -> Self {
        Self {
            path: path.into(),
            image,
        }
    }

    /// Filename including extension.
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Filename without extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Extension including the leading dot, or empty if there is none.
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default()
    }

    /// Pixel dimensions of the original image.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
