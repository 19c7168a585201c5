//! Application state management modules.

mod image_data;
mod project;

use std::path::PathBuf;

pub use image_data::ImageData;
pub use project::ProjectState;

/// Errors that can occur while discovering or decoding source images.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The source folder could not be listed
    #[error("Failed to read folder {path:?}: {source}")]
    ReadFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source folder contains no supported images
    #[error("No image files found in folder {path:?}")]
    NoImages { path: PathBuf },

    /// An image file could not be decoded
    #[error("Failed to load image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
