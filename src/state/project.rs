//! Source folder scanning and image navigation.

use std::path::{Path, PathBuf};

use super::StateError;
use crate::constants::IMAGE_EXTENSIONS;

/// Check if a path has a supported image extension
fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// The images of a source folder and the position of the one under review.
#[derive(Clone, Debug)]
pub struct ProjectState {
    /// Source folder the images were discovered in
    pub folder: PathBuf,
    /// Image files in the folder, sorted by filename
    pub images: Vec<PathBuf>,
    /// Current image index
    pub current_index: usize,
}

impl ProjectState {
    /// Discover image files in a folder, non-recursively.
    pub fn from_folder(folder: impl Into<PathBuf>) -> Result<Self, StateError> {
        let folder = folder.into();
        let entries = std::fs::read_dir(&folder).map_err(|source| StateError::ReadFolder {
            path: folder.clone(),
            source,
        })?;

        let mut images: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_image_file(path))
            .collect();

        if images.is_empty() {
            return Err(StateError::NoImages { path: folder });
        }

        // Directory listing order is platform dependent
        images.sort();

        log::info!("Scanned folder {:?}: found {} images", folder, images.len());

        Ok(Self {
            folder,
            images,
            current_index: 0,
        })
    }

    /// Number of images in the folder.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Get the current image path.
    pub fn current_image(&self) -> Option<&PathBuf> {
        self.images.get(self.current_index)
    }

    /// Get the path of the image at `index`.
    pub fn image(&self, index: usize) -> Option<&PathBuf> {
        self.images.get(index)
    }

    /// Get the current image filename for display.
    pub fn current_name(&self) -> String {
        self.current_image()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(String::from)
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Index of the next image, or None at the end of the list.
    pub fn next_index(&self) -> Option<usize> {
        let next = self.current_index + 1;
        (next < self.images.len()).then_some(next)
    }

    /// Index of the previous image, or None at the start of the list.
    pub fn prev_index(&self) -> Option<usize> {
        self.current_index.checked_sub(1)
    }

    /// Get progress string like "3/15".
    pub fn progress(&self) -> String {
        format!("{}/{}", self.current_index + 1, self.images.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("photo.JPG")));
        assert!(is_image_file(Path::new("dir/scan.jpeg")));
        assert!(is_image_file(Path::new("a.Gif")));
        assert!(is_image_file(Path::new("b.bmp")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("scan.tiff")));
        assert!(!is_image_file(Path::new("png")));
    }

    #[test]
    fn test_from_folder_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.PNG", "a.jpg", "b.txt", "d.gif", "e.jpeg"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let project = ProjectState::from_folder(dir.path()).unwrap();
        let names: Vec<_> = project
            .images
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "c.PNG", "d.gif", "e.jpeg"]);
        assert_eq!(project.current_name(), "a.jpg");
        assert_eq!(project.progress(), "1/4");
    }

    #[test]
    fn test_from_folder_without_images() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.md"), b"x").unwrap();
        assert!(matches!(
            ProjectState::from_folder(dir.path()),
            Err(StateError::NoImages { .. })
        ));
        assert!(matches!(
            ProjectState::from_folder(dir.path().join("missing")),
            Err(StateError::ReadFolder { .. })
        ));
    }

    #[test]
    fn test_navigation_does_not_wrap() {
        let mut project = ProjectState {
            folder: PathBuf::from("src"),
            images: vec![PathBuf::from("a.png"), PathBuf::from("b.png")],
            current_index: 0,
        };
        assert_eq!(project.prev_index(), None);
        assert_eq!(project.next_index(), Some(1));
        project.current_index = 1;
        assert_eq!(project.next_index(), None);
        assert_eq!(project.prev_index(), Some(0));
    }
}
