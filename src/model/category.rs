//! Defect categories and their destination folders.

use serde::{Deserialize, Serialize};

/// The fixed set of categories a defect can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// Defect belongs to the project under review
    #[default]
    CurrentProject,
    /// Defect belongs to some other project
    OtherProject,
    /// The image was checked and nothing was found
    NoDefects,
}

impl Category {
    /// Get the display label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::CurrentProject => "Bug for current Project",
            Category::OtherProject => "Bug for other Project",
            Category::NoDefects => "No defects found",
        }
    }

    /// Get all categories in display order. The first one is the default.
    pub fn all() -> &'static [Category] {
        &[
            Category::CurrentProject,
            Category::OtherProject,
            Category::NoDefects,
        ]
    }

    /// Name of the destination subfolder for this category.
    pub fn folder_name(&self) -> String {
        self.label().replace(' ', "_")
    }

    /// Look up a category by its position in [`Category::all`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
