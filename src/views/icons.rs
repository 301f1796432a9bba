//! Icon references for tree nodes.
//!
//! Icons are references only; nothing here loads files.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::constants::THEME_ICON_FOLDER;

/// Light and dark variants of a resource icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconPath {
    pub light: PathBuf,
    pub dark: PathBuf,
}

/// Icon of a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum Icon {
    /// Bundled resource, one file per theme.
    Path(IconPath),
    /// Icon provided by the host theme.
    Theme(String),
}

impl Icon {
    /// The resource paths, if this is a resource icon.
    #[must_use]
    pub fn as_path(&self) -> Option<&IconPath> {
        match self {
            Icon::Path(p) => Some(p),
            Icon::Theme(_) => None,
        }
    }

    #[must_use]
    pub fn folder() -> Self {
        Icon::Theme(THEME_ICON_FOLDER.to_string())
    }
}

/// Resolves icon file names against the resources directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icons {
    resources_dir: PathBuf,
}

impl Default for Icons {
    fn default() -> Self {
        Self::new("resources")
    }
}

impl Icons {
    #[must_use]
    pub fn new(resources_dir: impl Into<PathBuf>) -> Self {
        Self {
            resources_dir: resources_dir.into(),
        }
    }

    #[must_use]
    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Icon for a bundled resource file.
    #[must_use]
    pub fn icon(&self, file_name: &str) -> Icon {
        Icon::Path(IconPath {
            light: self.resources_dir.join("light").join(file_name),
            dark: self.resources_dir.join("dark").join(file_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::constants::ICON_WARNING;

    #[test]
    fn test_icon_paths_per_theme() {
        let icon = Icons::default().icon(ICON_WARNING);
        let paths = icon.as_path().unwrap();
        assert_eq!(paths.dark, Path::new("resources").join("dark").join(ICON_WARNING));
        assert_eq!(paths.light, Path::new("resources").join("light").join(ICON_WARNING));
    }

    #[test]
    fn test_folder_is_theme_icon() {
        assert!(Icon::folder().as_path().is_none());
    }
}
