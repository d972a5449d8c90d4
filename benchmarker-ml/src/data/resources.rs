//! Resolution of named dataset resources inside the resource bundle.

use crate::error::BenchError;
use std::path::{Path, PathBuf};

/// Read-only directory holding every dataset the benchmark uses.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    root: PathBuf,
}

impl ResourceBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` inside `directory`, which must itself be a directory.
    ///
    /// Mirrors a bundle lookup of a resource with no extension, e.g.
    /// `Training` in `ClassifierData`.
    pub fn subdirectory(&self, directory: &str, name: &str) -> Result<PathBuf, BenchError> {
        let path = self.root.join(directory).join(name);
        if path.is_dir() {
            Ok(path)
        } else {
            Err(BenchError::resource_not_found(format!(
                "{directory}/{name} (looked in {})",
                self.root.display()
            )))
        }
    }

    /// Resolve a file named `name.extension` at the bundle root.
    pub fn file(&self, name: &str, extension: &str) -> Result<PathBuf, BenchError> {
        let path = self.root.join(format!("{name}.{extension}"));
        if path.is_file() {
            Ok(path)
        } else {
            Err(BenchError::resource_not_found(format!(
                "{name}.{extension} (looked in {})",
                self.root.display()
            )))
        }
    }
}
