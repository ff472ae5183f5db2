//! Project discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::StoreBackend;

/// Marker directory holding config and data
pub const PARTS_DIR: &str = ".parts";

/// Represents an inventory project
#[derive(Debug)]
pub struct Project {
    /// Root directory of the project (parent of .parts/)
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(PARTS_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new project structure at the given path
    pub fn init(path: &Path, backend: StoreBackend) -> Result<Self, ProjectError> {
        let root = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        if root.join(PARTS_DIR).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        Self::write_structure(root, backend)
    }

    /// Force initialization even if .parts/ exists
    ///
    /// Rewrites the config file; stored documents are left alone.
    pub fn init_force(path: &Path, backend: StoreBackend) -> Result<Self, ProjectError> {
        let root = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        Self::write_structure(root, backend)
    }

    fn write_structure(root: PathBuf, backend: StoreBackend) -> Result<Self, ProjectError> {
        let project = Self { root };

        std::fs::create_dir_all(project.parts_dir())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;
        std::fs::write(project.config_path(), Self::default_config(backend))
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        Ok(project)
    }

    fn default_config(backend: StoreBackend) -> String {
        format!(
            r#"# Spare parts inventory configuration

# Storage backend (yaml, sqlite, memory)
backend: {}

# Database and collection holding the records
# database: car_database
# collection: spare_parts

# Currency prefix shown in front of prices
# currency: "Rs."
"#,
            backend
        )
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .parts directory
    pub fn parts_dir(&self) -> PathBuf {
        self.root.join(PARTS_DIR)
    }

    /// Get the project config file path
    pub fn config_path(&self) -> PathBuf {
        self.parts_dir().join("config.yaml")
    }

    /// Directory of a YAML document collection
    pub fn collection_dir(&self, database: &str, collection: &str) -> PathBuf {
        self.parts_dir().join(database).join(collection)
    }

    /// SQLite database file
    pub fn database_file(&self, database: &str) -> PathBuf {
        self.parts_dir().join(format!("{}.db", database))
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a parts project (searched from {searched_from:?}). Run 'parts init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("parts project already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}
