//! Catalog backed by a directory of JSON files.
//!
//! Expects `classes.json` (an array of class definitions) and optionally
//! `feats.json` (an array of feats) directly under the data directory.

use std::fs;
use std::path::{Path, PathBuf};

use levelup_domain::{ClassData, Feat};
use serde::de::DeserializeOwned;

use crate::infrastructure::ports::{CatalogError, ClassCatalog};

pub const CLASSES_FILE: &str = "classes.json";
pub const FEATS_FILE: &str = "feats.json";

/// Reads class and feat definitions from a data directory.
pub struct JsonClassCatalog {
    data_path: PathBuf,
}

impl JsonClassCatalog {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Whether the data directory exists and holds a class file.
    pub fn validate_path(&self) -> bool {
        self.data_path.join(CLASSES_FILE).is_file()
    }

    /// Every class in `classes.json`.
    pub fn load_classes(&self) -> Result<Vec<ClassData>, CatalogError> {
        self.read_file(CLASSES_FILE)
    }

    /// Read and parse one JSON file from the data directory.
    ///
    /// The filename must not contain path separators or traversal sequences.
    fn read_file<T: DeserializeOwned>(&self, filename: &str) -> Result<T, CatalogError> {
        // Prevent path traversal attacks
        if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
            return Err(CatalogError::InvalidPath(filename.to_string()));
        }

        let path = self.data_path.join(filename);
        if !path.exists() {
            return Err(CatalogError::DataFileNotFound(path));
        }

        let content = fs::read_to_string(&path).map_err(|e| CatalogError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
            path,
            message: e.to_string(),
        })
    }
}

impl ClassCatalog for JsonClassCatalog {
    fn find_class(&self, name: &str) -> Result<ClassData, CatalogError> {
        self.load_classes()?
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CatalogError::ClassNotFound(name.to_string()))
    }

    fn find_feats(&self) -> Result<Vec<Feat>, CatalogError> {
        self.read_file(FEATS_FILE)
    }
}
