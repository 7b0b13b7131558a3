//! Catalog backed by the bundled D&D 5e reference data.

use levelup_domain::{srd_classes, srd_feats, ClassData, Feat};

use crate::infrastructure::ports::{CatalogError, ClassCatalog};

/// In-memory catalog of the bundled classes and feats.
pub struct SrdClassCatalog {
    classes: Vec<ClassData>,
    feats: Vec<Feat>,
}

impl SrdClassCatalog {
    pub fn new() -> Self {
        Self {
            classes: srd_classes(),
            feats: srd_feats(),
        }
    }

    /// Names of every bundled class, in display order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.name.as_str())
    }
}

impl Default for SrdClassCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassCatalog for SrdClassCatalog {
    fn find_class(&self, name: &str) -> Result<ClassData, CatalogError> {
        self.classes
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .ok_or_else(|| CatalogError::ClassNotFound(name.to_string()))
    }

    fn find_feats(&self) -> Result<Vec<Feat>, CatalogError> {
        Ok(self.feats.clone())
    }
}
