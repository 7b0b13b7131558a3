//! Repository port traits for reference data and character storage.

use levelup_domain::{Character, CharacterId, ClassData, Feat};

use super::error::{CatalogError, RepoError};

// =============================================================================
// Reference Data
// =============================================================================

/// Read-only lookup of class and feat definitions.
#[cfg_attr(test, mockall::automock)]
pub trait ClassCatalog: Send + Sync {
    /// Find a class by name (case-insensitive).
    fn find_class(&self, name: &str) -> Result<ClassData, CatalogError>;

    /// Every feat the catalog knows about, in display order.
    fn find_feats(&self) -> Result<Vec<Feat>, CatalogError>;
}

// =============================================================================
// Character Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait CharacterRepo: Send + Sync {
    fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    fn save(&self, character: &Character) -> Result<(), RepoError>;
    fn list(&self) -> Result<Vec<Character>, RepoError>;
}
