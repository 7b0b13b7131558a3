//! Level-up operation errors.

use crate::infrastructure::ports::RepoError;
use levelup_domain::{CharacterId, DomainError};

/// Errors that can occur while running a level-up.
///
/// Validation problems inside a step are not errors; they surface as the
/// wizard's notice instead.
#[derive(Debug, thiserror::Error)]
pub enum LevelUpError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Persistence(#[from] RepoError),
}
