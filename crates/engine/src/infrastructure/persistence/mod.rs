//! Character persistence adapters.

mod json_character_repo;

pub use json_character_repo::JsonCharacterRepo;
