//! Bundled game system reference data.
//!
//! # Supported Systems
//!
//! - D&D 5th Edition (`dnd5e`)

mod dnd5e;

// D&D 5e exports
pub use dnd5e::{full_caster_slots, half_caster_slots, srd_classes, srd_feats};
