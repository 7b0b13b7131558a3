extern crate self as levelup_domain;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod level_up;
pub mod value_objects;

// Re-export the character record
pub use aggregates::{Character, HitPoints, LevelAdvanced};

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    AbilityIncrease, CharacterFeature, CharacterSpells, ClassData, ClassFeature, Feat,
    FeatBenefit, FeatureSource, SpellSlotPool, SpellSlotTable, SpellSlots, Spellcasting,
    Subclass, ABILITY_SCORE_IMPROVEMENT, DEFAULT_SUBCLASS_TRIGGER_KEYWORDS, MAX_SPELL_LEVEL,
};

pub use error::DomainError;

// Re-export bundled reference data
pub use game_systems::{full_caster_slots, half_caster_slots, srd_classes, srd_feats};

// Re-export ID types
pub use ids::CharacterId;

// Re-export level-up planning and commit
pub use level_up::{
    apply_level_up, error_plan, gained_features, plan_steps, HitPointGain, HitPointMethod,
    LevelUpStep, PendingChanges, StepSequence,
};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    ability_modifier, Ability, AbilityScores, CharacterName, DiceFormula, DiceParseError,
    DiceRollResult, HitDie, ABILITY_SCORE_CAP, DEFAULT_HIT_DIE,
};
