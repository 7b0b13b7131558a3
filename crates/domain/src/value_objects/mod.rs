//! Value objects - Immutable objects defined by their attributes

mod ability;
mod dice;
mod names;

pub use ability::{ability_modifier, Ability, AbilityScores, ABILITY_SCORE_CAP};
pub use dice::{DiceFormula, DiceParseError, DiceRollResult, HitDie, DEFAULT_HIT_DIE};
pub use names::CharacterName;
