//! Domain entities - reference data and the pieces a character owns

mod character_content;
mod class_data;
mod class_feature;
mod feat;

pub use character_content::{CharacterFeature, CharacterSpells, FeatureSource, SpellSlotPool};
pub use class_data::{
    ClassData, SpellSlotTable, SpellSlots, Spellcasting, Subclass,
    DEFAULT_SUBCLASS_TRIGGER_KEYWORDS, MAX_SPELL_LEVEL,
};
pub use class_feature::{ClassFeature, ABILITY_SCORE_IMPROVEMENT};
pub use feat::{AbilityIncrease, Feat, FeatBenefit};
