//! Character content - spellcasting and features owned by a character.
//!
//! These structs represent the character's personal collection of abilities,
//! including slot pools and where each feature came from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::value_objects::Ability;

/// A character's spellcasting data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSpells {
    /// Primary spellcasting ability
    spellcasting_ability: Ability,
    /// Cantrips the character knows
    #[serde(default)]
    cantrips: Vec<String>,
    /// Currently prepared or known spells (spell IDs)
    #[serde(default)]
    prepared: Vec<String>,
    /// Spell slots by level (1-9)
    #[serde(default)]
    slots: BTreeMap<u8, SpellSlotPool>,
}

impl CharacterSpells {
    /// Minimal spellcasting record: no spells, no slots.
    pub fn new(spellcasting_ability: Ability) -> Self {
        Self {
            spellcasting_ability,
            cantrips: Vec::new(),
            prepared: Vec::new(),
            slots: BTreeMap::new(),
        }
    }

    // Read-only accessors

    pub fn spellcasting_ability(&self) -> Ability {
        self.spellcasting_ability
    }

    pub fn cantrips(&self) -> &[String] {
        &self.cantrips
    }

    pub fn prepared(&self) -> &[String] {
        &self.prepared
    }

    /// Get the spell slots by level.
    pub fn slots(&self) -> &BTreeMap<u8, SpellSlotPool> {
        &self.slots
    }

    /// Slot pool for one spell level.
    pub fn slot(&self, spell_level: u8) -> Option<&SpellSlotPool> {
        self.slots.get(&spell_level)
    }

    // Mutation methods

    /// Set the slot maximum for a spell level.
    ///
    /// Current slots move by the same amount the maximum moved, clamped to the
    /// new maximum. A zero maximum removes the pool.
    pub fn set_slot_max(&mut self, spell_level: u8, max: u8) {
        if max == 0 {
            self.slots.remove(&spell_level);
            return;
        }
        match self.slots.get_mut(&spell_level) {
            Some(pool) => pool.set_max(max),
            None => {
                self.slots.insert(spell_level, SpellSlotPool::new(max));
            }
        }
    }
}

/// A pool of spell slots at a given level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpellSlotPool {
    /// Currently available slots
    current: u8,
    /// Maximum slots
    max: u8,
}

impl SpellSlotPool {
    /// Create a full pool.
    pub fn new(max: u8) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    fn set_max(&mut self, max: u8) {
        let grown = max.saturating_sub(self.max);
        self.max = max;
        self.current = self.current.saturating_add(grown).min(max);
    }
}

/// Where a character feature came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum FeatureSource {
    /// Granted by the class table (class name)
    Class(String),
    /// Granted by a subclass (subclass name)
    Subclass(String),
    /// Taken as a feat
    Feat,
}

impl fmt::Display for FeatureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, "{}", name),
            Self::Subclass(name) => write!(f, "{} (subclass)", name),
            Self::Feat => write!(f, "Feat"),
        }
    }
}

/// A feature on the character sheet, tagged with its source and level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterFeature {
    name: String,
    source: FeatureSource,
    level: u8,
    #[serde(default)]
    description: String,
}

impl CharacterFeature {
    pub fn new(name: impl Into<String>, source: FeatureSource, level: u8) -> Self {
        Self {
            name: name.into(),
            source,
            level,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &FeatureSource {
        &self.source
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_no_slots() {
        let spells = CharacterSpells::new(Ability::Int);
        assert_eq!(spells.spellcasting_ability(), Ability::Int);
        assert!(spells.slots().is_empty());
    }

    #[test]
    fn set_slot_max_grows_current_with_max() {
        // One of two first-level slots already spent.
        let mut spells: CharacterSpells = serde_json::from_str(
            r#"{"spellcastingAbility": "WIS", "slots": {"1": {"current": 1, "max": 2}}}"#,
        )
        .unwrap();

        spells.set_slot_max(1, 3);
        let pool = spells.slot(1).unwrap();
        assert_eq!(pool.max(), 3);
        assert_eq!(pool.current(), 2);
    }

    #[test]
    fn set_slot_max_shrinking_clamps_current() {
        let mut spells = CharacterSpells::new(Ability::Cha);
        spells.set_slot_max(2, 3);
        spells.set_slot_max(2, 1);
        assert_eq!(spells.slot(2).unwrap().current(), 1);
        spells.set_slot_max(2, 0);
        assert!(spells.slot(2).is_none());
    }

    #[test]
    fn feature_source_serializes_with_kind() {
        let json = serde_json::to_string(&FeatureSource::Subclass("Champion".into())).unwrap();
        assert_eq!(json, r#"{"kind":"subclass","name":"Champion"}"#);
        assert_eq!(FeatureSource::Feat.to_string(), "Feat");
    }
}
