//! Class reference data: hit die, feature table, subclasses, and spell slots.
//!
//! Loaded from a content catalog and treated as read-only for the lifetime of
//! a level-up run.

use serde::{Deserialize, Serialize};

use super::class_feature::ClassFeature;
use crate::value_objects::{Ability, HitDie};

/// Highest spell level tracked by slot tables.
pub const MAX_SPELL_LEVEL: u8 = 9;

/// Keywords that mark a class feature as the "choose your subclass" entry.
pub const DEFAULT_SUBCLASS_TRIGGER_KEYWORDS: [&str; 10] = [
    "archetype",
    "tradition",
    "oath",
    "domain",
    "circle",
    "college",
    "patron",
    "origin",
    "path",
    "conclave",
];

/// A character class as described by reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassData {
    /// Display name (e.g., "Fighter")
    pub name: String,
    /// Hit die expression (e.g., "d10" or "1d10")
    pub hit_die: String,
    /// Class feature table, keyed by level through each entry's `level`
    #[serde(default)]
    pub features: Vec<ClassFeature>,
    /// Available subclasses, in catalog order
    #[serde(default)]
    pub subclasses: Vec<Subclass>,
    /// Spellcasting details, present only for casters
    #[serde(default)]
    pub spellcasting: Option<Spellcasting>,
    /// Level at which a subclass is chosen, overriding the computed one
    #[serde(default)]
    pub subclass_level: Option<u8>,
    /// Replacement keyword set for spotting the subclass trigger feature
    #[serde(default)]
    pub subclass_trigger_keywords: Vec<String>,
}

impl ClassData {
    pub fn new(name: impl Into<String>, hit_die: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hit_die: hit_die.into(),
            features: Vec::new(),
            subclasses: Vec::new(),
            spellcasting: None,
            subclass_level: None,
            subclass_trigger_keywords: Vec::new(),
        }
    }

    pub fn with_features(mut self, features: Vec<ClassFeature>) -> Self {
        self.features = features;
        self
    }

    pub fn with_subclass(mut self, subclass: Subclass) -> Self {
        self.subclasses.push(subclass);
        self
    }

    pub fn with_spellcasting(mut self, spellcasting: Spellcasting) -> Self {
        self.spellcasting = Some(spellcasting);
        self
    }

    pub fn with_subclass_level(mut self, level: u8) -> Self {
        self.subclass_level = Some(level);
        self
    }

    pub fn with_trigger_keywords(mut self, keywords: Vec<String>) -> Self {
        self.subclass_trigger_keywords = keywords;
        self
    }

    /// Parsed hit die; unparsable expressions fall back to a d8.
    pub fn hit_die(&self) -> HitDie {
        HitDie::from_expression(&self.hit_die)
    }

    /// Class features gained at exactly `level`, in table order.
    pub fn features_at(&self, level: u8) -> impl Iterator<Item = &ClassFeature> {
        self.features.iter().filter(move |f| f.level == level)
    }

    /// Whether the class table has an entry called `name` at `level`.
    pub fn has_feature_at(&self, level: u8, name: &str) -> bool {
        self.features_at(level).any(|f| f.name == name)
    }

    /// Level at which a subclass must first be chosen.
    ///
    /// An explicit `subclass_level` wins. Otherwise this is the lowest
    /// feature level of the first subclass that lists any features. `None`
    /// when the class has no subclasses.
    pub fn subclass_trigger_level(&self) -> Option<u8> {
        if self.subclasses.is_empty() {
            return None;
        }
        if let Some(level) = self.subclass_level {
            return Some(level);
        }
        self.subclasses
            .iter()
            .find_map(|subclass| subclass.features.iter().map(|f| f.level).min())
    }

    /// Whether `feature` is the class-table entry announcing the subclass choice.
    ///
    /// Matches by keyword (case-insensitive) and only at the trigger level, so
    /// later "Martial Archetype feature" entries still count as features.
    pub fn is_subclass_trigger(&self, feature: &ClassFeature) -> bool {
        if self.subclass_trigger_level() != Some(feature.level) {
            return false;
        }
        let name = feature.name.to_lowercase();
        if self.subclass_trigger_keywords.is_empty() {
            DEFAULT_SUBCLASS_TRIGGER_KEYWORDS
                .iter()
                .any(|keyword| name.contains(keyword))
        } else {
            self.subclass_trigger_keywords
                .iter()
                .any(|keyword| name.contains(&keyword.to_lowercase()))
        }
    }

    /// Features at `level` worth showing and granting: neither the ASI entry
    /// nor the subclass trigger.
    pub fn displayable_features_at(&self, level: u8) -> Vec<&ClassFeature> {
        self.features_at(level)
            .filter(|f| !f.is_ability_score_improvement() && !self.is_subclass_trigger(f))
            .collect()
    }

    /// Case-insensitive subclass lookup.
    pub fn find_subclass(&self, name: &str) -> Option<&Subclass> {
        self.subclasses
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn is_spellcaster(&self) -> bool {
        self.spellcasting.is_some()
    }

    /// Whether the slot table has a row for `level`.
    pub fn has_slot_data_at(&self, level: u8) -> bool {
        self.spellcasting
            .as_ref()
            .is_some_and(|s| s.slots.covers(level))
    }

    /// Slot counts at a class level; all zero for non-casters.
    pub fn slots_at(&self, level: u8) -> SpellSlots {
        self.spellcasting
            .as_ref()
            .map(|s| s.slots.at(level))
            .unwrap_or_default()
    }
}

/// A subclass and its own feature table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subclass {
    pub name: String,
    #[serde(default)]
    pub features: Vec<ClassFeature>,
}

impl Subclass {
    pub fn new(name: impl Into<String>, features: Vec<ClassFeature>) -> Self {
        Self {
            name: name.into(),
            features,
        }
    }

    /// Every feature unlocked at or below `level`.
    pub fn features_up_to(&self, level: u8) -> Vec<ClassFeature> {
        self.features
            .iter()
            .filter(|f| f.level <= level)
            .cloned()
            .collect()
    }

    /// Features unlocked at exactly `level`.
    pub fn features_at(&self, level: u8) -> Vec<ClassFeature> {
        self.features
            .iter()
            .filter(|f| f.level == level)
            .cloned()
            .collect()
    }
}

/// Spellcasting details for a caster class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Spellcasting {
    /// Primary spellcasting ability
    pub ability: Ability,
    /// Slot counts per class level
    pub slots: SpellSlotTable,
}

impl Spellcasting {
    pub fn new(ability: Ability, slots: SpellSlotTable) -> Self {
        Self { ability, slots }
    }
}

/// Per-class-level slot counts.
///
/// Row `n` holds the slots for class level `n + 1`; each row lists counts for
/// spell levels 1, 2, ... and may be shorter than nine entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SpellSlotTable(Vec<Vec<u8>>);

impl SpellSlotTable {
    pub fn new(rows: Vec<Vec<u8>>) -> Self {
        Self(rows)
    }

    /// Whether a row exists for class level `level`.
    pub fn covers(&self, level: u8) -> bool {
        level >= 1 && usize::from(level) <= self.0.len()
    }

    /// Slots at a class level. Levels outside the table have no slots.
    pub fn at(&self, level: u8) -> SpellSlots {
        let Some(row) = level
            .checked_sub(1)
            .and_then(|index| self.0.get(index as usize))
        else {
            return SpellSlots::default();
        };
        let mut counts = [0u8; MAX_SPELL_LEVEL as usize];
        for (slot, count) in counts.iter_mut().zip(row.iter()) {
            *slot = *count;
        }
        SpellSlots(counts)
    }
}

/// Slot counts for spell levels 1 through 9.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlots([u8; MAX_SPELL_LEVEL as usize]);

impl SpellSlots {
    pub fn new(counts: [u8; MAX_SPELL_LEVEL as usize]) -> Self {
        Self(counts)
    }

    /// Slots of a spell level (1-9); zero outside that range.
    pub fn get(&self, spell_level: u8) -> u8 {
        spell_level
            .checked_sub(1)
            .and_then(|i| self.0.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    /// `(spell_level, count)` pairs for levels 1-9.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, count)| (i as u8 + 1, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|c| *c == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter() -> ClassData {
        ClassData::new("Fighter", "d10")
            .with_features(vec![
                ClassFeature::new("Fighting Style", 1),
                ClassFeature::new("Second Wind", 1),
                ClassFeature::new("Action Surge", 2),
                ClassFeature::new("Martial Archetype", 3),
                ClassFeature::new("Ability Score Improvement", 4),
                ClassFeature::new("Martial Archetype Feature", 7),
            ])
            .with_subclass(Subclass::new(
                "Champion",
                vec![
                    ClassFeature::new("Improved Critical", 3),
                    ClassFeature::new("Remarkable Athlete", 7),
                ],
            ))
            .with_subclass(Subclass::new(
                "Battle Master",
                vec![ClassFeature::new("Combat Superiority", 2)],
            ))
    }

    #[test]
    fn trigger_level_uses_first_subclass() {
        assert_eq!(fighter().subclass_trigger_level(), Some(3));
    }

    #[test]
    fn trigger_level_override_wins() {
        assert_eq!(fighter().with_subclass_level(2).subclass_trigger_level(), Some(2));
    }

    #[test]
    fn trigger_level_skips_featureless_subclasses() {
        let class = ClassData::new("Odd", "d8")
            .with_subclass(Subclass::new("Empty", vec![]))
            .with_subclass(Subclass::new("Real", vec![ClassFeature::new("Thing", 2)]));
        assert_eq!(class.subclass_trigger_level(), Some(2));
    }

    #[test]
    fn no_subclasses_no_trigger_level() {
        assert_eq!(ClassData::new("Commoner", "d4").subclass_trigger_level(), None);
    }

    #[test]
    fn trigger_feature_only_at_trigger_level() {
        let class = fighter();
        assert!(class.is_subclass_trigger(&ClassFeature::new("Martial Archetype", 3)));
        assert!(!class.is_subclass_trigger(&ClassFeature::new("Martial Archetype Feature", 7)));
        assert!(!class.is_subclass_trigger(&ClassFeature::new("Action Surge", 3)));
    }

    #[test]
    fn custom_trigger_keywords_replace_defaults() {
        let class = fighter().with_trigger_keywords(vec!["Calling".to_string()]);
        assert!(class.is_subclass_trigger(&ClassFeature::new("Warrior's Calling", 3)));
        assert!(!class.is_subclass_trigger(&ClassFeature::new("Martial Archetype", 3)));
    }

    #[test]
    fn displayable_features_drop_asi_and_trigger() {
        let class = fighter();
        assert!(class.displayable_features_at(3).is_empty());
        assert!(class.displayable_features_at(4).is_empty());
        let names: Vec<_> = class
            .displayable_features_at(1)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Fighting Style", "Second Wind"]);
    }

    #[test]
    fn hit_die_falls_back_to_d8() {
        assert_eq!(fighter().hit_die().sides(), 10);
        assert_eq!(ClassData::new("Broken", "??").hit_die().sides(), 8);
    }

    #[test]
    fn slot_table_pads_rows_and_bounds_levels() {
        let table = SpellSlotTable::new(vec![vec![2], vec![3], vec![4, 2]]);
        assert_eq!(table.at(1).get(1), 2);
        assert_eq!(table.at(3).get(2), 2);
        assert_eq!(table.at(3).get(9), 0);
        assert!(table.at(0).is_empty());
        assert!(table.at(4).is_empty());
    }

    #[test]
    fn non_caster_has_no_slots() {
        assert!(fighter().slots_at(5).is_empty());
        assert!(!fighter().has_slot_data_at(5));
        assert!(!fighter().is_spellcaster());
    }

    #[test]
    fn subclass_feature_filters() {
        let champion = fighter().find_subclass("champion").cloned().unwrap();
        assert_eq!(champion.features_up_to(3).len(), 1);
        assert_eq!(champion.features_up_to(7).len(), 2);
        assert_eq!(champion.features_at(7)[0].name, "Remarkable Athlete");
    }
}
