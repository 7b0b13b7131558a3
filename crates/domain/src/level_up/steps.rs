//! Step planning for a single level advance.
//!
//! The step list is computed once from class data and the level transition,
//! then walked by a [`StepSequence`] cursor. Planning is a pure function so
//! it can be exercised without any input handling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::{CharacterFeature, ClassData, FeatureSource, ABILITY_SCORE_IMPROVEMENT};

/// One decision (or review) screen of the level-up flow.
///
/// Declaration order is the canonical order steps appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelUpStep {
    HitPoints,
    Subclass,
    AbilityOrFeat,
    FeatureReview,
    SpellSlotReview,
    Confirm,
}

impl LevelUpStep {
    pub fn title(&self) -> &'static str {
        match self {
            Self::HitPoints => "Hit Points",
            Self::Subclass => "Subclass",
            Self::AbilityOrFeat => "Ability Score Improvement",
            Self::FeatureReview => "New Features",
            Self::SpellSlotReview => "Spell Slots",
            Self::Confirm => "Confirm",
        }
    }
}

impl fmt::Display for LevelUpStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Compute the ordered steps for going from `old_level` to `new_level`.
///
/// `current_subclass` is the subclass the character already has, if any.
/// `HitPoints` is always first and `Confirm` always last; optional steps keep
/// their canonical relative order.
pub fn plan_steps(
    class: &ClassData,
    old_level: u8,
    new_level: u8,
    current_subclass: Option<&str>,
) -> Vec<LevelUpStep> {
    let mut steps = vec![LevelUpStep::HitPoints];

    if needs_subclass(class, new_level, current_subclass.is_some()) {
        steps.push(LevelUpStep::Subclass);
    }
    if class.has_feature_at(new_level, ABILITY_SCORE_IMPROVEMENT) {
        steps.push(LevelUpStep::AbilityOrFeat);
    }
    if !class.displayable_features_at(new_level).is_empty() {
        steps.push(LevelUpStep::FeatureReview);
    }
    if spell_slots_change(class, old_level, new_level) {
        steps.push(LevelUpStep::SpellSlotReview);
    }

    steps.push(LevelUpStep::Confirm);
    steps
}

/// The single-step plan used when a level-up cannot proceed at all.
pub fn error_plan() -> Vec<LevelUpStep> {
    vec![LevelUpStep::Confirm]
}

/// Whether the subclass must be chosen on arrival at `new_level`.
pub fn needs_subclass(class: &ClassData, new_level: u8, has_subclass: bool) -> bool {
    !has_subclass && class.subclass_trigger_level() == Some(new_level)
}

/// Whether any spell slot count differs between the two levels.
///
/// False when either level lies outside the class's slot table.
pub fn spell_slots_change(class: &ClassData, old_level: u8, new_level: u8) -> bool {
    class.has_slot_data_at(old_level)
        && class.has_slot_data_at(new_level)
        && class.slots_at(old_level) != class.slots_at(new_level)
}

/// Features granted on arrival at `new_level`, excluding the ASI entry and the
/// subclass trigger.
///
/// Class features come first, followed by the features of the subclass the
/// character already has. Subclass features are only listed alongside class
/// features, so a level with no class feature gains nothing here. A subclass
/// chosen during this run is not included; its features are staged separately.
pub fn gained_features(
    class: &ClassData,
    new_level: u8,
    current_subclass: Option<&str>,
) -> Vec<CharacterFeature> {
    let mut gained: Vec<CharacterFeature> = class
        .displayable_features_at(new_level)
        .into_iter()
        .map(|f| {
            CharacterFeature::new(&f.name, FeatureSource::Class(class.name.clone()), f.level)
                .with_description(&f.description)
        })
        .collect();
    if gained.is_empty() {
        return gained;
    }

    if let Some(subclass) = current_subclass.and_then(|name| class.find_subclass(name)) {
        gained.extend(subclass.features_at(new_level).into_iter().map(|f| {
            CharacterFeature::new(f.name, FeatureSource::Subclass(subclass.name.clone()), f.level)
                .with_description(f.description)
        }));
    }

    gained
}

/// Cursor over a fixed step list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequence {
    steps: Vec<LevelUpStep>,
    index: usize,
}

impl StepSequence {
    /// A sequence positioned on its first step. An empty list is replaced by
    /// the error plan so there is always a current step.
    pub fn new(steps: Vec<LevelUpStep>) -> Self {
        let steps = if steps.is_empty() { error_plan() } else { steps };
        Self { steps, index: 0 }
    }

    pub fn steps(&self) -> &[LevelUpStep] {
        &self.steps
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current(&self) -> LevelUpStep {
        self.steps[self.index]
    }

    pub fn contains(&self, step: LevelUpStep) -> bool {
        self.steps.contains(&step)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.steps.len()
    }

    /// Move forward one step. Returns false when already on the last step.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move back one step. Returns false when already on the first step.
    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }
}
