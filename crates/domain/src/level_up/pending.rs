//! Staged, not-yet-applied level-up decisions.

use crate::entities::{ClassFeature, Feat};
use crate::value_objects::Ability;

/// Every decision collected during a level-up run.
///
/// Written incrementally as steps are completed and read once by
/// [`apply_level_up`](super::apply_level_up).
///
/// # Invariants
///
/// - `hit_point_increase` is 0 while undecided, otherwise at least 1
/// - `subclass_features` is empty whenever `subclass` is `None`
/// - `feat_ability` is `None` whenever `feat` is `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingChanges {
    hit_point_increase: i32,
    subclass: Option<String>,
    subclass_features: Vec<ClassFeature>,
    ability_deltas: [i32; 6],
    feat: Option<Feat>,
    feat_ability: Option<Ability>,
    spell_slots_acknowledged: bool,
}

impl PendingChanges {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Hit points
    // =========================================================================

    pub fn hit_point_increase(&self) -> i32 {
        self.hit_point_increase
    }

    pub fn has_hit_points(&self) -> bool {
        self.hit_point_increase >= 1
    }

    /// Stage the hit point gain, clamped to at least 1.
    pub fn set_hit_point_increase(&mut self, amount: i32) {
        self.hit_point_increase = amount.max(1);
    }

    pub fn clear_hit_points(&mut self) {
        self.hit_point_increase = 0;
    }

    // =========================================================================
    // Subclass
    // =========================================================================

    pub fn subclass(&self) -> Option<&str> {
        self.subclass.as_deref()
    }

    pub fn subclass_features(&self) -> &[ClassFeature] {
        &self.subclass_features
    }

    pub fn set_subclass(&mut self, name: impl Into<String>, features: Vec<ClassFeature>) {
        self.subclass = Some(name.into());
        self.subclass_features = features;
    }

    pub fn clear_subclass(&mut self) {
        self.subclass = None;
        self.subclass_features.clear();
    }

    // =========================================================================
    // Ability scores and feat
    // =========================================================================

    pub fn ability_delta(&self, ability: Ability) -> i32 {
        self.ability_deltas[ability.index()]
    }

    /// Abilities with a positive staged delta, in canonical order.
    pub fn ability_deltas(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL
            .into_iter()
            .map(|ability| (ability, self.ability_delta(ability)))
            .filter(|(_, delta)| *delta > 0)
    }

    pub fn set_ability_delta(&mut self, ability: Ability, delta: i32) {
        self.ability_deltas[ability.index()] = delta.max(0);
    }

    pub fn clear_ability_deltas(&mut self) {
        self.ability_deltas = [0; 6];
    }

    pub fn feat(&self) -> Option<&Feat> {
        self.feat.as_ref()
    }

    pub fn feat_ability(&self) -> Option<Ability> {
        self.feat_ability
    }

    /// Stage a feat; `ability` resolves the feat's ability choice, if it has one.
    pub fn set_feat(&mut self, feat: Feat, ability: Option<Ability>) {
        self.feat = Some(feat);
        self.feat_ability = ability;
    }

    pub fn clear_feat(&mut self) {
        self.feat = None;
        self.feat_ability = None;
    }

    /// Drop everything staged by the ability/feat step.
    pub fn clear_improvement(&mut self) {
        self.clear_ability_deltas();
        self.clear_feat();
    }

    // =========================================================================
    // Spell slots
    // =========================================================================

    pub fn spell_slots_acknowledged(&self) -> bool {
        self.spell_slots_acknowledged
    }

    pub fn acknowledge_spell_slots(&mut self, acknowledged: bool) {
        self.spell_slots_acknowledged = acknowledged;
    }
}
