//! Character aggregate - the permanent record a level-up run commits into
//!
//! # Rustic DDD Design
//!
//! This aggregate follows Rustic DDD principles:
//! - **Private fields**: All fields are encapsulated
//! - **Newtypes**: `CharacterName` for validated name
//! - **Valid by construction**: `new()` takes pre-validated types
//! - **Builder pattern**: Fluent API for optional fields

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{CharacterFeature, CharacterSpells};
use crate::value_objects::{Ability, AbilityScores, CharacterName};
use crate::CharacterId;

/// Base walking speed in feet when nothing else is known.
const DEFAULT_SPEED: i32 = 30;

/// Hit points of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitPoints {
    pub max: i32,
    pub current: i32,
}

/// Result of advancing one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelAdvanced {
    pub from: u8,
    pub to: u8,
}

/// A player character sheet.
///
/// # Invariants
///
/// - `name` is always non-empty (enforced by `CharacterName`)
/// - `hit_dice_total` always equals `level`
/// - `hit_dice_remaining` never exceeds `hit_dice_total`
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use levelup_domain::aggregates::Character;
/// use levelup_domain::value_objects::{AbilityScores, CharacterName};
///
/// let name = CharacterName::new("Tordek").unwrap();
/// let pc = Character::new(name, "Fighter", AbilityScores::uniform(12), 11, Utc::now());
///
/// assert_eq!(pc.level(), 1);
/// assert_eq!(pc.hit_points().max, 11);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    // Identity
    id: CharacterId,
    name: CharacterName,
    class_name: String,
    #[serde(default)]
    subclass: Option<String>,

    // Progression
    level: u8,
    hit_dice_total: u8,
    hit_dice_remaining: u8,

    // Sheet values
    abilities: AbilityScores,
    hit_points: HitPoints,
    armor_class: i32,
    #[serde(default)]
    initiative_bonus: i32,
    speed: i32,

    // Owned content
    #[serde(default)]
    spellcasting: Option<CharacterSpells>,
    #[serde(default)]
    features: Vec<CharacterFeature>,

    // Metadata
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Character {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a level-1 character at full hit points.
    pub fn new(
        name: CharacterName,
        class_name: impl Into<String>,
        abilities: AbilityScores,
        max_hit_points: i32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            name,
            class_name: class_name.into(),
            subclass: None,
            level: 1,
            hit_dice_total: 1,
            hit_dice_remaining: 1,
            armor_class: 10 + abilities.modifier(Ability::Dex),
            abilities,
            hit_points: HitPoints {
                max: max_hit_points,
                current: max_hit_points,
            },
            initiative_bonus: 0,
            speed: DEFAULT_SPEED,
            spellcasting: None,
            features: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the level (clamped to at least 1); hit dice follow the level.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.max(1);
        self.hit_dice_total = self.level;
        self.hit_dice_remaining = self.level;
        self
    }

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_subclass(mut self, subclass: impl Into<String>) -> Self {
        self.subclass = Some(subclass.into());
        self
    }

    pub fn with_spellcasting(mut self, spellcasting: CharacterSpells) -> Self {
        self.spellcasting = Some(spellcasting);
        self
    }

    pub fn with_features(mut self, features: Vec<CharacterFeature>) -> Self {
        self.features = features;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    #[inline]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[inline]
    pub fn subclass(&self) -> Option<&str> {
        self.subclass.as_deref()
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub fn hit_dice_total(&self) -> u8 {
        self.hit_dice_total
    }

    #[inline]
    pub fn hit_dice_remaining(&self) -> u8 {
        self.hit_dice_remaining
    }

    #[inline]
    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    #[inline]
    pub fn hit_points(&self) -> HitPoints {
        self.hit_points
    }

    #[inline]
    pub fn armor_class(&self) -> i32 {
        self.armor_class
    }

    #[inline]
    pub fn initiative_bonus(&self) -> i32 {
        self.initiative_bonus
    }

    #[inline]
    pub fn speed(&self) -> i32 {
        self.speed
    }

    #[inline]
    pub fn spellcasting(&self) -> Option<&CharacterSpells> {
        self.spellcasting.as_ref()
    }

    #[inline]
    pub fn features(&self) -> &[CharacterFeature] {
        &self.features
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Constitution modifier, used for hit-point gains.
    pub fn constitution_modifier(&self) -> i32 {
        self.abilities.modifier(Ability::Con)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Go up exactly one level; hit-dice bookkeeping follows.
    pub fn advance_level(&mut self) -> LevelAdvanced {
        let from = self.level;
        self.level = self.level.saturating_add(1);
        self.hit_dice_total = self.level;
        self.hit_dice_remaining = self
            .hit_dice_remaining
            .saturating_add(1)
            .min(self.hit_dice_total);
        LevelAdvanced {
            from,
            to: self.level,
        }
    }

    /// Raise both maximum and current hit points.
    pub fn gain_hit_points(&mut self, amount: i32) {
        self.hit_points.max = self.hit_points.max.saturating_add(amount);
        self.hit_points.current = self.hit_points.current.saturating_add(amount);
    }

    pub fn set_subclass(&mut self, subclass: impl Into<String>) {
        self.subclass = Some(subclass.into());
    }

    pub fn add_feature(&mut self, feature: CharacterFeature) {
        self.features.push(feature);
    }

    /// Raise an ability, never past 20. Returns the amount applied.
    pub fn increase_ability(&mut self, ability: Ability, amount: i32) -> i32 {
        self.abilities.increase_capped(ability, amount)
    }

    pub fn add_armor_class(&mut self, bonus: i32) {
        self.armor_class += bonus;
    }

    pub fn add_initiative_bonus(&mut self, bonus: i32) {
        self.initiative_bonus += bonus;
    }

    pub fn add_speed(&mut self, feet: i32) {
        self.speed += feet;
    }

    /// The spellcasting record, created with `ability` if absent.
    pub fn ensure_spellcasting(&mut self, ability: Ability) -> &mut CharacterSpells {
        self.spellcasting
            .get_or_insert_with(|| CharacterSpells::new(ability))
    }

    /// Record that the sheet changed.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
