//! Ability value objects - the six ability scores and their modifiers.
//!
//! Provides type safety for ability references instead of using magic strings like "STR", "DEX".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Highest value an ability score can reach through advancement.
pub const ABILITY_SCORE_CAP: i32 = 20;

/// The six D&D 5e abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ability {
    /// Strength - physical power
    #[serde(alias = "str", alias = "Strength")]
    Str,
    /// Dexterity - agility and reflexes
    #[serde(alias = "dex", alias = "Dexterity")]
    Dex,
    /// Constitution - endurance and health
    #[serde(alias = "con", alias = "Constitution")]
    Con,
    /// Intelligence - reasoning and memory
    #[serde(alias = "int", alias = "Intelligence")]
    Int,
    /// Wisdom - perception and insight
    #[serde(alias = "wis", alias = "Wisdom")]
    Wis,
    /// Charisma - force of personality
    #[serde(alias = "cha", alias = "Charisma")]
    Cha,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Self::Str,
        Self::Dex,
        Self::Con,
        Self::Int,
        Self::Wis,
        Self::Cha,
    ];

    /// Returns the short uppercase string representation (e.g., "STR", "DEX").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Dex => "DEX",
            Self::Con => "CON",
            Self::Int => "INT",
            Self::Wis => "WIS",
            Self::Cha => "CHA",
        }
    }

    /// Returns the full name of the ability (e.g., "Strength", "Dexterity").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Str => "Strength",
            Self::Dex => "Dexterity",
            Self::Con => "Constitution",
            Self::Int => "Intelligence",
            Self::Wis => "Wisdom",
            Self::Cha => "Charisma",
        }
    }

    /// Position of this ability in [`Ability::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::Str => 0,
            Self::Dex => 1,
            Self::Con => 2,
            Self::Int => 3,
            Self::Wis => 4,
            Self::Cha => 5,
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STR" | "STRENGTH" => Ok(Self::Str),
            "DEX" | "DEXTERITY" => Ok(Self::Dex),
            "CON" | "CONSTITUTION" => Ok(Self::Con),
            "INT" | "INTELLIGENCE" => Ok(Self::Int),
            "WIS" | "WISDOM" => Ok(Self::Wis),
            "CHA" | "CHARISMA" => Ok(Self::Cha),
            _ => Err(DomainError::parse(format!("Unknown ability: {}", s))),
        }
    }
}

/// Ability modifier for a score: floor((score - 10) / 2).
pub fn ability_modifier(score: i32) -> i32 {
    // Rust's / rounds toward zero, D&D floors
    let diff = score - 10;
    if diff >= 0 {
        diff / 2
    } else {
        (diff - 1) / 2
    }
}

/// Base values of the six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScores {
    strength: i32,
    dexterity: i32,
    constitution: i32,
    intelligence: i32,
    wisdom: i32,
    charisma: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::uniform(10)
    }
}

impl AbilityScores {
    /// Create scores in sheet order (STR, DEX, CON, INT, WIS, CHA).
    pub fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    /// All six scores set to the same value.
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.strength,
            Ability::Dex => self.dexterity,
            Ability::Con => self.constitution,
            Ability::Int => self.intelligence,
            Ability::Wis => self.wisdom,
            Ability::Cha => self.charisma,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.get(ability))
    }

    /// Builder-style setter.
    pub fn with(mut self, ability: Ability, value: i32) -> Self {
        *self.slot_mut(ability) = value;
        self
    }

    /// Add `amount` to an ability without exceeding [`ABILITY_SCORE_CAP`].
    ///
    /// Scores already above the cap are left untouched. Returns the amount
    /// actually applied.
    pub fn increase_capped(&mut self, ability: Ability, amount: i32) -> i32 {
        let slot = self.slot_mut(ability);
        let target = (*slot + amount.max(0)).min(ABILITY_SCORE_CAP);
        let applied = (target - *slot).max(0);
        *slot += applied;
        applied
    }

    /// How much room an ability has before hitting the cap.
    pub fn headroom(&self, ability: Ability) -> i32 {
        (ABILITY_SCORE_CAP - self.get(ability)).max(0)
    }

    fn slot_mut(&mut self, ability: Ability) -> &mut i32 {
        match ability {
            Ability::Str => &mut self.strength,
            Ability::Dex => &mut self.dexterity,
            Ability::Con => &mut self.constitution,
            Ability::Int => &mut self.intelligence,
            Ability::Wis => &mut self.wisdom,
            Ability::Cha => &mut self.charisma,
        }
    }
}
