//! Feat entity for TTRPG character abilities.
//!
//! A feat can be taken instead of an Ability Score Improvement. Only the
//! mechanical benefits the advancement flow applies are modelled as typed
//! variants; everything else is carried as free-form text.

use serde::{Deserialize, Serialize};

use crate::value_objects::Ability;

/// A feat that a character can acquire.
///
/// # Design Decision (ADR-008 Tier 4)
///
/// This struct uses public fields because it is a **simple data struct** with no invariants to protect:
/// - Any combination of fields is valid
/// - Primarily used for data transfer and storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feat {
    /// Unique identifier for this feat
    pub id: String,
    /// Display name of the feat
    pub name: String,
    /// Full description of what the feat does
    #[serde(default)]
    pub description: String,
    /// Mechanical benefits granted by the feat
    #[serde(default)]
    pub benefits: Vec<FeatBenefit>,
    /// Source book reference (e.g., "PHB p.165")
    #[serde(default)]
    pub source: String,
}

impl Feat {
    /// Create a new feat with required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            benefits: Vec::new(),
            source: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_benefit(mut self, benefit: FeatBenefit) -> Self {
        self.benefits.push(benefit);
        self
    }

    /// Case-insensitive substring match against the feat name.
    ///
    /// An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// The feat's ability-score increase, if it grants one.
    ///
    /// Only the first increase-type benefit counts. A choice with a single
    /// option is reported as fixed; a choice with no options is ignored.
    pub fn ability_increase(&self) -> Option<AbilityIncrease> {
        self.benefits.iter().find_map(|benefit| match benefit {
            FeatBenefit::StatIncrease { stat, value } => Some(AbilityIncrease::Fixed {
                ability: *stat,
                amount: *value,
            }),
            FeatBenefit::StatChoice { options, value } => match options.as_slice() {
                [] => None,
                [only] => Some(AbilityIncrease::Fixed {
                    ability: *only,
                    amount: *value,
                }),
                _ => Some(AbilityIncrease::Choice {
                    options: options.clone(),
                    amount: *value,
                }),
            },
            _ => None,
        })
    }
}

/// A mechanical benefit granted by a feat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatBenefit {
    /// Increase an ability score
    StatIncrease {
        /// The ability to increase
        stat: Ability,
        /// Amount to increase by
        #[serde(default = "default_one")]
        value: i32,
    },
    /// Choose one of several abilities to increase
    StatChoice {
        /// Options to choose from
        options: Vec<Ability>,
        /// Amount to increase by
        #[serde(default = "default_one")]
        value: i32,
    },
    /// Grant additional hit points
    BonusHitPoints {
        /// Fixed amount to add
        #[serde(default)]
        fixed: Option<i32>,
        /// Amount per character level
        #[serde(default)]
        per_level: Option<i32>,
    },
    /// Increase walking speed (in feet)
    SpeedIncrease { value: i32 },
    /// Flat bonus to initiative rolls
    InitiativeBonus { value: i32 },
    /// Flat bonus to armor class
    ArmorClassBonus { value: i32 },
    /// Custom benefit with free-form description
    Custom {
        /// Description of the benefit
        description: String,
    },
}

fn default_one() -> i32 {
    1
}

/// How a feat raises an ability score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilityIncrease {
    /// Always the same ability
    Fixed { ability: Ability, amount: i32 },
    /// The player picks one of `options`
    Choice { options: Vec<Ability>, amount: i32 },
}

impl AbilityIncrease {
    pub fn amount(&self) -> i32 {
        match self {
            Self::Fixed { amount, .. } | Self::Choice { amount, .. } => *amount,
        }
    }

    pub fn requires_choice(&self) -> bool {
        matches!(self, Self::Choice { .. })
    }
}
