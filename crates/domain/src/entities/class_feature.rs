//! Class feature entity for TTRPG character abilities.
//!
//! Represents abilities and features that characters gain from their class
//! or subclass as they level up.

use serde::{Deserialize, Serialize};

/// Exact name of the class-table entry that grants an Ability Score Improvement.
pub const ABILITY_SCORE_IMPROVEMENT: &str = "Ability Score Improvement";

/// A class feature that a character gains from their class or subclass.
///
/// # ADR-008 Tier 4: Simple Data Struct
///
/// This is a data-carrying struct with no invariants to protect. All fields are public
/// because there's no invalid state that can be constructed - any combination of values
/// is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassFeature {
    /// Display name of the feature
    pub name: String,
    /// Level at which this feature is gained
    pub level: u8,
    /// Full description of what the feature does
    #[serde(default)]
    pub description: String,
}

impl ClassFeature {
    /// Create a new class feature with required fields.
    pub fn new(name: impl Into<String>, level: u8) -> Self {
        Self {
            name: name.into(),
            level,
            description: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this is the table entry that grants an ASI.
    pub fn is_ability_score_improvement(&self) -> bool {
        self.name == ABILITY_SCORE_IMPROVEMENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_feature_accessors() {
        let feature = ClassFeature::new("Action Surge", 2)
            .with_description("You can push yourself beyond your normal limits.");

        assert_eq!(feature.name, "Action Surge");
        assert_eq!(feature.level, 2);
        assert!(feature.description.starts_with("You can push"));
        assert!(!feature.is_ability_score_improvement());
    }

    #[test]
    fn asi_detection_is_exact() {
        assert!(ClassFeature::new("Ability Score Improvement", 4).is_ability_score_improvement());
        assert!(!ClassFeature::new("ability score improvement", 4).is_ability_score_improvement());
        assert!(!ClassFeature::new("Ability Score Improvement (2)", 4)
            .is_ability_score_improvement());
    }

    #[test]
    fn description_defaults_when_missing() {
        let feature: ClassFeature =
            serde_json::from_str(r#"{"name":"Second Wind","level":1}"#).unwrap();
        assert_eq!(feature, ClassFeature::new("Second Wind", 1));
    }
}
