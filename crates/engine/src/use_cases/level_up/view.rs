//! Presentation-neutral snapshot of the wizard.
//!
//! A presenter (the line driver in `main.rs`, or anything else) renders a
//! [`WizardView`] however it likes; nothing here knows about layout.

use levelup_domain::{
    Ability, AbilityIncrease, FeatBenefit, HitPointGain, HitPointMethod, LevelUpStep,
    MAX_SPELL_LEVEL,
};

use super::ability_feat::{AsiPattern, FeatPhase, ImprovementTab, CONTINUE_ROW};
use super::hit_points::HitPointPhase;
use super::subclass::SubclassPhase;
use super::LevelUpWizard;

/// Everything needed to draw the current state of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardView {
    pub character_name: String,
    pub class_name: String,
    pub from_level: u8,
    pub to_level: u8,
    pub step: LevelUpStep,
    /// 1-based position of `step` in `steps`
    pub position: usize,
    pub steps: Vec<LevelUpStep>,
    pub notice: Option<String>,
    pub body: StepView,
}

/// A generic selectable line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub label: String,
    pub detail: Option<String>,
    pub highlighted: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityRow {
    pub ability: Ability,
    pub score: i32,
    pub delta: i32,
    pub highlighted: bool,
    pub selected: bool,
    pub capped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatPromptView {
    pub feat_name: String,
    pub options: Vec<ListRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub spell_level: u8,
    pub before: u8,
    pub after: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImprovementView {
    AbilityScores {
        pattern: AsiPattern,
        rows: Vec<AbilityRow>,
        continue_highlighted: bool,
        complete: bool,
    },
    Feat {
        query: String,
        rows: Vec<ListRow>,
        prompt: Option<FeatPromptView>,
        chosen: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepView {
    HitPoints {
        die: u8,
        constitution_modifier: i32,
        methods: Vec<ListRow>,
        locked: Option<HitPointGain>,
    },
    Subclass {
        options: Vec<ListRow>,
        staged: Option<String>,
    },
    AbilityOrFeat(ImprovementView),
    FeatureReview {
        features: Vec<ListRow>,
    },
    SpellSlotReview {
        rows: Vec<SlotRow>,
    },
    Confirm {
        summary: Vec<String>,
    },
    Error {
        message: String,
    },
}

impl LevelUpWizard {
    /// Snapshot of the current step for rendering.
    pub fn view(&self) -> WizardView {
        let step = self.sequence.current();
        WizardView {
            character_name: self.character.name().to_string(),
            class_name: self.character.class_name().to_string(),
            from_level: self.from_level,
            to_level: self.to_level(),
            step,
            position: self.sequence.index() + 1,
            steps: self.sequence.steps().to_vec(),
            notice: self.notice.clone(),
            body: self.step_view(step),
        }
    }

    fn step_view(&self, step: LevelUpStep) -> StepView {
        let Some(class) = self.class.as_ref() else {
            return StepView::Error {
                message: self
                    .error
                    .clone()
                    .unwrap_or_else(|| "Level-up is unavailable".to_string()),
            };
        };

        match step {
            LevelUpStep::HitPoints => {
                let die = class.hit_die();
                let modifier = self.character.constitution_modifier();
                let locked = match self.hit_points.phase() {
                    HitPointPhase::Locked(gain) => Some(gain),
                    HitPointPhase::ChoosingMethod => None,
                };
                let methods = HitPointMethod::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, method)| ListRow {
                        label: method.label().to_string(),
                        detail: Some(match method {
                            HitPointMethod::Roll => format!("1d{}", die.sides()),
                            HitPointMethod::Average => die.average().to_string(),
                        }),
                        highlighted: i == self.hit_points.cursor(),
                        selected: locked.is_some_and(|g| g.method == *method),
                    })
                    .collect();
                StepView::HitPoints {
                    die: die.sides(),
                    constitution_modifier: modifier,
                    methods,
                    locked,
                }
            }
            LevelUpStep::Subclass => {
                let staged = self.pending.subclass().map(str::to_string);
                let options = class
                    .subclasses
                    .iter()
                    .enumerate()
                    .map(|(i, subclass)| ListRow {
                        label: subclass.name.clone(),
                        detail: Some(
                            subclass
                                .features_up_to(self.to_level())
                                .iter()
                                .map(|f| f.name.as_str())
                                .collect::<Vec<_>>()
                                .join(", "),
                        )
                        .filter(|d| !d.is_empty()),
                        highlighted: i == self.subclass.cursor(),
                        selected: self.subclass.phase() == SubclassPhase::Selected
                            && staged.as_deref() == Some(subclass.name.as_str()),
                    })
                    .collect();
                StepView::Subclass { options, staged }
            }
            LevelUpStep::AbilityOrFeat => StepView::AbilityOrFeat(self.improvement_view()),
            LevelUpStep::FeatureReview => StepView::FeatureReview {
                features: self
                    .review_features()
                    .iter()
                    .enumerate()
                    .map(|(i, feature)| ListRow {
                        label: feature.name().to_string(),
                        detail: Some(feature.source().to_string()),
                        highlighted: i == self.features.cursor(),
                        selected: false,
                    })
                    .collect(),
            },
            LevelUpStep::SpellSlotReview => {
                let before = class.slots_at(self.from_level);
                let after = class.slots_at(self.to_level());
                StepView::SpellSlotReview {
                    rows: (1..=MAX_SPELL_LEVEL)
                        .map(|level| SlotRow {
                            spell_level: level,
                            before: before.get(level),
                            after: after.get(level),
                        })
                        .filter(|row| row.before > 0 || row.after > 0)
                        .collect(),
                }
            }
            LevelUpStep::Confirm => StepView::Confirm {
                summary: self.summary(),
            },
        }
    }

    fn improvement_view(&self) -> ImprovementView {
        let state = &self.improvement;
        match state.tab() {
            ImprovementTab::AbilityScores => {
                let asi = state.asi();
                let abilities = self.character.abilities();
                ImprovementView::AbilityScores {
                    pattern: asi.pattern(),
                    rows: Ability::ALL
                        .iter()
                        .enumerate()
                        .map(|(i, ability)| AbilityRow {
                            ability: *ability,
                            score: abilities.get(*ability),
                            delta: self.pending.ability_delta(*ability),
                            highlighted: i == asi.cursor(),
                            selected: asi.is_selected(*ability),
                            capped: abilities.headroom(*ability) == 0,
                        })
                        .collect(),
                    continue_highlighted: asi.cursor() == CONTINUE_ROW,
                    complete: asi.is_complete(),
                }
            }
            ImprovementTab::Feat => {
                let feat_state = state.feat();
                let rows = feat_state
                    .filtered(&self.feats)
                    .into_iter()
                    .enumerate()
                    .map(|(i, feat)| ListRow {
                        label: feat.name.clone(),
                        detail: Some(feat.description.clone()).filter(|d| !d.is_empty()),
                        highlighted: i == feat_state.cursor(),
                        selected: self.pending.feat().is_some_and(|f| f.id == feat.id),
                    })
                    .collect();
                let prompt = match feat_state.phase() {
                    FeatPhase::ChoosingAbility {
                        feat,
                        options,
                        cursor,
                    } => Some(FeatPromptView {
                        feat_name: feat.name.clone(),
                        options: options
                            .iter()
                            .enumerate()
                            .map(|(i, ability)| ListRow {
                                label: ability.display_name().to_string(),
                                detail: Some(
                                    self.character.abilities().get(*ability).to_string(),
                                ),
                                highlighted: i == *cursor,
                                selected: false,
                            })
                            .collect(),
                    }),
                    _ => None,
                };
                ImprovementView::Feat {
                    query: feat_state.query().to_string(),
                    rows,
                    prompt,
                    chosen: self.pending.feat().map(|f| f.name.clone()),
                }
            }
        }
    }

    /// One line per staged change, in the order they will be applied.
    fn summary(&self) -> Vec<String> {
        let mut lines = vec![format!("Level {} -> {}", self.from_level, self.to_level())];
        if self.pending.has_hit_points() {
            lines.push(format!("Hit points +{}", self.pending.hit_point_increase()));
        }
        if let Some(subclass) = self.pending.subclass() {
            lines.push(format!("Subclass: {subclass}"));
        }
        for (ability, delta) in self.pending.ability_deltas() {
            lines.push(format!("{} +{}", ability.as_str(), delta));
        }
        if let Some(feat) = self.pending.feat() {
            let bonus = match (feat.ability_increase(), self.pending.feat_ability()) {
                (Some(AbilityIncrease::Fixed { ability, amount }), _) => {
                    format!(" ({} +{})", ability.as_str(), amount)
                }
                (Some(AbilityIncrease::Choice { amount, .. }), Some(ability)) => {
                    format!(" ({} +{})", ability.as_str(), amount)
                }
                _ => String::new(),
            };
            lines.push(format!("Feat: {}{}", feat.name, bonus));
            for benefit in &feat.benefits {
                if let FeatBenefit::Custom { description } = benefit {
                    lines.push(format!("  {description}"));
                }
            }
        }
        if self.sequence.contains(LevelUpStep::SpellSlotReview) {
            lines.push("Spell slots updated".to_string());
        }
        for feature in self.review_features() {
            lines.push(format!("New feature: {}", feature.name()));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use levelup_domain::{AbilityScores, Character, CharacterName};

    use super::*;
    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use crate::infrastructure::content::SrdClassCatalog;
    use crate::infrastructure::ports::MockCharacterRepo;
    use crate::use_cases::level_up::{LevelUp, WizardInput};

    fn wizard(class: &str, level: u8) -> LevelUpWizard {
        let character = Character::new(
            CharacterName::new("Seraphine").unwrap(),
            class,
            AbilityScores::uniform(12),
            10,
            Utc::now(),
        )
        .with_level(level);
        LevelUp::new(
            Arc::new(SrdClassCatalog::new()),
            Arc::new(MockCharacterRepo::new()),
            Arc::new(FixedRandom(4)),
            Arc::new(FixedClock(Utc::now())),
            20,
        )
        .start(character)
    }

    #[test]
    fn hit_point_view_shows_methods_and_lock() {
        let mut wizard = wizard("Fighter", 1);
        let view = wizard.view();
        assert_eq!(view.position, 1);
        assert_eq!(view.to_level, 2);
        match view.body {
            StepView::HitPoints { die, methods, locked, .. } => {
                assert_eq!(die, 10);
                assert_eq!(methods.len(), 2);
                assert!(methods[0].highlighted);
                assert!(locked.is_none());
            }
            other => panic!("unexpected view: {other:?}"),
        }

        wizard.handle_input(WizardInput::Select).unwrap();
        match wizard.view().body {
            StepView::HitPoints { methods, locked, .. } => {
                assert_eq!(locked.map(|g| g.raw), Some(4));
                assert!(methods[0].selected);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn spell_slot_view_lists_changed_levels() {
        let mut wizard = wizard("Wizard", 2);
        for _ in 0..2 {
            wizard.handle_input(WizardInput::Select).unwrap();
        }
        assert_eq!(wizard.current_step(), LevelUpStep::SpellSlotReview);
        match wizard.view().body {
            StepView::SpellSlotReview { rows } => {
                assert_eq!(
                    rows,
                    vec![
                        SlotRow { spell_level: 1, before: 3, after: 4 },
                        SlotRow { spell_level: 2, before: 0, after: 2 },
                    ]
                );
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn confirm_summary_lists_staged_changes() {
        let mut wizard = wizard("Fighter", 1);
        wizard.handle_input(WizardInput::Down).unwrap();
        wizard.handle_input(WizardInput::Select).unwrap();
        while wizard.current_step() != LevelUpStep::Confirm {
            wizard.handle_input(WizardInput::Select).unwrap();
        }
        match wizard.view().body {
            StepView::Confirm { summary } => {
                assert_eq!(summary[0], "Level 1 -> 2");
                assert_eq!(summary[1], "Hit points +7");
                assert!(summary.iter().any(|l| l == "New feature: Action Surge"));
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn error_state_view_carries_message() {
        let wizard = wizard("Bard", 1);
        let view = wizard.view();
        assert_eq!(view.steps, vec![LevelUpStep::Confirm]);
        assert!(matches!(view.body, StepView::Error { message } if message.contains("Bard")));
    }
}
