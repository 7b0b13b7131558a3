//! Ability Score Improvement or feat step.
//!
//! Two tabs share the step. The ASI tab allocates either +2 to one ability
//! or +1 to two; the feat tab searches the feat list and, for feats that let
//! the player pick the boosted ability, opens a nested prompt. Switching tabs
//! always drops whatever the other tab had staged.

use levelup_domain::{Ability, AbilityIncrease, AbilityScores, Feat, PendingChanges};

use super::input::WizardInput;
use super::StepAction;

/// Row index of the "Continue" entry below the six abilities.
pub const CONTINUE_ROW: usize = Ability::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImprovementTab {
    #[default]
    AbilityScores,
    Feat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AsiPattern {
    /// +2 to a single ability
    #[default]
    PlusTwo,
    /// +1 to two different abilities
    PlusOneTwice,
}

impl AsiPattern {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PlusTwo => "+2 to one ability",
            Self::PlusOneTwice => "+1 to two abilities",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::PlusTwo => Self::PlusOneTwice,
            Self::PlusOneTwice => Self::PlusTwo,
        }
    }

    fn per_ability(self) -> i32 {
        match self {
            Self::PlusTwo => 2,
            Self::PlusOneTwice => 1,
        }
    }

    fn required(self) -> usize {
        match self {
            Self::PlusTwo => 1,
            Self::PlusOneTwice => 2,
        }
    }
}

// =============================================================================
// ASI tab
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsiState {
    pattern: AsiPattern,
    cursor: usize,
    selected: Vec<Ability>,
}

impl AsiState {
    pub fn pattern(&self) -> AsiPattern {
        self.pattern
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> &[Ability] {
        &self.selected
    }

    pub fn is_selected(&self, ability: Ability) -> bool {
        self.selected.contains(&ability)
    }

    pub fn is_complete(&self) -> bool {
        self.selected.len() == self.pattern.required()
    }

    fn handle(
        &mut self,
        input: WizardInput,
        abilities: &AbilityScores,
        pending: &mut PendingChanges,
    ) -> StepAction {
        match input {
            WizardInput::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                StepAction::Stay
            }
            WizardInput::Down => {
                self.cursor = (self.cursor + 1).min(CONTINUE_ROW);
                StepAction::Stay
            }
            WizardInput::Left | WizardInput::Right => {
                self.pattern = self.pattern.toggled();
                self.selected.clear();
                pending.clear_ability_deltas();
                StepAction::Stay
            }
            WizardInput::Select if self.cursor == CONTINUE_ROW => {
                if self.is_complete() {
                    StepAction::Advance
                } else {
                    StepAction::Reject(match self.pattern {
                        AsiPattern::PlusTwo => "Choose one ability to increase by 2".to_string(),
                        AsiPattern::PlusOneTwice => {
                            "Choose two abilities to increase by 1".to_string()
                        }
                    })
                }
            }
            WizardInput::Select => self.toggle(Ability::ALL[self.cursor], abilities, pending),
            WizardInput::Back => StepAction::Retreat,
            _ => StepAction::Stay,
        }
    }

    fn toggle(
        &mut self,
        ability: Ability,
        abilities: &AbilityScores,
        pending: &mut PendingChanges,
    ) -> StepAction {
        if let Some(pos) = self.selected.iter().position(|a| *a == ability) {
            self.selected.remove(pos);
        } else if abilities.headroom(ability) == 0 {
            return StepAction::Reject(format!(
                "{} is already at the maximum",
                ability.display_name()
            ));
        } else {
            match self.pattern {
                AsiPattern::PlusTwo => {
                    self.selected.clear();
                    self.selected.push(ability);
                }
                AsiPattern::PlusOneTwice => {
                    if self.selected.len() >= 2 {
                        return StepAction::Reject(
                            "Already increasing two abilities; deselect one first".to_string(),
                        );
                    }
                    self.selected.push(ability);
                }
            }
        }
        self.stage(abilities, pending);
        StepAction::Stay
    }

    fn stage(&self, abilities: &AbilityScores, pending: &mut PendingChanges) {
        pending.clear_ability_deltas();
        for ability in &self.selected {
            let delta = self.pattern.per_ability().min(abilities.headroom(*ability));
            pending.set_ability_delta(*ability, delta);
        }
    }
}

// =============================================================================
// Feat tab
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FeatPhase {
    #[default]
    Browsing,
    /// Nested prompt for a feat whose increase lets the player pick the ability.
    ChoosingAbility {
        feat: Feat,
        options: Vec<Ability>,
        cursor: usize,
    },
    Chosen,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatState {
    query: String,
    cursor: usize,
    phase: FeatPhase,
}

impl FeatState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> &FeatPhase {
        &self.phase
    }

    /// Feats matching the current query, in catalog order.
    pub fn filtered<'a>(&self, feats: &'a [Feat]) -> Vec<&'a Feat> {
        feats.iter().filter(|f| f.matches_query(&self.query)).collect()
    }

    fn handle(
        &mut self,
        input: WizardInput,
        feats: &[Feat],
        abilities: &AbilityScores,
        pending: &mut PendingChanges,
    ) -> StepAction {
        if self.phase == FeatPhase::Browsing {
            return self.browse(input, feats, pending);
        }
        match &mut self.phase {
            FeatPhase::Browsing => StepAction::Stay,
            FeatPhase::ChoosingAbility {
                feat,
                options,
                cursor,
            } => match input {
                WizardInput::Up => {
                    *cursor = cursor.saturating_sub(1);
                    StepAction::Stay
                }
                WizardInput::Down => {
                    if *cursor + 1 < options.len() {
                        *cursor += 1;
                    }
                    StepAction::Stay
                }
                WizardInput::Select => {
                    let Some(ability) = options.get(*cursor).copied() else {
                        return StepAction::Stay;
                    };
                    if abilities.headroom(ability) == 0 {
                        return StepAction::Reject(format!(
                            "{} is already at the maximum",
                            ability.display_name()
                        ));
                    }
                    pending.set_feat(feat.clone(), Some(ability));
                    tracing::debug!(feat = %feat.name, ability = ?ability, "Feat staged");
                    self.phase = FeatPhase::Chosen;
                    StepAction::Stay
                }
                WizardInput::Back => {
                    self.phase = FeatPhase::Browsing;
                    pending.clear_feat();
                    StepAction::Stay
                }
                _ => StepAction::Stay,
            },
            FeatPhase::Chosen => match input {
                WizardInput::Select => StepAction::Advance,
                WizardInput::Back => {
                    self.phase = FeatPhase::Browsing;
                    pending.clear_feat();
                    StepAction::Stay
                }
                _ => StepAction::Stay,
            },
        }
    }

    fn browse(
        &mut self,
        input: WizardInput,
        feats: &[Feat],
        pending: &mut PendingChanges,
    ) -> StepAction {
        match input {
            WizardInput::Char(c) => {
                self.query.push(c);
                self.cursor = 0;
                StepAction::Stay
            }
            WizardInput::Backspace => {
                self.query.pop();
                self.cursor = 0;
                StepAction::Stay
            }
            WizardInput::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                StepAction::Stay
            }
            WizardInput::Down => {
                if self.cursor + 1 < self.filtered(feats).len() {
                    self.cursor += 1;
                }
                StepAction::Stay
            }
            WizardInput::Select => {
                let Some(feat) = self.filtered(feats).get(self.cursor).copied().cloned() else {
                    return StepAction::Reject(if feats.is_empty() {
                        "No feats are available".to_string()
                    } else {
                        format!("No feats match \"{}\"", self.query)
                    });
                };
                match feat.ability_increase() {
                    Some(AbilityIncrease::Choice { options, .. }) => {
                        self.phase = FeatPhase::ChoosingAbility {
                            feat,
                            options,
                            cursor: 0,
                        };
                    }
                    _ => {
                        tracing::debug!(feat = %feat.name, "Feat staged");
                        pending.set_feat(feat, None);
                        self.phase = FeatPhase::Chosen;
                    }
                }
                StepAction::Stay
            }
            WizardInput::Back => StepAction::Retreat,
            _ => StepAction::Stay,
        }
    }
}

// =============================================================================
// Step state
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImprovementState {
    tab: ImprovementTab,
    asi: AsiState,
    feat: FeatState,
}

impl ImprovementState {
    pub fn tab(&self) -> ImprovementTab {
        self.tab
    }

    pub fn asi(&self) -> &AsiState {
        &self.asi
    }

    pub fn feat(&self) -> &FeatState {
        &self.feat
    }

    pub(crate) fn handle(
        &mut self,
        input: WizardInput,
        abilities: &AbilityScores,
        feats: &[Feat],
        pending: &mut PendingChanges,
    ) -> StepAction {
        if input == WizardInput::Tab {
            let next = match self.tab {
                ImprovementTab::AbilityScores => ImprovementTab::Feat,
                ImprovementTab::Feat => ImprovementTab::AbilityScores,
            };
            self.reset(pending);
            self.tab = next;
            return StepAction::Stay;
        }

        match self.tab {
            ImprovementTab::AbilityScores => self.asi.handle(input, abilities, pending),
            ImprovementTab::Feat => self.feat.handle(input, feats, abilities, pending),
        }
    }

    /// Fresh ASI tab with nothing staged.
    pub(crate) fn reset(&mut self, pending: &mut PendingChanges) {
        *self = Self::default();
        pending.clear_improvement();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelup_domain::srd_feats;

    fn scores() -> AbilityScores {
        AbilityScores::uniform(14)
            .with(Ability::Dex, 19)
            .with(Ability::Con, 20)
    }

    fn press(
        state: &mut ImprovementState,
        pending: &mut PendingChanges,
        inputs: &[WizardInput],
    ) -> StepAction {
        let feats = srd_feats();
        let mut last = StepAction::Stay;
        for input in inputs {
            last = state.handle(*input, &scores(), &feats, pending);
        }
        last
    }

    fn select_row(state: &mut ImprovementState, pending: &mut PendingChanges, row: usize) -> StepAction {
        let mut inputs = vec![WizardInput::Up; CONTINUE_ROW];
        inputs.extend(std::iter::repeat(WizardInput::Down).take(row));
        inputs.push(WizardInput::Select);
        press(state, pending, &inputs)
    }

    fn type_query(state: &mut ImprovementState, pending: &mut PendingChanges, text: &str) {
        let inputs: Vec<_> = text.chars().map(WizardInput::Char).collect();
        press(state, pending, &inputs);
    }

    #[test]
    fn plus_two_replaces_previous_choice() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();

        select_row(&mut state, &mut pending, Ability::Str.index());
        assert_eq!(pending.ability_delta(Ability::Str), 2);

        select_row(&mut state, &mut pending, Ability::Wis.index());
        assert_eq!(state.asi().selected(), &[Ability::Wis]);
        assert_eq!(pending.ability_delta(Ability::Str), 0);
        assert_eq!(pending.ability_delta(Ability::Wis), 2);
    }

    #[test]
    fn plus_two_toggles_off() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();

        select_row(&mut state, &mut pending, Ability::Str.index());
        select_row(&mut state, &mut pending, Ability::Str.index());

        assert!(state.asi().selected().is_empty());
        assert_eq!(pending.ability_deltas().count(), 0);
    }

    #[test]
    fn plus_two_near_cap_is_reduced() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();

        select_row(&mut state, &mut pending, Ability::Dex.index());

        assert_eq!(pending.ability_delta(Ability::Dex), 1);
        assert!(state.asi().is_complete());
    }

    #[test]
    fn capped_ability_cannot_be_selected() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        select_row(&mut state, &mut pending, Ability::Str.index());

        let action = select_row(&mut state, &mut pending, Ability::Con.index());

        assert!(matches!(action, StepAction::Reject(_)));
        assert_eq!(state.asi().selected(), &[Ability::Str]);
        assert_eq!(pending.ability_delta(Ability::Con), 0);
    }

    #[test]
    fn plus_one_twice_rejects_third_choice() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        press(&mut state, &mut pending, &[WizardInput::Right]);
        assert_eq!(state.asi().pattern(), AsiPattern::PlusOneTwice);

        select_row(&mut state, &mut pending, Ability::Str.index());
        select_row(&mut state, &mut pending, Ability::Int.index());
        let action = select_row(&mut state, &mut pending, Ability::Cha.index());

        assert!(matches!(action, StepAction::Reject(_)));
        assert_eq!(state.asi().selected(), &[Ability::Str, Ability::Int]);
        assert_eq!(pending.ability_delta(Ability::Str), 1);
        assert_eq!(pending.ability_delta(Ability::Int), 1);
        assert_eq!(pending.ability_delta(Ability::Cha), 0);
    }

    #[test]
    fn continue_requires_complete_pattern() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        press(&mut state, &mut pending, &[WizardInput::Left]);
        select_row(&mut state, &mut pending, Ability::Str.index());

        let action = select_row(&mut state, &mut pending, CONTINUE_ROW);
        assert!(matches!(action, StepAction::Reject(_)));

        select_row(&mut state, &mut pending, Ability::Wis.index());
        assert_eq!(
            select_row(&mut state, &mut pending, CONTINUE_ROW),
            StepAction::Advance
        );
    }

    #[test]
    fn switching_pattern_clears_selection() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        select_row(&mut state, &mut pending, Ability::Str.index());

        press(&mut state, &mut pending, &[WizardInput::Left]);

        assert!(state.asi().selected().is_empty());
        assert!(!state.asi().is_complete());
        assert_eq!(pending.ability_deltas().count(), 0);
    }

    #[test]
    fn tab_switch_clears_other_tab() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        select_row(&mut state, &mut pending, Ability::Str.index());

        press(&mut state, &mut pending, &[WizardInput::Tab]);
        assert_eq!(state.tab(), ImprovementTab::Feat);
        assert_eq!(pending.ability_deltas().count(), 0);

        type_query(&mut state, &mut pending, "alert");
        press(&mut state, &mut pending, &[WizardInput::Select]);
        assert_eq!(pending.feat().map(|f| f.id.as_str()), Some("alert"));

        press(&mut state, &mut pending, &[WizardInput::Tab]);
        assert_eq!(state.tab(), ImprovementTab::AbilityScores);
        assert!(pending.feat().is_none());
    }

    #[test]
    fn query_filters_feats() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        press(&mut state, &mut pending, &[WizardInput::Tab]);
        type_query(&mut state, &mut pending, "MOB");

        let feats = srd_feats();
        let names: Vec<_> = state
            .feat()
            .filtered(&feats)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Mobile"]);

        press(&mut state, &mut pending, &[WizardInput::Backspace; 3]);
        assert_eq!(state.feat().filtered(&feats).len(), feats.len());
    }

    #[test]
    fn fixed_feat_completes_on_selection() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        press(&mut state, &mut pending, &[WizardInput::Tab]);
        type_query(&mut state, &mut pending, "heavy");

        press(&mut state, &mut pending, &[WizardInput::Select]);

        assert_eq!(state.feat().phase(), &FeatPhase::Chosen);
        assert_eq!(pending.feat_ability(), None);
        assert_eq!(
            press(&mut state, &mut pending, &[WizardInput::Select]),
            StepAction::Advance
        );
    }

    #[test]
    fn choice_feat_opens_nested_prompt() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        press(&mut state, &mut pending, &[WizardInput::Tab]);
        type_query(&mut state, &mut pending, "observant");

        press(&mut state, &mut pending, &[WizardInput::Select]);
        assert!(matches!(
            state.feat().phase(),
            FeatPhase::ChoosingAbility { options, .. } if options == &vec![Ability::Int, Ability::Wis]
        ));
        assert!(pending.feat().is_none());

        press(&mut state, &mut pending, &[WizardInput::Down, WizardInput::Select]);
        assert_eq!(pending.feat().map(|f| f.id.as_str()), Some("observant"));
        assert_eq!(pending.feat_ability(), Some(Ability::Wis));
    }

    #[test]
    fn cancelling_nested_prompt_discards_feat() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        press(&mut state, &mut pending, &[WizardInput::Tab]);
        type_query(&mut state, &mut pending, "resilient");
        press(&mut state, &mut pending, &[WizardInput::Select]);

        let action = press(&mut state, &mut pending, &[WizardInput::Back]);

        assert_eq!(action, StepAction::Stay);
        assert_eq!(state.feat().phase(), &FeatPhase::Browsing);
        assert!(pending.feat().is_none());
        assert_eq!(state.feat().query(), "resilient");
    }

    #[test]
    fn nested_prompt_rejects_capped_ability() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        press(&mut state, &mut pending, &[WizardInput::Tab]);
        type_query(&mut state, &mut pending, "resilient");
        press(&mut state, &mut pending, &[WizardInput::Select]);

        let con = Ability::Con.index();
        let mut inputs = vec![WizardInput::Down; con];
        inputs.push(WizardInput::Select);
        let action = press(&mut state, &mut pending, &inputs);

        assert!(matches!(action, StepAction::Reject(_)));
        assert!(pending.feat().is_none());
    }

    #[test]
    fn empty_match_is_rejected() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        press(&mut state, &mut pending, &[WizardInput::Tab]);
        type_query(&mut state, &mut pending, "zzz");

        let action = press(&mut state, &mut pending, &[WizardInput::Select]);

        assert!(matches!(action, StepAction::Reject(_)));
    }

    #[test]
    fn back_from_tab_root_retreats() {
        let mut state = ImprovementState::default();
        let mut pending = PendingChanges::new();
        assert_eq!(
            press(&mut state, &mut pending, &[WizardInput::Back]),
            StepAction::Retreat
        );
        press(&mut state, &mut pending, &[WizardInput::Tab]);
        assert_eq!(
            press(&mut state, &mut pending, &[WizardInput::Back]),
            StepAction::Retreat
        );
    }
}
