//! Subclass selection step.

use levelup_domain::{ClassData, PendingChanges};

use super::input::WizardInput;
use super::StepAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubclassPhase {
    #[default]
    Browsing,
    Selected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubclassState {
    cursor: usize,
    phase: SubclassPhase,
}

impl SubclassState {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> SubclassPhase {
        self.phase
    }

    pub(crate) fn handle(
        &mut self,
        input: WizardInput,
        class: &ClassData,
        new_level: u8,
        pending: &mut PendingChanges,
    ) -> StepAction {
        let count = class.subclasses.len();
        match (self.phase, input) {
            (SubclassPhase::Browsing, WizardInput::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                StepAction::Stay
            }
            (SubclassPhase::Browsing, WizardInput::Down) => {
                if self.cursor + 1 < count {
                    self.cursor += 1;
                }
                StepAction::Stay
            }
            (SubclassPhase::Browsing, WizardInput::Select) => {
                let Some(subclass) = class.subclasses.get(self.cursor) else {
                    return StepAction::Reject(format!("{} has no subclasses to choose", class.name));
                };
                pending.set_subclass(subclass.name.clone(), subclass.features_up_to(new_level));
                self.phase = SubclassPhase::Selected;
                tracing::debug!(subclass = %subclass.name, "Subclass staged");
                StepAction::Stay
            }
            (SubclassPhase::Browsing, WizardInput::Back) => StepAction::Retreat,
            (SubclassPhase::Selected, WizardInput::Select) => StepAction::Advance,
            (SubclassPhase::Selected, WizardInput::Back) => {
                self.phase = SubclassPhase::Browsing;
                pending.clear_subclass();
                StepAction::Stay
            }
            _ => StepAction::Stay,
        }
    }

    /// Back to browsing with nothing staged. The cursor is kept.
    pub(crate) fn reset(&mut self, pending: &mut PendingChanges) {
        self.phase = SubclassPhase::Browsing;
        pending.clear_subclass();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelup_domain::srd_classes;

    fn fighter() -> ClassData {
        srd_classes()
            .into_iter()
            .find(|c| c.name == "Fighter")
            .unwrap()
    }

    #[test]
    fn select_stages_features_up_to_new_level() {
        let class = fighter();
        let mut state = SubclassState::default();
        let mut pending = PendingChanges::new();

        let action = state.handle(WizardInput::Select, &class, 3, &mut pending);

        assert_eq!(action, StepAction::Stay);
        assert_eq!(state.phase(), SubclassPhase::Selected);
        assert_eq!(pending.subclass(), Some(class.subclasses[0].name.as_str()));
        assert!(!pending.subclass_features().is_empty());
        assert!(pending.subclass_features().iter().all(|f| f.level <= 3));
        assert_eq!(
            state.handle(WizardInput::Select, &class, 3, &mut pending),
            StepAction::Advance
        );
    }

    #[test]
    fn cursor_does_not_wrap() {
        let class = fighter();
        let mut state = SubclassState::default();
        let mut pending = PendingChanges::new();

        state.handle(WizardInput::Up, &class, 3, &mut pending);
        assert_eq!(state.cursor(), 0);
        for _ in 0..10 {
            state.handle(WizardInput::Down, &class, 3, &mut pending);
        }
        assert_eq!(state.cursor(), class.subclasses.len() - 1);
    }

    #[test]
    fn back_unstages_then_retreats() {
        let class = fighter();
        let mut state = SubclassState::default();
        let mut pending = PendingChanges::new();

        state.handle(WizardInput::Down, &class, 3, &mut pending);
        state.handle(WizardInput::Select, &class, 3, &mut pending);
        assert_eq!(pending.subclass(), Some(class.subclasses[1].name.as_str()));

        assert_eq!(
            state.handle(WizardInput::Back, &class, 3, &mut pending),
            StepAction::Stay
        );
        assert_eq!(pending.subclass(), None);
        assert!(pending.subclass_features().is_empty());

        assert_eq!(
            state.handle(WizardInput::Back, &class, 3, &mut pending),
            StepAction::Retreat
        );
    }

    #[test]
    fn empty_subclass_list_is_rejected() {
        let class = ClassData::new("Commoner", "d6");
        let mut state = SubclassState::default();
        let mut pending = PendingChanges::new();

        let action = state.handle(WizardInput::Select, &class, 3, &mut pending);

        assert!(matches!(action, StepAction::Reject(_)));
        assert_eq!(state.phase(), SubclassPhase::Browsing);
    }
}
