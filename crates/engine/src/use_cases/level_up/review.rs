//! Informational review steps: new features and spell slot changes.

use levelup_domain::PendingChanges;

use super::input::WizardInput;
use super::StepAction;

/// Scroll position over the features gained this level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureReviewState {
    cursor: usize,
}

impl FeatureReviewState {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn handle(&mut self, input: WizardInput, item_count: usize) -> StepAction {
        match input {
            WizardInput::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                StepAction::Stay
            }
            WizardInput::Down => {
                if self.cursor + 1 < item_count {
                    self.cursor += 1;
                }
                StepAction::Stay
            }
            WizardInput::Select => StepAction::Advance,
            WizardInput::Back => StepAction::Retreat,
            _ => StepAction::Stay,
        }
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// Spell slot review has no state of its own beyond the acknowledgement flag.
pub(crate) fn handle_spell_slots(input: WizardInput, pending: &mut PendingChanges) -> StepAction {
    match input {
        WizardInput::Select => {
            pending.acknowledge_spell_slots(true);
            StepAction::Advance
        }
        WizardInput::Back => {
            pending.acknowledge_spell_slots(false);
            StepAction::Retreat
        }
        _ => StepAction::Stay,
    }
}
