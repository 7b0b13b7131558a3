//! Hit point gain step.
//!
//! Two phases: choosing Roll or Average, then a locked result that can be
//! confirmed or discarded for a re-roll.

use levelup_domain::{HitDie, HitPointGain, HitPointMethod, PendingChanges};

use super::input::WizardInput;
use super::StepAction;
use crate::infrastructure::ports::RandomPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPointPhase {
    ChoosingMethod,
    Locked(HitPointGain),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitPointState {
    cursor: usize,
    phase: HitPointPhase,
}

impl Default for HitPointState {
    fn default() -> Self {
        Self {
            cursor: 0,
            phase: HitPointPhase::ChoosingMethod,
        }
    }
}

impl HitPointState {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> HitPointPhase {
        self.phase
    }

    pub fn highlighted(&self) -> HitPointMethod {
        HitPointMethod::ALL[self.cursor]
    }

    pub(crate) fn handle(
        &mut self,
        input: WizardInput,
        die: HitDie,
        constitution_modifier: i32,
        random: &dyn RandomPort,
        pending: &mut PendingChanges,
    ) -> StepAction {
        match (self.phase, input) {
            (HitPointPhase::ChoosingMethod, WizardInput::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                StepAction::Stay
            }
            (HitPointPhase::ChoosingMethod, WizardInput::Down) => {
                self.cursor = (self.cursor + 1).min(HitPointMethod::ALL.len() - 1);
                StepAction::Stay
            }
            (HitPointPhase::ChoosingMethod, WizardInput::Select) => {
                let gain = HitPointGain::resolve(
                    self.highlighted(),
                    die,
                    constitution_modifier,
                    |min, max| random.gen_range(min, max),
                );
                pending.set_hit_point_increase(gain.total);
                self.phase = HitPointPhase::Locked(gain);
                tracing::debug!(
                    method = ?gain.method,
                    raw = gain.raw,
                    total = gain.total,
                    "Hit point gain locked"
                );
                StepAction::Stay
            }
            // Nothing has been decided yet, so backing out ends the run.
            (HitPointPhase::ChoosingMethod, WizardInput::Back) => StepAction::Abandon,
            (HitPointPhase::Locked(_), WizardInput::Select) => StepAction::Advance,
            (HitPointPhase::Locked(_), WizardInput::Back) => {
                self.reset(pending);
                StepAction::Stay
            }
            _ => StepAction::Stay,
        }
    }

    /// Back to choosing a method, discarding any staged gain.
    pub(crate) fn reset(&mut self, pending: &mut PendingChanges) {
        self.phase = HitPointPhase::ChoosingMethod;
        pending.clear_hit_points();
    }
}
