//! Level-up use case.
//!
//! [`LevelUp`] plans the steps for a character's next level and hands back a
//! [`LevelUpWizard`]. The wizard consumes one [`WizardInput`] at a time,
//! routes it to the current step's sub-state machine, and collects every
//! decision in a [`PendingChanges`] staging area. The character is mutated
//! exactly once, when the Confirm step is approved, and then saved.

mod ability_feat;
mod error;
mod hit_points;
mod input;
mod review;
mod subclass;
mod view;

#[cfg(test)]
mod tests;

pub use ability_feat::{
    AsiPattern, AsiState, FeatPhase, FeatState, ImprovementState, ImprovementTab, CONTINUE_ROW,
};
pub use error::LevelUpError;
pub use hit_points::{HitPointPhase, HitPointState};
pub use input::{WizardInput, WizardSignal};
pub use review::FeatureReviewState;
pub use subclass::{SubclassPhase, SubclassState};
pub use view::{
    AbilityRow, FeatPromptView, ImprovementView, ListRow, SlotRow, StepView, WizardView,
};

use std::sync::Arc;

use levelup_domain::{
    apply_level_up, error_plan, gained_features, plan_steps, Character, CharacterFeature,
    CharacterId, ClassData, Feat, FeatureSource, LevelUpStep, PendingChanges, StepSequence,
};

use crate::infrastructure::ports::{CharacterRepo, ClassCatalog, ClockPort, RandomPort};

/// Outcome of one input inside a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StepAction {
    Stay,
    Advance,
    Retreat,
    Abandon,
    /// Validation message; nothing changed
    Reject(String),
    Commit,
}

// =============================================================================
// Use Case
// =============================================================================

/// Starts level-up wizards with the configured catalog, store and dice.
pub struct LevelUp {
    catalog: Arc<dyn ClassCatalog>,
    repo: Arc<dyn CharacterRepo>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
    max_level: u8,
}

impl LevelUp {
    pub fn new(
        catalog: Arc<dyn ClassCatalog>,
        repo: Arc<dyn CharacterRepo>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
        max_level: u8,
    ) -> Self {
        Self {
            catalog,
            repo,
            random,
            clock,
            max_level,
        }
    }

    /// Load a character from the store and start a wizard for it.
    pub fn start_by_id(&self, character_id: CharacterId) -> Result<LevelUpWizard, LevelUpError> {
        let character = self
            .repo
            .get(character_id)?
            .ok_or(LevelUpError::CharacterNotFound(character_id))?;
        Ok(self.start(character))
    }

    /// Start a wizard for `character`.
    ///
    /// Never fails: a missing class or a character already at the level cap
    /// yields a wizard in the error state, whose only exit leaves the
    /// character untouched.
    pub fn start(&self, character: Character) -> LevelUpWizard {
        let from_level = character.level();

        let class = if from_level >= self.max_level {
            Err(format!(
                "{} is already at the maximum level ({})",
                character.name(),
                self.max_level
            ))
        } else {
            self.catalog
                .find_class(character.class_name())
                .map_err(|e| e.to_string())
        };

        let (class, error, feats, steps) = match class {
            Ok(class) => {
                let feats = self.catalog.find_feats().unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Feat list unavailable, feat tab will be empty");
                    Vec::new()
                });
                let steps = plan_steps(
                    &class,
                    from_level,
                    from_level.saturating_add(1),
                    character.subclass(),
                );
                (Some(class), None, feats, steps)
            }
            Err(message) => {
                tracing::warn!(
                    character_id = %character.id(),
                    class = %character.class_name(),
                    reason = %message,
                    "Level-up cannot proceed"
                );
                (None, Some(message), Vec::new(), error_plan())
            }
        };

        tracing::info!(
            character_id = %character.id(),
            from_level,
            steps = ?steps,
            "Level-up started"
        );

        LevelUpWizard {
            character,
            from_level,
            class,
            error,
            feats,
            sequence: StepSequence::new(steps),
            pending: PendingChanges::new(),
            hit_points: HitPointState::default(),
            subclass: SubclassState::default(),
            improvement: ImprovementState::default(),
            features: FeatureReviewState::default(),
            notice: None,
            committed: false,
            repo: self.repo.clone(),
            random: self.random.clone(),
            clock: self.clock.clone(),
        }
    }
}

// =============================================================================
// Wizard
// =============================================================================

/// One in-progress level advancement.
///
/// Owns the character until the run ends; take it back with
/// [`LevelUpWizard::into_character`].
pub struct LevelUpWizard {
    character: Character,
    from_level: u8,
    /// `None` in the error state
    class: Option<ClassData>,
    error: Option<String>,
    feats: Vec<Feat>,
    sequence: StepSequence,
    pending: PendingChanges,

    // Per-step state
    hit_points: HitPointState,
    subclass: SubclassState,
    improvement: ImprovementState,
    features: FeatureReviewState,

    notice: Option<String>,
    committed: bool,

    repo: Arc<dyn CharacterRepo>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl LevelUpWizard {
    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn into_character(self) -> Character {
        self.character
    }

    pub fn from_level(&self) -> u8 {
        self.from_level
    }

    pub fn to_level(&self) -> u8 {
        self.from_level.saturating_add(1)
    }

    pub fn steps(&self) -> &[LevelUpStep] {
        self.sequence.steps()
    }

    pub fn current_step(&self) -> LevelUpStep {
        self.sequence.current()
    }

    pub fn pending(&self) -> &PendingChanges {
        &self.pending
    }

    /// Validation message from the last input, cleared by the next one.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Why the wizard could not start, if it is in the error state.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn hit_point_state(&self) -> &HitPointState {
        &self.hit_points
    }

    pub fn subclass_state(&self) -> &SubclassState {
        &self.subclass
    }

    pub fn improvement_state(&self) -> &ImprovementState {
        &self.improvement
    }

    /// Features the Feature Review step lists: class features at the new
    /// level, the current subclass's new features, then any staged subclass
    /// features.
    pub fn review_features(&self) -> Vec<CharacterFeature> {
        let Some(class) = self.class.as_ref() else {
            return Vec::new();
        };
        let mut features = gained_features(class, self.to_level(), self.character.subclass());
        if let Some(subclass) = self.pending.subclass() {
            features.extend(self.pending.subclass_features().iter().map(|f| {
                CharacterFeature::new(&f.name, FeatureSource::Subclass(subclass.to_string()), f.level)
                    .with_description(&f.description)
            }));
        }
        features
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed one input to the wizard.
    ///
    /// Returns `Err` only when the commit itself fails. A failed save still
    /// leaves the character updated in memory and the wizard finished.
    pub fn handle_input(&mut self, input: WizardInput) -> Result<WizardSignal, LevelUpError> {
        if self.committed {
            return Ok(WizardSignal::Finished);
        }
        if matches!(input, WizardInput::Resize { .. }) {
            return Ok(WizardSignal::Continue);
        }
        self.notice = None;

        let Some(class) = self.class.as_ref() else {
            return Ok(match input {
                WizardInput::Select | WizardInput::Back => {
                    tracing::info!(character_id = %self.character.id(), "Level-up dismissed");
                    WizardSignal::Abandoned
                }
                _ => WizardSignal::Continue,
            });
        };

        let step = self.sequence.current();
        let to_level = self.to_level();
        let action = match step {
            LevelUpStep::HitPoints => self.hit_points.handle(
                input,
                class.hit_die(),
                self.character.constitution_modifier(),
                self.random.as_ref(),
                &mut self.pending,
            ),
            LevelUpStep::Subclass => {
                self.subclass.handle(input, class, to_level, &mut self.pending)
            }
            LevelUpStep::AbilityOrFeat => self.improvement.handle(
                input,
                self.character.abilities(),
                &self.feats,
                &mut self.pending,
            ),
            LevelUpStep::FeatureReview => {
                let count = self.review_features().len();
                self.features.handle(input, count)
            }
            LevelUpStep::SpellSlotReview => review::handle_spell_slots(input, &mut self.pending),
            LevelUpStep::Confirm => match input {
                WizardInput::Select => StepAction::Commit,
                WizardInput::Back => StepAction::Retreat,
                _ => StepAction::Stay,
            },
        };

        self.apply_action(step, action)
    }

    fn apply_action(
        &mut self,
        step: LevelUpStep,
        action: StepAction,
    ) -> Result<WizardSignal, LevelUpError> {
        match action {
            StepAction::Stay => Ok(WizardSignal::Continue),
            StepAction::Advance => {
                if self.sequence.advance() {
                    tracing::debug!(from = ?step, to = ?self.sequence.current(), "Step advanced");
                }
                Ok(WizardSignal::Continue)
            }
            StepAction::Retreat => {
                self.retreat(step);
                Ok(WizardSignal::Continue)
            }
            StepAction::Abandon => {
                tracing::info!(character_id = %self.character.id(), "Level-up abandoned");
                Ok(WizardSignal::Abandoned)
            }
            StepAction::Reject(message) => {
                tracing::debug!(step = ?step, reason = %message, "Input rejected");
                self.notice = Some(message);
                Ok(WizardSignal::Continue)
            }
            StepAction::Commit => self.commit(),
        }
    }

    /// Leave `step` backwards. Both the step being left and the step being
    /// re-entered drop their staged contribution.
    fn retreat(&mut self, step: LevelUpStep) {
        if !self.sequence.retreat() {
            return;
        }
        self.reset_step(step);
        let entered = self.sequence.current();
        self.reset_step(entered);
        tracing::debug!(from = ?step, to = ?entered, "Step retreated");
    }

    fn reset_step(&mut self, step: LevelUpStep) {
        match step {
            LevelUpStep::HitPoints => self.hit_points.reset(&mut self.pending),
            LevelUpStep::Subclass => self.subclass.reset(&mut self.pending),
            LevelUpStep::AbilityOrFeat => self.improvement.reset(&mut self.pending),
            LevelUpStep::FeatureReview => self.features.reset(),
            LevelUpStep::SpellSlotReview => self.pending.acknowledge_spell_slots(false),
            LevelUpStep::Confirm => {}
        }
    }

    // =========================================================================
    // Commit
    // =========================================================================

    fn commit(&mut self) -> Result<WizardSignal, LevelUpError> {
        let Some(class) = self.class.as_ref() else {
            return Ok(WizardSignal::Abandoned);
        };

        let advanced = apply_level_up(&mut self.character, class, &self.pending, self.clock.now())?;
        self.committed = true;

        tracing::info!(
            character_id = %self.character.id(),
            from_level = advanced.from,
            to_level = advanced.to,
            hit_points = self.pending.hit_point_increase(),
            subclass = ?self.pending.subclass(),
            feat = ?self.pending.feat().map(|f| f.id.as_str()),
            "Level-up committed"
        );

        if let Err(e) = self.repo.save(&self.character) {
            tracing::error!(
                character_id = %self.character.id(),
                error = %e,
                "Failed to save character after level-up"
            );
            return Err(e.into());
        }

        Ok(WizardSignal::Finished)
    }
}
