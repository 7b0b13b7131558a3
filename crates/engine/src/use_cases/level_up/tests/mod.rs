//! Wizard tests driven purely through inputs.
//!
//! Tests cover:
//! - End-to-end level-ups for each step combination
//! - Backward navigation and re-entry resets
//! - Error-state wizards and commit/save failure handling


use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use levelup_domain::{
    Ability, AbilityScores, Character, CharacterName, ClassData, LevelUpStep,
};

use super::{LevelUp, LevelUpWizard, WizardInput, WizardSignal};
use crate::infrastructure::clock::{FixedClock, FixedRandom, SequenceRandom};
use crate::infrastructure::content::SrdClassCatalog;
use crate::infrastructure::ports::{
    CatalogError, ClassCatalog, MockCharacterRepo, MockClassCatalog, RandomPort, RepoError,
};

use WizardInput::{Back, Down, Left, Select, Tab, Up};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 18, 0, 0).unwrap()
}

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 2, 9, 30, 0).unwrap()
}

fn character(class: &str, level: u8, abilities: AbilityScores) -> Character {
    Character::new(
        CharacterName::new("Kethra").unwrap(),
        class,
        abilities,
        12,
        created_at(),
    )
    .with_level(level)
}

fn fighter(level: u8) -> Character {
    character(
        "Fighter",
        level,
        AbilityScores::uniform(10)
            .with(Ability::Str, 14)
            .with(Ability::Con, 14),
    )
}

fn srd_class(name: &str) -> ClassData {
    SrdClassCatalog::new().find_class(name).unwrap()
}

/// Store that must be saved to exactly once.
fn saving_repo() -> MockCharacterRepo {
    let mut repo = MockCharacterRepo::new();
    repo.expect_save().times(1).returning(|_| Ok(()));
    repo
}

/// Store that must never be written.
fn untouched_repo() -> MockCharacterRepo {
    let mut repo = MockCharacterRepo::new();
    repo.expect_save().never();
    repo
}

fn level_up_with(
    catalog: impl ClassCatalog + 'static,
    repo: MockCharacterRepo,
    random: impl RandomPort + 'static,
) -> LevelUp {
    LevelUp::new(
        Arc::new(catalog),
        Arc::new(repo),
        Arc::new(random),
        Arc::new(FixedClock(now())),
        20,
    )
}

fn level_up(repo: MockCharacterRepo, random: impl RandomPort + 'static) -> LevelUp {
    level_up_with(SrdClassCatalog::new(), repo, random)
}

/// Feed inputs in order and return the last signal.
fn press(wizard: &mut LevelUpWizard, inputs: &[WizardInput]) -> WizardSignal {
    let mut signal = WizardSignal::Continue;
    for input in inputs {
        signal = wizard.handle_input(*input).unwrap();
    }
    signal
}

fn type_text(wizard: &mut LevelUpWizard, text: &str) {
    for c in text.chars() {
        wizard.handle_input(WizardInput::Char(c)).unwrap();
    }
}

/// Lock in the Average hit point gain and move past the step.
fn take_average(wizard: &mut LevelUpWizard) {
    assert_eq!(wizard.current_step(), LevelUpStep::HitPoints);
    press(wizard, &[Down, Select, Select]);
}

/// Move the ASI cursor down to the "Continue" row and press it.
fn asi_continue(wizard: &mut LevelUpWizard) -> WizardSignal {
    press(wizard, &[Down; 6]);
    press(wizard, &[Select])
}
