//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across ports to fulfill user stories.

pub mod level_up;

// Re-export main types
pub use level_up::{LevelUp, LevelUpError, LevelUpWizard, WizardInput, WizardSignal, WizardView};
