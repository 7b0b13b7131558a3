//! Level advancement: step planning, staged decisions, and commit.
//!
//! Nothing here touches the character until [`apply_level_up`] runs.

mod apply;
mod hit_points;
mod pending;
mod steps;

pub use apply::apply_level_up;
pub use hit_points::{HitPointGain, HitPointMethod};
pub use pending::PendingChanges;
pub use steps::{
    error_plan, gained_features, needs_subclass, plan_steps, spell_slots_change, LevelUpStep,
    StepSequence,
};
