//! Hit point gain for one level.

use serde::{Deserialize, Serialize};

use crate::value_objects::HitDie;

/// How the hit die result is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPointMethod {
    Roll,
    Average,
}

impl HitPointMethod {
    pub const ALL: [HitPointMethod; 2] = [HitPointMethod::Roll, HitPointMethod::Average];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Roll => "Roll",
            Self::Average => "Take average",
        }
    }
}

/// A resolved hit point gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitPointGain {
    pub method: HitPointMethod,
    /// Die result before the Constitution modifier
    pub raw: i32,
    pub constitution_modifier: i32,
    /// Amount added to the character, never below 1
    pub total: i32,
}

impl HitPointGain {
    /// Resolve a gain. `rng` is only consulted for [`HitPointMethod::Roll`].
    pub fn resolve(
        method: HitPointMethod,
        die: HitDie,
        constitution_modifier: i32,
        rng: impl FnMut(i32, i32) -> i32,
    ) -> Self {
        let raw = match method {
            HitPointMethod::Roll => die.roll_with(rng),
            HitPointMethod::Average => die.average(),
        };
        Self {
            method,
            raw,
            constitution_modifier,
            total: (raw + constitution_modifier).max(1),
        }
    }
}
