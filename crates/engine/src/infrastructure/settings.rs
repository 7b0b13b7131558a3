//! Engine settings loaded from the environment.

use std::path::PathBuf;

pub const DEFAULT_CHARACTERS_DIR: &str = "characters";
/// Highest level the class tables describe; also the default cap.
pub const DEFAULT_MAX_LEVEL: u8 = 20;

const DATA_DIR_VAR: &str = "LEVELUP_DATA_DIR";
const CHARACTERS_DIR_VAR: &str = "LEVELUP_CHARACTERS_DIR";
const MAX_LEVEL_VAR: &str = "LEVELUP_MAX_LEVEL";

/// Runtime configuration for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Directory holding `classes.json` and `feats.json`; `None` uses the bundled SRD data.
    pub data_dir: Option<PathBuf>,
    /// Directory of the JSON character store.
    pub characters_dir: PathBuf,
    /// Highest level a character may reach, at most `DEFAULT_MAX_LEVEL`.
    pub max_level: u8,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            characters_dir: PathBuf::from(DEFAULT_CHARACTERS_DIR),
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}

impl EngineSettings {
    /// Create settings from environment variables.
    ///
    /// Uses `LEVELUP_DATA_DIR`, `LEVELUP_CHARACTERS_DIR` and `LEVELUP_MAX_LEVEL`,
    /// falling back to defaults if not set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let characters_dir = lookup(CHARACTERS_DIR_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CHARACTERS_DIR));

        let max_level = match lookup(MAX_LEVEL_VAR) {
            None => DEFAULT_MAX_LEVEL,
            Some(raw) => match raw.trim().parse::<u8>() {
                Ok(level) if (1..=DEFAULT_MAX_LEVEL).contains(&level) => level,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = DEFAULT_MAX_LEVEL,
                        "Invalid {}, using default",
                        MAX_LEVEL_VAR
                    );
                    DEFAULT_MAX_LEVEL
                }
            },
        };

        Self {
            data_dir,
            characters_dir,
            max_level,
        }
    }
}
