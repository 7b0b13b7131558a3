//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    content::{JsonClassCatalog, SrdClassCatalog},
    persistence::JsonCharacterRepo,
    ports::{CharacterRepo, ClassCatalog, ClockPort, RandomPort},
    settings::EngineSettings,
};
use crate::use_cases::LevelUp;

/// Main application state.
///
/// Holds the port implementations and the use cases built on them.
pub struct App {
    pub settings: EngineSettings,
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for the injected port implementations.
pub struct Repositories {
    pub catalog: Arc<dyn ClassCatalog>,
    pub character: Arc<dyn CharacterRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub level_up: LevelUp,
}

impl App {
    /// Wire the production adapters from `settings`.
    pub fn new(settings: EngineSettings) -> Self {
        let catalog: Arc<dyn ClassCatalog> = match &settings.data_dir {
            Some(dir) => {
                let catalog = JsonClassCatalog::new(dir);
                if !catalog.validate_path() {
                    tracing::warn!(
                        path = %dir.display(),
                        "Data directory has no classes.json; class lookups will fail"
                    );
                }
                tracing::info!(path = %dir.display(), "Using JSON class catalog");
                Arc::new(catalog)
            }
            None => {
                tracing::info!("Using bundled SRD class catalog");
                Arc::new(SrdClassCatalog::new())
            }
        };
        let character: Arc<dyn CharacterRepo> =
            Arc::new(JsonCharacterRepo::new(&settings.characters_dir));

        Self::with_ports(
            settings,
            catalog,
            character,
            Arc::new(SystemRandom::new()),
            Arc::new(SystemClock::new()),
        )
    }

    /// Wire the app from explicit port implementations.
    pub fn with_ports(
        settings: EngineSettings,
        catalog: Arc<dyn ClassCatalog>,
        character: Arc<dyn CharacterRepo>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let level_up = LevelUp::new(
            catalog.clone(),
            character.clone(),
            random,
            clock,
            settings.max_level,
        );

        Self {
            settings,
            repositories: Repositories { catalog, character },
            use_cases: UseCases { level_up },
        }
    }
}
