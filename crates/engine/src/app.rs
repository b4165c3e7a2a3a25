//! Application state and composition.

use std::sync::Arc;

use thangorodrim_domain::RandomPort;

use crate::infrastructure::{
    logging::init_tracing,
    random::{SeededRandom, SystemRandom},
    settings::{EngineSettings, SettingsError},
    storage::JsonStore,
};
use crate::use_cases::{CharacterUseCases, ItemCatalog, ItemError};

/// Main application state.
///
/// Holds the adapters chosen from settings and the use cases built on them.
pub struct App {
    pub settings: EngineSettings,
    pub store: Arc<JsonStore>,
    pub random: Arc<dyn RandomPort>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub character: CharacterUseCases,
}

impl App {
    /// Wire the engine from explicit settings.
    pub fn new(settings: EngineSettings) -> Self {
        let random: Arc<dyn RandomPort> = match settings.rng_seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(SystemRandom::new()),
        };
        let store = Arc::new(JsonStore::new(settings.data_dir.clone()));

        let use_cases = UseCases {
            character: CharacterUseCases::new(store.clone(), random.clone()),
        };

        tracing::info!(
            data_dir = %settings.data_dir.display(),
            seeded = settings.rng_seed.is_some(),
            "Thangorodrim engine ready"
        );

        Self {
            settings,
            store,
            random,
            use_cases,
        }
    }

    /// Read settings from the environment, install tracing, then wire.
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = EngineSettings::from_env()?;
        init_tracing(&settings.log_filter);
        Ok(Self::new(settings))
    }

    /// Load the item catalog from the data directory.
    pub fn item_catalog(&self) -> Result<ItemCatalog, ItemError> {
        ItemCatalog::load(&self.store)
    }
}
