//! Environment-backed engine settings.

use std::path::PathBuf;

use thiserror::Error;

/// Storage root for saved players and the item catalog.
pub const DATA_DIR_ENV: &str = "THANGORODRIM_DATA_DIR";
/// Optional `u64` seed; when set, dice are deterministic.
pub const RNG_SEED_ENV: &str = "THANGORODRIM_RNG_SEED";
/// Default tracing filter, used when `RUST_LOG` is unset.
pub const LOG_FILTER_ENV: &str = "THANGORODRIM_LOG";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_LOG_FILTER: &str = "thangorodrim_engine=info";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("THANGORODRIM_RNG_SEED must be an unsigned 64-bit integer, got '{0}'")]
    InvalidSeed(String),
}

/// Runtime configuration for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub data_dir: PathBuf,
    pub rng_seed: Option<u64>,
    pub log_filter: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            rng_seed: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EngineSettings {
    /// Load from the process environment, after reading `.env` if one exists.
    pub fn from_env() -> Result<Self, SettingsError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let data_dir = get(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.into());
        let log_filter = get(LOG_FILTER_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.into());
        let rng_seed = get(RNG_SEED_ENV)
            .map(|raw| raw.parse::<u64>().map_err(|_| SettingsError::InvalidSeed(raw)))
            .transpose()?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            rng_seed,
            log_filter,
        })
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = EngineSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.log_filter, "thangorodrim_engine=info");
    }

    #[test]
    fn test_reads_overrides() {
        let settings = EngineSettings::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/srv/saves"),
            (RNG_SEED_ENV, " 1234 "),
            (LOG_FILTER_ENV, "thangorodrim_engine=debug"),
        ]))
        .unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/srv/saves"));
        assert_eq!(settings.rng_seed, Some(1234));
        assert_eq!(settings.log_filter, "thangorodrim_engine=debug");
    }

    #[test]
    fn test_blank_seed_is_unset() {
        let settings = EngineSettings::from_lookup(lookup(&[(RNG_SEED_ENV, "  ")])).unwrap();
        assert_eq!(settings.rng_seed, None);
    }

    #[test]
    fn test_bad_seed_is_rejected() {
        assert_eq!(
            EngineSettings::from_lookup(lookup(&[(RNG_SEED_ENV, "-3")])).unwrap_err(),
            SettingsError::InvalidSeed("-3".to_string())
        );
    }
}
