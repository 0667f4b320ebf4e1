//! Selector configuration, read once when a selector is built.

use crate::error::{ConfigError, SelectorError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Pool used when none is configured.
pub const DEFAULT_POOL: &str = "general";

/// Refresh period used when none is configured.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Shortest refresh period accepted. Anything faster hammers the backend.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Prefix of environment variables overriding file settings,
/// e.g. `DISCOVERY_SELECTOR_POOL=canary`.
pub const ENV_PREFIX: &str = "DISCOVERY_SELECTOR";

fn default_pool() -> String {
    DEFAULT_POOL.to_string()
}

fn default_refresh_interval_ms() -> u64 {
    duration_to_millis(DEFAULT_REFRESH_INTERVAL)
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Configuration of a single caching selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSelectorConfig {
    /// The pool this selector watches.
    #[serde(default = "default_pool")]
    pool: String,
    /// Period between two refreshes, in milliseconds.
    ///
    /// The `config` crate lowercases keys, so `refreshIntervalMs` arrives as
    /// `refreshintervalms`.
    #[serde(default = "default_refresh_interval_ms", alias = "refreshintervalms")]
    refresh_interval_ms: u64,
}

impl Default for ServiceSelectorConfig {
    fn default() -> Self {
        Self {
            pool: default_pool(),
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

impl ServiceSelectorConfig {
    pub fn new(pool: &str) -> Self {
        Self::default().with_pool(pool)
    }

    pub fn with_pool(mut self, pool: &str) -> Self {
        self.pool = pool.to_string();
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval_ms = duration_to_millis(interval);
        self
    }

    pub fn pool(&self) -> &str {
        &self.pool
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Checks the configuration can drive a selector.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the pool is non-blank and the interval is at least
    ///   [`MIN_REFRESH_INTERVAL`].
    /// * `Err(SelectorError)` otherwise.
    pub fn validate(&self) -> Result<(), SelectorError> {
        if self.pool.trim().is_empty() {
            return Err(SelectorError::EmptyPool);
        }
        let interval = self.refresh_interval();
        if interval < MIN_REFRESH_INTERVAL {
            return Err(SelectorError::IntervalTooShort(interval, MIN_REFRESH_INTERVAL));
        }
        Ok(())
    }

    /// Loads a configuration file, layered with environment overrides.
    ///
    /// The file format is picked from the extension (TOML, JSON, YAML...).
    /// Variables prefixed with [`ENV_PREFIX`] win over the file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file.
    ///
    /// # Returns
    ///
    /// * `Ok(ServiceSelectorConfig)` once parsed and validated.
    /// * `Err(ConfigError)` if the file cannot be read or the result is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }
}
