//! Layered client configuration loaded with figment.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. A TOML file (`facility-tasks.toml` in the working directory, or an
//!    explicit path)
//! 3. Environment variables with the `FACILITY_` prefix, `__` separating
//!    sections (`FACILITY_API__BASE_URL` maps to `api.base_url`)

mod error;

pub use error::ConfigError;

use crate::session::domain::LocationId;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "FACILITY_";

/// Default configuration file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "facility-tasks.toml";

const fn default_timeout_secs() -> u64 {
    30
}

fn default_base_url() -> String {
    "http://localhost:8000/api/".to_owned()
}

/// Remote API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout enforced by the transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Session defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Location selected at sign-in when the viewer may access it.
    #[serde(default)]
    pub default_location: Option<LocationId>,
}

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session defaults.
    #[serde(default)]
    pub session: SessionConfig,
}

impl ClientConfig {
    /// Loads configuration from defaults, `facility-tasks.toml` and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or the merged
    /// values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Loads configuration using `path` as the TOML layer.
    ///
    /// A missing file is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or the merged
    /// values fail validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path.as_ref()).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the figment provider chain.
    ///
    /// Public so callers can layer extra providers on top.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Checks merged values for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty base URL or a zero
    /// timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_owned(),
                reason: "must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }
}
