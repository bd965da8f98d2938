//! # cscan-config
//!
//! Layered configuration loading for cscan using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CSCAN_*` prefix, `__` as separator)
//! 2. Project-level `.cscan/config.toml`
//! 3. User-level `~/.config/cscan/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CSCAN_SOURCE__SUFFIXES` -> `source.suffixes` and
//! `CSCAN_SOURCE__RELATIVE_TO` -> `source.relative_to`.
//!
//! # Usage
//!
//! ```no_run
//! use cscan_config::ScanConfig;
//!
//! let config = ScanConfig::load_with_dotenv().expect("config");
//! for suffix in &config.source.suffixes {
//!     println!("scanning *{suffix}");
//! }
//! ```

mod error;
mod source;

pub use error::ConfigError;
pub use source::{SourceConfig, is_valid_suffix};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub source: SourceConfig,
}

impl ScanConfig {
    /// Load and validate configuration from TOML files and the environment.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    /// Returns [`ConfigError::Figment`] when a source fails to parse and
    /// [`ConfigError::InvalidValue`] when the merged values are unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// A missing `.env` is not an error.
    ///
    /// # Errors
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can extract from it directly or layer more providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".cscan/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("CSCAN_").split("__"))
    }

    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cscan").join("config.toml"))
    }
}
