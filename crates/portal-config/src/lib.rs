//! # portal-config
//!
//! Layered configuration loading for the portal sync engine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PORTAL_*` prefix, `__` as separator)
//! 2. Project-level `.portal/config.toml`
//! 3. User-level `~/.config/portal/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PORTAL_GATEWAY__BASE_URL` -> `gateway.base_url`,
//! `PORTAL_GATEWAY__ENDPOINTS__GRADES` -> `gateway.endpoints.grades`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use portal_config::PortalConfig;
//!
//! let config = PortalConfig::load_with_dotenv().expect("config");
//! if !config.gateway.has_session() {
//!     eprintln!("no session cookie configured");
//! }
//! ```

mod display;
mod error;
mod gateway;
mod store;

pub use display::DisplayConfig;
pub use error::ConfigError;
pub use gateway::{EndpointPaths, GatewayConfig};
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use portal_core::display::is_valid_date_format;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl PortalConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
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

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".portal/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PORTAL_").split("__"))
    }

    /// Reject values that would make every sync fail.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gateway.request_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.gateway.base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "gateway.base_url".into(),
                reason: "must not be empty".into(),
            });
        }
        if !is_valid_date_format(&self.display.date_format) {
            return Err(ConfigError::InvalidValue {
                field: "display.date_format".into(),
                reason: format!(
                    "'{}' is not a valid strftime pattern",
                    self.display.date_format
                ),
            });
        }
        if self.store.path.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("portal").join("config.toml"))
    }
}
