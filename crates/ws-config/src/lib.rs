//! # ws-config
//!
//! Layered configuration loading for wsreg using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WSREG_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `wsreg.toml` in the working directory
//! 4. User-level `~/.config/wsreg/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `WSREG_SHEETS__PRIVATE_KEY` -> `sheets.private_key`,
//! `WSREG_WEBHOOK__PASSWORD` -> `webhook.password`. Workshops are keyed by
//! slug, and slugs usually contain dashes, so the registry itself belongs in
//! TOML:
//!
//! ```toml
//! [workshops.bizz-club-sm]
//! name = "Workshop BIZZ.CLUB Satu Mare"
//! sheet_id = "1doz..."
//! webhook_url = "https://hooks.example.com/webhook/..."
//!
//! [workshops.bizz-club-sm.payment_links]
//! member = "https://buy.stripe.com/..."
//! standard = "https://buy.stripe.com/..."
//! ```

mod error;
mod server;
mod sheets;
mod webhook;
mod workshops;

pub use error::ConfigError;
pub use server::ServerConfig;
pub use sheets::SheetsConfig;
pub use webhook::WebhookConfig;
pub use workshops::{PaymentLinks, WorkshopConfig, WorkshopRegistry};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "wsreg.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WsConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub workshops: WorkshopRegistry,
}

impl WsConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or the workshop
    /// registry is incomplete.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment(explicit))
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env is normal in production.
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Extract and finish a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or the workshop registry
    /// is incomplete.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let mut config: Self = figment.extract()?;
        config.workshops.fill_slugs();
        config.workshops.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("WSREG_").split("__"))
    }

    /// Fail unless the spreadsheet credentials are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for the `sheets` section.
    pub fn require_sheets(&self) -> Result<&SheetsConfig, ConfigError> {
        if self.sheets.is_configured() {
            Ok(&self.sheets)
        } else {
            Err(ConfigError::NotConfigured {
                section: "sheets".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wsreg").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = WsConfig::default();
        assert!(!config.sheets.is_configured());
        assert!(!config.webhook.is_configured());
        assert!(config.workshops.is_empty());
        assert_eq!(config.server.bind, "0.0.0.0:3000");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config =
                WsConfig::from_figment(&WsConfig::figment(None)).map_err(|e| e.to_string())?;
            assert!(!config.sheets.is_configured());
            assert_eq!(config.sheets.read_retries, 2);
            Ok(())
        });
    }

    #[test]
    fn require_sheets_reports_section() {
        let err = WsConfig::default().require_sheets().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { ref section } if section == "sheets"));
    }
}
