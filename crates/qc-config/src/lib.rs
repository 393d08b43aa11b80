//! # qc-config
//!
//! Layered configuration loading for qualcode using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QUALCODE_*` prefix, `__` as separator)
//! 2. Project-level `.qualcode/config.toml`
//! 3. User-level `~/.config/qualcode/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `QUALCODE_SERVER__BIND` -> `server.bind`,
//! `QUALCODE_AUTH__ALLOWED_EMAILS` -> `auth.allowed_emails`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use qc_config::QcConfig;
//!
//! let config = QcConfig::load_with_dotenv().expect("config");
//! println!("API listens on {}", config.server.bind);
//! ```

mod auth;
mod database;
mod error;
mod general;
mod server;

pub use auth::AuthConfig;
pub use database::{DEFAULT_DB_FILE, DatabaseConfig};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding per-project state (database, config).
pub const PROJECT_DIR: &str = ".qualcode";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QcConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl QcConfig {
    /// Load configuration from all sources (TOML files + environment variables),
    /// with the project config looked up relative to the current directory.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for_project(Path::new("."))
    }

    /// Load configuration using `<project_root>/.qualcode/config.toml` as the
    /// project layer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` on parse or type errors.
    pub fn load_for_project(project_root: &Path) -> Result<Self, ConfigError> {
        Self::figment(project_root)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` on parse or type errors.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("QUALCODE_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("qualcode").join("config.toml"))
    }
}
