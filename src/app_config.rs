//! Application configuration from file and environment variables
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables (prefixed with PAGE_ANALYZER_)
//! 2. Config file (config.toml)
//! 3. Default values
//!
//! Secrets (the database connection string and the session signing key) are
//! not part of this file. They are read from `DATABASE_URL` and `SECRET_KEY`.
//!
//! The configuration is loaded once at startup by the binary, which builds
//! the `Fetcher` from `fetch` and binds to `server.bind`; nothing mutates it
//! afterwards. Nested keys use a double underscore in environment variables,
//! e.g. `PAGE_ANALYZER_SERVER__BIND` or `PAGE_ANALYZER_FETCH__TIMEOUT_SECS`.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Outbound fetch configuration used when checking a page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every check
    pub user_agent: String,
    /// Maximum number of redirects followed before giving up
    pub max_redirects: usize,
    /// Largest response body read during a check; bigger pages fail the check
    pub max_body_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; PageAnalyzerBot/1.0)".to_string(),
            max_redirects: 5,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub fetch: FetchConfig,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &str) -> Result<Self, ConfigError> {
        use config::FileFormat;

        let config = Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(File::new(path, FileFormat::Toml).required(false))
            // e.g., PAGE_ANALYZER_SERVER__BIND, PAGE_ANALYZER_FETCH__TIMEOUT_SECS
            .add_source(
                Environment::with_prefix("PAGE_ANALYZER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// Load the configuration, falling back to defaults when the file is broken.
pub fn init() -> AppConfig {
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config file, using defaults: {}", e);
        AppConfig::default()
    });
    log::info!(
        "Configuration loaded: server.bind = {}, fetch.timeout_secs = {}",
        config.server.bind,
        config.fetch.timeout_secs
    );
    config
}
