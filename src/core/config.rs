//! Configuration for the Dentistry API
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! environment variables, then CLI flags. A missing or unusable database
//! configuration is not an error here: the server starts without a store and
//! reports the problem on the diagnostic endpoint.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LIST_LIMIT, DEFAULT_PORT, DIAGNOSTIC_COLLECTION_SAMPLE};
use crate::types::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Document store configuration
    pub database: DatabaseConfig,

    /// Request handling defaults
    pub api: ApiConfig,

    /// Diagnostic endpoint configuration
    pub diagnostics: DiagnosticsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: IpAddr,

    /// Port to bind
    pub port: u16,
}

/// Document store configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Store URL, e.g. `memory://local` or `file:///var/lib/dentistry`
    pub url: Option<String>,

    /// Database name within the store
    pub name: Option<String>,
}

/// Request handling defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Records returned by listings without an explicit `limit`
    pub default_list_limit: usize,
}

/// Diagnostic endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Include collection names in `/test`
    pub expose_collections: bool,

    /// How many collection names to include
    pub max_collections: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { default_list_limit: DEFAULT_LIST_LIMIT }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            expose_collections: true,
            max_collections: DIAGNOSTIC_COLLECTION_SAMPLE,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl ServerConfig {
    /// Address the HTTP server binds to
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseConfig {
    /// URL and name, when both are set and non-empty
    pub fn connection(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|s| !s.trim().is_empty())?;
        let name = self.name.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((url, name))
    }
}

impl Config {
    /// Load configuration from an optional file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides, reading through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("Invalid PORT '{}': {}", port, e)))?;
        }

        if let Some(host) = lookup("HOST") {
            self.server.host = host
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("Invalid HOST '{}': {}", host, e)))?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
        }

        if let Some(name) = lookup("DATABASE_NAME") {
            self.database.name = Some(name);
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level.to_ascii_lowercase();
        }

        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format.to_ascii_lowercase();
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(Error::config(format!("Invalid log level: {}", other))),
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => return Err(Error::config(format!("Invalid log format: {}", other))),
        }

        if self.api.default_list_limit == 0 {
            return Err(Error::config("api.default_list_limit must be at least 1"));
        }

        Ok(())
    }
}
