//! Server configuration loading.
//!
//! This module provides the [`ServerConfig`] type: where the HTTP server
//! listens and where the JSON data files are stored.

use serde::Deserialize;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

/// Environment variable naming the YAML configuration file.
const CONFIG_PATH_VAR: &str = "ASSMAT_CONFIG";
/// Environment variable overriding the bind address.
const BIND_VAR: &str = "ASSMAT_BIND";
/// Environment variable overriding the data directory.
const DATA_DIR_VAR: &str = "ASSMAT_DATA_DIR";

const DEFAULT_CONFIG_PATH: &str = "./config/server.yaml";

/// Server configuration.
///
/// Loaded from a YAML file of the form:
///
/// ```text
/// bind_address: "0.0.0.0:8080"
/// data_dir: "/var/lib/assmat"
/// ```
///
/// Both keys are optional. A missing file is not an error: the defaults
/// (`127.0.0.1:3000`, `./data`) are used instead.
///
/// # Example
///
/// ```
/// use assmat_engine::config::ServerConfig;
///
/// let config = ServerConfig::default();
/// assert_eq!(config.bind_address.port(), 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub bind_address: SocketAddr,
    /// Directory holding `settings.json` and the month files.
    pub data_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from the environment.
    ///
    /// Reads the YAML file named by `ASSMAT_CONFIG` (default
    /// `./config/server.yaml`), then applies the `ASSMAT_BIND` and
    /// `ASSMAT_DATA_DIR` overrides.
    ///
    /// # Returns
    ///
    /// Returns an error if the file exists but cannot be parsed, or if
    /// `ASSMAT_BIND` is not a valid socket address.
    pub fn from_env() -> EngineResult<Self> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load(&path)?;

        if let Ok(bind) = env::var(BIND_VAR) {
            config.bind_address = bind.parse().map_err(|_| EngineError::ConfigParseError {
                path: BIND_VAR.to_string(),
                message: format!("invalid socket address '{}'", bind),
            })?;
        }
        if let Ok(data_dir) = env::var(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(data_dir);
        }

        Ok(config)
    }

    /// Loads configuration from a YAML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Example
    ///
    /// ```
    /// use assmat_engine::config::ServerConfig;
    ///
    /// let config = ServerConfig::load("/nonexistent/server.yaml")?;
    /// assert_eq!(config, ServerConfig::default());
    /// # Ok::<(), assmat_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        if !path.exists() {
            info!(path = %path_str, "No server configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| EngineError::ConfigUnreadable {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            }
        })?;
        debug!(path = %path_str, ?config, "Loaded server configuration");

        Ok(config)
    }
}
