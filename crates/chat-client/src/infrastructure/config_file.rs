//! Optional TOML config file for the client.
//!
//! Every key is optional; missing keys keep whatever the caller already
//! had.  Example:
//!
//! ```toml
//! ws_url = "ws://192.168.1.20:3030/ws"
//! stop_url = "http://192.168.1.20:3030/stop"
//! stop_timeout_secs = 2
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ClientConfig;

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    pub ws_url: Option<String>,
    pub stop_url: Option<String>,
    pub stop_timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Overwrites the fields of `config` that this file sets.
    pub fn apply_to(self, config: &mut ClientConfig) {
        if let Some(ws_url) = self.ws_url {
            config.ws_url = ws_url;
        }
        if let Some(stop_url) = self.stop_url {
            config.stop_url = stop_url;
        }
        if let Some(secs) = self.stop_timeout_secs {
            config.stop_timeout = Duration::from_secs(secs);
        }
    }
}

/// Parses config file content.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] on invalid TOML or a wrongly typed key.
pub fn parse_config(text: &str) -> Result<ConfigFile, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Reads and parses the config file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, or
/// [`ConfigError::Parse`] if it is not valid.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
