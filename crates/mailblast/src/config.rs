//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MAILBLAST_CONFIG` (environment variable)
//! 2. `~/.config/mailblast/config.toml` (Linux/macOS)
//!    `%APPDATA%\mailblast\config.toml` (Windows)
//! 3. Built-in defaults
//!
//! A file that exists but fails to parse is reported with a warning and
//! the defaults are used.

use std::path::PathBuf;

use mailblast_api::SendType;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings.
    pub server: ServerConfig,
    /// Send defaults.
    pub send: SendConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the advanced-email backend.
    pub base_url: String,
}

/// Send defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SendConfig {
    /// Default delivery mode: "individual", "cc" or "bcc".
    pub default_type: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
        }
    }
}

impl Default for SendConfig {
    fn default() -> Self {
        Self {
            default_type: "individual".to_owned(),
        }
    }
}

impl Config {
    /// Loads configuration from the usual locations, falling back to
    /// defaults when no file exists or it cannot be read.
    #[must_use]
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents, &path.display().to_string()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                warn!("could not read {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parses TOML contents, warning and falling back to defaults on a
    /// parse error.
    fn parse(contents: &str, origin: &str) -> Self {
        match toml::from_str(contents) {
            Ok(config) => config,
            Err(err) => {
                warn!("invalid config at {origin}: {err}; using defaults");
                Self::default()
            }
        }
    }

    fn path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("MAILBLAST_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("mailblast").join("config.toml"))
    }

    /// The configured default send type; an unrecognized value warns and
    /// falls back to individual.
    #[must_use]
    pub fn default_send_type(&self) -> SendType {
        self.send.default_type.parse().unwrap_or_else(|err| {
            warn!("{err}; using individual");
            SendType::Individual
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:5000");
        assert_eq!(config.default_send_type(), SendType::Individual);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse("[server]\nbase_url = \"http://mail.interno:8080\"\n", "test");
        assert_eq!(config.server.base_url, "http://mail.interno:8080");
        assert_eq!(config.send.default_type, "individual");
    }

    #[test]
    fn send_type_from_file() {
        let config = Config::parse("[send]\ndefault_type = \"bcc\"\n", "test");
        assert_eq!(config.default_send_type(), SendType::Bcc);
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let config = Config::parse("server = not toml", "test");
        assert_eq!(config.server.base_url, "http://localhost:5000");
    }

    #[test]
    fn unknown_send_type_falls_back_to_individual() {
        let config = Config::parse("[send]\ndefault_type = \"carbon\"\n", "test");
        assert_eq!(config.default_send_type(), SendType::Individual);
    }
}
