//! Configuration management for Tempo.
//!
//! Loads configuration from `${TEMPO_HOME}/config.toml` with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for Tempo configuration and data directories.
    //!
    //! `TEMPO_HOME` resolution order:
    //! 1. `TEMPO_HOME` environment variable (if set)
    //! 2. `~/.config/tempo` (default)

    use std::path::PathBuf;

    /// Returns the Tempo home directory.
    ///
    /// Checks `TEMPO_HOME` env var first, falls back to `~/.config/tempo`.
    pub fn tempo_home() -> PathBuf {
        if let Ok(home) = std::env::var("TEMPO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("tempo"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        tempo_home().join("config.toml")
    }

    /// Returns the path to the persisted credential file.
    pub fn token_path() -> PathBuf {
        tempo_home().join("token.json")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Tempo API server.
    pub base_url: String,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the configured base URL, validated and without a trailing slash.
    pub fn validated_base_url(&self) -> Result<String> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("base_url must not be empty");
        }
        url::Url::parse(trimmed).with_context(|| format!("Invalid base URL: {trimmed}"))?;
        Ok(trimmed.to_string())
    }

    /// Writes the default config template to `path`.
    ///
    /// Fails if the file already exists so a hand-edited config is never clobbered.
    pub fn init_at(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Default config file contents with commented-out optional fields.
fn default_config_template() -> &'static str {
    r#"# Tempo client configuration

# Base URL of the Tempo API server
base_url = "http://localhost:8080/api"

# HTTP request timeout in seconds
# timeout_secs = 30
"#
}
