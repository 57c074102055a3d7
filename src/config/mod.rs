//! Generator configuration.
//!
//! Settings that tune a generation run are read from a TOML file, by default
//! `~/.modelgen/config.toml` (`%LOCALAPPDATA%\modelgen\config.toml` on
//! Windows). Every key is optional:
//!
//! ```toml
//! # Time budget of a single render, in milliseconds
//! timeout_ms = 1000
//!
//! # Memoize explicit models for the duration of a run
//! cache_enabled = true
//!
//! # HTML-escape interpolated values in tera templates
//! autoescape = false
//! ```
//!
//! # Environment Variables
//!
//! After the file is read, these variables override it:
//!
//! - `MODELGEN_TIMEOUT_MS` - render budget in milliseconds
//! - `MODELGEN_CACHE` - `true` or `false`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Environment variable overriding [`GeneratorConfig::timeout_ms`].
pub const TIMEOUT_ENV: &str = "MODELGEN_TIMEOUT_MS";

/// Environment variable overriding [`GeneratorConfig::cache_enabled`].
pub const CACHE_ENV: &str = "MODELGEN_CACHE";

const fn default_timeout_ms() -> u64 {
    1000
}

const fn default_cache_enabled() -> bool {
    true
}

/// Settings of a [`Generator`](crate::generator::Generator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Maximum duration of one render, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Whether explicit models are memoized within a run
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    /// Whether the tera engine HTML-escapes interpolated values
    #[serde(default)]
    pub autoescape: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            cache_enabled: default_cache_enabled(),
            autoescape: false,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from an optional path.
    ///
    /// Without a path the default location is used. A missing file yields the
    /// defaults. Environment overrides are applied in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or if
    /// an override variable holds an invalid value.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = path.unwrap_or_else(|| {
            Self::default_path().unwrap_or_else(|_| PathBuf::from("~/.modelgen/config.toml"))
        });

        let config = if path.exists() {
            Self::load_from(&path).await?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };

        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Default file path of the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("modelgen")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".modelgen")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable when a value cannot be parsed.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(TIMEOUT_ENV) {
            self.timeout_ms = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {TIMEOUT_ENV} value '{value}'"))?;
        }

        if let Some(value) = lookup(CACHE_ENV) {
            self.cache_enabled = match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => anyhow::bail!("Invalid {CACHE_ENV} value '{value}', expected true or false"),
            };
        }

        Ok(self)
    }
}
