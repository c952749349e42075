//! CLI configuration.
//!
//! Settings are layered, lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. `<config_dir>/songform/config.yaml`, if it exists
//! 3. The file passed with `--config` (must exist)
//! 4. `SONGFORM_API_URL`, `SONGFORM_TOKEN`, `SONGFORM_REGISTRY`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Path of the generation endpoint, relative to the base URL.
pub const GENERATE_PATH: &str = "/api/music/generate";

pub const ENV_API_URL: &str = "SONGFORM_API_URL";
pub const ENV_TOKEN: &str = "SONGFORM_TOKEN";
pub const ENV_REGISTRY: &str = "SONGFORM_REGISTRY";

/// One configuration file. Every field is optional so files can be partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub registry: Option<PathBuf>,
}

impl ConfigFile {
    /// Reads a YAML config file.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        // An empty file is a valid (empty) config.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Effective CLI settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Base URL of the generation backend.
    pub api_url: String,
    /// Bearer token for the backend.
    pub token: Option<String>,
    /// Registry file to use instead of the built-in registry.
    pub registry: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            registry: None,
        }
    }
}

impl CliConfig {
    /// Returns the per-user config file location.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("songform").join("config.yaml"))
    }

    /// Loads the layered configuration from the real environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(
            Self::user_config_path().as_deref(),
            explicit,
            |key| std::env::var(key).ok(),
        )
    }

    /// Loads the layered configuration from the given sources.
    ///
    /// A missing user file is skipped; a missing explicit file is an error.
    pub fn load_from(
        user_path: Option<&Path>,
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = user_path.filter(|p| p.is_file()) {
            tracing::debug!(path = %path.display(), "reading user config");
            config.merge(ConfigFile::read(path)?);
        }

        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "reading config");
            config.merge(ConfigFile::read(path)?);
        }

        config.apply_env(env);
        Ok(config)
    }

    /// Overlays the fields a file sets.
    pub fn merge(&mut self, file: ConfigFile) {
        if let Some(api_url) = file.api_url {
            self.api_url = api_url;
        }
        if file.token.is_some() {
            self.token = file.token;
        }
        if file.registry.is_some() {
            self.registry = file.registry;
        }
    }

    /// Overlays environment variables. Empty values are ignored.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(api_url) = lookup(ENV_API_URL) {
            self.api_url = api_url;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(registry) = lookup(ENV_REGISTRY) {
            self.registry = Some(PathBuf::from(registry));
        }
    }

    /// Full URL of the generation endpoint.
    pub fn generate_url(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), GENERATE_PATH)
    }
}
