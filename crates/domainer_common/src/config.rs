//! Domainer Configuration
//!
//! Explicit configuration passed into every component.
//! Config file: `--config PATH`, or ~/.config/domainer/config.toml, or defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bardate list published by Internetstiftelsen
pub const DEFAULT_FEED_URL: &str = "https://data.internetstiftelsen.se/bardate_domains.txt";

pub const DEFAULT_CACHE_FILE: &str = "sorted_domains.txt";

/// Environment variable holding the advisory API key
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Advisory (text-generation) backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Base URL of an OpenAI-compatible API
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Name of the environment variable read at call time
    pub api_key_env: String,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 1000,
            temperature: 0.5,
            timeout_secs: 60,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl AdvisoryConfig {
    /// Resolve the API key from the environment. Empty values count as unset.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Main Domainer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainerConfig {
    pub feed_url: String,

    /// Directory holding the cache and the per-date output files.
    /// Defaults to the directory of the executable.
    pub data_dir: Option<PathBuf>,

    pub cache_file: String,

    pub http_timeout_secs: u64,

    pub advisory: AdvisoryConfig,
}

impl Default for DomainerConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            data_dir: None,
            cache_file: DEFAULT_CACHE_FILE.to_string(),
            http_timeout_secs: 60,
            advisory: AdvisoryConfig::default(),
        }
    }
}

impl DomainerConfig {
    /// Default user config path: ~/.config/domainer/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("domainer").join("config.toml"))
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: DomainerConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (errors are fatal)
    /// 2. User config (~/.config/domainer/config.toml) if present
    /// 3. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from(&user_path);
            }
        }

        Ok(Self::default())
    }

    /// Directory holding cache and output files
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }

        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data_dir().join(&self.cache_file)
    }

    /// Output file for a query: available_domains_<YYYY-MM-DD>.txt
    pub fn output_path(&self, target: chrono::NaiveDate) -> PathBuf {
        self.data_dir()
            .join(format!("available_domains_{}.txt", target.format("%Y-%m-%d")))
    }
}
