use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_LOG_FILTER, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Fixed for the whole session once the catalog is opened.
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Config {
    /// Load from the per-user config file, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        info!("Config loaded successfully");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.catalog.items_per_page == 0 {
            bail!("catalog.items_per_page must be at least 1");
        }
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be at least 1");
        }
        let url = url::Url::parse(&self.api.base_url)
            .with_context(|| format!("api.base_url is not a valid URL: {}", self.api.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api.base_url must use http or https: {}", self.api.base_url);
        }
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("kinoteka").join("config.toml"))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

// Default value functions
fn default_base_url() -> String { DEFAULT_API_BASE_URL.to_string() }
fn default_timeout() -> u64 { DEFAULT_TIMEOUT_SECS }
fn default_items_per_page() -> u32 { DEFAULT_PAGE_SIZE }
fn default_log_filter() -> String { DEFAULT_LOG_FILTER.to_string() }
