//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Loads and saves user settings as TOML from the platform config path using
//! the [`directories`](https://docs.rs/directories) crate.
//!
//! - Missing file: defaults are written out so the user has something to edit
//! - Missing sections or fields: per-section defaults (`#[serde(default)]`)
//! - The provider access key is normally injected through the environment
//!   (`PIXDECK_ACCESS_KEY`); it is never written back to disk
//!
//! ```rust,ignore
//! let config = Config::load().await?;
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use stockr::ProviderConfig;
use tokio::fs as TokioFs;
use tracing::info;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "pixdeck";
const APPLICATION: &str = "pixdeck";

/// Search input behaviour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before suggestions are looked up
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
        }
    }
}

/// Image grid layout and pagination trigger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Narrowest card, in terminal cells; decides the column count
    pub min_card_width: u16,

    /// Lines from the bottom of the content at which the next page is requested
    pub load_more_threshold: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_card_width: 28,
            load_more_threshold: 3,
        }
    }
}

/// Log file settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,

    /// Directory for rolling log files; platform data dir when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads config from the platform config dir, creating it with defaults if absent.
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> anyhow::Result<Self> {
        if TokioFs::try_exists(path).await.unwrap_or(false) {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let cfg: Self = toml::from_str(&text)
                .with_context(|| format!("Failed to parse {}", path.display()))?;

            Ok(cfg)
        } else {
            info!(
                "No config file found at {}, writing default configuration",
                path.display()
            );

            let default_config = Self::default();
            default_config.save_to(path).await?;

            Ok(default_config)
        }
    }

    pub async fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await?;
        }

        // Credentials stay in the environment
        let mut on_disk = self.clone();
        on_disk.provider.access_key = None;

        let toml_str = toml::to_string_pretty(&on_disk)?;
        TokioFs::write(path, toml_str).await?;

        Ok(())
    }

    fn project_dirs() -> anyhow::Result<ProjectDirs> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))
    }

    /// Returns the canonical config file path.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory for log files: the configured one, else the platform data dir.
    pub fn log_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.logging.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::project_dirs()?.data_local_dir().join("logs")),
        }
    }
}
