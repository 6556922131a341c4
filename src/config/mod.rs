use crate::feed::FeedConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pagination and mock source settings
    #[serde(flatten)]
    pub feed: FeedConfig,

    /// Directory for the interactive-mode log file
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            data_dir: dirs::data_local_dir()
                .map(|dir| dir.join("pagefeed"))
                .unwrap_or_else(|| PathBuf::from("./data")),
        }
    }
}

impl Config {
    /// Build configuration from defaults, a config file and the environment.
    ///
    /// An explicit `path` must exist; otherwise the usual locations are tried.
    pub async fn init(path: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match path {
            Some(path) => Self::load_from_path(path).await?,
            None => Self::load_from_file().await?.unwrap_or_default(),
        };

        config.load_from_env();

        Ok(config)
    }

    /// Apply `PAGEFEED_*` environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(size) = lookup("PAGEFEED_PAGE_SIZE").and_then(|v| v.parse().ok()) {
            self.feed.page_size = size;
        }

        if let Some(latency) = lookup("PAGEFEED_LATENCY_MS").and_then(|v| v.parse().ok()) {
            self.feed.latency_ms = latency;
        }

        if let Some(universe) = lookup("PAGEFEED_UNIVERSE_SIZE").and_then(|v| v.parse().ok()) {
            self.feed.universe_size = universe;
        }

        if let Some(threshold) = lookup("PAGEFEED_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.feed.near_end_threshold = threshold;
        }

        if let Some(stop) = lookup("PAGEFEED_STOP_AT_END").and_then(|v| parse_flag(&v)) {
            self.feed.stop_at_end = stop;
        }

        if let Some(data_dir) = lookup("PAGEFEED_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
    }

    /// Load configuration from the first pagefeed.json found
    pub async fn load_from_file() -> Result<Option<Self>> {
        // Lookup order:
        // 1. ./.pagefeed.json
        // 2. ./pagefeed.json
        // 3. $CONFIG_DIR/pagefeed/pagefeed.json
        let mut config_paths = vec![
            PathBuf::from("./.pagefeed.json"),
            PathBuf::from("./pagefeed.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("pagefeed").join("pagefeed.json"));
        }

        for path in config_paths {
            if path.exists() {
                return Self::load_from_path(&path).await.map(Some);
            }
        }

        Ok(None)
    }

    pub async fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.feed.validate()?;
        Ok(())
    }

    /// Path of the log file used while the terminal UI owns the screen
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("pagefeed.log")
    }
}

/// Boolean env value; unrecognised spellings are ignored like bad numbers
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
