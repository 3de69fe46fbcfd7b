use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub registry: RegistryConfig,
    pub search: SearchConfig,
    pub window: WindowConfig,
}

/// Where suggestions come from and where selections navigate to
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry site root, e.g. "https://www.movey.net"
    pub base_url: String,
    /// Per-request timeout for suggestion fetches
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub placeholder: String,
    /// Shortest query (in characters) that shows "No matches found" on an empty result
    pub min_query_len: usize,
    /// Grace period between losing focus and hiding the dropdown
    pub hide_delay_ms: u64,
    /// Maximum number of dropdown rows on screen at once
    pub max_visible: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.movey.net".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            placeholder: "Enter a search term".to_string(),
            min_query_len: 3,
            hide_delay_ms: 50,
            max_visible: 8,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 420.0,
        }
    }
}

pub fn load_from(path: &Path) -> Config {
    load_path(path)
}

pub fn load() -> Config {
    match config_path() {
        Some(path) => load_path(&path),
        None => {
            tracing::warn!("Could not determine home directory, using defaults");
            Config::default()
        }
    }
}

pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

fn load_path(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match parse(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse config: {}, using defaults", e);
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read config file: {}, using defaults", e);
            Config::default()
        }
    }
}

fn config_path() -> Option<PathBuf> {
    // ~/.config/ on every platform, not ~/Library/Application Support/
    dirs::home_dir().map(|home| home.join(".config").join("movey-search").join("config.toml"))
}
