//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.omada/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_BASE_URL;
use crate::core::photo::DEFAULT_IMAGE_HOST;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OmadaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub flickr: FlickrConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Search text to open with. Empty or missing = recent feed.
    pub initial_search: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FlickrConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub image_host: Option<String>,
    pub per_page: Option<u32>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Resolved Config (concrete values, no Options where a default exists)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub image_host: String,
    pub per_page: Option<u32>,
    pub timeout_secs: u64,
    pub initial_search: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// No API key in CLI flags, env, or config file.
    MissingApiKey,
    /// The HTTP client could not be built from the resolved settings.
    Client(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingApiKey => write!(
                f,
                "no Flickr API key: pass --api-key, set FLICKR_API_KEY, or add api_key to [flickr] in the config file"
            ),
            ConfigError::Client(msg) => write!(f, "HTTP client error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.omada/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".omada").join("config.toml"))
}

/// Load config from `~/.omada/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `OmadaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<OmadaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(OmadaConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<OmadaConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(OmadaConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: OmadaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

/// Debug view of the config with the API key masked.
fn redacted(config: &OmadaConfig) -> String {
    let key = if config.flickr.api_key.is_some() { "<set>" } else { "<unset>" };
    format!(
        "general={:?}, flickr.api_key={}, flickr.base_url={:?}, flickr.image_host={:?}, flickr.per_page={:?}",
        config.general, key, config.flickr.base_url, config.flickr.image_host, config.flickr.per_page
    )
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Omada Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# initial_search = ""                # Empty = recent photos feed
# timeout_secs = 30                  # Whole-request HTTP timeout

# [flickr]
# api_key = "0123456789abcdef"       # Or set FLICKR_API_KEY env var
# base_url = "https://www.flickr.com/services/rest/"
# image_host = "live.staticflickr.com"
# per_page = 100                     # Server default when unset
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_api_key` and `cli_search` are from CLI flags (None = not specified).
pub fn resolve(
    config: &OmadaConfig,
    cli_api_key: Option<&str>,
    cli_search: Option<&str>,
) -> ResolvedConfig {
    // API key: CLI → env → config
    let api_key = cli_api_key
        .map(|s| s.to_string())
        .or_else(|| std::env::var("FLICKR_API_KEY").ok())
        .or_else(|| config.flickr.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    // Base URL: env → config → default
    let base_url = std::env::var("FLICKR_BASE_URL")
        .ok()
        .or_else(|| config.flickr.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Initial search: CLI → config → recent feed
    let initial_search = cli_search
        .map(|s| s.to_string())
        .or_else(|| config.general.initial_search.clone())
        .unwrap_or_default();

    ResolvedConfig {
        api_key,
        base_url,
        image_host: config
            .flickr
            .image_host
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_HOST.to_string()),
        per_page: config.flickr.per_page,
        timeout_secs: config.general.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        initial_search,
    }
}

impl ResolvedConfig {
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}
