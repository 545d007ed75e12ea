// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language and theme mode
//! - `[server]` - Backend URL, retry policy and connect timeout
//! - `[sources]` - Source browser pagination
//! - `[dashboard]` - Metrics polling interval
//! - `[notifications]` - Toast lifetime
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set `RAGCHAT_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use ragchat::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.language = Some("es".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "pt-BR", "es").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the chat backend, without trailing slash.
    #[serde(default = "default_server_url")]
    pub base_url: String,

    /// Retries after the first failed attempt.
    #[serde(default = "default_max_retries", skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,

    /// Delay before the first retry in milliseconds (doubled on each retry).
    #[serde(
        default = "default_initial_backoff_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_backoff_ms: Option<u64>,

    /// TCP connect timeout in seconds.
    #[serde(
        default = "default_connect_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_server_url(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Retry count clamped to the supported range.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
            .unwrap_or(DEFAULT_MAX_RETRIES)
            .min(MAX_MAX_RETRIES)
    }

    /// Initial backoff clamped to the supported range.
    #[must_use]
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(
            self.initial_backoff_ms
                .unwrap_or(DEFAULT_INITIAL_BACKOFF_MS)
                .clamp(MIN_INITIAL_BACKOFF_MS, MAX_INITIAL_BACKOFF_MS),
        )
    }

    /// Connect timeout clamped to the supported range.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS)
                .clamp(MIN_CONNECT_TIMEOUT_SECS, MAX_CONNECT_TIMEOUT_SECS),
        )
    }

    /// Base URL with any trailing slashes removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            DEFAULT_SERVER_URL
        } else {
            trimmed
        }
    }
}

/// Source browser settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourcesConfig {
    /// Number of sources per page.
    #[serde(default = "default_page_size", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl SourcesConfig {
    /// Page size clamped to the supported range.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
            .unwrap_or(DEFAULT_SOURCES_PAGE_SIZE)
            .clamp(MIN_SOURCES_PAGE_SIZE, MAX_SOURCES_PAGE_SIZE)
    }
}

/// Dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Seconds between two metrics refreshes while the dashboard is open.
    #[serde(
        default = "default_refresh_interval_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_interval_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(
            self.refresh_interval_secs
                .unwrap_or(DEFAULT_DASHBOARD_REFRESH_SECS)
                .clamp(MIN_DASHBOARD_REFRESH_SECS, MAX_DASHBOARD_REFRESH_SECS),
        )
    }
}

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationsConfig {
    /// Seconds a toast stays visible.
    #[serde(
        default = "default_toast_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub toast_timeout_secs: Option<u64>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            toast_timeout_secs: default_toast_timeout_secs(),
        }
    }
}

impl NotificationsConfig {
    #[must_use]
    pub fn toast_timeout(&self) -> Duration {
        Duration::from_secs(
            self.toast_timeout_secs
                .unwrap_or(DEFAULT_TOAST_TIMEOUT_SECS)
                .clamp(MIN_TOAST_TIMEOUT_SECS, MAX_TOAST_TIMEOUT_SECS),
        )
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Backend connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Source browser settings.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Dashboard settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Toast notification settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_max_retries() -> Option<u32> {
    Some(DEFAULT_MAX_RETRIES)
}

fn default_initial_backoff_ms() -> Option<u64> {
    Some(DEFAULT_INITIAL_BACKOFF_MS)
}

fn default_connect_timeout_secs() -> Option<u64> {
    Some(DEFAULT_CONNECT_TIMEOUT_SECS)
}

fn default_page_size() -> Option<usize> {
    Some(DEFAULT_SOURCES_PAGE_SIZE)
}

fn default_refresh_interval_secs() -> Option<u64> {
    Some(DEFAULT_DASHBOARD_REFRESH_SECS)
}

fn default_toast_timeout_secs() -> Option<u64> {
    Some(DEFAULT_TOAST_TIMEOUT_SECS)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "failed to load settings");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
