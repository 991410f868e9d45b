//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "PAGR_CONFIG";

/// Environment variable overriding `wrap_long_lines`.
pub const WRAP_ENV_VAR: &str = "PAGR_WRAP";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/pagr/config.toml`:
///
/// ```toml
/// wrap_long_lines = true
/// show_status_bar = true
/// show_line_numbers = false
/// log_file_path = "/tmp/pagr.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Wrap long lines instead of scrolling horizontally.
    #[serde(default)]
    pub wrap_long_lines: Option<bool>,

    /// Reserve the bottom row for the status bar.
    #[serde(default)]
    pub show_status_bar: Option<bool>,

    /// Show the line number gutter.
    #[serde(default)]
    pub show_line_numbers: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Line wrapping.
    pub wrap_long_lines: bool,
    /// Status bar visibility.
    pub show_status_bar: bool,
    /// Line number gutter visibility.
    pub show_line_numbers: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            wrap_long_lines: false,
            show_status_bar: true,
            show_line_numbers: true,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pagr/pagr.log` on Linux, or the platform
/// equivalent. Falls back to the current directory when there is no state
/// directory (macOS, Windows).
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pagr").join("pagr.log")
    } else {
        PathBuf::from("pagr.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/pagr/config.toml` on Linux, appropriate path on other
/// platforms. Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pagr").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PAGR_CONFIG` environment variable
/// 3. Default path `~/.config/pagr/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        wrap_long_lines: config.wrap_long_lines.unwrap_or(defaults.wrap_long_lines),
        show_status_bar: config.show_status_bar.unwrap_or(defaults.show_status_bar),
        show_line_numbers: config
            .show_line_numbers
            .unwrap_or(defaults.show_line_numbers),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PAGR_WRAP`: Override `wrap_long_lines` (`1`/`true`/`yes`/`on` or
///   `0`/`false`/`no`/`off`). Unrecognized values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(value) = std::env::var(WRAP_ENV_VAR) {
        match parse_flag(&value) {
            Some(wrap) => config.wrap_long_lines = wrap,
            None => warn!(variable = WRAP_ENV_VAR, value, "Ignoring unrecognized value"),
        }
    }

    config
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    wrap_override: Option<bool>,
    status_bar_override: Option<bool>,
    line_numbers_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(wrap) = wrap_override {
        config.wrap_long_lines = wrap;
    }

    if let Some(show) = status_bar_override {
        config.show_status_bar = show;
    }

    if let Some(show) = line_numbers_override {
        config.show_line_numbers = show;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
