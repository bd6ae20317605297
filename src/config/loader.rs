//! Configuration file loading with precedence handling.

use crate::source::DEFAULT_BASE_URL;
use crate::state::pagination::{DEFAULT_FETCH_DELAY, DEFAULT_PAGE_SIZE};
use crate::state::scroll_trigger::DEFAULT_SCROLL_THRESHOLD;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A resolved value is out of range.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Config key at fault.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/roster/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Base URL of the member endpoint.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Members requested per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Rows from the bottom at which the next page is requested.
    #[serde(default)]
    pub scroll_threshold: Option<usize>,

    /// Artificial delay before each fetch, in milliseconds.
    #[serde(default)]
    pub fetch_delay_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Base URL of the member endpoint.
    pub base_url: String,
    /// Members requested per page.
    pub page_size: usize,
    /// Scroll trigger threshold in rows.
    pub scroll_threshold: usize,
    /// Artificial delay before each fetch.
    pub fetch_delay: Duration,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            fetch_delay: DEFAULT_FETCH_DELAY,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/roster/roster.log` on Linux, or the platform state
/// directory elsewhere. Falls back to the current directory if none exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("roster").join("roster.log")
    } else {
        PathBuf::from("roster.log")
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

/// Resolve default config file path (`~/.config/roster/config.toml` on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("roster").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ROSTER_CONFIG` environment variable
/// 3. Default path `~/.config/roster/config.toml`
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

    if let Ok(env_path) = std::env::var("ROSTER_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        base_url: config.base_url.unwrap_or(defaults.base_url),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        scroll_threshold: config.scroll_threshold.unwrap_or(defaults.scroll_threshold),
        fetch_delay: config
            .fetch_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.fetch_delay),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `ROSTER_BASE_URL`: Override endpoint
/// - `ROSTER_PAGE_SIZE`: Override page size (ignored unless it parses)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(base_url) = std::env::var("ROSTER_BASE_URL") {
        if !base_url.trim().is_empty() {
            config.base_url = base_url.trim().to_string();
        }
    }

    if let Some(page_size) = std::env::var("ROSTER_PAGE_SIZE")
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
    {
        config.page_size = page_size;
    }

    config
}

/// Overrides taken from explicitly passed CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--base-url`
    pub base_url: Option<String>,
    /// `--page-size`
    pub page_size: Option<usize>,
    /// `--threshold`
    pub scroll_threshold: Option<usize>,
    /// `--delay-ms`
    pub fetch_delay_ms: Option<u64>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(threshold) = cli.scroll_threshold {
        config.scroll_threshold = threshold;
    }
    if let Some(delay_ms) = cli.fetch_delay_ms {
        config.fetch_delay = Duration::from_millis(delay_ms);
    }
    config
}

/// Reject resolved values the application cannot run with.
///
/// # Errors
///
/// `ConfigError::InvalidValue` for a zero page size or an unparseable base URL.
pub fn validate_config(config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if config.page_size == 0 {
        return Err(ConfigError::InvalidValue {
            key: "page_size".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    if let Err(e) = url::Url::parse(config.base_url.trim()) {
        return Err(ConfigError::InvalidValue {
            key: "base_url".to_string(),
            reason: format!("{:?} is not a URL: {e}", config.base_url),
        });
    }

    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
