//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Smallest accepted scrubber step, in minutes.
pub const MIN_TIME_STEP_MINUTES: u64 = 15;
/// Largest accepted scrubber step, in minutes.
pub const MAX_TIME_STEP_MINUTES: u64 = 120;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

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
/// Corresponds to `~/.config/logsift/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// How long notices stay on screen, in milliseconds.
    #[serde(default)]
    pub notice_duration_ms: Option<u64>,

    /// Initial time-window scrubber step, in minutes.
    #[serde(default)]
    pub time_step_minutes: Option<u64>,

    /// Start with marks-only filtering on.
    #[serde(default)]
    pub marks_only: Option<bool>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Notice lifetime.
    pub notice_duration: Duration,
    /// Scrubber step in minutes, within the accepted range.
    pub time_step_minutes: u64,
    /// Start with marks-only filtering on.
    pub marks_only: bool,
    /// Log at debug level.
    pub debug: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            notice_duration: Duration::from_millis(2000),
            time_step_minutes: 30,
            marks_only: false,
            debug: false,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/logsift/logsift.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("logsift").join("logsift.log")
    } else {
        PathBuf::from("logsift.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
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
/// Returns `~/.config/logsift/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("logsift").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LOGSIFT_CONFIG` environment variable
/// 3. Default path `~/.config/logsift/config.toml`
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

    if let Ok(env_path) = std::env::var("LOGSIFT_CONFIG") {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(
                "LOGSIFT_CONFIG is set but empty".to_string(),
            ));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `LOGSIFT_NOTICE_MS`: Override notice lifetime (ignored unless a number)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(ms) = std::env::var("LOGSIFT_NOTICE_MS")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
    {
        config.notice_duration = Duration::from_millis(ms);
    }

    config
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
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        notice_duration: config
            .notice_duration_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.notice_duration),
        time_step_minutes: config
            .time_step_minutes
            .map(clamp_time_step)
            .unwrap_or(defaults.time_step_minutes),
        marks_only: config.marks_only.unwrap_or(defaults.marks_only),
        debug: defaults.debug,
    }
}

fn clamp_time_step(minutes: u64) -> u64 {
    minutes.clamp(MIN_TIME_STEP_MINUTES, MAX_TIME_STEP_MINUTES)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Arguments
///
/// * `config` - Base resolved config (already merged with defaults, file, and env vars)
/// * `debug_log` - Optional log path from `--debug`; also raises the level
/// * `marks_only_override` - `Some(true)` when `--marks-only` was given
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    debug_log: Option<PathBuf>,
    marks_only_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(path) = debug_log {
        config.log_file_path = path;
        config.debug = true;
    }

    if let Some(marks_only) = marks_only_override {
        config.marks_only = marks_only;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
