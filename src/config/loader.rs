//! Configuration file loading with precedence handling.

use crate::state::ControllerConfig;
use crate::view_state::{Insets, SizingMetrics, ThreadInsets};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "COMMENTVIEW_CONFIG";

/// Environment variable overriding the log file path.
pub const LOG_ENV_VAR: &str = "COMMENTVIEW_LOG";

/// Container width used when neither the config file nor the CLI sets one.
pub const DEFAULT_CONTAINER_WIDTH: u32 = 375;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
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

    /// Container width of zero.
    #[error("Container width must be positive")]
    ZeroWidth,
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/commentview/config.toml`:
///
/// ```toml
/// container_width = 320
/// log_file_path = "/tmp/commentview.log"
///
/// [layout]
/// details_height = 60
/// markup_fallback_height = 80
///
/// [insets.large]
/// top = 12
/// left = 8
/// bottom = 12
/// right = 8
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Width items are laid out at by the command-line shell.
    #[serde(default)]
    pub container_width: Option<u32>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Fixed heights and text metrics.
    #[serde(default)]
    pub layout: Option<LayoutSection>,

    /// Section insets per thread position.
    #[serde(default)]
    pub insets: Option<InsetsSection>,
}

/// `[layout]` table. Every value is in points.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    /// Height of the details row.
    #[serde(default)]
    pub details_height: Option<u32>,
    /// Height of the reactions row.
    #[serde(default)]
    pub reactions_height: Option<u32>,
    /// Height answered for markup not yet measured.
    #[serde(default)]
    pub markup_fallback_height: Option<u32>,
    /// Height answered for images not yet measured.
    #[serde(default)]
    pub image_fallback_height: Option<u32>,
    /// Height of one line of body text.
    #[serde(default)]
    pub text_line_height: Option<u32>,
    /// Advance of one display column of body text.
    #[serde(default)]
    pub text_column_width: Option<u32>,
    /// Horizontal text padding per edge.
    #[serde(default)]
    pub text_horizontal_padding: Option<u32>,
    /// Vertical text padding per edge.
    #[serde(default)]
    pub text_vertical_padding: Option<u32>,
}

/// `[insets]` table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InsetsSection {
    /// Inset of a stand-alone comment.
    #[serde(default)]
    pub large: Option<Insets>,
    /// Inset of the last comment in a thread.
    #[serde(default)]
    pub large_tail: Option<Insets>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Width items are laid out at.
    pub container_width: u32,
    /// Fixed heights and text metrics.
    pub metrics: SizingMetrics,
    /// Section insets.
    pub insets: ThreadInsets,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            container_width: DEFAULT_CONTAINER_WIDTH,
            metrics: SizingMetrics::default(),
            insets: ThreadInsets::default(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Layout constants handed to each controller.
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            metrics: self.metrics,
            insets: self.insets,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/commentview/commentview.log` on Linux, or the
/// platform equivalent. Falls back to the current directory when no state
/// directory exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("commentview").join("commentview.log")
    } else {
        PathBuf::from("commentview.log")
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
/// Returns `~/.config/commentview/config.toml` on Linux, the platform
/// equivalent elsewhere, or `None` when no config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("commentview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `COMMENTVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/commentview/config.toml`
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

/// Apply environment variable overrides to resolved config.
///
/// Checks `COMMENTVIEW_LOG` for the log file path.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(path) = std::env::var(LOG_ENV_VAR) {
        config.log_file_path = PathBuf::from(path);
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

    let layout = config.layout.unwrap_or_default();
    let insets = config.insets.unwrap_or_default();
    let metrics = defaults.metrics;

    ResolvedConfig {
        container_width: config.container_width.unwrap_or(defaults.container_width),
        metrics: SizingMetrics {
            details_height: layout.details_height.unwrap_or(metrics.details_height),
            reactions_height: layout.reactions_height.unwrap_or(metrics.reactions_height),
            markup_fallback_height: layout
                .markup_fallback_height
                .unwrap_or(metrics.markup_fallback_height),
            image_fallback_height: layout
                .image_fallback_height
                .unwrap_or(metrics.image_fallback_height),
            text_line_height: layout.text_line_height.unwrap_or(metrics.text_line_height),
            text_column_width: layout.text_column_width.unwrap_or(metrics.text_column_width),
            text_horizontal_padding: layout
                .text_horizontal_padding
                .unwrap_or(metrics.text_horizontal_padding),
            text_vertical_padding: layout
                .text_vertical_padding
                .unwrap_or(metrics.text_vertical_padding),
        },
        insets: ThreadInsets {
            large: insets.large.unwrap_or(defaults.insets.large),
            large_tail: insets.large_tail.unwrap_or(defaults.insets.large_tail),
        },
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Errors
///
/// Returns [`ConfigError::ZeroWidth`] for a zero width override.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    width_override: Option<u32>,
    log_override: Option<PathBuf>,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(width) = width_override {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        config.container_width = width;
    }

    if let Some(path) = log_override {
        config.log_file_path = path;
    }

    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
