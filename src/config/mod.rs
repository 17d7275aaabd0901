//! Configuration loading with precedence handling.
//!
//! The config file is JSON with two recognized presentation options plus
//! optional credential paths. Precedence (lowest to highest): defaults →
//! config file → environment variables → CLI flags.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default presentation title when none is configured.
pub const DEFAULT_PRESENTATION_TITLE: &str = "Default Title";

/// Default Drive folder name when none is configured.
pub const DEFAULT_DRIVE_FOLDER: &str = "json2slides_output";

/// Environment variable overriding the config file path.
pub const ENV_CONFIG: &str = "JSON2SLIDES_CONFIG";

/// Environment variable overriding the presentation title.
pub const ENV_TITLE: &str = "JSON2SLIDES_TITLE";

/// Environment variable overriding the Drive folder name.
pub const ENV_FOLDER: &str = "JSON2SLIDES_FOLDER";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permissions, I/O).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid JSON or unknown options.
    #[error("Invalid config in {path}: {reason}")]
    ParseError {
        /// Path with invalid config.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// JSON configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are
/// used. Unknown options are rejected at load time.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Title for the created presentation.
    #[serde(default)]
    pub presentation_title: Option<String>,

    /// Name of the Drive folder the presentation is filed into.
    #[serde(default)]
    pub drive_folder: Option<String>,

    /// Path to the OAuth client secrets file.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,

    /// Path to the cached token file.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Title for the created presentation.
    pub presentation_title: String,
    /// Name of the destination Drive folder.
    pub drive_folder: String,
    /// Path to the OAuth client secrets file.
    pub credentials_path: PathBuf,
    /// Path to the cached token file.
    pub token_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            presentation_title: DEFAULT_PRESENTATION_TITLE.to_string(),
            drive_folder: DEFAULT_DRIVE_FOLDER.to_string(),
            credentials_path: default_credentials_path(),
            token_path: default_token_path(),
        }
    }
}

fn app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("json2slides"))
}

/// Resolve the default config file path.
///
/// Returns `~/.config/json2slides/config.json` on Unix, the appropriate
/// platform path elsewhere. `None` if no config directory can be
/// determined.
pub fn default_config_path() -> Option<PathBuf> {
    app_config_dir().map(|dir| dir.join("config.json"))
}

/// Default client secrets location, falling back to the working directory.
pub fn default_credentials_path() -> PathBuf {
    app_config_dir()
        .map(|dir| dir.join("credentials.json"))
        .unwrap_or_else(|| PathBuf::from("credentials.json"))
}

/// Default token cache location, falling back to the working directory.
pub fn default_token_path() -> PathBuf {
    app_config_dir()
        .map(|dir| dir.join("token.json"))
        .unwrap_or_else(|| PathBuf::from("token.json"))
}

/// Load the configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - defaults
/// are used). Returns `Err` if the file exists but cannot be read or
/// parsed.
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

    let config: ConfigFile =
        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            reason: e.to_string(),
        })?;

    Ok(Some(config))
}

/// Load configuration with path precedence.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `JSON2SLIDES_CONFIG` environment variable
/// 3. Default path under the platform config directory
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge a loaded config file into defaults to create the resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        presentation_title: config
            .presentation_title
            .unwrap_or(defaults.presentation_title),
        drive_folder: config.drive_folder.unwrap_or(defaults.drive_folder),
        credentials_path: config.credentials_path.unwrap_or(defaults.credentials_path),
        token_path: config.token_path.unwrap_or(defaults.token_path),
    }
}

/// Apply environment variable overrides to the resolved config.
///
/// Checks `JSON2SLIDES_TITLE` and `JSON2SLIDES_FOLDER`.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(title) = std::env::var(ENV_TITLE) {
        config.presentation_title = title;
    }

    if let Ok(folder) = std::env::var(ENV_FOLDER) {
        config.drive_folder = folder;
    }

    config
}

/// Apply CLI argument overrides to the resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags the user explicitly set.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    title_override: Option<String>,
    folder_override: Option<String>,
    credentials_override: Option<PathBuf>,
    token_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(title) = title_override {
        config.presentation_title = title;
    }

    if let Some(folder) = folder_override {
        config.drive_folder = folder;
    }

    if let Some(credentials) = credentials_override {
        config.credentials_path = credentials;
    }

    if let Some(token) = token_override {
        config.token_path = token;
    }

    config
}
