//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

use super::platform::Editor;

/// Default suffix appended to a config file's name to form its backup.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".backup";

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "CODENVIM_CONFIG";

/// Environment variable overriding the editor flavour.
pub const ENV_EDITOR: &str = "CODENVIM_EDITOR";

/// Environment variable overriding the target editor user directory.
pub const ENV_TARGET_DIR: &str = "CODENVIM_TARGET_DIR";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {}: {reason}", .path.display())]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or an unknown field.
    #[error("Invalid TOML in {}: {reason}", .path.display())]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Config file parsed but a field holds an unusable value.
    #[error("Invalid {field} in {}: {reason}", .path.display())]
    InvalidValue {
        /// Path of the offending config file.
        path: PathBuf,
        /// Field name as written in the file.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/codenvim/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Editor flavour ("code", "code-insiders", "codium").
    #[serde(default)]
    pub editor: Option<Editor>,

    /// Explicit editor user directory, bypassing platform resolution.
    #[serde(default)]
    pub target_dir: Option<PathBuf>,

    /// Directory holding the fragments to install.
    #[serde(default)]
    pub source_dir: Option<PathBuf>,

    /// Suffix appended to a file name to form its backup.
    #[serde(default)]
    pub backup_suffix: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Editor flavour used for platform directory resolution.
    pub editor: Editor,
    /// Explicit editor user directory, if any.
    pub target_dir: Option<PathBuf>,
    /// Directory holding `setting.json` and `keybindings.json`.
    pub source_dir: PathBuf,
    /// Backup file name suffix.
    pub backup_suffix: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            editor: Editor::default(),
            target_dir: None,
            source_dir: PathBuf::from("."),
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/codenvim/codenvim.log` on Linux. Platforms without a
/// state directory use the local data directory instead; if neither can be
/// determined, falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir().or_else(dirs::data_local_dir) {
        Some(dir) => dir.join("codenvim").join("codenvim.log"),
        None => PathBuf::from("codenvim.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors, or sets an
/// empty `backup_suffix`.
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

    if config.backup_suffix.as_deref() == Some("") {
        return Err(ConfigError::InvalidValue {
            path,
            field: "backup_suffix",
            reason: "must not be empty, the backup would overwrite the original".to_string(),
        });
    }

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/codenvim/config.toml` on Linux, the platform equivalent
/// elsewhere, or `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("codenvim").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `CODENVIM_CONFIG` environment variable
/// 3. Default path `~/.config/codenvim/config.toml`
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

    if let Some(env_path) = std::env::var_os(ENV_CONFIG) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{ENV_CONFIG} is set but empty")));
        }
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
        editor: config.editor.unwrap_or(defaults.editor),
        target_dir: config.target_dir.or(defaults.target_dir),
        source_dir: config.source_dir.unwrap_or(defaults.source_dir),
        backup_suffix: config.backup_suffix.unwrap_or(defaults.backup_suffix),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `CODENVIM_EDITOR`: Override editor flavour (unknown names are logged and ignored)
/// - `CODENVIM_TARGET_DIR`: Override target directory
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(name) = std::env::var(ENV_EDITOR) {
        match name.parse::<Editor>() {
            Ok(editor) => config.editor = editor,
            Err(err) => warn!(error = %err, "Ignoring {}", ENV_EDITOR),
        }
    }

    if let Some(dir) = std::env::var_os(ENV_TARGET_DIR).filter(|dir| !dir.is_empty()) {
        config.target_dir = Some(PathBuf::from(dir));
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for options that were explicitly given.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    editor_override: Option<Editor>,
    target_dir_override: Option<PathBuf>,
    source_dir_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(editor) = editor_override {
        config.editor = editor;
    }

    if let Some(dir) = target_dir_override {
        config.target_dir = Some(dir);
    }

    if let Some(dir) = source_dir_override {
        config.source_dir = dir;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
