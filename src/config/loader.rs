//! Configuration file loading with precedence handling.
//!
//! Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest).

use crate::markdown::DEFAULT_THEME;
use crate::source::SearchToolKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "VAULTNAV_CONFIG";
/// Environment variable overriding the corpus root.
pub const ENV_ROOT: &str = "VAULTNAV_ROOT";
/// Environment variable overriding the highlight theme.
pub const ENV_THEME: &str = "VAULTNAV_THEME";
/// Conventional editor variable.
pub const ENV_EDITOR: &str = "EDITOR";

/// Editor used when neither config nor `$EDITOR` names one.
pub const DEFAULT_EDITOR: &str = "vi";
/// Document extension used when none is configured.
pub const DEFAULT_EXTENSION: &str = "md";

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

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// The corpus root does not exist or is not a directory.
    #[error("Vault root {path} is not usable: {reason}")]
    InvalidRoot {
        /// Root as configured.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional. Corresponds to `~/.config/vaultnav/config.toml`:
///
/// ```toml
/// root = "~/notes"
/// extension = "md"
/// search_tool = "rg"
/// editor = "nvim"
/// theme = "gruvbox-dark"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Corpus root directory.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Document extension, with or without the leading dot.
    #[serde(default)]
    pub extension: Option<String>,

    /// `grep` or `rg`.
    #[serde(default)]
    pub search_tool: Option<SearchToolKind>,

    /// Editor command, split shell-style.
    #[serde(default)]
    pub editor: Option<String>,

    /// Highlight theme name.
    #[serde(default)]
    pub theme: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Corpus root directory.
    pub root: PathBuf,
    /// Document extension, without the dot.
    pub extension: String,
    /// Search program.
    pub search_tool: SearchToolKind,
    /// Editor command string.
    pub editor: String,
    /// Highlight theme name.
    pub theme: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
            search_tool: SearchToolKind::default(),
            editor: DEFAULT_EDITOR.to_string(),
            theme: DEFAULT_THEME.to_string(),
            log_file_path: default_log_path(),
        }
    }
}

/// Values given on the command line. `None` leaves the lower layer in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--root`
    pub root: Option<PathBuf>,
    /// `--extension`
    pub extension: Option<String>,
    /// `--search-tool`
    pub search_tool: Option<SearchToolKind>,
    /// `--editor`
    pub editor: Option<String>,
    /// `--theme`
    pub theme: Option<String>,
}

/// Default log file path: `<state_dir>/vaultnav/vaultnav.log`.
///
/// Falls back to the current directory when the platform has no state dir.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("vaultnav").join("vaultnav.log"),
        None => PathBuf::from("vaultnav.log"),
    }
}

/// Default config file path: `<config_dir>/vaultnav/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vaultnav").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist.
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

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `VAULTNAV_CONFIG` environment variable
/// 3. Default path `~/.config/vaultnav/config.toml`
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

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        root: config.root.unwrap_or(defaults.root),
        extension: config
            .extension
            .map(|ext| normalize_extension(&ext))
            .unwrap_or(defaults.extension),
        search_tool: config.search_tool.unwrap_or(defaults.search_tool),
        editor: config.editor.unwrap_or(defaults.editor),
        theme: config.theme.unwrap_or(defaults.theme),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides.
///
/// Checks `VAULTNAV_ROOT`, `VAULTNAV_THEME` and `EDITOR`. Empty values are
/// ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(root) = non_empty_var(ENV_ROOT) {
        config.root = PathBuf::from(root);
    }
    if let Some(theme) = non_empty_var(ENV_THEME) {
        config.theme = theme;
    }
    if let Some(editor) = non_empty_var(ENV_EDITOR) {
        config.editor = editor;
    }
    config
}

/// Apply CLI argument overrides, the highest precedence layer.
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(root) = cli.root {
        config.root = root;
    }
    if let Some(extension) = cli.extension {
        config.extension = normalize_extension(&extension);
    }
    if let Some(search_tool) = cli.search_tool {
        config.search_tool = search_tool;
    }
    if let Some(editor) = cli.editor {
        config.editor = editor;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    config
}

/// Expand a leading `~` and canonicalize the corpus root.
///
/// # Errors
///
/// `InvalidRoot` if the path does not exist or is not a directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_home(root);
    let canonical = std::fs::canonicalize(&expanded).map_err(|e| ConfigError::InvalidRoot {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !canonical.is_dir() {
        return Err(ConfigError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    Ok(canonical)
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
