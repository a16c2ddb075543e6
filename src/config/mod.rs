//! Configuration: TOML file, environment and command line, merged in that
//! order of increasing precedence.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, resolve_root, CliOverrides,
    ConfigError, ConfigFile, ResolvedConfig, DEFAULT_EDITOR, DEFAULT_EXTENSION,
};
