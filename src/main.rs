//! vaultnav - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use vaultnav::source::SearchToolKind;

/// vaultnav - browse full-text search results over a markdown vault
#[derive(Parser, Debug)]
#[command(name = "vaultnav")]
#[command(version)]
#[command(about = "Interactive terminal browser for full-text search results over a markdown vault")]
pub struct Args {
    /// Search query; opens the results list directly instead of the menu
    pub query: Option<String>,

    /// Vault root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Document file extension
    #[arg(long)]
    pub extension: Option<String>,

    /// Search program: grep or rg
    #[arg(long)]
    pub search_tool: Option<SearchToolKind>,

    /// Editor command (overrides $EDITOR)
    #[arg(long)]
    pub editor: Option<String>,

    /// Color theme for code blocks in previews
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(vaultnav::markdown::VALID_THEMES.iter().copied()))]
    pub theme: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> vaultnav::config::CliOverrides {
        vaultnav::config::CliOverrides {
            root: self.root.clone(),
            extension: self.extension.clone(),
            search_tool: self.search_tool,
            editor: self.editor.clone(),
            theme: self.theme.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let mut config = {
        let config_file = vaultnav::config::load_config_with_precedence(args.config.clone())?;
        let merged = vaultnav::config::merge_config(config_file);
        let with_env = vaultnav::config::apply_env_overrides(merged);
        vaultnav::config::apply_cli_overrides(with_env, args.overrides())
    };
    config.root = vaultnav::config::resolve_root(&config.root)?;

    vaultnav::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");
    if !vaultnav::markdown::is_valid_theme(&config.theme) {
        warn!(theme = %config.theme, "Unknown theme, using default");
    }

    let colors = vaultnav::view::ColorConfig::from_env_and_args(args.no_color);
    vaultnav::view::run_with_config(&config, args.query.as_deref(), colors)?;

    Ok(())
}
