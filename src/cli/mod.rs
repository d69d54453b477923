//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod css;
mod show;

use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;

use crate::config::{find_config, load_config, project_root, ConfigError};
use crate::context::BuildContext;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Sprites - resolve sprite sheet definitions and write their stylesheets
#[derive(Parser)]
#[command(name = "sprites")]
#[command(about = "Resolve sprite sheet definitions and write their stylesheets")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the stylesheet of every sprite in sprites.toml
    Css {
        /// Path to sprites.toml (default: search upward from the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only write stylesheets for these sprites
        #[arg(short, long)]
        sprite: Vec<String>,
    },

    /// Show the resolved image and stylesheet paths of each sprite
    Show {
        /// Path to sprites.toml (default: search upward from the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only show these sprites
        #[arg(short, long)]
        sprite: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Css { config, sprite } => css::run_css(config.as_deref(), sprite),
        Commands::Show { config, sprite, json } => show::run_show(config.as_deref(), sprite, json),
    }
}

/// Install the stderr log subscriber.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load sprites.toml and build a context rooted at its directory.
///
/// Without a config file, defaults apply and the current directory is the root.
pub(crate) fn load_context(
    config_path: Option<&Path>,
    sprites: Vec<String>,
) -> Result<BuildContext, ConfigError> {
    let found = match config_path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    let config = load_config(found.as_deref())?;
    let root = found
        .as_deref()
        .and_then(project_root)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let ctx = BuildContext::new(config, root);
    Ok(if sprites.is_empty() { ctx } else { ctx.with_filter(sprites) })
}

/// First name in the context's sprite filter that the manifest does not define.
pub(crate) fn unknown_sprite(ctx: &BuildContext) -> Option<&str> {
    ctx.sprite_filter()?
        .iter()
        .find(|name| !ctx.config().sprites.contains_key(name.as_str()))
        .map(String::as_str)
}
