//! Configuration loading and discovery for `sprites.toml`
//!
//! Provides functions to find and load the sprite manifest.

use super::schema::{DefaultsConfig, PathsConfig, ProjectConfig, SpritesConfig};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the manifest file looked up by [`find_config`]
pub const CONFIG_FILE: &str = "sprites.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse sprites.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Find sprites.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find sprites.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a sprites.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns a default
/// configuration with no sprites.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("site/sprites.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<SpritesConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            debug!("no {} found, using defaults", CONFIG_FILE);
            Ok(default_config())
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SpritesConfig, ConfigError> {
    debug!(path = %path.display(), "loading sprite manifest");
    let contents = fs::read_to_string(path)?;
    let config: SpritesConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Create a default configuration when no sprites.toml is found.
///
/// The project name is the current directory name.
pub fn default_config() -> SpritesConfig {
    let project_name = env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unnamed".to_string());

    SpritesConfig {
        project: ProjectConfig { name: project_name, root: PathBuf::from("public") },
        paths: PathsConfig::default(),
        defaults: DefaultsConfig::default(),
        sprites: BTreeMap::new(),
    }
}

/// Get the project root directory from a config file path.
///
/// Returns the parent directory of the sprites.toml file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}
