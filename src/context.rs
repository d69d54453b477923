//! Build context containing configuration and resolved directories for a build.

use crate::config::SpritesConfig;
use std::path::{Path, PathBuf};

/// Build context containing configuration and paths for a build operation.
///
/// Sprite paths are web-relative (they end up inside stylesheet `url()`s),
/// while the stylesheet and piece directories resolve to real filesystem
/// locations under the project root.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The loaded configuration
    config: SpritesConfig,
    /// Project root directory (where sprites.toml is located)
    project_root: PathBuf,
    /// Optional filter to build specific sprites only
    sprite_filter: Option<Vec<String>>,
}

impl BuildContext {
    /// Create a new build context.
    ///
    /// # Arguments
    /// - `config` - The loaded configuration
    /// - `project_root` - The project root directory
    pub fn new(config: SpritesConfig, project_root: PathBuf) -> Self {
        Self { config, project_root, sprite_filter: None }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SpritesConfig {
        &self.config
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Web root directory (resolved to absolute path).
    pub fn web_root(&self) -> PathBuf {
        self.resolve_path(&self.config.project.root)
    }

    /// Root directory of combined sprite images, relative to the web root.
    pub fn sprites_path(&self) -> &Path {
        &self.config.paths.sprites
    }

    /// Directory stylesheets are written to (resolved to absolute path).
    pub fn stylesheets_path(&self) -> PathBuf {
        self.web_root().join(&self.config.paths.stylesheets)
    }

    /// Directory piece images are discovered in (resolved to absolute path).
    pub fn pieces_path(&self) -> PathBuf {
        self.web_root().join(&self.config.paths.pieces)
    }

    /// Set a filter to build only specific sprites.
    pub fn with_filter(mut self, sprites: Vec<String>) -> Self {
        self.sprite_filter = Some(sprites);
        self
    }

    /// Get the sprite filter.
    pub fn sprite_filter(&self) -> Option<&[String]> {
        self.sprite_filter.as_deref()
    }

    /// Whether a sprite passes the filter (always true without one).
    pub fn includes(&self, name: &str) -> bool {
        match &self.sprite_filter {
            Some(names) => names.iter().any(|n| n == name),
            None => true,
        }
    }

    /// Resolve a path relative to the project root.
    ///
    /// If the path is absolute, returns it unchanged.
    /// If relative, joins it with the project root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}
