//! Configuration schema types for `sprites.toml`
//!
//! Defines the structure and validation rules for a sprite manifest.

use crate::pieces::PieceOptions;
use crate::sprite::Orientation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Project metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
    /// Web root that sprite and stylesheet paths are relative to
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from("public")
}

/// Output and input directories, relative to the web root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory combined sprite images are served from
    #[serde(default = "default_sprites")]
    pub sprites: PathBuf,
    /// Directory generated stylesheets are written to
    #[serde(default = "default_stylesheets")]
    pub stylesheets: PathBuf,
    /// Directory piece images are discovered in
    #[serde(default = "default_pieces")]
    pub pieces: PathBuf,
}

fn default_sprites() -> PathBuf {
    PathBuf::from("images/sprites")
}

fn default_stylesheets() -> PathBuf {
    PathBuf::from("stylesheets/sprites")
}

fn default_pieces() -> PathBuf {
    PathBuf::from("images/sprite_images")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sprites: default_sprites(),
            stylesheets: default_stylesheets(),
            pieces: default_pieces(),
        }
    }
}

/// Default settings applied to every sprite
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Layout direction used when a sprite does not set its own
    #[serde(default)]
    pub orientation: Orientation,
}

/// A single `[sprites.<name>]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteEntry {
    /// Output image named `<rename>.png` instead of `<name>.png`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename: Option<String>,
    /// Explicit output image path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Glob for piece images, relative to `paths.pieces`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Stylesheet path paired with `source`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
    /// Layout direction (overrides defaults)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    /// Explicitly listed pieces, registered before discovered ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pieces: Vec<PieceOptions>,
}

/// Complete sprites.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpritesConfig {
    /// Project metadata (required)
    pub project: ProjectConfig,
    /// Directory layout
    #[serde(default)]
    pub paths: PathsConfig,
    /// Default settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Sprite definitions keyed by name
    #[serde(default)]
    pub sprites: BTreeMap<String, SpriteEntry>,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "sprites.buttons.rename")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sprites.toml: '{}' {}", self.field, self.message)
    }
}

impl SpritesConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.project.name.is_empty() {
            errors.push(ConfigValidationError {
                field: "project.name".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        for (name, entry) in &self.sprites {
            if name.is_empty() {
                errors.push(ConfigValidationError {
                    field: "sprites".to_string(),
                    message: "sprite names must be non-empty".to_string(),
                });
            }

            if entry.rename.is_some() && entry.path.is_some() {
                errors.push(ConfigValidationError {
                    field: format!("sprites.{}.rename", name),
                    message: "cannot be combined with 'path'".to_string(),
                });
            }

            if matches!(entry.rename.as_deref(), Some("")) {
                errors.push(ConfigValidationError {
                    field: format!("sprites.{}.rename", name),
                    message: "must be a non-empty string".to_string(),
                });
            }

            if matches!(entry.path.as_deref(), Some("")) {
                errors.push(ConfigValidationError {
                    field: format!("sprites.{}.path", name),
                    message: "must be a non-empty string".to_string(),
                });
            }

            // The stylesheet only rides along with a path taken from `source`.
            if entry.stylesheet.is_some() {
                if entry.source.is_none() {
                    errors.push(ConfigValidationError {
                        field: format!("sprites.{}.stylesheet", name),
                        message: "requires 'source'".to_string(),
                    });
                } else if entry.rename.is_some() || entry.path.is_some() {
                    errors.push(ConfigValidationError {
                        field: format!("sprites.{}.stylesheet", name),
                        message: "is ignored when 'path' or 'rename' is set".to_string(),
                    });
                }
            }

            if entry.stylesheet.as_deref().is_some_and(|css| Path::new(css).has_root()) {
                errors.push(ConfigValidationError {
                    field: format!("sprites.{}.stylesheet", name),
                    message: "must be relative to 'paths.stylesheets'".to_string(),
                });
            }

            for (index, piece) in entry.pieces.iter().enumerate() {
                if piece.path.as_os_str().is_empty() {
                    errors.push(ConfigValidationError {
                        field: format!("sprites.{}.pieces[{}].path", name, index),
                        message: "must be a non-empty path".to_string(),
                    });
                }
            }
        }

        errors
    }

    /// Get the effective orientation for a sprite (sprite-specific or default)
    pub fn effective_orientation(&self, entry: &SpriteEntry) -> Orientation {
        entry.orientation.unwrap_or(self.defaults.orientation)
    }
}
