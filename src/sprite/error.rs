//! Error types for sprite definitions

use super::Orientation;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised while declaring, resolving or writing a sprite.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpriteError {
    /// Orientation value is not one of the known layouts
    #[error("invalid orientation {0}, expected \"vertical\" or \"horizontal\"")]
    InvalidOrientation(String),
    /// Path could only come from the options and no string-keyed entry exists
    #[error("Path is not a string.  See usage.")]
    PathNotString,
    /// Stacked pieces exceed the largest representable sheet
    #[error("pieces do not fit in a {0} sprite sheet")]
    SheetTooLarge(Orientation),
    /// Sprite was rendered before its path and stylesheet were resolved
    #[error("sprite '{0}' has not been resolved")]
    Unresolved(String),
    /// Invalid piece discovery pattern
    #[error("invalid piece pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    /// Piece image header could not be read
    #[error("failed to read piece image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
