//! Sprite definitions - declaring sprite sheets and resolving their output paths

mod definition;
mod error;
mod manifest;
mod options;
mod resolve;

pub use definition::{sprite_css_path, sprite_full_path, Resolution, SpriteDefinition};
pub use error::SpriteError;
pub use manifest::build_definitions;
pub use options::{KnownOption, OptionKey, Orientation, SpriteOptions};
pub use resolve::{derive_css_path, resolve_path, PathOption, PathSpec};
