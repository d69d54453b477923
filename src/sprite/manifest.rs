//! Building sprite definitions from `sprites.toml` entries

use super::{KnownOption, OptionKey, PathSpec, SpriteDefinition, SpriteError, SpriteOptions};
use crate::config::SpriteEntry;
use crate::context::BuildContext;
use crate::pieces::SpritePieces;
use serde_json::Value;
use tracing::debug;

impl SpriteDefinition {
    /// Declare a sprite from a manifest entry and register its pieces.
    ///
    /// `rename` and `path` map onto [`PathSpec::Symbol`] and
    /// [`PathSpec::Literal`]. A `source` glob becomes a string-keyed option
    /// whose value is the entry's `stylesheet` (or `true`), and is also used
    /// to discover piece images under the build's pieces directory. Listed
    /// pieces are registered before discovered ones.
    pub fn from_config(
        ctx: &BuildContext,
        name: &str,
        entry: &SpriteEntry,
    ) -> Result<Self, SpriteError> {
        let mut sprite = SpriteDefinition::new(name);

        let spec = match (&entry.rename, &entry.path) {
            (Some(rename), _) => PathSpec::symbol(rename.clone()),
            (None, Some(path)) => PathSpec::literal(path.clone()),
            (None, None) => PathSpec::NoArg,
        };

        let mut options = SpriteOptions::new().with(
            OptionKey::symbol(KnownOption::Orientation.name()),
            ctx.config().effective_orientation(entry),
        );
        if let Some(source) = &entry.source {
            let value = match &entry.stylesheet {
                Some(css) => Value::String(css.clone()),
                None => Value::Bool(true),
            };
            options.insert(OptionKey::string(source.clone()), value);
        }

        sprite.configure(spec, options)?;

        for piece in &entry.pieces {
            sprite.sprite_piece(piece.clone());
        }
        if let Some(source) = &entry.source {
            let discovered = SpritePieces::discover(&ctx.pieces_path(), source)?;
            debug!(sprite = name, source = %source, count = discovered.len(), "discovered pieces");
            for piece in discovered {
                sprite.sprite_piece(piece);
            }
        }

        Ok(sprite)
    }
}

/// Build every sprite in the context's manifest that passes its filter.
///
/// Sprites come back in name order.
pub fn build_definitions(ctx: &BuildContext) -> Result<Vec<SpriteDefinition>, SpriteError> {
    ctx.config()
        .sprites
        .iter()
        .filter(|(name, _)| ctx.includes(name))
        .map(|(name, entry)| SpriteDefinition::from_config(ctx, name, entry))
        .collect()
}
