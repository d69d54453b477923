//! Stylesheet generation - one CSS rule per sprite piece
//!
//! Each rule points at the combined sprite image and shifts the background
//! so only the piece's region shows:
//!
//! ```text
//! .buttons-ok {
//!   background: url('/images/sprites/buttons.png') no-repeat 0 -16px;
//!   width: 16px;
//!   height: 16px;
//! }
//! ```

use crate::context::BuildContext;
use crate::pieces::SpritePieces;
use crate::sprite::{SpriteDefinition, SpriteError};
use std::path::{Path, PathBuf};

/// A sprite's stylesheet, identified by its path below the stylesheet root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    path: PathBuf,
}

impl Stylesheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path relative to the stylesheet root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where `stylesheet` is written for a build.
    pub fn full_path(ctx: &BuildContext, stylesheet: &Stylesheet) -> PathBuf {
        ctx.stylesheets_path().join(&stylesheet.path)
    }

    /// Render CSS rules for `pieces`, laid out along the sprite's orientation.
    ///
    /// The sprite must already be resolved; its public image path goes into
    /// every rule's `url()`.
    pub fn css(
        &self,
        ctx: &BuildContext,
        sprite: &SpriteDefinition,
        pieces: &SpritePieces,
    ) -> Result<String, SpriteError> {
        let resolution =
            sprite.resolution().ok_or_else(|| SpriteError::Unresolved(sprite.name().to_string()))?;
        let url = resolution.css_reference(ctx);
        let layout = pieces.layout(sprite.orientation())?;

        let mut rules = Vec::with_capacity(layout.placements.len());
        for (placement, piece) in layout.placements.iter().zip(pieces) {
            let mut rule = format!("{} {{\n", piece.selector_for(sprite.name()));
            rule.push_str(&format!(
                "  background: url('{}') no-repeat {} {};\n",
                url,
                offset(placement.x),
                offset(placement.y)
            ));
            if piece.has_size() {
                rule.push_str(&format!("  width: {}px;\n", piece.width));
                rule.push_str(&format!("  height: {}px;\n", piece.height));
            }
            rule.push('}');
            rules.push(rule);
        }

        let mut css = rules.join("\n\n");
        if !css.is_empty() {
            css.push('\n');
        }
        Ok(css)
    }
}

/// Background offset for a placement coordinate.
fn offset(value: u32) -> String {
    if value == 0 {
        "0".to_string()
    } else {
        format!("-{}px", value)
    }
}
