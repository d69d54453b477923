//! Sprite pieces - the individual images combined into a sprite sheet
//!
//! Pieces are kept in registration order. Layout stacks them along the
//! sprite's orientation so each piece gets a fixed offset in the sheet.

use crate::sprite::{Orientation, SpriteError};
use glob::glob;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Options accepted when registering a piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceOptions {
    /// Piece image path
    pub path: PathBuf,
    /// Piece name (defaults to the file stem)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// CSS selector (defaults to `.<sprite>-<piece>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl PieceOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), name: None, selector: None, width: None, height: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// A registered piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpritePiece {
    pub name: String,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl SpritePiece {
    /// Selector used in the stylesheet for this piece.
    pub fn selector_for(&self, sprite_name: &str) -> String {
        match &self.selector {
            Some(selector) => selector.clone(),
            None => format!(".{}-{}", sprite_name, self.name),
        }
    }

    /// Whether the piece has known, non-zero dimensions.
    pub fn has_size(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Offset of a piece within the combined image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Index into the pieces collection
    pub index: usize,
    pub x: u32,
    pub y: u32,
}

/// Result of laying out a pieces collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetLayout {
    pub placements: Vec<Placement>,
    /// Combined image dimensions
    pub size: [u32; 2],
}

/// Ordered registry of pieces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpritePieces {
    pieces: Vec<SpritePiece>,
}

impl SpritePieces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a piece and return it.
    pub fn add(&mut self, options: PieceOptions) -> &SpritePiece {
        let name = options.name.unwrap_or_else(|| {
            options
                .path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("piece{}", self.pieces.len()))
        });

        self.pieces.push(SpritePiece {
            name,
            path: options.path,
            selector: options.selector,
            width: options.width.unwrap_or(0),
            height: options.height.unwrap_or(0),
        });
        &self.pieces[self.pieces.len() - 1]
    }

    pub fn get(&self, name: &str) -> Option<&SpritePiece> {
        self.pieces.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpritePiece> {
        self.pieces.iter()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Stack pieces along `orientation`.
    ///
    /// Vertical sheets are as wide as the widest piece and as tall as all
    /// pieces together; horizontal sheets the other way around. Pieces
    /// without dimensions take no space.
    ///
    /// Fails with [`SpriteError::SheetTooLarge`] when the stacked pieces
    /// do not fit in `u32` pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprites::pieces::{PieceOptions, SpritePieces};
    /// use sprites::sprite::Orientation;
    ///
    /// let mut pieces = SpritePieces::new();
    /// pieces.add(PieceOptions::new("a.png").with_size(4, 2));
    /// pieces.add(PieceOptions::new("b.png").with_size(3, 5));
    ///
    /// let layout = pieces.layout(Orientation::Vertical).unwrap();
    /// assert_eq!(layout.size, [4, 7]);
    /// assert_eq!((layout.placements[1].x, layout.placements[1].y), (0, 2));
    /// ```
    pub fn layout(&self, orientation: Orientation) -> Result<SheetLayout, SpriteError> {
        let mut placements = Vec::with_capacity(self.pieces.len());
        let mut offset = 0u32;
        let mut breadth = 0u32;

        for (index, piece) in self.pieces.iter().enumerate() {
            let (x, y, along, across) = match orientation {
                Orientation::Vertical => (0, offset, piece.height, piece.width),
                Orientation::Horizontal => (offset, 0, piece.width, piece.height),
            };
            placements.push(Placement { index, x, y });
            offset = offset.checked_add(along).ok_or(SpriteError::SheetTooLarge(orientation))?;
            breadth = breadth.max(across);
        }

        let size = match orientation {
            Orientation::Vertical => [breadth, offset],
            Orientation::Horizontal => [offset, breadth],
        };

        Ok(SheetLayout { placements, size })
    }

    /// Discover piece images matching a glob pattern.
    ///
    /// The pattern is resolved against `root`; returned piece paths are
    /// relative to it. Dimensions come from the image headers.
    pub fn discover(root: &Path, pattern: &str) -> Result<Vec<PieceOptions>, SpriteError> {
        let full_pattern = root.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        let paths = glob(&pattern_str)
            .map_err(|source| SpriteError::Pattern { pattern: pattern.to_string(), source })?;

        let mut files = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => warn!("error reading path: {}", e),
            }
        }
        files.sort();

        let mut pieces = Vec::with_capacity(files.len());
        for path in files {
            let (width, height) = image::image_dimensions(&path)
                .map_err(|source| SpriteError::Image { path: path.clone(), source })?;
            let relative = path.strip_prefix(root).map(Path::to_path_buf).unwrap_or(path);
            debug!(piece = %relative.display(), width, height, "discovered piece");
            pieces.push(PieceOptions::new(relative).with_size(width, height));
        }

        Ok(pieces)
    }
}

impl<'a> IntoIterator for &'a SpritePieces {
    type Item = &'a SpritePiece;
    type IntoIter = std::slice::Iter<'a, SpritePiece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn sized(path: &str, width: u32, height: u32) -> PieceOptions {
        PieceOptions::new(path).with_size(width, height)
    }

    #[test]
    fn test_add_defaults_name_to_file_stem() {
        let mut pieces = SpritePieces::new();
        let piece = pieces.add(PieceOptions::new("buttons/ok.png"));

        assert_eq!(piece.name, "ok");
        assert_eq!(piece.width, 0);
        assert!(!piece.has_size());
    }

    #[test]
    fn test_add_preserves_order() {
        let mut pieces = SpritePieces::new();
        pieces.add(PieceOptions::new("b.png"));
        pieces.add(PieceOptions::new("a.png").with_name("first"));
        pieces.add(PieceOptions::new("c.png"));

        let names: Vec<_> = pieces.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "first", "c"]);
        assert_eq!(pieces.len(), 3);
        assert!(pieces.get("first").is_some());
    }

    #[test]
    fn test_selector_for() {
        let mut pieces = SpritePieces::new();
        pieces.add(PieceOptions::new("ok.png"));
        pieces.add(PieceOptions::new("cancel.png").with_selector("a.cancel"));

        assert_eq!(pieces.get("ok").unwrap().selector_for("buttons"), ".buttons-ok");
        assert_eq!(pieces.get("cancel").unwrap().selector_for("buttons"), "a.cancel");
    }

    #[test]
    fn test_layout_empty() {
        let layout = SpritePieces::new().layout(Orientation::Vertical).unwrap();
        assert!(layout.placements.is_empty());
        assert_eq!(layout.size, [0, 0]);
    }

    #[test]
    fn test_layout_vertical() {
        let mut pieces = SpritePieces::new();
        pieces.add(sized("a.png", 10, 4));
        pieces.add(sized("b.png", 6, 8));
        pieces.add(sized("c.png", 12, 2));

        let layout = pieces.layout(Orientation::Vertical).unwrap();
        let offsets: Vec<_> = layout.placements.iter().map(|p| (p.x, p.y)).collect();

        assert_eq!(offsets, vec![(0, 0), (0, 4), (0, 12)]);
        assert_eq!(layout.size, [12, 14]);
    }

    #[test]
    fn test_layout_horizontal() {
        let mut pieces = SpritePieces::new();
        pieces.add(sized("a.png", 10, 4));
        pieces.add(sized("b.png", 6, 8));

        let layout = pieces.layout(Orientation::Horizontal).unwrap();
        let offsets: Vec<_> = layout.placements.iter().map(|p| (p.x, p.y)).collect();

        assert_eq!(offsets, vec![(0, 0), (10, 0)]);
        assert_eq!(layout.size, [16, 8]);
    }

    #[test]
    fn test_layout_unsized_piece_takes_no_space() {
        let mut pieces = SpritePieces::new();
        pieces.add(sized("a.png", 4, 4));
        pieces.add(PieceOptions::new("unknown.png"));
        pieces.add(sized("b.png", 4, 4));

        let layout = pieces.layout(Orientation::Vertical).unwrap();
        assert_eq!(layout.placements[1].y, 4);
        assert_eq!(layout.placements[2].y, 4);
        assert_eq!(layout.size, [4, 8]);
    }

    #[test]
    fn test_layout_too_large_for_sheet() {
        let mut pieces = SpritePieces::new();
        pieces.add(sized("a.png", 1, 3_000_000_000));
        pieces.add(sized("b.png", 1, 3_000_000_000));

        let err = pieces.layout(Orientation::Vertical).unwrap_err();
        assert!(matches!(err, SpriteError::SheetTooLarge(Orientation::Vertical)));

        // Breadth takes the maximum, so the other axis still fits
        let layout = pieces.layout(Orientation::Horizontal).unwrap();
        assert_eq!(layout.size, [2, 3_000_000_000]);
    }

    #[test]
    fn test_discover_reads_dimensions() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("icons");
        std::fs::create_dir_all(&dir).unwrap();
        RgbaImage::from_pixel(3, 5, Rgba([255, 0, 0, 255])).save(dir.join("b.png")).unwrap();
        RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 255])).save(dir.join("a.png")).unwrap();
        std::fs::write(dir.join("notes.txt"), "not an image").unwrap();

        let found = SpritePieces::discover(temp.path(), "icons/*.png").unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].path, PathBuf::from("icons/a.png"));
        assert_eq!((found[0].width, found[0].height), (Some(2), Some(2)));
        assert_eq!(found[1].path, PathBuf::from("icons/b.png"));
        assert_eq!((found[1].width, found[1].height), (Some(3), Some(5)));
    }

    #[test]
    fn test_discover_no_matches() {
        let temp = TempDir::new().unwrap();
        let found = SpritePieces::discover(temp.path(), "missing/*.png").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_discover_invalid_pattern() {
        let temp = TempDir::new().unwrap();
        let err = SpritePieces::discover(temp.path(), "icons/[.png").unwrap_err();
        assert!(matches!(err, SpriteError::Pattern { .. }));
    }

    #[test]
    fn test_discover_unreadable_image() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("broken.png"), "not a png").unwrap();

        let err = SpritePieces::discover(temp.path(), "*.png").unwrap_err();
        assert!(matches!(err, SpriteError::Image { .. }));
    }
}
