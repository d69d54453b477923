//! The sprite definition: a named set of pieces plus its lazily resolved
//! output image path and stylesheet.

use super::options::{KnownOption, OptionKey, Orientation, SpriteOptions};
use super::resolve::{derive_css_path, resolve_path, PathOption, PathSpec};
use super::SpriteError;
use crate::context::BuildContext;
use crate::output::write_output;
use crate::pieces::{PieceOptions, SpritePiece, SpritePieces};
use crate::stylesheet::Stylesheet;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output image path and stylesheet, fixed together on first resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    path: String,
    stylesheet: Stylesheet,
}

impl Resolution {
    /// Output image path, relative to the sprite root.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Image path joined onto the build's sprite root.
    pub fn full_path(&self, ctx: &BuildContext) -> PathBuf {
        ctx.sprites_path().join(&self.path)
    }

    /// Root-relative reference to the image, as used in stylesheets.
    pub fn css_reference(&self, ctx: &BuildContext) -> String {
        format!("/{}", self.full_path(ctx).to_string_lossy())
    }
}

/// A named sprite sheet declaration.
///
/// Path and stylesheet stay unresolved until the first [`configure`] call or
/// the first accessor that needs them; after that they never change.
///
/// # Examples
///
/// ```
/// use sprites::pieces::PieceOptions;
/// use sprites::sprite::{Orientation, PathSpec, SpriteDefinition, SpriteOptions};
///
/// let mut sprite = SpriteDefinition::new("buttons");
/// sprite
///     .configure_with(PathSpec::symbol("btn"), SpriteOptions::new(), |s| {
///         s.set_orientation(Orientation::Horizontal)?;
///         s.sprite_piece(PieceOptions::new("ok.png").with_size(16, 16));
///         Ok(())
///     })
///     .unwrap();
///
/// assert_eq!(sprite.path().unwrap(), "btn.png");
/// assert_eq!(sprite.stylesheet_path().unwrap().to_str(), Some("btn.css"));
/// assert_eq!(sprite.orientation(), Orientation::Horizontal);
/// ```
///
/// [`configure`]: SpriteDefinition::configure
#[derive(Debug, Clone)]
pub struct SpriteDefinition {
    name: String,
    options: SpriteOptions,
    orientation: Orientation,
    pieces: SpritePieces,
    resolution: Option<Resolution>,
}

impl SpriteDefinition {
    /// Create an unresolved definition with default options applied.
    pub fn new(name: impl Into<String>) -> Self {
        let options = SpriteOptions::defaults();
        Self {
            name: name.into(),
            options,
            orientation: Orientation::default(),
            pieces: SpritePieces::new(),
            resolution: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accumulated options, after any configure calls.
    pub fn options(&self) -> &SpriteOptions {
        &self.options
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set the orientation from an [`Orientation`] or a raw option value.
    ///
    /// Invalid values leave the current orientation untouched.
    pub fn set_orientation(&mut self, value: impl Into<Value>) -> Result<&mut Self, SpriteError> {
        self.orientation = Orientation::from_value(&value.into())?;
        Ok(self)
    }

    pub fn pieces(&self) -> &SpritePieces {
        &self.pieces
    }

    /// Register a piece; allowed before and after resolution.
    pub fn sprite_piece(&mut self, options: PieceOptions) -> &SpritePiece {
        self.pieces.add(options)
    }

    /// Merge `options`, resolve path and stylesheet if not yet resolved, and
    /// apply known options.
    ///
    /// Once resolved, later calls still merge and apply options but never
    /// change the path or stylesheet.
    pub fn configure(
        &mut self,
        spec: PathSpec,
        options: SpriteOptions,
    ) -> Result<&mut Self, SpriteError> {
        self.options.merge(options);

        if self.resolution.is_none() {
            let resolution = self.resolve(&spec)?;
            debug!(
                sprite = %self.name,
                path = %resolution.path,
                stylesheet = %resolution.stylesheet.path().display(),
                "resolved sprite"
            );
            self.resolution = Some(resolution);
        }

        if let Some(resolution) = &self.resolution {
            let path_key = OptionKey::Str(resolution.path.clone());
            self.options.remove(&path_key);
        }

        self.apply_options()?;
        Ok(self)
    }

    /// [`configure`](Self::configure), then run `body` against the definition.
    pub fn configure_with<F>(
        &mut self,
        spec: PathSpec,
        options: SpriteOptions,
        body: F,
    ) -> Result<&mut Self, SpriteError>
    where
        F: FnOnce(&mut Self) -> Result<(), SpriteError>,
    {
        self.configure(spec, options)?;
        body(&mut *self)?;
        Ok(self)
    }

    /// Resolve with no arguments unless already resolved.
    pub fn configure_if_needed(&mut self) -> Result<&Resolution, SpriteError> {
        if self.resolution.is_none() {
            self.configure(PathSpec::NoArg, SpriteOptions::new())?;
        }
        self.resolution.as_ref().ok_or_else(|| SpriteError::Unresolved(self.name.clone()))
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// The resolution, if one has happened. Never triggers resolution.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    /// Output image path, resolving first if needed.
    pub fn path(&mut self) -> Result<&str, SpriteError> {
        Ok(self.configure_if_needed()?.path())
    }

    /// Stylesheet, resolving first if needed.
    pub fn stylesheet(&mut self) -> Result<&Stylesheet, SpriteError> {
        Ok(self.configure_if_needed()?.stylesheet())
    }

    /// Stylesheet path, resolving first if needed.
    pub fn stylesheet_path(&mut self) -> Result<&Path, SpriteError> {
        Ok(self.configure_if_needed()?.stylesheet().path())
    }

    /// Render this sprite's stylesheet with its own pieces and write it.
    ///
    /// Returns the path written to.
    pub fn write_stylesheet(&mut self, ctx: &BuildContext) -> Result<PathBuf, SpriteError> {
        self.configure_if_needed()?;
        self.write_resolved(ctx, &self.pieces)
    }

    /// Render this sprite's stylesheet for an explicit set of pieces and write it.
    pub fn write_stylesheet_with(
        &mut self,
        ctx: &BuildContext,
        pieces: &SpritePieces,
    ) -> Result<PathBuf, SpriteError> {
        self.configure_if_needed()?;
        self.write_resolved(ctx, pieces)
    }

    fn write_resolved(
        &self,
        ctx: &BuildContext,
        pieces: &SpritePieces,
    ) -> Result<PathBuf, SpriteError> {
        let resolution =
            self.resolution.as_ref().ok_or_else(|| SpriteError::Unresolved(self.name.clone()))?;
        let stylesheet = resolution.stylesheet();
        let path = Stylesheet::full_path(ctx, stylesheet);
        let css = stylesheet.css(ctx, self, pieces)?;

        write_output(&path, css.as_bytes())?;
        info!(sprite = %self.name, path = %path.display(), pieces = pieces.len(), "wrote stylesheet");
        Ok(path)
    }

    /// Compute path and stylesheet; path is validated before the stylesheet exists.
    fn resolve(&self, spec: &PathSpec) -> Result<Resolution, SpriteError> {
        let mut path_option = PathOption::new(&self.options);
        let path = resolve_path(&self.name, spec, &mut path_option)?;
        let css_path = derive_css_path(&path, &path_option);
        Ok(Resolution { path, stylesheet: Stylesheet::new(css_path) })
    }

    fn apply_options(&mut self) -> Result<(), SpriteError> {
        let known: Vec<(KnownOption, Value)> = self
            .options
            .iter()
            .filter_map(|(key, value)| KnownOption::from_key(key).map(|o| (o, value.clone())))
            .collect();

        for (option, value) in known {
            match option {
                KnownOption::Orientation => {
                    self.set_orientation(value)?;
                }
            }
        }
        Ok(())
    }
}

/// Sprite image path joined onto the build's sprite root.
pub fn sprite_full_path(
    ctx: &BuildContext,
    sprite: &mut SpriteDefinition,
) -> Result<PathBuf, SpriteError> {
    Ok(sprite.configure_if_needed()?.full_path(ctx))
}

/// Root-relative reference to the sprite image (`/` + full path).
pub fn sprite_css_path(
    ctx: &BuildContext,
    sprite: &mut SpriteDefinition,
) -> Result<String, SpriteError> {
    Ok(sprite.configure_if_needed()?.css_reference(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use serde_json::json;

    fn ctx() -> BuildContext {
        BuildContext::new(default_config(), PathBuf::from("/site"))
    }

    #[test]
    fn test_new_is_unresolved_with_defaults() {
        let sprite = SpriteDefinition::new("logo");
        assert_eq!(sprite.name(), "logo");
        assert!(!sprite.is_resolved());
        assert!(sprite.resolution().is_none());
        assert_eq!(sprite.orientation(), Orientation::Vertical);
        assert_eq!(
            sprite.options().get(&OptionKey::symbol("orientation")),
            Some(&json!("vertical"))
        );
        assert!(sprite.pieces().is_empty());
    }

    #[test]
    fn test_configure_no_args_uses_name() {
        let mut sprite = SpriteDefinition::new("logo");
        sprite.configure(PathSpec::NoArg, SpriteOptions::new()).unwrap();
        assert!(sprite.is_resolved());
        assert_eq!(sprite.path().unwrap(), "logo.png");
        assert_eq!(sprite.stylesheet_path().unwrap(), Path::new("logo.css"));
    }

    #[test]
    fn test_configure_symbol() {
        let mut sprite = SpriteDefinition::new("logo");
        sprite.configure(PathSpec::symbol("foo"), SpriteOptions::new()).unwrap();
        assert_eq!(sprite.path().unwrap(), "foo.png");
    }

    #[test]
    fn test_configure_literal() {
        let mut sprite = SpriteDefinition::new("logo");
        sprite.configure(PathSpec::literal("custom/path.png"), SpriteOptions::new()).unwrap();
        assert_eq!(sprite.path().unwrap(), "custom/path.png");
        assert_eq!(sprite.stylesheet_path().unwrap(), Path::new("custom/path.css"));
    }

    #[test]
    fn test_configure_string_keyed_option() {
        let mut sprite = SpriteDefinition::new("logo");
        let options = SpriteOptions::new().with(OptionKey::string("glob/*.png"), true);
        sprite.configure(PathSpec::NoArg, options).unwrap();

        assert_eq!(sprite.path().unwrap(), "glob/*.png");
        // The entry naming the path is consumed
        assert!(sprite.options().get(&OptionKey::string("glob/*.png")).is_none());
    }

    #[test]
    fn test_configure_string_keyed_option_names_stylesheet() {
        let mut sprite = SpriteDefinition::new("icons");
        let options = SpriteOptions::new().with(OptionKey::string("icons/*.png"), "icons.css");
        sprite.configure(PathSpec::NoArg, options).unwrap();

        assert_eq!(sprite.path().unwrap(), "icons/*.png");
        assert_eq!(sprite.stylesheet_path().unwrap(), Path::new("icons.css"));
    }

    #[test]
    fn test_configure_from_option_without_string_key_fails() {
        let mut sprite = SpriteDefinition::new("logo");
        let options = SpriteOptions::new().with(OptionKey::Int(1), true);
        let err = sprite.configure(PathSpec::FromOption, options).unwrap_err();

        assert!(matches!(err, SpriteError::PathNotString));
        assert!(!sprite.is_resolved());
    }

    #[test]
    fn test_resolution_is_fixed_after_first_configure() {
        let mut sprite = SpriteDefinition::new("logo");
        sprite.configure(PathSpec::literal("first.png"), SpriteOptions::new()).unwrap();
        let first = sprite.resolution().cloned();

        sprite.configure(PathSpec::symbol("second"), SpriteOptions::new()).unwrap();
        sprite
            .configure(
                PathSpec::NoArg,
                SpriteOptions::new().with(OptionKey::string("third/*.png"), "third.css"),
            )
            .unwrap();

        assert_eq!(sprite.resolution().cloned(), first);
        assert_eq!(sprite.path().unwrap(), "first.png");
        assert_eq!(sprite.stylesheet_path().unwrap(), Path::new("first.css"));
    }

    #[test]
    fn test_accessors_resolve_lazily() {
        let mut sprite = SpriteDefinition::new("lazy");
        assert_eq!(sprite.stylesheet().unwrap().path(), Path::new("lazy.css"));
        assert!(sprite.is_resolved());

        let mut sprite = SpriteDefinition::new("lazy");
        assert_eq!(sprite.path().unwrap(), "lazy.png");
        assert!(sprite.is_resolved());
    }

    #[test]
    fn test_configure_if_needed_is_idempotent() {
        let mut sprite = SpriteDefinition::new("once");
        let first = sprite.configure_if_needed().unwrap().clone();
        let second = sprite.configure_if_needed().unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_configure_applies_orientation_option() {
        let mut sprite = SpriteDefinition::new("row");
        let options =
            SpriteOptions::new().with(OptionKey::symbol("orientation"), Orientation::Horizontal);
        sprite.configure(PathSpec::NoArg, options).unwrap();
        assert_eq!(sprite.orientation(), Orientation::Horizontal);
    }

    #[test]
    fn test_configure_invalid_orientation_option() {
        let mut sprite = SpriteDefinition::new("row");
        let options = SpriteOptions::new().with(OptionKey::symbol("orientation"), 3);
        let err = sprite.configure(PathSpec::NoArg, options).unwrap_err();

        assert!(matches!(err, SpriteError::InvalidOrientation(_)));
        assert_eq!(sprite.orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_configure_ignores_unknown_options() {
        let mut sprite = SpriteDefinition::new("logo");
        let options = SpriteOptions::new()
            .with(OptionKey::symbol("padding"), 4)
            .with(OptionKey::Int(9), "nine");
        sprite.configure(PathSpec::NoArg, options).unwrap();

        assert_eq!(sprite.path().unwrap(), "logo.png");
        assert_eq!(sprite.options().get(&OptionKey::symbol("padding")), Some(&json!(4)));
    }

    #[test]
    fn test_set_orientation_invalid_keeps_previous() {
        let mut sprite = SpriteDefinition::new("logo");
        sprite.set_orientation(Orientation::Horizontal).unwrap();

        for value in [json!(0), json!(3), json!("diagonal"), json!(null)] {
            let err = sprite.set_orientation(value).unwrap_err();
            assert!(matches!(err, SpriteError::InvalidOrientation(_)));
            assert_eq!(sprite.orientation(), Orientation::Horizontal);
        }
    }

    #[test]
    fn test_set_orientation_accepts_codes_and_chains() {
        let mut sprite = SpriteDefinition::new("logo");
        sprite.set_orientation(2).unwrap().set_orientation("vertical").unwrap();
        assert_eq!(sprite.orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_configure_with_body() {
        let mut sprite = SpriteDefinition::new("buttons");
        sprite
            .configure_with(PathSpec::NoArg, SpriteOptions::new(), |s| {
                s.set_orientation(Orientation::Horizontal)?;
                s.sprite_piece(PieceOptions::new("ok.png"));
                Ok(())
            })
            .unwrap();

        assert_eq!(sprite.orientation(), Orientation::Horizontal);
        assert_eq!(sprite.pieces().len(), 1);
        assert!(sprite.is_resolved());
    }

    #[test]
    fn test_configure_with_body_error_propagates() {
        let mut sprite = SpriteDefinition::new("buttons");
        let err = sprite
            .configure_with(PathSpec::NoArg, SpriteOptions::new(), |s| {
                s.set_orientation("sideways")?;
                Ok(())
            })
            .unwrap_err();

        assert!(matches!(err, SpriteError::InvalidOrientation(_)));
        assert!(sprite.is_resolved());
    }

    #[test]
    fn test_later_configure_reapplies_orientation_option() {
        // The merged :orientation option wins over a value set in the body
        let mut sprite = SpriteDefinition::new("buttons");
        sprite
            .configure_with(PathSpec::NoArg, SpriteOptions::new(), |s| {
                s.set_orientation(Orientation::Horizontal)?;
                Ok(())
            })
            .unwrap();
        sprite.configure(PathSpec::NoArg, SpriteOptions::new()).unwrap();

        assert_eq!(sprite.orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_pieces_before_and_after_resolution() {
        let mut sprite = SpriteDefinition::new("buttons");
        sprite.sprite_piece(PieceOptions::new("before.png"));
        sprite.configure(PathSpec::NoArg, SpriteOptions::new()).unwrap();
        sprite.sprite_piece(PieceOptions::new("after.png"));

        let names: Vec<_> = sprite.pieces().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["before", "after"]);
    }

    #[test]
    fn test_sprite_full_path_and_css_path() {
        let ctx = ctx();
        let mut sprite = SpriteDefinition::new("logo");

        assert_eq!(
            sprite_full_path(&ctx, &mut sprite).unwrap(),
            PathBuf::from("images/sprites/logo.png")
        );
        assert_eq!(sprite_css_path(&ctx, &mut sprite).unwrap(), "/images/sprites/logo.png");
    }

    #[test]
    fn test_css_path_from_nested_png() {
        let mut sprite = SpriteDefinition::new("logo");
        sprite.configure(PathSpec::literal("images/logo.png"), SpriteOptions::new()).unwrap();
        assert_eq!(sprite.stylesheet_path().unwrap(), Path::new("images/logo.css"));
    }
}
