//! Output path and stylesheet path resolution

use super::{SpriteError, SpriteOptions};
use serde_json::Value;

/// How a configure call names the sprite's output image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PathSpec {
    /// Nothing given; fall back to the string-keyed option or the sprite name
    #[default]
    NoArg,
    /// Symbolic rename, resolves to `<name>.png`
    Symbol(String),
    /// Path used verbatim
    Literal(String),
    /// Path must come from the string-keyed option
    FromOption,
}

impl PathSpec {
    pub fn symbol(name: impl Into<String>) -> Self {
        PathSpec::Symbol(name.into())
    }

    pub fn literal(path: impl Into<String>) -> Self {
        PathSpec::Literal(path.into())
    }
}

/// The first string-keyed option entry, scanned at most once.
#[derive(Debug)]
pub struct PathOption<'a> {
    options: &'a SpriteOptions,
    scanned: Option<Option<(&'a str, &'a Value)>>,
}

impl<'a> PathOption<'a> {
    pub fn new(options: &'a SpriteOptions) -> Self {
        Self { options, scanned: None }
    }

    /// Scan on first use, then return the cached entry.
    pub fn get(&mut self) -> Option<(&'a str, &'a Value)> {
        let options = self.options;
        *self.scanned.get_or_insert_with(|| options.first_string_keyed())
    }

    /// The cached entry, without scanning.
    pub fn cached(&self) -> Option<(&'a str, &'a Value)> {
        self.scanned.flatten()
    }
}

/// Resolve the output image path for a sprite named `name`.
///
/// Precedence: a symbolic rename, then the bare name when no string-keyed
/// option exists, then a literal path, then the string-keyed option's key.
pub fn resolve_path(
    name: &str,
    spec: &PathSpec,
    path_option: &mut PathOption<'_>,
) -> Result<String, SpriteError> {
    match spec {
        PathSpec::Symbol(symbol) => Ok(format!("{}.png", symbol)),
        PathSpec::NoArg if path_option.get().is_none() => Ok(format!("{}.png", name)),
        PathSpec::Literal(path) => Ok(path.clone()),
        PathSpec::NoArg | PathSpec::FromOption => {
            path_option.get().map(|(key, _)| key.to_string()).ok_or(SpriteError::PathNotString)
        }
    }
}

/// Derive the stylesheet path for a resolved sprite path.
///
/// A non-empty string value on the string-keyed option wins, but only when
/// resolution consulted that option. Otherwise a trailing `png` becomes `css`.
pub fn derive_css_path(path: &str, path_option: &PathOption<'_>) -> String {
    match path_option.cached() {
        Some((_, Value::String(css))) if !css.is_empty() => css.clone(),
        _ => match path.strip_suffix("png") {
            Some(stem) => format!("{}css", stem),
            None => path.to_string(),
        },
    }
}
