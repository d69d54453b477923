//! Sprite options and layout orientation

use super::SpriteError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Layout direction of pieces within the combined image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Pieces stacked top to bottom
    #[default]
    Vertical,
    /// Pieces laid out left to right
    Horizontal,
}

impl Orientation {
    /// Lowercase name, as accepted in manifests and option values.
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }

    /// Numeric code (`1` vertical, `2` horizontal).
    pub fn code(self) -> u64 {
        match self {
            Orientation::Vertical => 1,
            Orientation::Horizontal => 2,
        }
    }

    /// Parse an option value.
    ///
    /// Accepts the numeric codes and the lowercase names; anything else is
    /// an [`SpriteError::InvalidOrientation`].
    pub fn from_value(value: &Value) -> Result<Self, SpriteError> {
        let parsed = match value {
            Value::Number(n) => match n.as_u64() {
                Some(1) => Some(Orientation::Vertical),
                Some(2) => Some(Orientation::Horizontal),
                _ => None,
            },
            Value::String(s) => match s.as_str() {
                "vertical" => Some(Orientation::Vertical),
                "horizontal" => Some(Orientation::Horizontal),
                _ => None,
            },
            _ => None,
        };
        parsed.ok_or_else(|| SpriteError::InvalidOrientation(value.to_string()))
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Orientation> for Value {
    fn from(orientation: Orientation) -> Self {
        Value::String(orientation.as_str().to_string())
    }
}

/// Key of a sprite option entry.
///
/// Symbolic keys name options the definition understands; string keys carry
/// a path (usually a piece glob) whose value may name the stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Symbol(String),
    Str(String),
    Int(i64),
}

impl OptionKey {
    pub fn symbol(name: impl Into<String>) -> Self {
        OptionKey::Symbol(name.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        OptionKey::Str(text.into())
    }
}

/// Options the definition applies on every configure call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownOption {
    Orientation,
}

impl KnownOption {
    pub const ALL: &'static [KnownOption] = &[KnownOption::Orientation];

    pub fn name(self) -> &'static str {
        match self {
            KnownOption::Orientation => "orientation",
        }
    }

    /// Match a key against the known set; only symbolic keys qualify.
    pub fn from_key(key: &OptionKey) -> Option<Self> {
        match key {
            OptionKey::Symbol(name) => Self::ALL.iter().copied().find(|o| o.name() == name.as_str()),
            _ => None,
        }
    }
}

/// Insertion-ordered option mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteOptions {
    entries: Vec<(OptionKey, Value)>,
}

impl SpriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults every definition starts from.
    pub fn defaults() -> Self {
        Self::new().with(OptionKey::symbol(KnownOption::Orientation.name()), Orientation::default())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: OptionKey, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an entry, keeping the original position on replace.
    pub fn insert(&mut self, key: OptionKey, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &OptionKey) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &OptionKey) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Merge `other` into `self`; its values win for keys present in both.
    pub fn merge(&mut self, other: SpriteOptions) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// First entry with a string key, if any.
    pub fn first_string_keyed(&self) -> Option<(&str, &Value)> {
        self.entries.iter().find_map(|(k, v)| match k {
            OptionKey::Str(text) => Some((text.as_str(), v)),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OptionKey, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
