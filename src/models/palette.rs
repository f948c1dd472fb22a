//! Palette descriptors and the pattern/palette join entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::pattern::PatternDescriptor;

/// A named color variant.
///
/// `code` groups palettes across patterns: every pattern declaring the same
/// code offers the same palette names at the same indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteDescriptor {
    pub code: u32,
    pub name: String,
    pub index: u8,
}

impl PaletteDescriptor {
    pub fn new(code: u32, name: impl Into<String>, index: u8) -> Self {
        Self { code, name: name.into(), index }
    }
}

/// One palette of one pattern. This is the unit stored in catalogs and
/// resolved for each layer of an avatar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternPaletteDescriptor {
    pub pattern: PatternDescriptor,
    pub palette: PaletteDescriptor,
}

impl PatternPaletteDescriptor {
    pub fn new(pattern: PatternDescriptor, palette: PaletteDescriptor) -> Self {
        Self { pattern, palette }
    }

    /// Layer name this entry belongs to.
    pub fn layer_name(&self) -> &str {
        &self.pattern.layer.name
    }

    /// The pattern and palette names of this entry.
    pub fn names(&self) -> TraitNames {
        TraitNames::new(&self.pattern.name, &self.palette.name)
    }
}

impl fmt::Display for PatternPaletteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pattern, self.palette.name)
    }
}

/// Reference to a palette of a known pattern, by name or by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteRef<'a> {
    Name(&'a str),
    Index(u8),
}

impl<'a> From<&'a str> for PaletteRef<'a> {
    fn from(name: &'a str) -> Self {
        PaletteRef::Name(name)
    }
}

impl<'a> From<&'a String> for PaletteRef<'a> {
    fn from(name: &'a String) -> Self {
        PaletteRef::Name(name.as_str())
    }
}

impl From<u8> for PaletteRef<'_> {
    fn from(index: u8) -> Self {
        PaletteRef::Index(index)
    }
}

impl fmt::Display for PaletteRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteRef::Name(name) => write!(f, "{}", name),
            PaletteRef::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// A (pattern name, palette name) pair.
///
/// Serializes as a two-element array, `["bald", "transparent"]`, which is the
/// form used for layer defaults in catalog configs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct TraitNames {
    pub pattern: String,
    pub palette: String,
}

impl TraitNames {
    pub fn new(pattern: impl Into<String>, palette: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), palette: palette.into() }
    }
}

impl From<(String, String)> for TraitNames {
    fn from((pattern, palette): (String, String)) -> Self {
        Self { pattern, palette }
    }
}

impl From<TraitNames> for (String, String) {
    fn from(names: TraitNames) -> Self {
        (names.pattern, names.palette)
    }
}

impl fmt::Display for TraitNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pattern, self.palette)
    }
}
