//! Error types for catalog construction and lookup

use thiserror::Error;

/// Error when building a catalog. Any of these leaves no catalog behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// No descriptors were supplied
    #[error("{kind} catalog cannot be empty")]
    EmptyCatalog { kind: &'static str },
    /// Two descriptors share a name within the same scope
    #[error("Duplicate {kind} name '{name}' in {scope}")]
    DuplicateName { kind: &'static str, scope: String, name: String },
    /// Two descriptors share an index within the same scope
    #[error("Duplicate {kind} index {index} in {scope}")]
    DuplicateIndex { kind: &'static str, scope: String, index: u32 },
    /// A palette code between 0 and the highest code has no palettes
    #[error("Missing palette code {0}")]
    MissingPaletteCode(u32),
    /// Two patterns share a palette code but disagree on a palette
    #[error("Palette code {code} index {index} is '{existing}' but '{found}' was declared by {pattern}")]
    ConflictingPaletteCode { code: u32, index: u8, existing: String, found: String, pattern: String },
    /// Palette indices within a code must be contiguous from zero
    #[error("Palette code {code} skips to index {index} (expected {expected}) in {pattern}")]
    PaletteIndexGap { code: u32, index: u8, expected: usize, pattern: String },
    /// More layers than the DNA has byte pairs for
    #[error("{count} layers do not fit in a {bytes}-byte DNA (two bytes per layer)")]
    TooManyLayers { count: usize, bytes: usize },
    /// A configured layer default does not resolve
    #[error("Default '{pattern}:{palette}' for layer '{layer}' is not in the catalog")]
    UndefinedDefault { layer: String, pattern: String, palette: String },
    /// An alias reuses the name of a layer
    #[error("Alias '{alias}' shadows the layer of the same name")]
    AliasShadowsLayer { alias: String },
    /// An alias addresses a layer the catalog does not contain
    #[error("Alias '{alias}' refers to unknown layer '{layer}'")]
    UnknownAliasLayer { alias: String, layer: String },
}

/// Error when looking up a descriptor that the catalog does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LookupError {
    #[error("Unknown layer '{0}'")]
    UnknownLayer(String),
    #[error("Unknown pattern '{pattern}' in layer '{layer}'")]
    UnknownPattern { layer: String, pattern: String },
    #[error("Unknown palette '{palette}' for pattern '{layer}/{pattern}'")]
    UnknownPalette { layer: String, pattern: String, palette: String },
    #[error("Palette code {code} out of range (0..{count})")]
    UnknownPaletteCode { code: u32, count: usize },
    #[error("Unknown palette '{palette}' for palette code {code}")]
    UnknownCodePalette { code: u32, palette: String },
    /// A palette search found nothing
    #[error("No palette matching {matcher} in {scope}")]
    NoMatch { scope: String, matcher: String },
    /// A palette search expected one result but found several
    #[error("{count} palettes matching {matcher} in {scope}: {}", names.join(", "))]
    AmbiguousMatch { scope: String, matcher: String, count: usize, names: Vec<String> },
}
