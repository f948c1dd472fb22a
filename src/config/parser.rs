//! Flattens a catalog document into the backing lists of the three catalogs.
//!
//! Pattern indices are assigned by document order within each layer and
//! palette indices by position within each pattern's palette list. The
//! returned lists are sorted the way the catalogs sort them.

use std::collections::HashMap;
use thiserror::Error;

use crate::models::{
    LayerDescriptor, PaletteDescriptor, PatternDescriptor, PatternPaletteDescriptor, TraitNames,
};

use super::schema::{CatalogConfig, LayerConfig, PaletteConfig, PATTERN_PREFIX};

/// Most patterns per layer, and palettes per pattern, that one DNA byte can address.
pub const MAX_ENTRIES: usize = 256;

/// Error when a catalog document is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("Cannot parse empty config")]
    EmptyConfig,
    #[error("Layer key '{key}' does not match configured layer descriptor name '{name}'")]
    LayerNameMismatch { key: String, name: String },
    #[error("Layer '{layer}' has no patterns")]
    EmptyPatterns { layer: String },
    #[error("Layer '{layer}' pattern #{position} has a blank name")]
    BlankPatternName { layer: String, position: usize },
    #[error("Pattern '{layer}/{pattern}' has no palettes")]
    EmptyPalettes { layer: String, pattern: String },
    #[error("{scope} declares {count} {kind}s but at most 256 fit in one byte")]
    IndexOverflow { kind: &'static str, scope: String, count: usize },
}

/// Everything a catalog document declares, flattened and sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCatalog {
    pub layers: Vec<LayerDescriptor>,
    pub patterns: Vec<PatternDescriptor>,
    pub palettes: Vec<PatternPaletteDescriptor>,
    /// Layer name to its configured default
    pub defaults: HashMap<String, TraitNames>,
    /// Alias to the layers it addresses, in layer order
    pub aliases: HashMap<String, Vec<String>>,
}

/// Parse the layers of a document, sorted by index.
pub fn parse_layers(config: &CatalogConfig) -> Result<Vec<LayerDescriptor>, ParseError> {
    validate_non_empty(config)?;
    let mut layers = Vec::with_capacity(config.len());
    for (key, layer_config) in config.iter() {
        validate_layer(key, layer_config)?;
        layers.push(layer_config.layer.clone());
    }
    layers.sort_by_key(|layer| layer.index);
    Ok(layers)
}

/// Parse the patterns of every layer, sorted by layer index then pattern index.
pub fn parse_patterns(config: &CatalogConfig) -> Result<Vec<PatternDescriptor>, ParseError> {
    validate_non_empty(config)?;
    let mut patterns = Vec::new();
    for (key, layer_config) in config.iter() {
        validate_layer(key, layer_config)?;
        patterns.extend(layer_patterns(layer_config)?.into_iter().map(|(pattern, _)| pattern));
    }
    patterns.sort_by_key(|pattern| (pattern.layer.index, pattern.index));
    Ok(patterns)
}

/// Parse every palette of every pattern, sorted by layer, pattern and palette index.
pub fn parse_palettes(config: &CatalogConfig) -> Result<Vec<PatternPaletteDescriptor>, ParseError> {
    validate_non_empty(config)?;
    let mut palettes = Vec::new();
    for (key, layer_config) in config.iter() {
        validate_layer(key, layer_config)?;
        for (pattern, palette_config) in layer_patterns(layer_config)? {
            if palette_config.palettes.is_empty() {
                return Err(ParseError::EmptyPalettes {
                    layer: pattern.layer.name.clone(),
                    pattern: pattern.name.clone(),
                });
            }
            if palette_config.palettes.len() > MAX_ENTRIES {
                return Err(ParseError::IndexOverflow {
                    kind: "palette",
                    scope: format!("Pattern '{}'", pattern),
                    count: palette_config.palettes.len(),
                });
            }
            for (index, name) in palette_config.palettes.iter().enumerate() {
                palettes.push(PatternPaletteDescriptor::new(
                    pattern.clone(),
                    PaletteDescriptor::new(palette_config.code, name.as_str(), index as u8),
                ));
            }
        }
    }
    palettes.sort_by_key(|entry| {
        (entry.pattern.layer.index, entry.pattern.index, entry.palette.index)
    });
    Ok(palettes)
}

/// Parse a whole document.
pub fn parse(config: &CatalogConfig) -> Result<ParsedCatalog, ParseError> {
    let layers = parse_layers(config)?;
    let patterns = parse_patterns(config)?;
    let palettes = parse_palettes(config)?;

    let mut defaults = HashMap::new();
    let mut aliases: HashMap<String, Vec<String>> = HashMap::new();
    for layer in &layers {
        let Some(layer_config) = config.get(&layer.name) else {
            continue;
        };
        if let Some(default) = &layer_config.default {
            defaults.insert(layer.name.clone(), default.clone());
        }
        for alias in &layer_config.aliases {
            aliases.entry(alias.clone()).or_default().push(layer.name.clone());
        }
    }

    Ok(ParsedCatalog { layers, patterns, palettes, defaults, aliases })
}

fn validate_non_empty(config: &CatalogConfig) -> Result<(), ParseError> {
    if config.is_empty() {
        return Err(ParseError::EmptyConfig);
    }
    Ok(())
}

fn validate_layer(key: &str, layer_config: &LayerConfig) -> Result<(), ParseError> {
    if layer_config.layer.name != key {
        return Err(ParseError::LayerNameMismatch {
            key: key.to_string(),
            name: layer_config.layer.name.clone(),
        });
    }
    if layer_config.patterns.is_empty() {
        return Err(ParseError::EmptyPatterns { layer: key.to_string() });
    }
    if layer_config.patterns.len() > MAX_ENTRIES {
        return Err(ParseError::IndexOverflow {
            kind: "pattern",
            scope: format!("Layer '{}'", key),
            count: layer_config.patterns.len(),
        });
    }
    Ok(())
}

/// Patterns of one layer in document order, paired with their palettes.
fn layer_patterns(
    layer_config: &LayerConfig,
) -> Result<Vec<(PatternDescriptor, &PaletteConfig)>, ParseError> {
    let layer = &layer_config.layer;
    let mut patterns = Vec::with_capacity(layer_config.patterns.len());
    for (position, (key, palette_config)) in layer_config.patterns.iter().enumerate() {
        let name = key.strip_prefix(PATTERN_PREFIX).unwrap_or(key);
        if name.trim().is_empty() {
            return Err(ParseError::BlankPatternName { layer: layer.name.clone(), position });
        }
        patterns.push((PatternDescriptor::new(layer.clone(), name, position as u8), palette_config));
    }
    Ok(patterns)
}
