//! Pattern catalog: the pattern variants of every layer.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::bimap::BiMap;
use crate::models::{LayerDescriptor, PatternDescriptor, PatternRef};

use super::error::{CatalogError, LookupError};
use super::traits::Catalog;

/// Validated set of patterns spanning all layers.
///
/// Names and indices are unique within a layer; the same name or index may
/// appear in different layers. Patterns are sorted by layer index, then by
/// pattern index.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: Vec<PatternDescriptor>,
    /// layer name -> pattern name <-> pattern index
    by_layer: HashMap<String, BiMap<String, u8>>,
    /// layer name -> range of `patterns` belonging to that layer
    ranges: HashMap<String, Range<usize>>,
}

impl PatternCatalog {
    /// Build a catalog from a flat list of patterns in any order.
    pub fn new(mut patterns: Vec<PatternDescriptor>) -> Result<Self, CatalogError> {
        if patterns.is_empty() {
            return Err(CatalogError::EmptyCatalog { kind: "pattern" });
        }
        check_duplicates(&patterns)?;

        patterns.sort_by(|a, b| {
            (a.layer.index, &a.layer.name, a.index).cmp(&(b.layer.index, &b.layer.name, b.index))
        });

        let mut by_layer: HashMap<String, BiMap<String, u8>> = HashMap::new();
        let mut ranges: HashMap<String, Range<usize>> = HashMap::new();
        for (position, pattern) in patterns.iter().enumerate() {
            by_layer
                .entry(pattern.layer.name.clone())
                .or_default()
                .insert(pattern.name.clone(), pattern.index);
            ranges
                .entry(pattern.layer.name.clone())
                .and_modify(|range| range.end = position + 1)
                .or_insert(position..position + 1);
        }

        Ok(Self { patterns, by_layer, ranges })
    }

    /// Resolve a pattern reference within a layer, returning `None` if absent.
    ///
    /// A descriptor reference resolves only if it belongs to `layer` and is
    /// present in the catalog.
    pub fn lookup<'a>(
        &self,
        layer: &LayerDescriptor,
        pattern: impl Into<PatternRef<'a>>,
    ) -> Option<&PatternDescriptor> {
        let names = self.by_layer.get(&layer.name)?;
        let index = match pattern.into() {
            PatternRef::Name(name) => *names.forward(name)?,
            PatternRef::Index(index) => {
                names.reverse(&index)?;
                index
            }
            PatternRef::Descriptor(descriptor) => {
                if descriptor.layer.name != layer.name
                    || names.forward(descriptor.name.as_str()) != Some(&descriptor.index)
                {
                    return None;
                }
                descriptor.index
            }
        };
        self.get_by(layer).iter().find(|pattern| pattern.index == index)
    }

    /// Resolve a pattern reference within a layer.
    ///
    /// Fails with `UnknownLayer` if the catalog has no patterns for the layer
    /// and with `UnknownPattern` if the reference does not resolve.
    pub fn get<'a>(
        &self,
        layer: &LayerDescriptor,
        pattern: impl Into<PatternRef<'a>>,
    ) -> Result<&PatternDescriptor, LookupError> {
        if !self.by_layer.contains_key(&layer.name) {
            return Err(LookupError::UnknownLayer(layer.name.clone()));
        }
        let pattern = pattern.into();
        self.lookup(layer, pattern).ok_or_else(|| LookupError::UnknownPattern {
            layer: layer.name.clone(),
            pattern: pattern.to_string(),
        })
    }

    /// All patterns of a layer, ordered by index. Empty for unknown layers.
    pub fn get_by(&self, layer: &LayerDescriptor) -> &[PatternDescriptor] {
        match self.ranges.get(&layer.name) {
            Some(range) => &self.patterns[range.clone()],
            None => &[],
        }
    }

    /// Number of patterns in a layer.
    pub fn count(&self, layer: &LayerDescriptor) -> usize {
        self.get_by(layer).len()
    }
}

impl Catalog for PatternCatalog {
    type Item = PatternDescriptor;

    fn as_slice(&self) -> &[PatternDescriptor] {
        &self.patterns
    }
}

fn check_duplicates(patterns: &[PatternDescriptor]) -> Result<(), CatalogError> {
    let mut names: HashSet<(&str, &str)> = HashSet::new();
    for pattern in patterns {
        if !names.insert((pattern.layer.name.as_str(), pattern.name.as_str())) {
            return Err(CatalogError::DuplicateName {
                kind: "pattern",
                scope: format!("layer '{}'", pattern.layer.name),
                name: pattern.name.clone(),
            });
        }
    }
    let mut indices: HashSet<(&str, u8)> = HashSet::new();
    for pattern in patterns {
        if !indices.insert((pattern.layer.name.as_str(), pattern.index)) {
            return Err(CatalogError::DuplicateIndex {
                kind: "pattern",
                scope: format!("layer '{}'", pattern.layer.name),
                index: pattern.index as u32,
            });
        }
    }
    Ok(())
}
