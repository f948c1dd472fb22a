//! Layer catalog: the stacking order of an avatar.

use std::collections::HashSet;

use crate::bimap::BiMap;
use crate::models::{LayerDescriptor, LayerRef};

use super::error::{CatalogError, LookupError};
use super::traits::Catalog;

/// Ordered, validated set of layers.
///
/// Layers are sorted ascending by index regardless of input order. The
/// position of a layer in this order is its slot in the DNA.
#[derive(Debug, Clone)]
pub struct LayerCatalog {
    layers: Vec<LayerDescriptor>,
    names: BiMap<String, u32>,
}

impl LayerCatalog {
    /// Build a catalog from layers in any order.
    ///
    /// Fails if the list is empty or if two layers share an index or a name.
    pub fn new(mut layers: Vec<LayerDescriptor>) -> Result<Self, CatalogError> {
        if layers.is_empty() {
            return Err(CatalogError::EmptyCatalog { kind: "layer" });
        }

        let mut indices = HashSet::new();
        for layer in &layers {
            if !indices.insert(layer.index) {
                return Err(CatalogError::DuplicateIndex {
                    kind: "layer",
                    scope: "layer catalog".to_string(),
                    index: layer.index,
                });
            }
        }
        let mut names = HashSet::new();
        for layer in &layers {
            if !names.insert(layer.name.as_str()) {
                return Err(CatalogError::DuplicateName {
                    kind: "layer",
                    scope: "layer catalog".to_string(),
                    name: layer.name.clone(),
                });
            }
        }

        layers.sort_by_key(|layer| layer.index);

        let mut bimap = BiMap::new();
        for layer in &layers {
            bimap.insert(layer.name.clone(), layer.index);
        }

        Ok(Self { layers, names: bimap })
    }

    /// Resolve a layer reference, returning `None` if it is not in the catalog.
    ///
    /// A descriptor reference resolves only if both its name and index match
    /// a catalog layer.
    pub fn lookup<'a>(&self, layer: impl Into<LayerRef<'a>>) -> Option<&LayerDescriptor> {
        let index = match layer.into() {
            LayerRef::Name(name) => *self.names.forward(name)?,
            LayerRef::Index(index) => {
                self.names.reverse(&index)?;
                index
            }
            LayerRef::Descriptor(descriptor) => {
                if self.names.forward(descriptor.name.as_str()) != Some(&descriptor.index) {
                    return None;
                }
                descriptor.index
            }
        };
        self.position_of_index(index).map(|slot| &self.layers[slot])
    }

    /// Resolve a layer reference, failing with `UnknownLayer`.
    pub fn get<'a>(&self, layer: impl Into<LayerRef<'a>>) -> Result<&LayerDescriptor, LookupError> {
        let layer = layer.into();
        self.lookup(layer).ok_or_else(|| LookupError::UnknownLayer(layer.to_string()))
    }

    /// Check if a layer with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_forward(name)
    }

    /// Position of a layer in stacking order, which is also its DNA slot.
    pub fn position(&self, name: &str) -> Option<usize> {
        let index = self.names.forward(name)?;
        self.position_of_index(*index)
    }

    fn position_of_index(&self, index: u32) -> Option<usize> {
        self.layers.binary_search_by_key(&index, |layer| layer.index).ok()
    }

    /// The layer drawn first (lowest index).
    pub fn bottom_layer(&self) -> &LayerDescriptor {
        &self.layers[0]
    }

    /// The layer drawn last (highest index).
    pub fn top_layer(&self) -> &LayerDescriptor {
        &self.layers[self.layers.len() - 1]
    }

    /// Layer names in stacking order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|layer| layer.name.as_str())
    }
}

impl Catalog for LayerCatalog {
    type Item = LayerDescriptor;

    fn as_slice(&self) -> &[LayerDescriptor] {
        &self.layers
    }
}
