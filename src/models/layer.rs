//! Layer descriptor and layer references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named slot in a layered avatar composition.
///
/// `index` defines stacking order (lower draws first) and the order in which
/// layers occupy byte pairs in a [`Dna`](crate::dna::Dna).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub name: String,
    pub index: u32,
}

impl LayerDescriptor {
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self { name: name.into(), index }
    }
}

impl fmt::Display for LayerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.index)
    }
}

/// Reference to a layer by name, by index, or by an already resolved descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRef<'a> {
    Name(&'a str),
    Index(u32),
    Descriptor(&'a LayerDescriptor),
}

impl<'a> From<&'a str> for LayerRef<'a> {
    fn from(name: &'a str) -> Self {
        LayerRef::Name(name)
    }
}

impl<'a> From<&'a String> for LayerRef<'a> {
    fn from(name: &'a String) -> Self {
        LayerRef::Name(name.as_str())
    }
}

impl From<u32> for LayerRef<'_> {
    fn from(index: u32) -> Self {
        LayerRef::Index(index)
    }
}

impl<'a> From<&'a LayerDescriptor> for LayerRef<'a> {
    fn from(layer: &'a LayerDescriptor) -> Self {
        LayerRef::Descriptor(layer)
    }
}

impl fmt::Display for LayerRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerRef::Name(name) => write!(f, "{}", name),
            LayerRef::Index(index) => write!(f, "#{}", index),
            LayerRef::Descriptor(layer) => write!(f, "{}", layer),
        }
    }
}
