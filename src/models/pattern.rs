//! Pattern descriptor and pattern references.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::layer::LayerDescriptor;

/// A named visual variant available within one layer.
///
/// `index` is the byte stored in the layer's pattern slot of a DNA.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternDescriptor {
    pub layer: LayerDescriptor,
    pub name: String,
    pub index: u8,
}

impl PatternDescriptor {
    pub fn new(layer: LayerDescriptor, name: impl Into<String>, index: u8) -> Self {
        Self { layer, name: name.into(), index }
    }
}

impl fmt::Display for PatternDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.layer.name, self.name)
    }
}

/// Reference to a pattern by name, by index, or by an already resolved descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternRef<'a> {
    Name(&'a str),
    Index(u8),
    Descriptor(&'a PatternDescriptor),
}

impl<'a> From<&'a str> for PatternRef<'a> {
    fn from(name: &'a str) -> Self {
        PatternRef::Name(name)
    }
}

impl<'a> From<&'a String> for PatternRef<'a> {
    fn from(name: &'a String) -> Self {
        PatternRef::Name(name.as_str())
    }
}

impl From<u8> for PatternRef<'_> {
    fn from(index: u8) -> Self {
        PatternRef::Index(index)
    }
}

impl<'a> From<&'a PatternDescriptor> for PatternRef<'a> {
    fn from(pattern: &'a PatternDescriptor) -> Self {
        PatternRef::Descriptor(pattern)
    }
}

impl fmt::Display for PatternRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternRef::Name(name) => write!(f, "{}", name),
            PatternRef::Index(index) => write!(f, "#{}", index),
            PatternRef::Descriptor(pattern) => write!(f, "{}", pattern.name),
        }
    }
}
