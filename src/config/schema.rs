//! Configuration schema types for trait catalogs
//!
//! A catalog document maps each layer name to its layer descriptor and its
//! patterns. Pattern order within a layer is significant (it assigns pattern
//! indices), so patterns are kept in an [`OrderedMap`] rather than a
//! `HashMap`.
//!
//! ```json
//! {
//!   "hair": {
//!     "layer": { "name": "hair", "index": 150 },
//!     "patterns": {
//!       "pattern:bald": { "code": 0, "palettes": ["transparent"] },
//!       "pattern:short": { "code": 5, "palettes": ["black", "brown"] }
//!     },
//!     "default": ["bald", "transparent"]
//!   }
//! }
//! ```

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

use crate::models::{LayerDescriptor, TraitNames};

/// Prefix allowed (and stripped) on pattern keys.
pub const PATTERN_PREFIX: &str = "pattern:";

/// A whole catalog document, keyed by layer name.
pub type CatalogConfig = OrderedMap<LayerConfig>;

/// One layer of a catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Layer descriptor; its name must equal the document key
    pub layer: LayerDescriptor,
    /// Pattern name (optionally `pattern:`-prefixed) to palettes
    pub patterns: OrderedMap<PaletteConfig>,
    /// Trait used when a named-choice construction omits this layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<TraitNames>,
    /// Alternative keys addressing this layer in named choices
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

/// Palettes offered by one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Palette code shared by every pattern offering the same palettes
    pub code: u32,
    /// Palette names; position is the palette index
    pub palettes: Vec<String>,
}

impl PaletteConfig {
    pub fn new(code: u32, palettes: &[&str]) -> Self {
        Self { code, palettes: palettes.iter().map(|p| p.to_string()).collect() }
    }
}

/// String-keyed map that remembers insertion order.
///
/// Inserting an existing key replaces its value but keeps its original
/// position. Deserialization preserves document order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert a value, returning the value previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}
