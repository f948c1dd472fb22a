//! Fixed-width binary avatar identifier.
//!
//! A [`Dna`] is 32 bytes. The layer at catalog position `i` owns bytes
//! `2i` (pattern index) and `2i + 1` (palette index); bytes past the last
//! layer are reserved and zero.
//!
//! ```text
//!    Bytes  | Layer (reference catalog)
//!  ---------|--------------------------
//!   [0:1]   | body
//!   [2:3]   | tattoos
//!   ...     | ...
//!   [28:29] | hair
//!   [30:31] | reserved
//! ```

use rand::Rng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;
use thiserror::Error;

use crate::models::LayerRef;
use crate::registry::{Catalog, LayerCatalog, LookupError};

/// Width of a DNA in bytes.
pub const DNA_BYTES: usize = 32;

/// Width of a DNA in hex characters, without prefix.
pub const DNA_HEX_LEN: usize = DNA_BYTES * 2;

/// Error when building or reading a DNA.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DnaError {
    /// Input is not a 32-byte identifier
    #[error("Invalid DNA '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: String },
    /// Named-field form lacks a catalog layer
    #[error("Missing pattern/palette index for layer '{0}'")]
    MissingLayerValue(String),
    /// A byte past the last layer is set
    #[error("Reserved DNA byte {position} is {value:#04x}, expected 0x00")]
    ReservedBytes { position: usize, value: u8 },
    /// The layer catalog is wider than the DNA
    #[error("Layer '{layer}' at position {position} has no byte pair in a 32-byte DNA")]
    LayerOutOfRange { layer: String, position: usize },
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Pattern and palette index of one layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraitIndex {
    pub pattern: u8,
    pub palette: u8,
}

impl TraitIndex {
    pub fn new(pattern: u8, palette: u8) -> Self {
        Self { pattern, palette }
    }
}

impl fmt::Display for TraitIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.pattern, self.palette)
    }
}

/// Replacement for one layer; `None` fields keep the current byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialTraitIndex {
    #[serde(default)]
    pub pattern: Option<u8>,
    #[serde(default)]
    pub palette: Option<u8>,
}

impl From<TraitIndex> for PartialTraitIndex {
    fn from(index: TraitIndex) -> Self {
        Self { pattern: Some(index.pattern), palette: Some(index.palette) }
    }
}

/// Random-draw domain of one layer: `palettes[p]` is the number of palettes
/// of pattern index `p`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerLimits {
    pub palettes: Vec<usize>,
}

impl LayerLimits {
    pub fn new(palettes: Vec<usize>) -> Self {
        Self { palettes }
    }

    /// Every valid (pattern, palette) pair, pattern-major.
    pub fn options(&self) -> Vec<TraitIndex> {
        self.palettes
            .iter()
            .enumerate()
            .take(u8::MAX as usize + 1)
            .flat_map(|(pattern, &count)| {
                (0..count.min(u8::MAX as usize + 1))
                    .map(move |palette| TraitIndex::new(pattern as u8, palette as u8))
            })
            .collect()
    }
}

/// A 32-byte avatar identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dna([u8; DNA_BYTES]);

impl Dna {
    pub const ZERO: Dna = Dna([0; DNA_BYTES]);

    /// Parse a 64-character hex string, optionally prefixed with `0x`.
    pub fn from_hex(input: &str) -> Result<Self, DnaError> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        if digits.len() != DNA_HEX_LEN {
            return Err(DnaError::InvalidIdentifier {
                input: input.to_string(),
                reason: format!("expected {} hex characters, got {}", DNA_HEX_LEN, digits.len()),
            });
        }
        let mut bytes = [0u8; DNA_BYTES];
        hex::decode_to_slice(digits, &mut bytes).map_err(|err| DnaError::InvalidIdentifier {
            input: input.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Dna(bytes))
    }

    /// Copy a DNA out of a 32-byte buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DnaError> {
        let bytes: [u8; DNA_BYTES] = bytes.try_into().map_err(|_| DnaError::InvalidIdentifier {
            input: hex::encode(bytes),
            reason: format!("expected {} bytes, got {}", DNA_BYTES, bytes.len()),
        })?;
        Ok(Dna(bytes))
    }

    /// Pack the named-field form. Every catalog layer must be present;
    /// keys naming no catalog layer are ignored.
    pub fn from_values(
        layers: &LayerCatalog,
        values: &HashMap<String, TraitIndex>,
    ) -> Result<Self, DnaError> {
        let mut bytes = [0u8; DNA_BYTES];
        for (position, layer) in layers.iter().enumerate() {
            let value = values
                .get(&layer.name)
                .ok_or_else(|| DnaError::MissingLayerValue(layer.name.clone()))?;
            let offset = slot_offset(&layer.name, position)?;
            bytes[offset] = value.pattern;
            bytes[offset + 1] = value.palette;
        }
        Ok(Dna(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; DNA_BYTES] {
        &self.0
    }

    /// Lowercase hex without prefix.
    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Read the pattern and palette index of one layer.
    pub fn get<'a>(
        &self,
        layers: &LayerCatalog,
        layer: impl Into<LayerRef<'a>>,
    ) -> Result<TraitIndex, DnaError> {
        let layer = layers.get(layer)?;
        let position = layers
            .position(&layer.name)
            .ok_or_else(|| LookupError::UnknownLayer(layer.name.clone()))?;
        let offset = slot_offset(&layer.name, position)?;
        Ok(TraitIndex::new(self.0[offset], self.0[offset + 1]))
    }

    /// The named-field form of every catalog layer.
    pub fn values(&self, layers: &LayerCatalog) -> Result<HashMap<String, TraitIndex>, DnaError> {
        let mut values = HashMap::with_capacity(layers.len());
        for (position, layer) in layers.iter().enumerate() {
            let offset = slot_offset(&layer.name, position)?;
            values.insert(layer.name.clone(), TraitIndex::new(self.0[offset], self.0[offset + 1]));
        }
        Ok(values)
    }

    /// A copy with the given layers' bytes overwritten.
    ///
    /// Fails with `UnknownLayer` if a key names no catalog layer.
    pub fn replace(
        &self,
        layers: &LayerCatalog,
        values: &HashMap<String, PartialTraitIndex>,
    ) -> Result<Self, DnaError> {
        let mut bytes = self.0;
        for (name, value) in values {
            let position =
                layers.position(name).ok_or_else(|| LookupError::UnknownLayer(name.clone()))?;
            let offset = slot_offset(name, position)?;
            if let Some(pattern) = value.pattern {
                bytes[offset] = pattern;
            }
            if let Some(palette) = value.palette {
                bytes[offset + 1] = palette;
            }
        }
        Ok(Dna(bytes))
    }

    /// Bytewise AND.
    pub fn and(&self, other: &Dna) -> Dna {
        let mut bytes = self.0;
        for (byte, rhs) in bytes.iter_mut().zip(other.0) {
            *byte &= rhs;
        }
        Dna(bytes)
    }

    /// Bytewise OR.
    pub fn or(&self, other: &Dna) -> Dna {
        let mut bytes = self.0;
        for (byte, rhs) in bytes.iter_mut().zip(other.0) {
            *byte |= rhs;
        }
        Dna(bytes)
    }

    /// A random DNA within `limits`; layers without limits stay zero.
    pub fn random<R: Rng + ?Sized>(
        layers: &LayerCatalog,
        limits: &HashMap<String, LayerLimits>,
        rng: &mut R,
    ) -> Result<Self, DnaError> {
        Self::ZERO.randomize(layers, limits, rng)
    }

    /// A copy where every layer with limits gets a uniformly drawn pair.
    ///
    /// Pairs are drawn from the flattened set of valid (pattern, palette)
    /// pairs, so a pattern with more palettes is proportionally more likely.
    pub fn randomize<R: Rng + ?Sized>(
        &self,
        layers: &LayerCatalog,
        limits: &HashMap<String, LayerLimits>,
        rng: &mut R,
    ) -> Result<Self, DnaError> {
        let mut replacements = HashMap::new();
        for layer in layers.iter() {
            let Some(layer_limits) = limits.get(&layer.name) else {
                continue;
            };
            let options = layer_limits.options();
            if options.is_empty() {
                continue;
            }
            let choice = options[rng.gen_range(0..options.len())];
            replacements.insert(layer.name.clone(), PartialTraitIndex::from(choice));
        }
        self.replace(layers, &replacements)
    }

    /// Check that every byte past the last layer is zero.
    pub fn check_reserved(&self, layers: &LayerCatalog) -> Result<(), DnaError> {
        let used = (layers.len() * 2).min(DNA_BYTES);
        match self.0[used..].iter().position(|&byte| byte != 0) {
            Some(index) => Err(DnaError::ReservedBytes {
                position: used + index,
                value: self.0[used + index],
            }),
            None => Ok(()),
        }
    }
}

fn slot_offset(layer: &str, position: usize) -> Result<usize, DnaError> {
    let offset = position * 2;
    if offset + 1 >= DNA_BYTES {
        return Err(DnaError::LayerOutOfRange { layer: layer.to_string(), position });
    }
    Ok(offset)
}

impl Default for Dna {
    fn default() -> Self {
        Dna::ZERO
    }
}

impl From<[u8; DNA_BYTES]> for Dna {
    fn from(bytes: [u8; DNA_BYTES]) -> Self {
        Dna(bytes)
    }
}

impl BitAnd for Dna {
    type Output = Dna;

    fn bitand(self, rhs: Dna) -> Dna {
        self.and(&rhs)
    }
}

impl BitOr for Dna {
    type Output = Dna;

    fn bitor(self, rhs: Dna) -> Dna {
        self.or(&rhs)
    }
}

impl fmt::Display for Dna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.hex())
    }
}

impl fmt::Debug for Dna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dna({})", self)
    }
}

impl FromStr for Dna {
    type Err = DnaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dna::from_hex(s)
    }
}

impl Serialize for Dna {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dna {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Dna::from_hex(&s).map_err(de::Error::custom)
    }
}
