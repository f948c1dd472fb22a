//! Avatars: a DNA bound to the trait it selects on every layer.
//!
//! An [`Avatar`] is built either by decoding a [`Dna`] or from named
//! [`TraitChoice`]s. Both paths agree: building from choices encodes a DNA
//! and then decodes it again, failing with
//! [`AvatarError::RoundTripMismatch`] if the result differs.

mod choice;
mod error;

pub use choice::{PaletteSelector, TraitChoice};
pub use error::AvatarError;

use rand::Rng;
use std::collections::HashMap;
use std::fmt;

use crate::definitions::Definitions;
use crate::dna::{Dna, TraitIndex};
use crate::models::{LayerDescriptor, LayerRef, PatternPaletteDescriptor, TraitNames};
use crate::registry::{Catalog, LookupError};

/// A fully resolved avatar.
///
/// Holds one pattern/palette entry per catalog layer, in stacking order.
/// Avatars compare equal when their DNA is equal.
#[derive(Clone)]
pub struct Avatar<'d> {
    defs: &'d Definitions,
    dna: Dna,
    layers: Vec<&'d PatternPaletteDescriptor>,
}

impl<'d> Avatar<'d> {
    /// Decode a DNA.
    ///
    /// Every layer's byte pair must name a catalog entry and the reserved
    /// bytes must be zero.
    pub fn from_dna(defs: &'d Definitions, dna: Dna) -> Result<Self, AvatarError> {
        let catalog = defs.layers();
        dna.check_reserved(catalog)?;

        let mut layers = Vec::with_capacity(catalog.len());
        for layer in catalog.iter() {
            let index = dna.get(catalog, layer)?;
            let entry = defs.palettes().lookup(&layer.name, index.pattern, index.palette).ok_or_else(
                || AvatarError::UndefinedTrait {
                    layer: layer.name.clone(),
                    pattern: index.pattern,
                    palette: index.palette,
                },
            )?;
            layers.push(entry);
        }

        log::trace!("Decoded {}", dna);
        Ok(Self { defs, dna, layers })
    }

    /// Decode a hex DNA string.
    pub fn from_hex(defs: &'d Definitions, hex: &str) -> Result<Self, AvatarError> {
        Self::from_dna(defs, Dna::from_hex(hex)?)
    }

    /// Build an avatar from named choices.
    ///
    /// Keys are layer names or layer aliases; an alias applies its choice to
    /// every layer it addresses unless that layer is also named directly.
    /// Layers without a choice take their default.
    pub fn from_choices(
        defs: &'d Definitions,
        choices: &HashMap<String, TraitChoice>,
    ) -> Result<Self, AvatarError> {
        let choices = expand_keys(defs, choices)?;

        let mut layers = Vec::with_capacity(defs.layers().len());
        let mut values = HashMap::with_capacity(defs.layers().len());
        for layer in defs.layers().iter() {
            let entry = match choices.get(layer.name.as_str()) {
                Some(choice) => resolve_choice(defs, layer, choice)?,
                None => defs
                    .default_for(&layer.name)
                    .ok_or_else(|| LookupError::UnknownLayer(layer.name.clone()))?,
            };
            values.insert(layer.name.clone(), TraitIndex::new(entry.pattern.index, entry.palette.index));
            layers.push(entry);
        }

        let dna = Dna::from_values(defs.layers(), &values)?;
        let avatar = Self { defs, dna, layers };

        let decoded = Self::from_dna(defs, dna)?;
        if decoded.layers != avatar.layers {
            return Err(AvatarError::RoundTripMismatch {
                dna: dna.to_string(),
                expected: avatar.to_string(),
                decoded: decoded.to_string(),
            });
        }

        log::trace!("Encoded {}", dna);
        Ok(avatar)
    }

    /// The avatar with every layer at its default.
    pub fn from_defaults(defs: &'d Definitions) -> Result<Self, AvatarError> {
        Self::from_choices(defs, &HashMap::new())
    }

    /// A uniformly random catalog entry on every layer.
    pub fn random<R: Rng + ?Sized>(defs: &'d Definitions, rng: &mut R) -> Result<Self, AvatarError> {
        let mut choices = HashMap::with_capacity(defs.layers().len());
        for layer in defs.layers().iter() {
            let options = defs.pattern_palettes_by_layer(layer)?;
            if options.is_empty() {
                continue;
            }
            let option = options[rng.gen_range(0..options.len())];
            choices.insert(layer.name.clone(), TraitChoice::from(option.names()));
        }
        Self::from_defaults(defs)?.transform(&choices)
    }

    /// A new avatar with the given layers replaced and all others kept.
    ///
    /// Override keys follow the same rules as [`Avatar::from_choices`].
    pub fn transform(&self, overrides: &HashMap<String, TraitChoice>) -> Result<Self, AvatarError> {
        let mut choices: HashMap<String, TraitChoice> = self
            .layers
            .iter()
            .map(|entry| (entry.layer_name().to_string(), TraitChoice::from(entry.names())))
            .collect();
        for (layer, choice) in expand_keys(self.defs, overrides)? {
            choices.insert(layer, choice.clone());
        }
        Self::from_choices(self.defs, &choices)
    }

    pub fn dna(&self) -> Dna {
        self.dna
    }

    pub fn definitions(&self) -> &'d Definitions {
        self.defs
    }

    /// The entry selected on one layer.
    pub fn get<'a>(&self, layer: impl Into<LayerRef<'a>>) -> Result<&'d PatternPaletteDescriptor, LookupError> {
        let layer = self.defs.layers().get(layer)?;
        self.defs
            .layers()
            .position(&layer.name)
            .and_then(|position| self.layers.get(position).copied())
            .ok_or_else(|| LookupError::UnknownLayer(layer.name.clone()))
    }

    /// Entries of every layer in stacking order.
    pub fn traits(&self) -> &[&'d PatternPaletteDescriptor] {
        &self.layers
    }

    /// Pattern and palette names of every layer in stacking order.
    pub fn names(&self) -> Vec<(&'d str, TraitNames)> {
        self.layers.iter().map(|entry| (entry.layer_name(), entry.names())).collect()
    }
}

impl PartialEq for Avatar<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.dna == other.dna
    }
}

impl Eq for Avatar<'_> {}

impl fmt::Display for Avatar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Avatar({}", self.dna)?;
        for entry in &self.layers {
            write!(f, "; ({},{})", entry.pattern.name, entry.palette.name)?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Avatar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Avatar").field("dna", &self.dna).field("layers", &self.names()).finish()
    }
}

/// Map choice keys to layer names. Direct layer keys win over aliases.
fn expand_keys<'c>(
    defs: &Definitions,
    choices: &'c HashMap<String, TraitChoice>,
) -> Result<HashMap<String, &'c TraitChoice>, LookupError> {
    let mut expanded = HashMap::with_capacity(choices.len());
    let mut aliased: Vec<(&String, &TraitChoice)> = Vec::new();
    for (key, choice) in choices {
        if defs.layers().contains(key) {
            expanded.insert(key.clone(), choice);
        } else if defs.resolve_alias(key).is_some() {
            aliased.push((key, choice));
        } else {
            return Err(LookupError::UnknownLayer(key.clone()));
        }
    }
    aliased.sort_by(|a, b| a.0.cmp(b.0));
    for (alias, choice) in aliased {
        for layer in defs.resolve_alias(alias).unwrap_or_default() {
            expanded.entry(layer.clone()).or_insert(choice);
        }
    }
    Ok(expanded)
}

fn resolve_choice<'d>(
    defs: &'d Definitions,
    layer: &LayerDescriptor,
    choice: &TraitChoice,
) -> Result<&'d PatternPaletteDescriptor, LookupError> {
    let pattern = defs.patterns().get(layer, choice.pattern.as_str())?;
    match &choice.palette {
        None => defs.palettes().get_by_pattern(pattern, 0u8),
        Some(PaletteSelector::Name(name)) => defs.palettes().get_by_pattern(pattern, name.as_str()),
        Some(PaletteSelector::Like(matcher)) => defs.palettes().find_one_by_pattern(pattern, matcher),
    }
}
