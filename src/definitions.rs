//! Avatar definitions: the three trait catalogs behind one façade.

use std::collections::HashMap;

use crate::config::{parse, CatalogConfig, ConfigError, ParsedCatalog};
use crate::dna::{LayerLimits, DNA_BYTES};
use crate::matcher::PaletteMatcher;
use crate::models::{
    LayerDescriptor, LayerRef, PaletteDescriptor, PaletteRef, PatternDescriptor,
    PatternPaletteDescriptor, PatternRef, TraitNames,
};
use crate::registry::{
    Catalog, CatalogError, LayerCatalog, LookupError, PalettePatternCatalog, PatternCatalog,
};

/// Layers, patterns and palettes of one avatar generation.
///
/// Built once from a catalog document and immutable afterwards. Every layer
/// has a resolved default trait, used when a named-choice construction does
/// not mention the layer.
#[derive(Debug, Clone)]
pub struct Definitions {
    layers: LayerCatalog,
    patterns: PatternCatalog,
    palettes: PalettePatternCatalog,
    defaults: HashMap<String, PatternPaletteDescriptor>,
    aliases: HashMap<String, Vec<String>>,
}

impl Definitions {
    /// Build definitions from already constructed catalogs.
    ///
    /// `defaults` maps layer names to (pattern, palette) names. Layers
    /// without a configured default use their first pattern and palette.
    pub fn new(
        layers: LayerCatalog,
        patterns: PatternCatalog,
        palettes: PalettePatternCatalog,
        defaults: HashMap<String, TraitNames>,
        aliases: HashMap<String, Vec<String>>,
    ) -> Result<Self, CatalogError> {
        if layers.len() * 2 > DNA_BYTES {
            return Err(CatalogError::TooManyLayers { count: layers.len(), bytes: DNA_BYTES });
        }

        for (alias, targets) in &aliases {
            if layers.contains(alias) {
                return Err(CatalogError::AliasShadowsLayer { alias: alias.clone() });
            }
            if let Some(layer) = targets.iter().find(|layer| !layers.contains(layer)) {
                return Err(CatalogError::UnknownAliasLayer { alias: alias.clone(), layer: layer.clone() });
            }
        }

        let mut resolved = HashMap::with_capacity(layers.len());
        for layer in layers.iter() {
            let entry = match defaults.get(&layer.name) {
                Some(names) => palettes.lookup_names(&layer.name, &names.pattern, &names.palette),
                None => patterns
                    .get_by(layer)
                    .first()
                    .and_then(|pattern| palettes.get_all_by_pattern(pattern).ok())
                    .and_then(|entries| entries.first()),
            };
            let entry = entry.ok_or_else(|| {
                let names = defaults.get(&layer.name);
                CatalogError::UndefinedDefault {
                    layer: layer.name.clone(),
                    pattern: names.map_or_else(|| "#0".to_string(), |n| n.pattern.clone()),
                    palette: names.map_or_else(|| "#0".to_string(), |n| n.palette.clone()),
                }
            })?;
            resolved.insert(layer.name.clone(), entry.clone());
        }

        log::debug!(
            "Built definitions: {} layers, {} patterns, {} palettes, {} palette codes",
            layers.len(),
            patterns.len(),
            palettes.len(),
            palettes.num_codes()
        );

        Ok(Self { layers, patterns, palettes, defaults: resolved, aliases })
    }

    /// Build definitions from the output of the catalog parser.
    pub fn from_parsed(parsed: ParsedCatalog) -> Result<Self, CatalogError> {
        Self::new(
            LayerCatalog::new(parsed.layers)?,
            PatternCatalog::new(parsed.patterns)?,
            PalettePatternCatalog::new(parsed.palettes)?,
            parsed.defaults,
            parsed.aliases,
        )
    }

    /// Parse a catalog document and build definitions from it.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_parsed(parse(config)?)?)
    }

    pub fn layers(&self) -> &LayerCatalog {
        &self.layers
    }

    pub fn patterns(&self) -> &PatternCatalog {
        &self.patterns
    }

    pub fn palettes(&self) -> &PalettePatternCatalog {
        &self.palettes
    }

    // ========================================================================
    // Layers and patterns
    // ========================================================================

    pub fn get_layer<'a>(&self, layer: impl Into<LayerRef<'a>>) -> Result<&LayerDescriptor, LookupError> {
        self.layers.get(layer)
    }

    pub fn get_pattern<'a, 'b>(
        &self,
        layer: impl Into<LayerRef<'a>>,
        pattern: impl Into<PatternRef<'b>>,
    ) -> Result<&PatternDescriptor, LookupError> {
        let layer = self.layers.get(layer)?;
        self.patterns.get(layer, pattern)
    }

    /// Resolve one palette of one pattern of one layer.
    pub fn get_pattern_palette<'a, 'b, 'c>(
        &self,
        layer: impl Into<LayerRef<'a>>,
        pattern: impl Into<PatternRef<'b>>,
        palette: impl Into<PaletteRef<'c>>,
    ) -> Result<&PatternPaletteDescriptor, LookupError> {
        let pattern = self.get_pattern(layer, pattern)?;
        self.palettes.get_by_pattern(pattern, palette)
    }

    /// Patterns of a layer, ordered by index.
    pub fn patterns_by_layer<'a>(
        &self,
        layer: impl Into<LayerRef<'a>>,
    ) -> Result<&[PatternDescriptor], LookupError> {
        let layer = self.layers.get(layer)?;
        Ok(self.patterns.get_by(layer))
    }

    /// Every pattern/palette entry of a layer, ordered by pattern then palette.
    pub fn pattern_palettes_by_layer<'a>(
        &self,
        layer: impl Into<LayerRef<'a>>,
    ) -> Result<Vec<&PatternPaletteDescriptor>, LookupError> {
        let mut entries = Vec::new();
        for pattern in self.patterns_by_layer(layer)? {
            entries.extend(self.palettes.get_all_by_pattern(pattern)?);
        }
        Ok(entries)
    }

    /// Palettes of one pattern, ordered by index.
    pub fn pattern_palettes_by_pattern<'a, 'b>(
        &self,
        layer: impl Into<LayerRef<'a>>,
        pattern: impl Into<PatternRef<'b>>,
    ) -> Result<&[PatternPaletteDescriptor], LookupError> {
        let pattern = self.get_pattern(layer, pattern)?;
        self.palettes.get_all_by_pattern(pattern)
    }

    pub fn pattern_count<'a>(&self, layer: impl Into<LayerRef<'a>>) -> Result<usize, LookupError> {
        Ok(self.patterns_by_layer(layer)?.len())
    }

    pub fn palette_count<'a, 'b>(
        &self,
        layer: impl Into<LayerRef<'a>>,
        pattern: impl Into<PatternRef<'b>>,
    ) -> Result<usize, LookupError> {
        Ok(self.pattern_palettes_by_pattern(layer, pattern)?.len())
    }

    pub fn search_pattern_palettes<'a, 'b>(
        &self,
        layer: impl Into<LayerRef<'a>>,
        pattern: impl Into<PatternRef<'b>>,
        matcher: &PaletteMatcher,
    ) -> Result<Vec<&PatternPaletteDescriptor>, LookupError> {
        let pattern = self.get_pattern(layer, pattern)?;
        self.palettes.search_by_pattern(pattern, matcher)
    }

    pub fn find_pattern_palette<'a, 'b>(
        &self,
        layer: impl Into<LayerRef<'a>>,
        pattern: impl Into<PatternRef<'b>>,
        matcher: &PaletteMatcher,
    ) -> Result<&PatternPaletteDescriptor, LookupError> {
        let pattern = self.get_pattern(layer, pattern)?;
        self.palettes.find_one_by_pattern(pattern, matcher)
    }

    // ========================================================================
    // Palette codes
    // ========================================================================

    pub fn palettes_by_code(&self, code: u32) -> Result<&[PaletteDescriptor], LookupError> {
        self.palettes.get_by_code(code)
    }

    pub fn get_palette<'a>(
        &self,
        code: u32,
        palette: impl Into<PaletteRef<'a>>,
    ) -> Result<&PaletteDescriptor, LookupError> {
        self.palettes.get(code, palette)
    }

    pub fn num_palette_codes(&self) -> usize {
        self.palettes.num_codes()
    }

    pub fn num_palettes(&self, code: u32) -> Result<usize, LookupError> {
        self.palettes.count_by_code(code)
    }

    pub fn search_palettes(
        &self,
        code: u32,
        matcher: &PaletteMatcher,
    ) -> Result<Vec<&PaletteDescriptor>, LookupError> {
        self.palettes.search_by_code(code, matcher)
    }

    pub fn find_palette(&self, code: u32, matcher: &PaletteMatcher) -> Result<&PaletteDescriptor, LookupError> {
        self.palettes.find_one_by_code(code, matcher)
    }

    // ========================================================================
    // Defaults, aliases, limits
    // ========================================================================

    /// Per-layer palette counts, the domain of [`Dna::random`](crate::dna::Dna::random).
    pub fn limits(&self) -> HashMap<String, LayerLimits> {
        self.layers
            .names()
            .map(|name| (name.to_string(), LayerLimits::new(self.palettes.palette_counts(name))))
            .collect()
    }

    /// The trait a layer takes when a named-choice construction omits it.
    pub fn default_for(&self, layer: &str) -> Option<&PatternPaletteDescriptor> {
        self.defaults.get(layer)
    }

    /// Layers addressed by an alias, in layer order.
    pub fn resolve_alias(&self, key: &str) -> Option<&[String]> {
        self.aliases.get(key).map(Vec::as_slice)
    }

    /// All aliases with the layers they address.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.aliases.iter().map(|(alias, layers)| (alias.as_str(), layers.as_slice()))
    }
}
