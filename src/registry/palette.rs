//! Palette catalog: the palettes of every pattern, indexed three ways.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use crate::matcher::PaletteMatcher;
use crate::models::{PaletteDescriptor, PaletteRef, PatternDescriptor, PatternPaletteDescriptor};

use super::error::{CatalogError, LookupError};
use super::traits::Catalog;

/// Validated set of pattern/palette entries.
///
/// Entries are sorted by layer index, pattern index and palette index, so
/// the palettes of one pattern are contiguous. Besides the flat list the
/// catalog keeps:
/// - a dense `[pattern index][palette index]` table per layer, used when
///   decoding a DNA
/// - a `pattern name -> palette name` map per layer, used for named choices
/// - the palettes of each palette code, shared by every pattern declaring
///   that code
#[derive(Debug, Clone)]
pub struct PalettePatternCatalog {
    entries: Vec<PatternPaletteDescriptor>,
    by_index: HashMap<String, Vec<Vec<Option<usize>>>>,
    by_name: HashMap<String, HashMap<String, HashMap<String, usize>>>,
    /// layer name -> pattern index -> range of `entries`
    ranges: HashMap<String, HashMap<u8, Range<usize>>>,
    by_code: Vec<Vec<PaletteDescriptor>>,
}

impl PalettePatternCatalog {
    /// Build a catalog from a flat list of entries in any order.
    pub fn new(mut entries: Vec<PatternPaletteDescriptor>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::EmptyCatalog { kind: "palette" });
        }
        check_patterns(&entries)?;
        check_duplicates(&entries)?;

        entries.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

        let mut by_index: HashMap<String, Vec<Vec<Option<usize>>>> = HashMap::new();
        let mut by_name: HashMap<String, HashMap<String, HashMap<String, usize>>> = HashMap::new();
        let mut ranges: HashMap<String, HashMap<u8, Range<usize>>> = HashMap::new();
        let mut codes: BTreeMap<u32, Vec<PaletteDescriptor>> = BTreeMap::new();

        for (position, entry) in entries.iter().enumerate() {
            let layer = entry.layer_name();
            let pattern = entry.pattern.index as usize;
            let palette = entry.palette.index as usize;

            let table = by_index.entry(layer.to_string()).or_default();
            if table.len() <= pattern {
                table.resize(pattern + 1, Vec::new());
            }
            if table[pattern].len() <= palette {
                table[pattern].resize(palette + 1, None);
            }
            table[pattern][palette] = Some(position);

            by_name
                .entry(layer.to_string())
                .or_default()
                .entry(entry.pattern.name.clone())
                .or_default()
                .insert(entry.palette.name.clone(), position);

            ranges
                .entry(layer.to_string())
                .or_default()
                .entry(entry.pattern.index)
                .and_modify(|range| range.end = position + 1)
                .or_insert(position..position + 1);

            add_to_code(codes.entry(entry.palette.code).or_default(), entry)?;
        }

        let by_code = collect_codes(codes)?;

        Ok(Self { entries, by_index, by_name, ranges, by_code })
    }

    /// Resolve an entry by layer name and raw indices, as read from a DNA.
    pub fn lookup(&self, layer: &str, pattern: u8, palette: u8) -> Option<&PatternPaletteDescriptor> {
        let position = self
            .by_index
            .get(layer)?
            .get(pattern as usize)?
            .get(palette as usize)
            .copied()
            .flatten()?;
        Some(&self.entries[position])
    }

    /// Resolve an entry by layer, pattern and palette names.
    pub fn lookup_names(
        &self,
        layer: &str,
        pattern: &str,
        palette: &str,
    ) -> Option<&PatternPaletteDescriptor> {
        let position = *self.by_name.get(layer)?.get(pattern)?.get(palette)?;
        Some(&self.entries[position])
    }

    /// Resolve a palette of a pattern by name or index.
    ///
    /// Fails with `UnknownPattern` if the pattern has no entries and with
    /// `UnknownPalette` if the palette reference does not resolve.
    pub fn get_by_pattern<'a>(
        &self,
        pattern: &PatternDescriptor,
        palette: impl Into<PaletteRef<'a>>,
    ) -> Result<&PatternPaletteDescriptor, LookupError> {
        self.pattern_range(pattern)?;
        let palette = palette.into();
        let found = match palette {
            PaletteRef::Name(name) => self.lookup_names(&pattern.layer.name, &pattern.name, name),
            PaletteRef::Index(index) => self.lookup(&pattern.layer.name, pattern.index, index),
        };
        found.ok_or_else(|| LookupError::UnknownPalette {
            layer: pattern.layer.name.clone(),
            pattern: pattern.name.clone(),
            palette: palette.to_string(),
        })
    }

    /// All palettes of a pattern, ordered by palette index.
    pub fn get_all_by_pattern(
        &self,
        pattern: &PatternDescriptor,
    ) -> Result<&[PatternPaletteDescriptor], LookupError> {
        let range = self.pattern_range(pattern)?;
        Ok(&self.entries[range])
    }

    /// Number of palettes of a pattern, zero if the pattern is unknown.
    pub fn count(&self, pattern: &PatternDescriptor) -> usize {
        self.pattern_range(pattern).map(|range| range.len()).unwrap_or(0)
    }

    /// Palette counts of a layer indexed by pattern index.
    ///
    /// A pattern index with no entries counts zero palettes.
    pub fn palette_counts(&self, layer: &str) -> Vec<usize> {
        match self.by_index.get(layer) {
            Some(table) => table
                .iter()
                .map(|palettes| palettes.iter().filter(|slot| slot.is_some()).count())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Palettes of a pattern whose name satisfies `matcher`.
    pub fn search_by_pattern(
        &self,
        pattern: &PatternDescriptor,
        matcher: &PaletteMatcher,
    ) -> Result<Vec<&PatternPaletteDescriptor>, LookupError> {
        Ok(self
            .get_all_by_pattern(pattern)?
            .iter()
            .filter(|entry| matcher.is_match(&entry.palette.name))
            .collect())
    }

    /// The single palette of a pattern whose name satisfies `matcher`.
    pub fn find_one_by_pattern(
        &self,
        pattern: &PatternDescriptor,
        matcher: &PaletteMatcher,
    ) -> Result<&PatternPaletteDescriptor, LookupError> {
        let found = self.search_by_pattern(pattern, matcher)?;
        exactly_one(found, format!("pattern '{}'", pattern), matcher, |entry| &entry.palette.name)
    }

    /// Number of palette codes. Codes are `0..num_codes()` with no gaps.
    pub fn num_codes(&self) -> usize {
        self.by_code.len()
    }

    /// Palettes of a code, ordered by index.
    pub fn get_by_code(&self, code: u32) -> Result<&[PaletteDescriptor], LookupError> {
        self.by_code
            .get(code as usize)
            .map(Vec::as_slice)
            .ok_or(LookupError::UnknownPaletteCode { code, count: self.by_code.len() })
    }

    /// Number of palettes of a code.
    pub fn count_by_code(&self, code: u32) -> Result<usize, LookupError> {
        self.get_by_code(code).map(<[_]>::len)
    }

    /// Resolve a palette of a code by name or index.
    pub fn get<'a>(
        &self,
        code: u32,
        palette: impl Into<PaletteRef<'a>>,
    ) -> Result<&PaletteDescriptor, LookupError> {
        let palettes = self.get_by_code(code)?;
        let palette = palette.into();
        let found = match palette {
            PaletteRef::Name(name) => palettes.iter().find(|p| p.name == name),
            PaletteRef::Index(index) => palettes.get(index as usize),
        };
        found.ok_or_else(|| LookupError::UnknownCodePalette { code, palette: palette.to_string() })
    }

    /// Palettes of a code whose name satisfies `matcher`.
    pub fn search_by_code(
        &self,
        code: u32,
        matcher: &PaletteMatcher,
    ) -> Result<Vec<&PaletteDescriptor>, LookupError> {
        Ok(self.get_by_code(code)?.iter().filter(|p| matcher.is_match(&p.name)).collect())
    }

    /// The single palette of a code whose name satisfies `matcher`.
    pub fn find_one_by_code(
        &self,
        code: u32,
        matcher: &PaletteMatcher,
    ) -> Result<&PaletteDescriptor, LookupError> {
        let found = self.search_by_code(code, matcher)?;
        exactly_one(found, format!("palette code {}", code), matcher, |p| &p.name)
    }

    fn pattern_range(&self, pattern: &PatternDescriptor) -> Result<Range<usize>, LookupError> {
        self.ranges
            .get(&pattern.layer.name)
            .and_then(|patterns| patterns.get(&pattern.index))
            .filter(|range| self.entries[range.start].pattern == *pattern)
            .cloned()
            .ok_or_else(|| LookupError::UnknownPattern {
                layer: pattern.layer.name.clone(),
                pattern: pattern.name.clone(),
            })
    }
}

impl Catalog for PalettePatternCatalog {
    type Item = PatternPaletteDescriptor;

    fn as_slice(&self) -> &[PatternPaletteDescriptor] {
        &self.entries
    }
}

fn sort_key(entry: &PatternPaletteDescriptor) -> (u32, &str, u8, u8) {
    (entry.pattern.layer.index, entry.layer_name(), entry.pattern.index, entry.palette.index)
}

/// A pattern must look the same in every entry that mentions it.
fn check_patterns(entries: &[PatternPaletteDescriptor]) -> Result<(), CatalogError> {
    let mut indices: HashMap<(&str, &str), u8> = HashMap::new();
    let mut names: HashMap<(&str, u8), &str> = HashMap::new();
    for entry in entries {
        let layer = entry.layer_name();
        let pattern = &entry.pattern;
        let index = *indices.entry((layer, pattern.name.as_str())).or_insert(pattern.index);
        if index != pattern.index {
            return Err(CatalogError::DuplicateName {
                kind: "pattern",
                scope: format!("layer '{}'", layer),
                name: pattern.name.clone(),
            });
        }
        let name = *names.entry((layer, pattern.index)).or_insert(pattern.name.as_str());
        if name != pattern.name {
            return Err(CatalogError::DuplicateIndex {
                kind: "pattern",
                scope: format!("layer '{}'", layer),
                index: pattern.index as u32,
            });
        }
    }
    Ok(())
}

fn check_duplicates(entries: &[PatternPaletteDescriptor]) -> Result<(), CatalogError> {
    let mut names: HashMap<(&str, &str), Vec<&str>> = HashMap::new();
    let mut indices: HashMap<(&str, &str), Vec<u8>> = HashMap::new();
    for entry in entries {
        let key = (entry.layer_name(), entry.pattern.name.as_str());
        let seen = names.entry(key).or_default();
        if seen.contains(&entry.palette.name.as_str()) {
            return Err(CatalogError::DuplicateName {
                kind: "palette",
                scope: format!("pattern '{}'", entry.pattern),
                name: entry.palette.name.clone(),
            });
        }
        seen.push(entry.palette.name.as_str());

        let seen = indices.entry(key).or_default();
        if seen.contains(&entry.palette.index) {
            return Err(CatalogError::DuplicateIndex {
                kind: "palette",
                scope: format!("pattern '{}'", entry.pattern),
                index: entry.palette.index as u32,
            });
        }
        seen.push(entry.palette.index);
    }
    Ok(())
}

/// Merge one entry's palette into the list of its code.
///
/// Indices must extend the list contiguously, and an index already present
/// must carry the same name.
fn add_to_code(
    palettes: &mut Vec<PaletteDescriptor>,
    entry: &PatternPaletteDescriptor,
) -> Result<(), CatalogError> {
    let palette = &entry.palette;
    let index = palette.index as usize;
    match palettes.get(index) {
        Some(existing) if existing.name != palette.name => Err(CatalogError::ConflictingPaletteCode {
            code: palette.code,
            index: palette.index,
            existing: existing.name.clone(),
            found: palette.name.clone(),
            pattern: entry.pattern.to_string(),
        }),
        Some(_) => Ok(()),
        None if index == palettes.len() => {
            palettes.push(palette.clone());
            Ok(())
        }
        None => Err(CatalogError::PaletteIndexGap {
            code: palette.code,
            index: palette.index,
            expected: palettes.len(),
            pattern: entry.pattern.to_string(),
        }),
    }
}

fn collect_codes(
    codes: BTreeMap<u32, Vec<PaletteDescriptor>>,
) -> Result<Vec<Vec<PaletteDescriptor>>, CatalogError> {
    let mut by_code = Vec::with_capacity(codes.len());
    for (expected, (code, palettes)) in (0u32..).zip(codes) {
        if code != expected {
            return Err(CatalogError::MissingPaletteCode(expected));
        }
        by_code.push(palettes);
    }
    Ok(by_code)
}

fn exactly_one<'c, T>(
    mut found: Vec<&'c T>,
    scope: String,
    matcher: &PaletteMatcher,
    name: impl Fn(&T) -> &String,
) -> Result<&'c T, LookupError> {
    match found.len() {
        0 => Err(LookupError::NoMatch { scope, matcher: matcher.to_string() }),
        1 => Ok(found.remove(0)),
        count => Err(LookupError::AmbiguousMatch {
            scope,
            matcher: matcher.to_string(),
            count,
            names: found.iter().map(|item| name(item).clone()).collect(),
        }),
    }
}
