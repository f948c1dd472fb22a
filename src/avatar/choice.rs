//! Named trait choices for one layer.
//!
//! A choice names a pattern and optionally selects a palette, either by
//! exact name or by a [`PaletteMatcher`] that must match exactly one palette
//! of the pattern. Accepted serialized forms:
//!
//! ```json
//! ["tshirt", "red"]
//! ["tshirt_gradient3", "/__blue$/"]
//! { "pattern": "tshirt", "palette": "red" }
//! { "pattern": "tshirt_gradient3", "palette_like": "__blue$" }
//! { "pattern": "tshirt" }
//! ```

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::matcher::PaletteMatcher;
use crate::models::TraitNames;

/// How a choice selects the palette of its pattern.
#[derive(Debug, Clone)]
pub enum PaletteSelector {
    Name(String),
    Like(PaletteMatcher),
}

impl PaletteSelector {
    /// Parse a palette string: text between slashes, or starting or ending
    /// with `*`, is a matcher. Anything else, including names with an inner
    /// `*`, is an exact name.
    pub fn parse(s: &str) -> Result<Self, regex::Error> {
        let is_regex = s.len() >= 2 && s.starts_with('/') && s.ends_with('/');
        if is_regex || s.starts_with('*') || s.ends_with('*') {
            Ok(PaletteSelector::Like(s.parse()?))
        } else {
            Ok(PaletteSelector::Name(s.to_string()))
        }
    }
}

impl fmt::Display for PaletteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteSelector::Name(name) => write!(f, "{}", name),
            PaletteSelector::Like(matcher) => write!(f, "{}", matcher),
        }
    }
}

/// The pattern and palette wanted for one layer.
///
/// Without a palette, the pattern's first palette is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawChoice")]
pub struct TraitChoice {
    pub pattern: String,
    pub palette: Option<PaletteSelector>,
}

impl TraitChoice {
    pub fn new(pattern: impl Into<String>, palette: Option<PaletteSelector>) -> Self {
        Self { pattern: pattern.into(), palette }
    }

    /// Choose a pattern and a palette by exact names.
    pub fn named(pattern: impl Into<String>, palette: impl Into<String>) -> Self {
        Self::new(pattern, Some(PaletteSelector::Name(palette.into())))
    }

    /// Choose a pattern and the single palette satisfying `matcher`.
    pub fn like(pattern: impl Into<String>, matcher: PaletteMatcher) -> Self {
        Self::new(pattern, Some(PaletteSelector::Like(matcher)))
    }

    /// Choose a pattern with its first palette.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::new(pattern, None)
    }
}

impl From<TraitNames> for TraitChoice {
    fn from(names: TraitNames) -> Self {
        Self::named(names.pattern, names.palette)
    }
}

impl From<&TraitNames> for TraitChoice {
    fn from(names: &TraitNames) -> Self {
        Self::named(names.pattern.as_str(), names.palette.as_str())
    }
}

/// `pattern` or `pattern:palette`, where the palette may be a matcher.
impl FromStr for TraitChoice {
    type Err = regex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((pattern, palette)) => {
                Ok(Self::new(pattern, Some(PaletteSelector::parse(palette)?)))
            }
            None => Ok(Self::pattern(s)),
        }
    }
}

impl fmt::Display for TraitChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.palette {
            Some(palette) => write!(f, "{}:{}", self.pattern, palette),
            None => write!(f, "{}", self.pattern),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawChoice {
    Pair(String, String),
    Object {
        pattern: String,
        #[serde(default)]
        palette: Option<String>,
        #[serde(default)]
        palette_like: Option<String>,
    },
}

impl TryFrom<RawChoice> for TraitChoice {
    type Error = String;

    fn try_from(raw: RawChoice) -> Result<Self, Self::Error> {
        match raw {
            RawChoice::Pair(pattern, palette) => {
                let selector = PaletteSelector::parse(&palette).map_err(|e| e.to_string())?;
                Ok(Self::new(pattern, Some(selector)))
            }
            RawChoice::Object { pattern, palette: Some(_), palette_like: Some(_) } => {
                Err(format!("choice for pattern '{}' sets both palette and palette_like", pattern))
            }
            RawChoice::Object { pattern, palette: Some(palette), palette_like: None } => {
                Ok(Self::named(pattern, palette))
            }
            RawChoice::Object { pattern, palette: None, palette_like: Some(like) } => {
                let matcher = PaletteMatcher::regex(&like).map_err(|e| e.to_string())?;
                Ok(Self::like(pattern, matcher))
            }
            RawChoice::Object { pattern, palette: None, palette_like: None } => {
                Ok(Self::pattern(pattern))
            }
        }
    }
}
