//! Catalog document loading
//!
//! Reads a catalog document from disk in JSON, JSON5 or TOML, chosen by file
//! extension, and optionally builds [`Definitions`] from it.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::definitions::Definitions;
use crate::registry::CatalogError;

use super::parser::ParseError;
use super::schema::CatalogConfig;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    /// JSON5 parsing error
    #[error("Failed to parse JSON5 config: {0}")]
    Json5(#[from] json5::Error),
    /// TOML parsing error
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    /// Extension is not one of json, json5, toml
    #[error("Unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Document formats accepted by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Json5,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            "json5" => Some(ConfigFormat::Json5),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Parse a catalog document from a string.
pub fn parse_config_str(contents: &str, format: ConfigFormat) -> Result<CatalogConfig, ConfigError> {
    let config = match format {
        ConfigFormat::Json => serde_json::from_str(contents)?,
        ConfigFormat::Json5 => json5::from_str(contents)?,
        ConfigFormat::Toml => toml::from_str(contents)?,
    };
    Ok(config)
}

/// Load a catalog document from a file.
///
/// # Example
/// ```ignore
/// let config = load_config(Path::new("catalogs/gen0.toml"))?;
/// println!("{} layers", config.len());
/// ```
pub fn load_config(path: &Path) -> Result<CatalogConfig, ConfigError> {
    let format =
        ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let contents = fs::read_to_string(path)?;
    let config = parse_config_str(&contents, format)?;
    log::debug!("Loaded catalog config {} ({} layers)", path.display(), config.len());
    Ok(config)
}

/// Load a catalog document and build definitions from it.
pub fn load_definitions(path: &Path) -> Result<Definitions, ConfigError> {
    let config = load_config(path)?;
    Definitions::from_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Catalog;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    const JSON: &str = r#"{
        "body": {
            "layer": { "name": "body", "index": 10 },
            "patterns": { "pattern:athletic": { "code": 0, "palettes": ["human001", "human002"] } }
        },
        "hair": {
            "layer": { "name": "hair", "index": 150 },
            "patterns": {
                "pattern:bald": { "code": 1, "palettes": ["transparent"] },
                "pattern:short": { "code": 2, "palettes": ["black", "brown"] }
            },
            "default": ["bald", "transparent"]
        }
    }"#;

    const JSON5: &str = r#"{
        // trailing commas and comments are fine here
        body: {
            layer: { name: 'body', index: 10 },
            patterns: { 'pattern:athletic': { code: 0, palettes: ['human001', 'human002'] } },
        },
    }"#;

    const TOML: &str = r#"
[body.layer]
name = "body"
index = 10

[body.patterns."pattern:athletic"]
code = 0
palettes = ["human001", "human002"]
"#;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        File::create(&path)
            .expect("should create config file")
            .write_all(contents.as_bytes())
            .expect("should write config content");
        path
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path(Path::new("a.JSON5")), Some(ConfigFormat::Json5));
        assert_eq!(ConfigFormat::from_path(Path::new("dir/a.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_load_json() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write(&temp, "catalog.json", JSON);
        let config = load_config(&path).unwrap();
        let keys: Vec<&str> = config.keys().collect();
        assert_eq!(keys, vec!["body", "hair"]);
    }

    #[test]
    fn test_load_json5_and_toml_agree() {
        let temp = TempDir::new().expect("should create temp dir");
        let json5 = load_config(&write(&temp, "catalog.json5", JSON5)).unwrap();
        let toml = load_config(&write(&temp, "catalog.toml", TOML)).unwrap();
        assert_eq!(json5, toml);
    }

    #[test]
    fn test_load_unsupported_format() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write(&temp, "catalog.yaml", "body: {}");
        assert!(matches!(load_config(&path), Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("missing.json");
        assert!(matches!(load_config(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write(&temp, "catalog.json", "{ not json");
        assert!(matches!(load_config(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_definitions() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write(&temp, "catalog.json", JSON);
        let definitions = load_definitions(&path).unwrap();
        assert_eq!(definitions.layers().len(), 2);
        assert_eq!(definitions.default_for("hair").unwrap().palette.name, "transparent");
    }

    #[test]
    fn test_load_definitions_parse_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write(&temp, "catalog.json", "{}");
        assert!(matches!(
            load_definitions(&path),
            Err(ConfigError::Parse(ParseError::EmptyConfig))
        ));
    }

    #[test]
    fn test_load_definitions_catalog_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let conflicting = r#"{
            "a": { "layer": { "name": "a", "index": 1 },
                   "patterns": { "x": { "code": 0, "palettes": ["red"] } } },
            "b": { "layer": { "name": "b", "index": 2 },
                   "patterns": { "y": { "code": 0, "palettes": ["blue"] } } }
        }"#;
        let path = write(&temp, "catalog.json", conflicting);
        assert!(matches!(
            load_definitions(&path),
            Err(ConfigError::Catalog(CatalogError::ConflictingPaletteCode { .. }))
        ));
    }
}
