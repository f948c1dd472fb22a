//! Configuration module for trait catalogs
//!
//! Provides the catalog document schema, the parser that flattens it into
//! catalog lists, and file loading.

pub mod loader;
pub mod parser;
pub mod schema;

pub use loader::{load_config, load_definitions, parse_config_str, ConfigError, ConfigFormat};
pub use parser::{parse, parse_layers, parse_palettes, parse_patterns, ParseError, ParsedCatalog};
pub use schema::*;
