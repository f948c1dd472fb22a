//! Pixeldna - fixed-width DNA identifiers for layered pixel avatars
//!
//! This library provides functionality to:
//! - Load a trait catalog (layers, patterns, palettes) from JSON, JSON5 or TOML
//! - Decode a 32-byte DNA into the trait selected on every layer
//! - Encode named trait choices back into a DNA, with a round-trip self-check
//!
//! ```
//! use pixeldna::avatar::Avatar;
//! use pixeldna::builtin;
//! use pixeldna::dna::Dna;
//!
//! let defs = builtin::definitions();
//! let avatar = Avatar::from_dna(defs, Dna::ZERO).unwrap();
//! assert_eq!(avatar.get("hair").unwrap().pattern.name, "bald");
//! ```

pub mod avatar;
pub mod bimap;
pub mod builtin;
pub mod cli;
pub mod config;
pub mod definitions;
pub mod dna;
pub mod matcher;
pub mod models;
pub mod registry;
