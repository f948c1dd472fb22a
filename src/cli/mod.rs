//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod avatar;
mod inspect;
mod validate;

use clap::{Parser, Subcommand};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::builtin;
use crate::config::{load_definitions, ConfigError};
use crate::definitions::Definitions;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Pixeldna - encode and decode layered avatar DNA
#[derive(Parser)]
#[command(name = "pxdna")]
#[command(about = "Pixeldna - encode, decode and inspect 32-byte avatar DNA")]
#[command(version)]
pub struct Cli {
    /// Trait catalog (.json, .json5 or .toml) to use instead of the built-in one
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a DNA into the trait on every layer
    Decode {
        /// 64 hex digits, optionally 0x-prefixed
        dna: String,
    },

    /// Encode named traits into a DNA
    ///
    /// Layers not mentioned take their default trait.
    Encode {
        /// Trait for one layer or alias (e.g. hair=wild:blue_green, eyes=round:/blue/)
        #[arg(short, long = "trait", value_name = "LAYER=PATTERN[:PALETTE]")]
        traits: Vec<String>,

        /// JSON file mapping layers to choices; --trait entries take precedence
        #[arg(long, value_name = "FILE")]
        spec: Option<PathBuf>,
    },

    /// Generate a random avatar
    Random {
        /// Seed for a reproducible result
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List the catalog layers in encoding order
    Layers,

    /// List the patterns of a layer
    Patterns {
        /// Layer name or index
        layer: String,
    },

    /// List the palettes sharing a palette code
    Palettes {
        /// Palette code
        code: u32,
    },

    /// Check that a trait catalog builds
    Validate {
        /// Catalog file (.json, .json5 or .toml)
        file: PathBuf,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let json = cli.json;

    match cli.command {
        Commands::Validate { file } => validate::run_validate(&file, json),
        Commands::Decode { dna } => {
            with_definitions(config, |defs| avatar::run_decode(defs, &dna, json))
        }
        Commands::Encode { traits, spec } => with_definitions(config, |defs| {
            avatar::run_encode(defs, &traits, spec.as_deref(), json)
        }),
        Commands::Random { seed } => {
            with_definitions(config, |defs| avatar::run_random(defs, seed, json))
        }
        Commands::Layers => with_definitions(config, |defs| inspect::run_layers(defs, json)),
        Commands::Patterns { layer } => {
            with_definitions(config, |defs| inspect::run_patterns(defs, &layer, json))
        }
        Commands::Palettes { code } => {
            with_definitions(config, |defs| inspect::run_palettes(defs, code, json))
        }
    }
}

/// Run `command` against the selected catalog, failing if it cannot be loaded.
fn with_definitions(config: Option<&Path>, command: impl FnOnce(&Definitions) -> ExitCode) -> ExitCode {
    match definitions(config) {
        Ok(defs) => command(&defs),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// The catalog named by `--config`, or the built-in one.
fn definitions(config: Option<&Path>) -> Result<Cow<'static, Definitions>, ConfigError> {
    match config {
        Some(path) => Ok(Cow::Owned(load_definitions(path)?)),
        None => Ok(Cow::Borrowed(builtin::definitions())),
    }
}

/// Print a JSON value, pretty-printed.
pub(crate) fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: {}", e),
    }
}
