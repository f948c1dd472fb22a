//! Avatar command implementations (decode, encode, random)

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::path::Path;
use std::process::ExitCode;

use crate::avatar::{Avatar, TraitChoice};
use crate::definitions::Definitions;

use super::{print_json, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the decode command
pub fn run_decode(defs: &Definitions, dna: &str, json: bool) -> ExitCode {
    match Avatar::from_hex(defs, dna) {
        Ok(avatar) => {
            print_avatar(&avatar, json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the encode command
pub fn run_encode(defs: &Definitions, traits: &[String], spec: Option<&Path>, json: bool) -> ExitCode {
    let mut choices = match spec {
        Some(path) => match read_spec(path) {
            Ok(choices) => choices,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        },
        None => HashMap::new(),
    };

    for arg in traits {
        match parse_trait_arg(arg) {
            Ok((layer, choice)) => {
                choices.insert(layer, choice);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    }

    match Avatar::from_choices(defs, &choices) {
        Ok(avatar) => {
            print_avatar(&avatar, json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the random command
pub fn run_random(defs: &Definitions, seed: Option<u64>, json: bool) -> ExitCode {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    match Avatar::random(defs, &mut rng) {
        Ok(avatar) => {
            print_avatar(&avatar, json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Split `layer=pattern[:palette]`.
fn parse_trait_arg(arg: &str) -> Result<(String, TraitChoice), String> {
    let (layer, choice) = arg
        .split_once('=')
        .ok_or_else(|| format!("Invalid --trait '{}', expected LAYER=PATTERN[:PALETTE]", arg))?;
    if layer.is_empty() || choice.is_empty() {
        return Err(format!("Invalid --trait '{}', expected LAYER=PATTERN[:PALETTE]", arg));
    }
    let choice = choice
        .parse::<TraitChoice>()
        .map_err(|e| format!("Invalid palette pattern in --trait '{}': {}", arg, e))?;
    Ok((layer.to_string(), choice))
}

/// Read a JSON document mapping layer names or aliases to choices.
fn read_spec(path: &Path) -> Result<HashMap<String, TraitChoice>, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read '{}': {}", path.display(), e))?;
    serde_json::from_str(&contents).map_err(|e| format!("Invalid choices in '{}': {}", path.display(), e))
}

fn print_avatar(avatar: &Avatar<'_>, json: bool) {
    if json {
        let layers: Vec<_> = avatar
            .traits()
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "layer": entry.layer_name(),
                    "pattern": entry.pattern.name,
                    "palette": entry.palette.name,
                    "pattern_index": entry.pattern.index,
                    "palette_index": entry.palette.index,
                    "palette_code": entry.palette.code,
                })
            })
            .collect();
        print_json(&serde_json::json!({ "dna": avatar.dna().to_string(), "layers": layers }));
        return;
    }

    println!("DNA: {}", avatar.dna());
    for entry in avatar.traits() {
        println!(
            "  {:<12} {:<24} {:<20} ({},{})",
            entry.layer_name(),
            entry.pattern.name,
            entry.palette.name,
            entry.pattern.index,
            entry.palette.index
        );
    }
}
