//! Catalog listing commands (layers, patterns, palettes)

use std::process::ExitCode;

use crate::definitions::Definitions;
use crate::models::LayerRef;
use crate::registry::Catalog;

use super::{print_json, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the layers command
pub fn run_layers(defs: &Definitions, json: bool) -> ExitCode {
    let mut rows = Vec::with_capacity(defs.layers().len());
    for (position, layer) in defs.layers().iter().enumerate() {
        let default = defs.default_for(&layer.name);
        rows.push((position, layer, defs.patterns().count(layer), default));
    }

    if json {
        let layers: Vec<_> = rows
            .iter()
            .map(|(position, layer, patterns, default)| {
                serde_json::json!({
                    "name": layer.name,
                    "index": layer.index,
                    "bytes": [position * 2, position * 2 + 1],
                    "patterns": patterns,
                    "default": default.map(|entry| entry.names()),
                })
            })
            .collect();
        let aliases: serde_json::Map<String, serde_json::Value> = defs
            .aliases()
            .map(|(alias, layers)| (alias.to_string(), serde_json::json!(layers)))
            .collect();
        print_json(&serde_json::json!({ "layers": layers, "aliases": aliases }));
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("{:<7} {:<6} {:<12} {:>8}  default", "bytes", "index", "layer", "patterns");
    for (position, layer, patterns, default) in rows {
        let default = default.map(|entry| entry.names().to_string()).unwrap_or_default();
        println!(
            "{:<7} {:<6} {:<12} {:>8}  {}",
            format!("{}-{}", position * 2, position * 2 + 1),
            layer.index,
            layer.name,
            patterns,
            default
        );
    }
    let mut aliases: Vec<_> = defs.aliases().collect();
    aliases.sort();
    for (alias, layers) in aliases {
        println!("alias {} -> {}", alias, layers.join(", "));
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the patterns command
pub fn run_patterns(defs: &Definitions, layer: &str, json: bool) -> ExitCode {
    // A numeric argument is a layer index unless a layer is named that way.
    let layer_ref = match layer.parse::<u32>() {
        Ok(index) if !defs.layers().contains(layer) => LayerRef::from(index),
        _ => LayerRef::from(layer),
    };
    let layer = match defs.get_layer(layer_ref) {
        Ok(layer) => layer,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut rows = Vec::new();
    for pattern in defs.patterns().get_by(layer) {
        let palettes = match defs.palettes().get_all_by_pattern(pattern) {
            Ok(palettes) => palettes,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };
        let code = palettes.first().map(|entry| entry.palette.code);
        let names: Vec<&str> = palettes.iter().map(|entry| entry.palette.name.as_str()).collect();
        rows.push((pattern, code, names));
    }

    if json {
        let patterns: Vec<_> = rows
            .iter()
            .map(|(pattern, code, names)| {
                serde_json::json!({
                    "name": pattern.name,
                    "index": pattern.index,
                    "code": code,
                    "palettes": names,
                })
            })
            .collect();
        print_json(&serde_json::json!({ "layer": layer.name, "patterns": patterns }));
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("Layer: {} (index {})", layer.name, layer.index);
    for (pattern, code, names) in rows {
        let code = code.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string());
        println!("  {:>3}  {:<24} code {:<3} {}", pattern.index, pattern.name, code, names.join(", "));
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the palettes command
pub fn run_palettes(defs: &Definitions, code: u32, json: bool) -> ExitCode {
    let palettes = match defs.palettes_by_code(code) {
        Ok(palettes) => palettes,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        let entries: Vec<_> = palettes
            .iter()
            .map(|palette| serde_json::json!({ "name": palette.name, "index": palette.index }))
            .collect();
        print_json(&serde_json::json!({ "code": code, "palettes": entries }));
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("Palette code {} ({} of {} codes)", code, code + 1, defs.num_palette_codes());
    for palette in palettes {
        println!("  {:>3}  {}", palette.index, palette.name);
    }
    ExitCode::from(EXIT_SUCCESS)
}
