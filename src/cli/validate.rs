//! Validate command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::load_definitions;
use crate::registry::Catalog;

use super::{print_json, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the validate command
///
/// Loads the catalog and builds every index. Exits with `EXIT_ERROR` and the
/// first problem found if the catalog is not usable.
pub fn run_validate(file: &Path, json: bool) -> ExitCode {
    let defs = match load_definitions(file) {
        Ok(defs) => defs,
        Err(e) => {
            if json {
                print_json(&serde_json::json!({
                    "file": file.display().to_string(),
                    "valid": false,
                    "error": e.to_string(),
                }));
            } else {
                eprintln!("Error: {}: {}", file.display(), e);
            }
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        print_json(&serde_json::json!({
            "file": file.display().to_string(),
            "valid": true,
            "layers": defs.layers().len(),
            "patterns": defs.patterns().len(),
            "palettes": defs.palettes().len(),
            "palette_codes": defs.num_palette_codes(),
        }));
    } else {
        println!(
            "{}: OK ({} layers, {} patterns, {} palettes, {} palette codes)",
            file.display(),
            defs.layers().len(),
            defs.patterns().len(),
            defs.palettes().len(),
            defs.num_palette_codes()
        );
    }
    ExitCode::from(EXIT_SUCCESS)
}
