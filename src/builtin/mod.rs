//! Built-in reference catalog.
//!
//! The generation-0 avatar catalog ships embedded in the binary as a JSON
//! catalog document and is built on first use.

use std::sync::OnceLock;

use crate::config::{parse_config_str, CatalogConfig, ConfigFormat};
use crate::definitions::Definitions;

/// The embedded catalog document.
pub const GEN0_JSON: &str = include_str!("gen0.json");

/// Layer names of the reference catalog in stacking order.
pub const GEN0_LAYERS: &[&str] = &[
    "body",
    "tattoos",
    "makeup",
    "left_eye",
    "right_eye",
    "bottomwear",
    "footwear",
    "topwear",
    "handwear",
    "outerwear",
    "jewelry",
    "facial_hair",
    "facewear",
    "eyewear",
    "hair",
];

/// The reference catalog document.
pub fn config() -> CatalogConfig {
    parse_config_str(GEN0_JSON, ConfigFormat::Json).expect("embedded gen0 catalog is valid JSON")
}

/// The reference definitions, built once per process.
pub fn definitions() -> &'static Definitions {
    static DEFINITIONS: OnceLock<Definitions> = OnceLock::new();
    DEFINITIONS.get_or_init(|| {
        Definitions::from_config(&config()).expect("embedded gen0 catalog is consistent")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TraitNames;
    use crate::registry::Catalog;

    #[test]
    fn test_layer_order() {
        let names: Vec<&str> = definitions().layers().names().collect();
        assert_eq!(names, GEN0_LAYERS);
        let indices: Vec<u32> = definitions().layers().iter().map(|l| l.index).collect();
        assert_eq!(indices, (1..=15).map(|i| i * 10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_same_instance() {
        assert!(std::ptr::eq(definitions(), definitions()));
    }

    #[test]
    fn test_palette_codes() {
        let defs = definitions();
        assert_eq!(defs.num_palette_codes(), 9);
        assert_eq!(defs.num_palettes(0).unwrap(), 1);
        assert_eq!(defs.num_palettes(1).unwrap(), 8);
        assert_eq!(defs.get_palette(0, 0u8).unwrap().name, "transparent");
    }

    #[test]
    fn test_defaults() {
        let defs = definitions();
        let names = |layer: &str| defs.default_for(layer).unwrap().names();
        assert_eq!(names("hair"), TraitNames::new("bald", "transparent"));
        assert_eq!(names("topwear"), TraitNames::new("naked", "transparent"));
        assert_eq!(names("bottomwear"), TraitNames::new("naked", "transparent"));
        assert_eq!(names("eyewear"), TraitNames::new("none", "transparent"));
        assert_eq!(names("body"), TraitNames::new("bare_chest", "human001"));
    }

    #[test]
    fn test_eyes_alias() {
        let layers = definitions().resolve_alias("eyes").unwrap();
        assert_eq!(layers, &["left_eye".to_string(), "right_eye".to_string()]);
    }
}
