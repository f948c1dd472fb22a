//! Integration tests for DNA identifiers against the reference catalog.

use std::collections::HashMap;

use pixeldna::builtin;
use pixeldna::dna::{Dna, DnaError, LayerLimits, PartialTraitIndex, TraitIndex, DNA_BYTES, DNA_HEX_LEN};
use pixeldna::registry::Catalog;
use rand::rngs::StdRng;
use rand::SeedableRng;

const SAMPLE: &str = "0x0103000000000204010500000000010200000000000000000000000003000000";

#[test]
fn test_layout_matches_layer_order() {
    let defs = builtin::definitions();
    let dna: Dna = SAMPLE.parse().unwrap();
    let values = dna.values(defs.layers()).unwrap();
    assert_eq!(values.len(), 15);
    assert_eq!(values["body"], TraitIndex::new(1, 3));
    assert_eq!(values["left_eye"], TraitIndex::new(2, 4));
    assert_eq!(values["right_eye"], TraitIndex::new(1, 5));
    assert_eq!(values["topwear"], TraitIndex::new(1, 2));
    assert_eq!(values["handwear"], TraitIndex::new(0, 0));
    assert_eq!(values["hair"], TraitIndex::new(3, 0));
    assert!(dna.check_reserved(defs.layers()).is_ok());

    assert_eq!(Dna::from_values(defs.layers(), &values).unwrap(), dna);
}

#[test]
fn test_wire_format() {
    let dna: Dna = SAMPLE.parse().unwrap();
    assert_eq!(dna.hex().len(), DNA_HEX_LEN);
    assert_eq!(dna.to_string(), SAMPLE);
    assert_eq!(dna.as_bytes().len(), DNA_BYTES);

    let json = serde_json::to_string(&dna).unwrap();
    assert_eq!(json, format!("\"{}\"", SAMPLE));
    let parsed: Dna = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, dna);

    let unprefixed: Dna = serde_json::from_str(&format!("\"{}\"", dna.hex())).unwrap();
    assert_eq!(unprefixed, dna);
    assert!(serde_json::from_str::<Dna>("\"0x1234\"").is_err());
}

#[test]
fn test_reserved_bytes_in_reference_catalog() {
    let defs = builtin::definitions();
    // 15 layers use bytes 0..30
    let mut bytes = [0u8; DNA_BYTES];
    bytes[30] = 0x01;
    assert_eq!(
        Dna::from(bytes).check_reserved(defs.layers()),
        Err(DnaError::ReservedBytes { position: 30, value: 1 })
    );
}

#[test]
fn test_random_stays_in_domain() {
    let defs = builtin::definitions();
    let limits = defs.limits();
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let dna = Dna::random(defs.layers(), &limits, &mut rng).unwrap();
        assert!(dna.check_reserved(defs.layers()).is_ok());
        for (layer, index) in dna.values(defs.layers()).unwrap() {
            assert!(
                defs.palettes().lookup(&layer, index.pattern, index.palette).is_some(),
                "{} {} outside catalog",
                layer,
                index
            );
        }
    }
}

#[test]
fn test_random_is_reproducible() {
    let defs = builtin::definitions();
    let limits = defs.limits();
    let a = Dna::random(defs.layers(), &limits, &mut StdRng::seed_from_u64(7)).unwrap();
    let b = Dna::random(defs.layers(), &limits, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_random_weights_pairs_not_patterns() {
    // One pattern with one palette, one with three: the single pair should
    // come up about a quarter of the time, not half.
    let layers = builtin::definitions().layers();
    let limits = HashMap::from([("hair".to_string(), LayerLimits::new(vec![1, 3]))]);
    let mut rng = StdRng::seed_from_u64(99);
    let draws = 4000;
    let mut first = 0;
    for _ in 0..draws {
        let dna = Dna::random(layers, &limits, &mut rng).unwrap();
        let hair = dna.get(layers, "hair").unwrap();
        assert!(hair.pattern <= 1);
        if hair.pattern == 0 {
            first += 1;
        }
        // layers without limits stay zero
        assert_eq!(dna.get(layers, "body").unwrap(), TraitIndex::default());
    }
    assert!((800..1200).contains(&first), "pattern 0 drawn {} of {} times", first, draws);
}

#[test]
fn test_randomize_keeps_unlimited_layers() {
    let defs = builtin::definitions();
    let start: Dna = SAMPLE.parse().unwrap();
    let limits = HashMap::from([("hair".to_string(), LayerLimits::new(vec![1]))]);
    let dna = start.randomize(defs.layers(), &limits, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(dna.get(defs.layers(), "hair").unwrap(), TraitIndex::new(0, 0));
    for layer in defs.layers().iter().filter(|l| l.name != "hair") {
        assert_eq!(dna.get(defs.layers(), layer).unwrap(), start.get(defs.layers(), layer).unwrap());
    }
}

#[test]
fn test_replace_then_mask() {
    let defs = builtin::definitions();
    let dna: Dna = SAMPLE.parse().unwrap();
    let cleared = dna
        .replace(
            defs.layers(),
            &HashMap::from([("hair".to_string(), PartialTraitIndex { pattern: Some(0), palette: None })]),
        )
        .unwrap();
    assert_eq!(cleared.get(defs.layers(), "hair").unwrap(), TraitIndex::new(0, 0));

    // Masking with itself is the identity; masking with zero clears everything.
    assert_eq!(dna & dna, dna);
    assert_eq!(dna & Dna::ZERO, Dna::ZERO);
    assert_eq!(cleared | dna, dna);
}
