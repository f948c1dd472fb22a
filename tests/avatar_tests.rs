//! Integration tests for avatar encoding and decoding.
//!
//! Exercises both round-trip laws over the full domain of the reference
//! catalog, plus named-choice construction, aliases and transforms.

use std::collections::HashMap;

use pixeldna::avatar::{Avatar, AvatarError, TraitChoice};
use pixeldna::builtin;
use pixeldna::dna::{Dna, PartialTraitIndex};
use pixeldna::models::{AvatarPose, TraitNames};
use pixeldna::registry::{Catalog, LookupError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn choices(pairs: &[(&str, &str)]) -> HashMap<String, TraitChoice> {
    pairs.iter().map(|(layer, choice)| (layer.to_string(), choice.parse().unwrap())).collect()
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_every_trait_round_trips() {
    let defs = builtin::definitions();
    for entry in defs.palettes().iter() {
        let named = HashMap::from([(entry.layer_name().to_string(), TraitChoice::from(entry.names()))]);
        let avatar = Avatar::from_choices(defs, &named).unwrap();
        assert_eq!(avatar.get(entry.layer_name()).unwrap(), entry);

        let decoded = Avatar::from_dna(defs, avatar.dna()).unwrap();
        assert_eq!(decoded, avatar);
        assert_eq!(decoded.traits(), avatar.traits());
    }
}

#[test]
fn test_every_valid_dna_pair_round_trips() {
    let defs = builtin::definitions();
    let layers = defs.layers();
    for entry in defs.palettes().iter() {
        let change = HashMap::from([(
            entry.layer_name().to_string(),
            PartialTraitIndex { pattern: Some(entry.pattern.index), palette: Some(entry.palette.index) },
        )]);
        let dna = Dna::ZERO.replace(layers, &change).unwrap();
        let avatar = Avatar::from_dna(defs, dna).unwrap();
        let names: HashMap<String, TraitChoice> = avatar
            .names()
            .into_iter()
            .map(|(layer, names)| (layer.to_string(), TraitChoice::from(names)))
            .collect();
        let reencoded = Avatar::from_choices(defs, &names).unwrap();
        assert_eq!(reencoded.dna(), dna, "{} does not round trip", entry);
    }
}

#[test]
fn test_random_avatars_round_trip() {
    let defs = builtin::definitions();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let avatar = Avatar::random(defs, &mut rng).unwrap();
        let decoded = Avatar::from_hex(defs, &avatar.dna().to_string()).unwrap();
        assert_eq!(decoded.names(), avatar.names());
    }
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_zero_dna() {
    let defs = builtin::definitions();
    let avatar = Avatar::from_dna(defs, Dna::ZERO).unwrap();
    assert_eq!(avatar.traits().len(), defs.layers().len());
    assert_eq!(avatar.get("body").unwrap().names(), TraitNames::new("bare_chest", "human001"));
    assert_eq!(avatar.get("hair").unwrap().names(), TraitNames::new("bald", "transparent"));
    assert_eq!(avatar.get(150u32).unwrap().pattern.name, "bald");
}

#[test]
fn test_out_of_domain_bytes_fail() {
    let defs = builtin::definitions();
    // hair (bytes 28, 29) pattern 9 does not exist
    let hex = format!("0x{}0900{}", "00".repeat(28), "0000");
    assert_eq!(hex.len(), 66);
    let err = Avatar::from_hex(defs, &hex).unwrap_err();
    assert_eq!(
        err,
        AvatarError::UndefinedTrait { layer: "hair".to_string(), pattern: 9, palette: 0 }
    );

    // bald has only palette 0
    let hex = format!("0x{}0001{}", "00".repeat(28), "0000");
    assert!(matches!(
        Avatar::from_hex(defs, &hex),
        Err(AvatarError::UndefinedTrait { palette: 1, .. })
    ));
}

#[test]
fn test_invalid_hex_fails() {
    let defs = builtin::definitions();
    assert!(matches!(Avatar::from_hex(defs, "0xabc"), Err(AvatarError::Dna(_))));
}

// ============================================================================
// Named choices
// ============================================================================

#[test]
fn test_choices_with_defaults() {
    let defs = builtin::definitions();
    let avatar = Avatar::from_choices(
        defs,
        &choices(&[("hair", "wild:blue_green"), ("topwear", "hoodie:red"), ("eyes", "round:hazel")]),
    )
    .unwrap();

    assert_eq!(avatar.get("hair").unwrap().names(), TraitNames::new("wild", "blue_green"));
    assert_eq!(avatar.get("topwear").unwrap().names(), TraitNames::new("hoodie", "red"));
    assert_eq!(avatar.get("left_eye").unwrap().names(), TraitNames::new("round", "hazel"));
    assert_eq!(avatar.get("right_eye").unwrap().names(), TraitNames::new("round", "hazel"));
    assert_eq!(avatar.get("bottomwear").unwrap().names(), TraitNames::new("naked", "transparent"));
    assert_eq!(avatar.get("eyewear").unwrap().names(), TraitNames::new("none", "transparent"));
}

#[test]
fn test_choice_json_forms() {
    let defs = builtin::definitions();
    let parsed: HashMap<String, TraitChoice> = serde_json::from_str(
        r#"{
            "topwear": ["tshirt_gradient3", "/__blue$/"],
            "hair": { "pattern": "long", "palette": "blonde" },
            "eyewear": { "pattern": "vr_rainbow", "palette_like": "gold" },
            "left_eye": { "pattern": "narrow" }
        }"#,
    )
    .unwrap();
    let avatar = Avatar::from_choices(defs, &parsed).unwrap();
    assert_eq!(avatar.get("topwear").unwrap().palette.name, "gradient3__blue");
    assert_eq!(avatar.get("hair").unwrap().palette.name, "blonde");
    assert_eq!(avatar.get("eyewear").unwrap().palette.name, "rainbow_gold");
    assert_eq!(avatar.get("left_eye").unwrap().palette.name, "black");
}

#[test]
fn test_ambiguous_and_missing_matches() {
    let defs = builtin::definitions();
    let err = Avatar::from_choices(defs, &choices(&[("eyewear", "vr_rainbow:rainbow_*")])).unwrap_err();
    assert!(matches!(err, AvatarError::Lookup(LookupError::AmbiguousMatch { count: 2, .. })));

    let err = Avatar::from_choices(defs, &choices(&[("eyewear", "vr_rainbow:/plaid/")])).unwrap_err();
    assert!(matches!(err, AvatarError::Lookup(LookupError::NoMatch { .. })));
}

#[test]
fn test_match_all_palette() {
    let defs = builtin::definitions();
    let avatar = Avatar::from_choices(defs, &choices(&[("hair", "bald:*")])).unwrap();
    assert_eq!(avatar.get("hair").unwrap().palette.name, "transparent");

    let err = Avatar::from_choices(defs, &choices(&[("hair", "wild:*")])).unwrap_err();
    assert!(matches!(err, AvatarError::Lookup(LookupError::AmbiguousMatch { count: 6, .. })));
}

#[test]
fn test_unknown_names_fail() {
    let defs = builtin::definitions();
    assert!(matches!(
        Avatar::from_choices(defs, &choices(&[("wings", "angel")])),
        Err(AvatarError::Lookup(LookupError::UnknownLayer(_)))
    ));
    assert!(matches!(
        Avatar::from_choices(defs, &choices(&[("hair", "mohawk:black")])),
        Err(AvatarError::Lookup(LookupError::UnknownPattern { .. }))
    ));
    assert!(matches!(
        Avatar::from_choices(defs, &choices(&[("hair", "wild:purple")])),
        Err(AvatarError::Lookup(LookupError::UnknownPalette { .. }))
    ));
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn test_transform_overrides_only_named_layers() {
    let defs = builtin::definitions();
    let start = Avatar::from_choices(defs, &choices(&[("hair", "short:red"), ("footwear", "boots:black")]))
        .unwrap();
    let next = start.transform(&choices(&[("hair", "long:red"), ("eyes", "square:blue")])).unwrap();

    assert_eq!(next.get("hair").unwrap().names(), TraitNames::new("long", "red"));
    assert_eq!(next.get("footwear").unwrap().names(), TraitNames::new("boots", "black"));
    assert_eq!(next.get("right_eye").unwrap().names(), TraitNames::new("square", "blue"));
    assert_eq!(start.get("hair").unwrap().pattern.name, "short");

    let dna_diff: Vec<usize> =
        (0..32).filter(|&i| start.dna().as_bytes()[i] != next.dna().as_bytes()[i]).collect();
    // hair pattern plus both eye palettes
    assert_eq!(dna_diff, vec![7, 9, 28]);
}

// ============================================================================
// Poses
// ============================================================================

#[test]
fn test_poses() {
    let ids: Vec<u8> = AvatarPose::iter().map(AvatarPose::canvas_id).collect();
    assert_eq!(ids, (0..=11).collect::<Vec<u8>>());
    assert_eq!("WalkUp1".parse::<AvatarPose>().unwrap(), AvatarPose::WalkUp1);
    assert_eq!(AvatarPose::from_canvas_id(3).unwrap(), AvatarPose::IdleLeft0);
    assert!(AvatarPose::from_canvas_id(12).is_err());
    assert!("Jump".parse::<AvatarPose>().is_err());
}
