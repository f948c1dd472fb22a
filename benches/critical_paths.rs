//! Criterion benchmarks for Pixeldna critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Catalog: parsing and building definitions from a catalog document
//! - DNA: hex parsing and random generation
//! - Avatar: decoding a DNA, encoding named choices, transforms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pixeldna::avatar::{Avatar, TraitChoice};
use pixeldna::builtin;
use pixeldna::config::{parse, parse_config_str, CatalogConfig, ConfigFormat, LayerConfig, PaletteConfig};
use pixeldna::definitions::Definitions;
use pixeldna::dna::Dna;
use pixeldna::models::LayerDescriptor;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a catalog with `layers` layers, each with `patterns` patterns of
/// `palettes` palettes. Every pattern shares palette code 0.
fn make_catalog(layers: usize, patterns: usize, palettes: usize) -> CatalogConfig {
    let names: Vec<String> = (0..palettes).map(|i| format!("color{}", i)).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    (0..layers)
        .map(|l| {
            let name = format!("layer{}", l);
            let config = LayerConfig {
                layer: LayerDescriptor::new(name.as_str(), (l as u32 + 1) * 10),
                patterns: (0..patterns)
                    .map(|p| (format!("pattern{}", p), PaletteConfig::new(0, &names)))
                    .collect(),
                default: None,
                aliases: vec![],
            };
            (name, config)
        })
        .collect()
}

fn sample_dnas(count: usize) -> Vec<Dna> {
    let defs = builtin::definitions();
    let limits = defs.limits();
    let mut rng = StdRng::seed_from_u64(0);
    (0..count).map(|_| Dna::random(defs.layers(), &limits, &mut rng).unwrap()).collect()
}

// =============================================================================
// Catalog Benchmarks
// =============================================================================

fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");

    group.throughput(Throughput::Bytes(builtin::GEN0_JSON.len() as u64));
    group.bench_function("parse_gen0_json", |b| {
        b.iter(|| parse_config_str(black_box(builtin::GEN0_JSON), ConfigFormat::Json))
    });

    let gen0 = builtin::config();
    group.bench_function("build_gen0", |b| b.iter(|| Definitions::from_config(black_box(&gen0))));

    for patterns in [4, 32, 128].iter() {
        let config = make_catalog(15, *patterns, 8);
        group.throughput(Throughput::Elements((15 * patterns * 8) as u64));
        group.bench_with_input(BenchmarkId::new("parse", patterns), &config, |b, config| {
            b.iter(|| parse(black_box(config)))
        });
        group.bench_with_input(BenchmarkId::new("build", patterns), &config, |b, config| {
            b.iter(|| Definitions::from_config(black_box(config)))
        });
    }

    group.finish();
}

// =============================================================================
// DNA Benchmarks
// =============================================================================

fn bench_dna(c: &mut Criterion) {
    let mut group = c.benchmark_group("dna");
    let defs = builtin::definitions();
    let hex = sample_dnas(1)[0].to_string();

    group.bench_function("from_hex", |b| b.iter(|| Dna::from_hex(black_box(&hex))));
    group.bench_function("values", |b| {
        let dna = sample_dnas(1)[0];
        b.iter(|| black_box(dna).values(defs.layers()))
    });

    let limits = defs.limits();
    group.bench_function("random", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| Dna::random(defs.layers(), &limits, &mut rng))
    });

    group.finish();
}

// =============================================================================
// Avatar Benchmarks
// =============================================================================

fn bench_avatar(c: &mut Criterion) {
    let mut group = c.benchmark_group("avatar");
    let defs = builtin::definitions();

    let dnas = sample_dnas(64);
    group.throughput(Throughput::Elements(dnas.len() as u64));
    group.bench_function("decode_64", |b| {
        b.iter(|| {
            for dna in &dnas {
                let _ = Avatar::from_dna(defs, black_box(*dna));
            }
        })
    });

    let choices: HashMap<String, TraitChoice> = [
        ("hair", "wild:blue_green"),
        ("topwear", "tshirt_gradient3:/__blue$/"),
        ("eyes", "round:hazel"),
        ("footwear", "boots"),
    ]
    .iter()
    .map(|(layer, choice)| (layer.to_string(), choice.parse().unwrap()))
    .collect();
    group.throughput(Throughput::Elements(1));
    group.bench_function("encode_choices", |b| {
        b.iter(|| Avatar::from_choices(defs, black_box(&choices)))
    });

    let avatar = Avatar::from_choices(defs, &choices).unwrap();
    let overrides: HashMap<String, TraitChoice> =
        HashMap::from([("hair".to_string(), TraitChoice::named("long", "red"))]);
    group.bench_function("transform", |b| b.iter(|| avatar.transform(black_box(&overrides))));

    group.bench_function("random", |b| {
        let mut rng = StdRng::seed_from_u64(2);
        b.iter(|| Avatar::random(defs, &mut rng))
    });

    group.finish();
}

criterion_group!(benches, bench_catalog, bench_dna, bench_avatar);
criterion_main!(benches);
