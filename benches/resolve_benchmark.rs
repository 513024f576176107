//! Benchmark for gift resolution over a many-pack store
//!
//! Target: a gift roll should stay well under a frame (<1ms)

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use winter_star_gifts::config::GiftConfig;
use winter_star_gifts::gift::{BuiltinGiftTable, GiftResolver, Npc};
use winter_star_gifts::item::ItemResolver;
use winter_star_gifts::pack::{ContentPack, MemoryPack, PackLoader};

const NPCS: [&str; 6] = ["All", "Robin", "Marnie", "Clint", "Willy", "Evelyn"];
const MODES: [&str; 3] = ["Overwrite", "AddToVanilla", "AddToExisting"];

/// Create a realistic object catalog
fn create_objects() -> BTreeMap<i32, String> {
    (0..800)
        .map(|id| (id, format!("Object {0}/10/5/Basic -75/Object {0}/Filler.", id)))
        .collect()
}

/// Create 40 packs with a dozen rules each
fn create_packs() -> Vec<Box<dyn ContentPack>> {
    (0..40)
        .map(|pack| {
            let rules: Vec<String> = (0..12)
                .map(|rule| {
                    let n = pack * 12 + rule;
                    format!(
                        r#"{{"NameOfNPC":"{}","ItemNames":[{{"Name":"Object {}"}},{{"Name":"Object {}","Quantity":3}}],"Mode":"{}","Priority":{}}}"#,
                        NPCS[n % NPCS.len()],
                        n % 800,
                        (n * 7) % 800,
                        MODES[n % MODES.len()],
                        (n % 5) * 25
                    )
                })
                .collect();
            let json = format!(r#"{{"NPCGifts":[{}]}}"#, rules.join(","));
            Box::new(MemoryPack::new(format!("Pack {}", pack)).with_file("content.json", json))
                as Box<dyn ContentPack>
        })
        .collect()
}

fn benchmark_load(c: &mut Criterion) {
    let config = GiftConfig::default();
    let packs = create_packs();

    c.bench_function("load_40_packs", |b| {
        b.iter(|| PackLoader::new(&config).load(black_box(&packs)))
    });
}

fn benchmark_resolve(c: &mut Criterion) {
    let config = GiftConfig::default();
    let (store, _) = PackLoader::new(&config).load(&create_packs());
    let items = ItemResolver::new(create_objects());
    let resolver = GiftResolver::new(&store, &items, &BuiltinGiftTable);
    let robin = Npc::new("Robin");
    let lewis = Npc::new("Lewis");

    c.bench_function("resolve_specific_npc", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| resolver.resolve(black_box(&robin), &mut rng))
    });

    c.bench_function("resolve_wildcard_only", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| resolver.resolve(black_box(&lewis), &mut rng))
    });
}

criterion_group!(benches, benchmark_load, benchmark_resolve);
criterion_main!(benches);
