//! Binary entrypoint for the `cwsg` pack-author CLI.
//!
//! Commands:
//! - `check <packs>` - load every pack under a directory and print the merged tiers
//! - `resolve <packs> <npc> --objects <file>` - roll a festival gift for one NPC
//! - `template <dir>` - write the example gift table into a pack directory
//!
//! See the library crate docs for module-level details: `winter_star_gifts::`.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use winter_star_gifts::config::GiftConfig;
use winter_star_gifts::gift::{Npc, NpcAge};
use winter_star_gifts::host::GiftMod;
use winter_star_gifts::item::ItemResolver;
use winter_star_gifts::pack::{ContentPack, DirectoryPack, PackLoader};

#[derive(Parser)]
#[command(name = "cwsg")]
#[command(about = "Inspect and test Winter Star gift content packs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "cwsg.json", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every pack and print the merged priority tiers
    Check {
        /// Directory whose sub-directories are content packs
        packs: PathBuf,
    },
    /// Resolve a gift for one NPC
    Resolve {
        /// Directory whose sub-directories are content packs
        packs: PathBuf,
        /// NPC name
        npc: String,
        /// Object catalog as JSON (`{"24": "Parsnip/35/10/Basic -75/..."}`)
        #[arg(short, long)]
        objects: PathBuf,
        /// Seed for the gift roll
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        /// NPC age code (0 adult, 1 teen, 2 child)
        #[arg(long, default_value_t = 0)]
        age: i32,
    },
    /// Write the example gift table into a pack directory
    Template {
        /// Pack directory
        dir: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    // RUST_LOG still wins when set
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.init();
}

fn open_packs(root: &Path) -> Result<Vec<Box<dyn ContentPack>>> {
    let packs = DirectoryPack::discover(root)
        .with_context(|| format!("reading packs from {}", root.display()))?;
    Ok(packs
        .into_iter()
        .map(|pack| Box::new(pack) as Box<dyn ContentPack>)
        .collect())
}

fn check(config: &GiftConfig, root: &Path) -> Result<()> {
    let packs = open_packs(root)?;
    let (store, report) = PackLoader::new(config).load(&packs);

    println!(
        "{} packs read, {} skipped, {} rules accepted, {} skipped, {} templates written",
        report.packs_read,
        report.packs_skipped,
        report.rules_accepted,
        report.rules_skipped,
        report.templates_written
    );

    for (npc, tiers) in store.npcs() {
        let lowest = store
            .lowest_useful_priority(npc)
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{} (lowest useful priority: {})", npc, lowest);
        for (priority, tier) in tiers {
            for (mode, items) in tier.modes() {
                println!("  {:>6}  {:<14} {} item(s)", priority, mode, items.len());
            }
        }
    }
    Ok(())
}

fn resolve(
    config: GiftConfig,
    root: &Path,
    npc: String,
    objects: &Path,
    seed: u64,
    age: i32,
) -> Result<()> {
    let text = std::fs::read_to_string(objects)
        .with_context(|| format!("reading {}", objects.display()))?;
    let catalog: BTreeMap<i32, String> =
        serde_json::from_str(&text).context("parsing object catalog")?;

    let packs = open_packs(root)?;
    let mut gifts = GiftMod::new(config, packs, ItemResolver::new(catalog));
    let npc = Npc::new(npc).with_age(NpcAge::from_code(age));

    match gifts.gift_from_npc(&npc, seed) {
        Some(item) => println!("{} gives {}", npc.name, item),
        None => println!("{} defers to built-in gifts", npc.name),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = GiftConfig::load(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config))?;

    match cli.command {
        Commands::Check { packs } => check(&config, &packs),
        Commands::Resolve {
            packs,
            npc,
            objects,
            seed,
            age,
        } => resolve(config, &packs, npc, &objects, seed, age),
        Commands::Template { dir } => {
            let pack = DirectoryPack::open(&dir)?;
            PackLoader::new(&config).write_template(&pack)?;
            println!("Wrote {}", dir.join(&config.content_file).display());
            Ok(())
        }
    }
}
