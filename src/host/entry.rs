//! Host entry point - wires game events to loading and resolution

use crate::config::GiftConfig;
use crate::error::{GiftError, Result};
use crate::gift::{BuiltinGiftTable, GiftResolver, Npc, VanillaGiftTable};
use crate::host::calendar::{FestivalCalendar, WorldDate};
use crate::item::{Item, ItemResolver};
use crate::pack::{ContentPack, GiftStore, LoadReport, PackLoader};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::panic::{self, AssertUnwindSafe};

/// Console command that clears and reloads all packs
pub const FORCE_RELOAD_COMMAND: &str = "cwsg.force_reload";

/// A console command the host should register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleCommand {
    pub name: &'static str,
    pub help: &'static str,
}

const COMMANDS: [ConsoleCommand; 1] = [ConsoleCommand {
    name: FORCE_RELOAD_COMMAND,
    help: "Forces CWSG to reload the packs",
}];

/// The mod as seen by the host: owns the packs, catalogs and the day's rules
pub struct GiftMod {
    config: GiftConfig,
    packs: Vec<Box<dyn ContentPack>>,
    items: ItemResolver,
    vanilla: Box<dyn VanillaGiftTable>,
    // Loading is deferred until it is actually needed; `None` means not loaded today
    store: Option<GiftStore>,
    last_report: Option<LoadReport>,
}

impl GiftMod {
    pub fn new(config: GiftConfig, packs: Vec<Box<dyn ContentPack>>, items: ItemResolver) -> Self {
        Self {
            config,
            packs,
            items,
            vanilla: Box::new(BuiltinGiftTable),
            store: None,
            last_report: None,
        }
    }

    pub fn with_vanilla_table(mut self, table: impl VanillaGiftTable + 'static) -> Self {
        self.vanilla = Box::new(table);
        self
    }

    pub fn config(&self) -> &GiftConfig {
        &self.config
    }

    pub fn items(&self) -> &ItemResolver {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ItemResolver {
        &mut self.items
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&GiftStore> {
        self.store.as_ref()
    }

    pub fn last_report(&self) -> Option<&LoadReport> {
        self.last_report.as_ref()
    }

    /// Load all packs unless already loaded today
    pub fn load_packs(&mut self) -> &GiftStore {
        if self.store.is_none() {
            let (store, report) = PackLoader::new(&self.config).load(&self.packs);
            self.last_report = Some(report);
            self.store = Some(store);
        }
        self.store.get_or_insert_with(GiftStore::new)
    }

    /// Drop today's rules and load again immediately
    pub fn force_reload(&mut self) -> &GiftStore {
        info!("Forcibly reloading packs");
        self.reset();
        self.load_packs()
    }

    fn reset(&mut self) {
        self.store = None;
    }

    /// Day start: load only on the configured festival. Returns whether
    /// rules are loaded afterwards.
    pub fn on_day_started(&mut self, date: &WorldDate, calendar: &dyn FestivalCalendar) -> bool {
        if self.is_loaded() {
            return true;
        }

        match calendar.festival_on(date) {
            Some(name) if name == self.config.festival_name => {
                self.load_packs();
                true
            }
            _ => {
                debug!(
                    "{} is not {}, deferring pack load",
                    date.festival_key(),
                    self.config.festival_name
                );
                false
            }
        }
    }

    /// Day end: rules and the object index are rebuilt from scratch next time
    pub fn on_day_ending(&mut self) {
        self.items.invalidate_index();
        self.reset();
    }

    pub fn on_assets_invalidated<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) {
        if names
            .into_iter()
            .any(|name| self.config.is_object_asset(name))
        {
            self.items.invalidate_index();
        }
    }

    /// Commands to register with the host console
    pub fn commands() -> &'static [ConsoleCommand] {
        &COMMANDS
    }

    pub fn run_command(&mut self, name: &str, _args: &[&str]) -> Result<()> {
        match name {
            FORCE_RELOAD_COMMAND => {
                self.force_reload();
                Ok(())
            }
            other => Err(GiftError::UnknownCommand(other.to_string())),
        }
    }

    /// Gift hook. `None` means the host should run its own gift logic.
    pub fn gift_from_npc(&mut self, npc: &Npc, seed: u64) -> Option<Item> {
        // Players can change the clock, so make sure packs are loaded
        self.load_packs();
        let store = self.store.as_ref()?;

        let resolver = GiftResolver::new(store, &self.items, self.vanilla.as_ref());
        let mut rng = StdRng::seed_from_u64(seed);
        match panic::catch_unwind(AssertUnwindSafe(|| resolver.resolve(npc, &mut rng))) {
            Ok(item) => item,
            Err(_) => {
                error!("Gift resolution for {} panicked; using built-in gifts", npc.name);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceCatalog;
    use crate::host::calendar::{FestivalDates, Season};
    use crate::item::DynamicItemCatalog;
    use crate::pack::{DirectoryPack, MemoryPack};
    use rand::RngCore;
    use std::collections::BTreeMap;

    struct PanickingTable;

    impl VanillaGiftTable for PanickingTable {
        fn gifts_for(&self, _npc: &Npc, _rng: &mut dyn RngCore) -> Vec<Item> {
            panic!("vanilla table unavailable")
        }
    }

    struct OfflineCatalog;

    impl DynamicItemCatalog for OfflineCatalog {
        fn spawn(&self, _name: &str) -> Result<Option<Item>> {
            Err(GiftError::Catalog("catalog offline".to_string()))
        }
    }

    fn objects() -> BTreeMap<i32, String> {
        let mut objects = BTreeMap::new();
        objects.insert(395, "Coffee/150/1/Crafting/Coffee/It smells delicious.".to_string());
        objects
    }

    fn robin_pack(mode: &str) -> Box<dyn ContentPack> {
        let json = format!(
            r#"{{"NPCGifts":[{{"NameOfNPC":"Robin","ItemNames":[{{"Name":"Coffee","Quantity":3}}],"Mode":"{}"}}]}}"#,
            mode
        );
        Box::new(MemoryPack::new("Coffee Lovers").with_file("content.json", json))
    }

    fn gift_mod(packs: Vec<Box<dyn ContentPack>>) -> GiftMod {
        GiftMod::new(GiftConfig::default(), packs, ItemResolver::new(objects()))
    }

    #[test]
    fn test_loads_only_on_festival() {
        let mut gifts = gift_mod(vec![robin_pack("Overwrite")]);
        let calendar = FestivalDates::standard();

        assert!(!gifts.on_day_started(&WorldDate::new(Season::Winter, 24, 1), &calendar));
        assert!(!gifts.is_loaded());

        assert!(gifts.on_day_started(&WorldDate::new(Season::Winter, 25, 1), &calendar));
        assert!(gifts.store().unwrap().tiers("Robin").is_some());

        gifts.on_day_ending();
        assert!(!gifts.is_loaded());
    }

    #[test]
    fn test_gift_forces_inline_load() {
        let mut gifts = gift_mod(vec![robin_pack("Overwrite")]);
        let item = gifts.gift_from_npc(&Npc::new("Robin"), 99);
        assert_eq!(item, Some(Item::object(395, 3)));
        assert!(gifts.is_loaded());
        assert_eq!(gifts.last_report().unwrap().packs_read, 1);
    }

    #[test]
    fn test_unknown_npc_defers() {
        let mut gifts = gift_mod(vec![robin_pack("Overwrite")]);
        assert_eq!(gifts.gift_from_npc(&Npc::new("Krobus"), 1), None);
    }

    #[test]
    fn test_force_reload_command_picks_up_edits() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content.json");
        std::fs::write(
            &content,
            r#"{"NPCGifts":[{"NameOfNPC":"Robin","ItemNames":[{"Name":"Coffee"}]}]}"#,
        )
        .unwrap();
        let pack = DirectoryPack::open(dir.path()).unwrap();
        let mut gifts = gift_mod(vec![Box::new(pack) as Box<dyn ContentPack>]);
        gifts.load_packs();
        assert!(gifts.store().unwrap().tiers("Linus").is_none());

        std::fs::write(
            &content,
            r#"{"NPCGifts":[{"NameOfNPC":"Linus","ItemNames":[{"Name":"Coffee"}]}]}"#,
        )
        .unwrap();
        // Plain loads are idempotent within a day
        gifts.load_packs();
        assert!(gifts.store().unwrap().tiers("Linus").is_none());

        gifts.run_command(FORCE_RELOAD_COMMAND, &[]).unwrap();
        assert!(gifts.store().unwrap().tiers("Linus").is_some());
        assert!(gifts.store().unwrap().tiers("Robin").is_none());
    }

    #[test]
    fn test_unknown_command() {
        let mut gifts = gift_mod(Vec::new());
        let err = gifts.run_command("cwsg.nope", &[]).unwrap_err();
        assert!(matches!(err, GiftError::UnknownCommand(_)));
        assert_eq!(GiftMod::commands()[0].name, FORCE_RELOAD_COMMAND);
    }

    #[test]
    fn test_object_asset_invalidation() {
        let mut gifts = gift_mod(vec![robin_pack("Overwrite")]);
        gifts.gift_from_npc(&Npc::new("Robin"), 1);
        assert!(gifts.items().index().is_built());

        gifts.on_assets_invalidated(["Data/Festivals/FestivalDates"]);
        assert!(gifts.items().index().is_built());

        gifts.on_assets_invalidated(["Data\\ObjectInformation"]);
        assert!(!gifts.items().index().is_built());
    }

    #[test]
    fn test_panicking_collaborator_defers() {
        let mut gifts =
            gift_mod(vec![robin_pack("AddToVanilla")]).with_vanilla_table(PanickingTable);
        assert_eq!(gifts.gift_from_npc(&Npc::new("Robin"), 5), None);
    }

    #[test]
    fn test_catalog_failure_defers() {
        let pack = MemoryPack::new("Dynamic").with_file(
            "content.json",
            r#"{"NPCGifts":[{"NameOfNPC":"All","ItemNames":[{"Name":"Lantern","Type":"DGA"}]}]}"#,
        );
        let items = ItemResolver::new(objects()).with_catalog_b(OfflineCatalog);
        let packs = vec![Box::new(pack) as Box<dyn ContentPack>];
        let mut gifts = GiftMod::new(GiftConfig::default(), packs, items);

        assert_eq!(gifts.gift_from_npc(&Npc::new("Emily"), 5), None);
        assert_eq!(
            gifts.store().unwrap().tiers("All").unwrap()[&100]
                .get(crate::config::GiftMode::Overwrite)
                .unwrap()[0]
                .catalog,
            SourceCatalog::CatalogB
        );
    }
}
