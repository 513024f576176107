//! Pack loading - reads every pack's gift table into a fresh store

use crate::config::{CustomGiftData, GiftConfig};
use crate::error::{GiftError, Result};
use crate::pack::source::ContentPack;
use crate::pack::store::{GiftRule, GiftStore};
use log::{error, info, warn};

/// Outcome of loading a set of packs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub packs_read: usize,
    pub packs_skipped: usize,
    pub rules_accepted: usize,
    pub rules_skipped: usize,
    pub templates_written: usize,
}

/// Reads content packs and merges their rules
pub struct PackLoader<'a> {
    config: &'a GiftConfig,
}

impl<'a> PackLoader<'a> {
    pub fn new(config: &'a GiftConfig) -> Self {
        Self { config }
    }

    /// Load every pack, in order, into a new store.
    ///
    /// Packs with missing or malformed data are logged and skipped.
    pub fn load(&self, packs: &[Box<dyn ContentPack>]) -> (GiftStore, LoadReport) {
        let mut store = GiftStore::new();
        let mut report = LoadReport::default();

        for pack in packs {
            let pack: &dyn ContentPack = &**pack;
            info!(
                "Reading content pack: {} from {}",
                pack.manifest(),
                pack.directory().display()
            );

            let data = match self.read_gift_data(pack, &mut report) {
                Ok(data) => data,
                Err(e) => {
                    error!("{}", e);
                    report.packs_skipped += 1;
                    continue;
                }
            };

            report.packs_read += 1;
            self.apply(&mut store, &data, &mut report);
        }

        info!(
            "Loaded {} rules for {} NPCs from {} packs ({} skipped)",
            report.rules_accepted,
            store.npc_count(),
            report.packs_read,
            report.packs_skipped
        );
        (store, report)
    }

    /// Read and parse a pack's gift table, writing a template if it has none
    pub fn read_gift_data(
        &self,
        pack: &dyn ContentPack,
        report: &mut LoadReport,
    ) -> Result<CustomGiftData> {
        let text = match pack.read_file(&self.config.content_file) {
            Ok(Some(text)) => text,
            Ok(None) => {
                if self.config.write_templates {
                    self.write_template(pack)?;
                    report.templates_written += 1;
                }
                return Err(GiftError::MissingPackData {
                    pack: pack.manifest().to_string(),
                });
            }
            Err(e) => {
                return Err(GiftError::MalformedPackData {
                    pack: pack.manifest().to_string(),
                    reason: e.to_string(),
                })
            }
        };

        serde_json::from_str(&text).map_err(|e| GiftError::MalformedPackData {
            pack: pack.manifest().to_string(),
            reason: e.to_string(),
        })
    }

    /// Write the example gift table for pack authors
    pub fn write_template(&self, pack: &dyn ContentPack) -> Result<()> {
        warn!(
            "{} is missing a \"{}\" file. Writing example file.",
            pack.manifest(),
            self.config.content_file
        );
        let text = serde_json::to_string_pretty(&CustomGiftData::example())?;
        pack.write_file(&self.config.content_file, &text)
    }

    /// Merge one parsed gift table into the store
    pub fn apply(&self, store: &mut GiftStore, data: &CustomGiftData, report: &mut LoadReport) {
        for entry in data.npc_gifts.iter().flatten() {
            let Some(rule) = GiftRule::from_entry(entry) else {
                warn!("Skipping entry with no NPC name");
                report.rules_skipped += 1;
                continue;
            };

            if store.insert(rule) {
                report.rules_accepted += 1;
            } else {
                report.rules_skipped += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GiftMode;
    use crate::pack::source::MemoryPack;

    fn packs(files: &[(&str, Option<&str>)]) -> Vec<Box<dyn ContentPack>> {
        files
            .iter()
            .map(|(name, content)| {
                let pack = MemoryPack::new(*name);
                let pack = match content {
                    Some(text) => pack.with_file("content.json", *text),
                    None => pack,
                };
                Box::new(pack) as Box<dyn ContentPack>
            })
            .collect()
    }

    #[test]
    fn test_load_merges_packs_in_order() {
        let config = GiftConfig::default();
        let packs = packs(&[
            (
                "First",
                Some(r#"{"NPCGifts":[{"NameOfNPC":"Robin","ItemNames":[{"Name":"Wood"}],"Mode":"AddToExisting","Priority":50}]}"#),
            ),
            (
                "Second",
                Some(r#"{"NPCGifts":[{"NameOfNPC":"Robin","ItemNames":[{"Name":"Stone"}],"Mode":"AddToExisting","Priority":50}]}"#),
            ),
        ]);

        let (store, report) = PackLoader::new(&config).load(&packs);
        assert_eq!(report.packs_read, 2);
        assert_eq!(report.rules_accepted, 2);
        let tier = &store.tiers("Robin").unwrap()[&50];
        assert_eq!(tier.get(GiftMode::AddToExisting).unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_pack_skipped() {
        let config = GiftConfig::default();
        let packs = packs(&[
            ("Broken", Some("{ not json")),
            (
                "Good",
                Some(r#"{"NPCGifts":[{"NameOfNPC":"Gus","ItemNames":[{"Name":"Pizza"}]}]}"#),
            ),
        ]);

        let (store, report) = PackLoader::new(&config).load(&packs);
        assert_eq!(report.packs_skipped, 1);
        assert_eq!(report.templates_written, 0);
        assert!(store.tiers("Gus").is_some());
    }

    #[test]
    fn test_entry_without_npc_skipped() {
        let config = GiftConfig::default();
        let packs = packs(&[(
            "Nameless",
            Some(r#"{"NPCGifts":[{"ItemNames":[{"Name":"Pizza"}]}, null]}"#),
        )]);

        let (store, report) = PackLoader::new(&config).load(&packs);
        assert!(store.is_empty());
        assert_eq!(report.rules_skipped, 1);
    }

    #[test]
    fn test_template_round_trip() {
        let config = GiftConfig::default();
        let pack = MemoryPack::new("Empty");
        let loader = PackLoader::new(&config);
        let mut report = LoadReport::default();

        let err = loader.read_gift_data(&pack, &mut report).unwrap_err();
        assert!(matches!(err, GiftError::MissingPackData { .. }));
        assert_eq!(report.templates_written, 1);

        let data = loader.read_gift_data(&pack, &mut report).unwrap();
        let rules: Vec<_> = data
            .npc_gifts
            .iter()
            .flatten()
            .filter_map(GiftRule::from_entry)
            .collect();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].npc_name, "Robin");
        assert_eq!(rules[0].items[0].name, "Parsnip");
        assert_eq!(rules[0].mode, GiftMode::Overwrite);
        assert_eq!(rules[0].priority, 100);
    }

    #[test]
    fn test_templates_disabled() {
        let config = GiftConfig {
            write_templates: false,
            ..Default::default()
        };
        let pack = MemoryPack::new("Empty");
        let mut report = LoadReport::default();
        assert!(PackLoader::new(&config)
            .read_gift_data(&pack, &mut report)
            .is_err());
        assert!(pack.file("content.json").is_none());
    }
}
