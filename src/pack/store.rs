//! Layered gift storage - rules grouped by NPC, priority and mode

use crate::config::{GiftMode, NpcGifts};
use crate::item::ItemDescriptor;
use ahash::AHashMap;
use log::debug;
use std::collections::BTreeMap;

/// NPC name that applies a rule to every NPC
pub const WILDCARD_NPC: &str = "All";

/// A validated gift rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftRule {
    pub npc_name: String,
    pub items: Vec<ItemDescriptor>,
    pub mode: GiftMode,
    pub priority: i32,
}

impl GiftRule {
    /// Validate a pack entry. Entries without an NPC name yield `None`;
    /// item entries without a name are dropped.
    pub fn from_entry(entry: &NpcGifts) -> Option<Self> {
        let npc_name = entry.name_of_npc.as_deref()?;
        let items = entry
            .item_names
            .iter()
            .flatten()
            .filter_map(ItemDescriptor::from_entry)
            .collect();
        Some(Self {
            npc_name: npc_name.to_string(),
            items,
            mode: entry.mode,
            priority: entry.priority,
        })
    }
}

/// Descriptors for one (NPC, priority) pair, one list per mode.
///
/// A present-but-empty list is distinct from an absent one: an empty
/// AddToVanilla list still seeds the built-in gifts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierRules {
    overwrite: Option<Vec<ItemDescriptor>>,
    add_to_vanilla: Option<Vec<ItemDescriptor>>,
    add_to_existing: Option<Vec<ItemDescriptor>>,
}

impl TierRules {
    #[inline]
    pub fn get(&self, mode: GiftMode) -> Option<&[ItemDescriptor]> {
        match mode {
            GiftMode::Overwrite => self.overwrite.as_deref(),
            GiftMode::AddToVanilla => self.add_to_vanilla.as_deref(),
            GiftMode::AddToExisting => self.add_to_existing.as_deref(),
        }
    }

    /// Append descriptors to the list for `mode`, creating it if absent
    pub fn extend(&mut self, mode: GiftMode, items: impl IntoIterator<Item = ItemDescriptor>) {
        let slot = match mode {
            GiftMode::Overwrite => &mut self.overwrite,
            GiftMode::AddToVanilla => &mut self.add_to_vanilla,
            GiftMode::AddToExisting => &mut self.add_to_existing,
        };
        slot.get_or_insert_with(Vec::new).extend(items);
    }

    /// Present modes, in declaration order
    pub fn modes(&self) -> impl Iterator<Item = (GiftMode, &[ItemDescriptor])> {
        [
            GiftMode::Overwrite,
            GiftMode::AddToVanilla,
            GiftMode::AddToExisting,
        ]
        .into_iter()
        .filter_map(move |mode| self.get(mode).map(|items| (mode, items)))
    }
}

/// Priority tiers of one NPC, ascending by priority number
pub type PriorityTiers = BTreeMap<i32, TierRules>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct NpcRules {
    /// Spelling of the first rule seen for this NPC
    name: String,
    tiers: PriorityTiers,
}

/// Gift rules loaded for the current day.
///
/// NPC names are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftStore {
    npcs: AHashMap<String, NpcRules>,
    lowest_useful: AHashMap<String, i32>,
}

#[inline]
fn npc_key(name: &str) -> String {
    name.to_lowercase()
}

impl GiftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a rule into the store.
    ///
    /// Returns `false` when the rule is shadowed by an already known
    /// Overwrite/AddToVanilla rule with a lower priority number.
    pub fn insert(&mut self, rule: GiftRule) -> bool {
        let key = npc_key(&rule.npc_name);

        if let Some(&lowest) = self.lowest_useful.get(&key) {
            if rule.priority > lowest {
                debug!(
                    "Skipping rule for {} with priority {} as it has a higher priority than will be relevant ({}).",
                    rule.npc_name, rule.priority, lowest
                );
                return false;
            }
        }

        if rule.mode.is_blocking() {
            self.lowest_useful.insert(key.clone(), rule.priority);
        }

        let GiftRule {
            npc_name,
            items,
            mode,
            priority,
        } = rule;
        self.npcs
            .entry(key)
            .or_insert_with(|| NpcRules {
                name: npc_name,
                tiers: PriorityTiers::new(),
            })
            .tiers
            .entry(priority)
            .or_default()
            .extend(mode, items);
        true
    }

    #[inline]
    pub fn tiers(&self, npc: &str) -> Option<&PriorityTiers> {
        self.npcs.get(&npc_key(npc)).map(|rules| &rules.tiers)
    }

    /// Lowest priority number of any Overwrite/AddToVanilla rule for `npc`
    #[inline]
    pub fn lowest_useful_priority(&self, npc: &str) -> Option<i32> {
        self.lowest_useful.get(&npc_key(npc)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }

    pub fn npc_count(&self) -> usize {
        self.npcs.len()
    }

    /// All NPCs with rules, sorted by name
    pub fn npcs(&self) -> Vec<(&str, &PriorityTiers)> {
        let mut npcs: Vec<_> = self
            .npcs
            .values()
            .map(|rules| (rules.name.as_str(), &rules.tiers))
            .collect();
        npcs.sort_by_key(|(name, _)| name.to_lowercase());
        npcs
    }

    pub fn clear(&mut self) {
        self.npcs.clear();
        self.lowest_useful.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceCatalog;

    fn rule(npc: &str, mode: GiftMode, priority: i32, names: &[&str]) -> GiftRule {
        GiftRule {
            npc_name: npc.to_string(),
            items: names
                .iter()
                .map(|name| ItemDescriptor::new(*name, 1, SourceCatalog::Base))
                .collect(),
            mode,
            priority,
        }
    }

    #[test]
    fn test_same_tier_accumulates() {
        let mut store = GiftStore::new();
        assert!(store.insert(rule("Robin", GiftMode::AddToExisting, 50, &["Wood"])));
        assert!(store.insert(rule("Robin", GiftMode::AddToExisting, 50, &["Stone"])));

        let tier = &store.tiers("Robin").unwrap()[&50];
        let names: Vec<_> = tier
            .get(GiftMode::AddToExisting)
            .unwrap()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, ["Wood", "Stone"]);
    }

    #[test]
    fn test_shadowed_rule_skipped() {
        let mut store = GiftStore::new();
        assert!(store.insert(rule("Pam", GiftMode::Overwrite, 10, &["Beer"])));
        assert!(!store.insert(rule("Pam", GiftMode::AddToExisting, 20, &["Pizza"])));
        assert!(store.tiers("Pam").unwrap().get(&20).is_none());
    }

    #[test]
    fn test_add_to_existing_does_not_track_priority() {
        let mut store = GiftStore::new();
        store.insert(rule("Gus", GiftMode::AddToExisting, 5, &["Salad"]));
        assert_eq!(store.lowest_useful_priority("Gus"), None);

        store.insert(rule("Gus", GiftMode::AddToVanilla, 40, &["Pizza"]));
        assert_eq!(store.lowest_useful_priority("Gus"), Some(40));
    }

    #[test]
    fn test_later_lower_priority_overwrites_tracking() {
        let mut store = GiftStore::new();
        store.insert(rule("Leah", GiftMode::Overwrite, 80, &["Salad"]));
        store.insert(rule("Leah", GiftMode::Overwrite, 30, &["Wine"]));

        assert_eq!(store.lowest_useful_priority("Leah"), Some(30));
        // The earlier tier stays stored
        assert!(store.tiers("Leah").unwrap().contains_key(&80));
    }

    #[test]
    fn test_case_insensitive_names() {
        let mut store = GiftStore::new();
        store.insert(rule("robin", GiftMode::Overwrite, 100, &["Wood"]));
        assert!(store.tiers("Robin").is_some());
        assert_eq!(store.lowest_useful_priority("ROBIN"), Some(100));
        assert_eq!(store.npcs()[0].0, "robin");
    }

    #[test]
    fn test_empty_list_is_present() {
        let mut store = GiftStore::new();
        store.insert(rule("Evelyn", GiftMode::AddToVanilla, 100, &[]));
        let tier = &store.tiers("Evelyn").unwrap()[&100];
        assert_eq!(tier.get(GiftMode::AddToVanilla), Some(&[][..]));
        assert_eq!(tier.get(GiftMode::Overwrite), None);
    }
}
