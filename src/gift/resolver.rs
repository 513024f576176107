//! Gift resolution - merges priority tiers into a candidate pool

use crate::config::GiftMode;
use crate::error::{GiftError, Result};
use crate::gift::npc::Npc;
use crate::gift::vanilla::VanillaGiftTable;
use crate::item::{Item, ItemDescriptor, ItemResolver};
use crate::pack::{GiftStore, TierRules, WILDCARD_NPC};
use log::{debug, error, info, trace};
use rand::seq::SliceRandom;
use rand::RngCore;
use smallvec::SmallVec;

/// Candidate gifts for one request
pub type CandidatePool = SmallVec<[Item; 16]>;

/// Picks a festival gift for an NPC from the loaded rules
pub struct GiftResolver<'a> {
    store: &'a GiftStore,
    items: &'a ItemResolver,
    vanilla: &'a dyn VanillaGiftTable,
}

impl<'a> GiftResolver<'a> {
    pub fn new(
        store: &'a GiftStore,
        items: &'a ItemResolver,
        vanilla: &'a dyn VanillaGiftTable,
    ) -> Self {
        Self {
            store,
            items,
            vanilla,
        }
    }

    /// Choose a gift. `None` defers to the game's built-in behavior.
    pub fn resolve(&self, npc: &Npc, rng: &mut dyn RngCore) -> Option<Item> {
        match self.candidates(npc, rng) {
            Ok(pool) => {
                debug!("Got {} objects for {}", pool.len(), npc.name);
                pool.choose(rng).cloned()
            }
            Err(e) => {
                error!("Failed resolving gift for {}: {}", npc.name, e);
                None
            }
        }
    }

    /// Build the candidate pool for `npc`.
    ///
    /// Tiers are walked from the numerically largest priority down. Only the
    /// tier at the lowest useful priority decides the base set (Overwrite, or
    /// AddToVanilla seeded with built-in gifts); AddToExisting lists from
    /// every unpruned tier are appended.
    pub fn candidates(&self, npc: &Npc, rng: &mut dyn RngCore) -> Result<CandidatePool> {
        let mut pool = CandidatePool::new();

        let all = self.store.tiers(WILDCARD_NPC);
        // An NPC literally named like the wildcard only has the wildcard layer
        let specific = if npc.name.eq_ignore_ascii_case(WILDCARD_NPC) {
            None
        } else {
            self.store.tiers(&npc.name)
        };

        let mut keys: Vec<i32> = all
            .into_iter()
            .chain(specific)
            .flat_map(|tiers| tiers.keys().copied())
            .collect();
        keys.sort_unstable_by(|a, b| b.cmp(a));
        keys.dedup();

        if keys.is_empty() {
            debug!("No gift data for {}", npc.name);
            return Ok(pool);
        }
        trace!("Priority keys for {}: {:?}", npc.name, keys);

        let all_priority = self
            .store
            .lowest_useful_priority(WILDCARD_NPC)
            .unwrap_or(i32::MAX);
        let specific_priority = self
            .store
            .lowest_useful_priority(&npc.name)
            .unwrap_or(i32::MAX);
        let min_priority = all_priority.min(specific_priority);

        let mut deferred: Vec<&ItemDescriptor> = Vec::new();

        for key in keys {
            // Tiers behind a layer's own blocking rule are irrelevant
            let all_tier = all
                .and_then(|tiers| tiers.get(&key))
                .filter(|_| key <= all_priority);
            let specific_tier = specific
                .and_then(|tiers| tiers.get(&key))
                .filter(|_| key <= specific_priority);

            if key == min_priority {
                trace!("Processing base tier {}", key);

                // The NPC's own rules are resolved immediately and shadow
                // the wildcard base set when anything resolves.
                if let Some(tier) = specific_tier {
                    if let Some(entries) = self.base_entries(tier, npc, rng, &mut pool) {
                        for descriptor in entries {
                            if let Some(item) = self.resolve_item(descriptor)? {
                                pool.push(item);
                            }
                        }
                    }
                }

                if pool.is_empty() {
                    if let Some(tier) = all_tier {
                        if let Some(entries) = self.base_entries(tier, npc, rng, &mut pool) {
                            deferred.extend(entries);
                        }
                    }
                }
            }

            for tier in [all_tier, specific_tier].into_iter().flatten() {
                if let Some(entries) = tier.get(GiftMode::AddToExisting) {
                    deferred.extend(entries);
                }
            }
        }

        for descriptor in deferred {
            if let Some(item) = self.resolve_item(descriptor)? {
                pool.push(item);
            }
        }

        Ok(pool)
    }

    /// Pick the base-deciding list of a tier: a non-empty Overwrite list, or
    /// else the AddToVanilla list, which replaces the pool with built-in gifts.
    fn base_entries<'t>(
        &self,
        tier: &'t TierRules,
        npc: &Npc,
        rng: &mut dyn RngCore,
        pool: &mut CandidatePool,
    ) -> Option<&'t [ItemDescriptor]> {
        match tier.get(GiftMode::Overwrite) {
            Some(entries) if !entries.is_empty() => Some(entries),
            overwrite => match tier.get(GiftMode::AddToVanilla) {
                Some(entries) => {
                    *pool = self.vanilla.gifts_for(npc, rng).into_iter().collect();
                    Some(entries)
                }
                None => overwrite,
            },
        }
    }

    fn resolve_item(&self, descriptor: &ItemDescriptor) -> Result<Option<Item>> {
        let item = self.items.resolve(descriptor)?;
        if item.is_none() {
            let err = GiftError::UnresolvableItem {
                catalog: descriptor.catalog.to_string(),
                name: descriptor.name.clone(),
            };
            info!("{}, skipping", err);
        }
        Ok(item)
    }
}
