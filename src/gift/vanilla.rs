//! Built-in festival gift lists

use crate::gift::npc::{Npc, NpcAge};
use crate::item::Item;
use rand::{Rng, RngCore};

/// Source of an NPC's own candidate gifts
pub trait VanillaGiftTable {
    fn gifts_for(&self, npc: &Npc, rng: &mut dyn RngCore) -> Vec<Item>;
}

/// Geode range the game draws a random geode from
const GEODES: std::ops::Range<i32> = 535..538;

/// The game's hard-coded festival gift lists
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinGiftTable;

impl VanillaGiftTable for BuiltinGiftTable {
    fn gifts_for(&self, npc: &Npc, rng: &mut dyn RngCore) -> Vec<Item> {
        match npc.name.as_str() {
            "Clint" => vec![
                Item::object(337, 1),
                Item::object(336, 5),
                Item::object(rng.gen_range(GEODES), 5),
            ],
            "Marnie" => vec![Item::object(176, 12)],
            "Robin" => vec![
                Item::object(388, 99),
                Item::object(390, 50),
                Item::object(709, 25),
            ],
            "Willy" => vec![
                Item::object(690, 25),
                Item::object(687, 1),
                Item::object(703, 1),
            ],
            "Evelyn" => vec![Item::object(223, 1)],
            _ if npc.age == NpcAge::Child => vec![
                Item::object(330, 1),
                Item::object(103, 1),
                Item::object(394, 1),
                Item::object(rng.gen_range(GEODES), 1),
            ],
            _ => {
                let mut gifts: Vec<Item> = [608, 651, 611]
                    .into_iter()
                    .map(|id| Item::object(id, 1))
                    .collect();
                gifts.push(Item::ring(517));
                gifts.push(Item::object(466, 10));
                gifts.extend(
                    [422, 392, 348, 346, 341, 221, 64, 60, 70]
                        .into_iter()
                        .map(|id| Item::object(id, 1)),
                );
                gifts
            }
        }
    }
}
