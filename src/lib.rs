//! Winter Star Gifts - priority-layered festival gift tables
//!
//! This crate lets content packs written by independent authors override or
//! extend the gifts NPCs hand out at the Feast of the Winter Star.
//!
//! Every pack contributes rules for an NPC (or `All` NPCs) at a priority;
//! lower numbers win. A rule either overwrites the candidate gifts, adds to
//! the NPC's built-in gifts, or adds to whatever the candidate set already is.
//!
//! ```no_run
//! use winter_star_gifts::config::GiftConfig;
//! use winter_star_gifts::gift::Npc;
//! use winter_star_gifts::host::{gift_seed, GiftMod, Season, WorldDate};
//! use winter_star_gifts::item::ItemResolver;
//! use winter_star_gifts::pack::{ContentPack, DirectoryPack};
//! use std::collections::BTreeMap;
//!
//! # fn main() -> winter_star_gifts::error::Result<()> {
//! let packs: Vec<Box<dyn ContentPack>> = DirectoryPack::discover("Mods/[CWSG]")?
//!     .into_iter()
//!     .map(|pack| Box::new(pack) as Box<dyn ContentPack>)
//!     .collect();
//! let objects: BTreeMap<i32, String> = BTreeMap::new();
//! let mut gifts = GiftMod::new(GiftConfig::default(), packs, ItemResolver::new(objects));
//!
//! let date = WorldDate::new(Season::Winter, 25, 1);
//! let robin = Npc::new("Robin").at_tile(12);
//! let gift = gifts.gift_from_npc(&robin, gift_seed(123_456, &date, robin.tile_x));
//! # let _ = gift;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gift;
pub mod host;
pub mod item;
pub mod pack;

pub use crate::error::{GiftError, Result};
pub use crate::gift::{GiftResolver, Npc, NpcAge};
pub use crate::host::GiftMod;
pub use crate::item::{Item, ItemDescriptor, ItemResolver};
pub use crate::pack::{GiftStore, PackLoader};
