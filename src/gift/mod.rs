//! Gift resolution module
//!
//! Combines the loaded pack rules, the NPC's built-in gift list and the item
//! catalogs into one randomly chosen festival gift.

mod npc;
mod resolver;
mod vanilla;


pub use npc::*;
pub use resolver::*;
pub use vanilla::*;
