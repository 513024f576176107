//! Content pack module
//!
//! Reads every installed pack's gift table once per eligible day and merges
//! the rules into a [`GiftStore`] layered by NPC, priority and mode.

mod loader;
mod source;
mod store;


pub use loader::*;
pub use source::*;
pub use store::*;
