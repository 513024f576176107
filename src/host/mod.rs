//! Host integration module
//!
//! Maps the game's lifecycle events (day start and end, asset invalidation,
//! console commands, the gift hook) onto pack loading and gift resolution.

mod calendar;
mod entry;

pub use calendar::*;
pub use entry::*;
