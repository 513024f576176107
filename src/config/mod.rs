//! Configuration module for gift data structures
//!
//! This module holds the serde models for content-pack gift tables and the
//! engine's own settings.

mod pack;
mod settings;

pub use pack::*;
pub use settings::*;
