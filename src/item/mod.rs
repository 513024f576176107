//! Item resolution module
//!
//! Turns pack descriptors into concrete items, looking names up in the base
//! object catalog or in optional third-party catalogs.

pub mod index;
mod resolver;
mod types;


pub use index::{AssetIndex, ObjectCatalog};
pub use resolver::*;
pub use types::*;
