//! Content pack gift table structures (`content.json`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority used when a pack entry does not specify one
pub const DEFAULT_PRIORITY: i32 = 100;

/// Top-level document of a content pack
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomGiftData {
    #[serde(rename = "NPCGifts", default)]
    pub npc_gifts: Vec<Option<NpcGifts>>,
}

impl CustomGiftData {
    /// Example document written for pack authors whose pack has no gift data
    pub fn example() -> Self {
        Self {
            npc_gifts: vec![Some(NpcGifts {
                name_of_npc: Some("Robin".to_string()),
                item_names: vec![Some(ItemEntry {
                    name: Some("Parsnip".to_string()),
                    quantity: 1,
                    item_type: SourceCatalog::Base,
                })],
                ..Default::default()
            })],
        }
    }
}

/// One gift rule as written by a pack author
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NpcGifts {
    #[serde(rename = "NameOfNPC", default)]
    pub name_of_npc: Option<String>,
    #[serde(default)]
    pub item_names: Vec<Option<ItemEntry>>,
    #[serde(default)]
    pub mode: GiftMode,
    #[serde(default = "default_priority")]
    pub priority: i32,
}

impl Default for NpcGifts {
    fn default() -> Self {
        Self {
            name_of_npc: None,
            item_names: Vec::new(),
            mode: GiftMode::default(),
            priority: DEFAULT_PRIORITY,
        }
    }
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

fn default_quantity() -> i32 {
    1
}

/// An item request as written by a pack author
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(rename = "Type", default)]
    pub item_type: SourceCatalog,
}

/// How a rule combines with the rest of an NPC's candidate gifts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GiftMode {
    /// Replace the candidate set at this tier
    #[default]
    Overwrite,
    /// Seed the candidate set with the NPC's built-in gifts, then add
    AddToVanilla,
    /// Append to whatever candidate set exists, at every tier
    AddToExisting,
}

impl GiftMode {
    /// Modes that decide the base candidate set and therefore shadow
    /// lower-precedence tiers.
    #[inline]
    pub fn is_blocking(self) -> bool {
        !matches!(self, GiftMode::AddToExisting)
    }
}

impl fmt::Display for GiftMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GiftMode::Overwrite => "Overwrite",
            GiftMode::AddToVanilla => "AddToVanilla",
            GiftMode::AddToExisting => "AddToExisting",
        };
        f.pad(name)
    }
}

/// Catalog an item name is looked up in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceCatalog {
    /// The game's own object data
    #[default]
    #[serde(rename = "Vanilla")]
    Base,
    /// Name-to-id lookup provided by a third-party content framework
    #[serde(alias = "JA", alias = "JsonAssets")]
    CatalogA,
    /// Dynamic item spawner provided by a third-party content framework
    #[serde(alias = "DGA", alias = "DynamicGameAssets")]
    CatalogB,
}

impl fmt::Display for SourceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceCatalog::Base => "Vanilla",
            SourceCatalog::CatalogA => "CatalogA",
            SourceCatalog::CatalogB => "CatalogB",
        };
        f.pad(name)
    }
}
