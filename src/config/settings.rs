//! Mod settings

use crate::error::Result;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Runtime settings for the gift engine
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GiftConfig {
    /// File name of the gift table inside every content pack
    pub content_file: String,
    /// Festival on which packs are loaded
    pub festival_name: String,
    /// Asset whose invalidation clears the object name index
    pub object_asset: String,
    /// Write an example gift table into packs that have none
    pub write_templates: bool,
}

impl Default for GiftConfig {
    fn default() -> Self {
        Self {
            content_file: "content.json".to_string(),
            festival_name: "Feast of the Winter Star".to_string(),
            object_asset: "Data/ObjectInformation".to_string(),
            write_templates: true,
        }
    }
}

impl GiftConfig {
    /// Load settings from a JSON file; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Whether `asset` names the object data asset.
    pub fn is_object_asset(&self, asset: &str) -> bool {
        normalize_asset_name(asset) == normalize_asset_name(&self.object_asset)
    }
}

fn normalize_asset_name(name: &str) -> String {
    name.trim().replace('\\', "/").to_ascii_lowercase()
}
