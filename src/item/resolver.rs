//! Descriptor-to-item resolution across catalogs

use crate::config::SourceCatalog;
use crate::error::Result;
use crate::item::index::{AssetIndex, ObjectCatalog};
use crate::item::types::{Item, ItemDescriptor};
use std::collections::HashMap;

/// Third-party catalog that maps item names to base object ids
pub trait NamedObjectCatalog {
    fn object_id(&self, name: &str) -> Result<Option<i32>>;
}

/// Third-party catalog that spawns its own items by name
pub trait DynamicItemCatalog {
    fn spawn(&self, name: &str) -> Result<Option<Item>>;
}

impl<S: std::hash::BuildHasher> NamedObjectCatalog for HashMap<String, i32, S> {
    fn object_id(&self, name: &str) -> Result<Option<i32>> {
        Ok(self.get(name).copied())
    }
}

impl<S: std::hash::BuildHasher> DynamicItemCatalog for HashMap<String, Item, S> {
    fn spawn(&self, name: &str) -> Result<Option<Item>> {
        Ok(self.get(name).cloned())
    }
}

/// Turns descriptors into concrete items
pub struct ItemResolver {
    objects: Box<dyn ObjectCatalog>,
    index: AssetIndex,
    catalog_a: Option<Box<dyn NamedObjectCatalog>>,
    catalog_b: Option<Box<dyn DynamicItemCatalog>>,
}

impl ItemResolver {
    pub fn new(objects: impl ObjectCatalog + 'static) -> Self {
        Self {
            objects: Box::new(objects),
            index: AssetIndex::new(),
            catalog_a: None,
            catalog_b: None,
        }
    }

    pub fn with_catalog_a(mut self, api: impl NamedObjectCatalog + 'static) -> Self {
        self.catalog_a = Some(Box::new(api));
        self
    }

    pub fn with_catalog_b(mut self, api: impl DynamicItemCatalog + 'static) -> Self {
        self.catalog_b = Some(Box::new(api));
        self
    }

    /// Replace the base catalog; the name index is rebuilt on next use.
    pub fn set_objects(&mut self, objects: impl ObjectCatalog + 'static) {
        self.objects = Box::new(objects);
        self.index.invalidate();
    }

    pub fn invalidate_index(&mut self) {
        self.index.invalidate();
    }

    pub fn index(&self) -> &AssetIndex {
        &self.index
    }

    /// Resolve a descriptor. `Ok(None)` means the item is unknown or its
    /// catalog is not installed; `Err` is reserved for catalog failures.
    pub fn resolve(&self, descriptor: &ItemDescriptor) -> Result<Option<Item>> {
        match descriptor.catalog {
            SourceCatalog::Base => Ok(self.resolve_base(descriptor)),
            SourceCatalog::CatalogA => {
                let id = match &self.catalog_a {
                    Some(api) => api.object_id(&descriptor.name)?,
                    None => None,
                };
                match id {
                    Some(id) => Ok(Some(Item::object(id, descriptor.quantity))),
                    // Catalogs share the base naming convention
                    None => Ok(self.resolve_base(descriptor)),
                }
            }
            SourceCatalog::CatalogB => {
                let Some(api) = &self.catalog_b else {
                    return Ok(None);
                };
                Ok(api
                    .spawn(&descriptor.name)?
                    .map(|item| item.with_stack(descriptor.quantity)))
            }
        }
    }

    fn resolve_base(&self, descriptor: &ItemDescriptor) -> Option<Item> {
        self.index
            .id_for(&descriptor.name, self.objects.as_ref())
            .map(|id| Item::object(id, descriptor.quantity))
    }
}
