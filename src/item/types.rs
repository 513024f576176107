//! Item and descriptor structures

use crate::config::{ItemEntry, SourceCatalog};
use std::fmt;

/// A concrete, spawnable item
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    /// A stack of a base-game object
    Object { id: i32, stack: u32 },
    /// A ring; rings never stack
    Ring { id: i32 },
    /// An item spawned by a dynamic catalog, identified by its full id
    Dynamic { id: String, stack: u32 },
}

impl Item {
    #[inline]
    pub fn object(id: i32, stack: u32) -> Self {
        Item::Object { id, stack }
    }

    #[inline]
    pub fn ring(id: i32) -> Self {
        Item::Ring { id }
    }

    pub fn stack(&self) -> u32 {
        match self {
            Item::Object { stack, .. } | Item::Dynamic { stack, .. } => *stack,
            Item::Ring { .. } => 1,
        }
    }

    /// Replace the stack size. Rings ignore this.
    pub fn with_stack(mut self, amount: u32) -> Self {
        match &mut self {
            Item::Object { stack, .. } | Item::Dynamic { stack, .. } => *stack = amount,
            Item::Ring { .. } => {}
        }
        self
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Object { id, stack } => write!(f, "object {} x{}", id, stack),
            Item::Ring { id } => write!(f, "ring {}", id),
            Item::Dynamic { id, stack } => write!(f, "{} x{}", id, stack),
        }
    }
}

/// A named, quantified, catalog-tagged request for an item
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemDescriptor {
    pub name: String,
    pub quantity: u32,
    pub catalog: SourceCatalog,
}

impl ItemDescriptor {
    pub fn new(name: impl Into<String>, quantity: u32, catalog: SourceCatalog) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.max(1),
            catalog,
        }
    }

    /// Normalize a pack entry. Entries without a usable name yield `None`.
    pub fn from_entry(entry: &ItemEntry) -> Option<Self> {
        let name = entry.name.as_deref()?;
        if name.trim().is_empty() {
            return None;
        }
        let quantity = u32::try_from(entry.quantity).unwrap_or(0).max(1);
        Some(Self {
            name: name.to_string(),
            quantity,
            catalog: entry.item_type,
        })
    }
}

impl fmt::Display for ItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} x{}", self.catalog, self.name, self.quantity)
    }
}
