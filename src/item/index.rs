//! Name-to-id index over the base object catalog

use ahash::AHashMap;
use log::{debug, info, warn};
use once_cell::unsync::OnceCell;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// Field holding the internal name in an object descriptor string
pub const NAME_FIELD: usize = 0;
/// Field holding the type and category in an object descriptor string
pub const TYPE_FIELD: usize = 3;

const FIELD_DELIMITER: char = '/';

/// Objects of this type never end up in an inventory
const INTERNAL_TYPE: &str = "asdf";

/// The only object named "Stone" that is a real item
const STONE_ID: i32 = 390;

/// Names whose catalog entries are ambiguous, pinned to fixed ids
const PINNED_NAMES: [(&str, i32); 6] = [
    ("Egg", 176),
    ("Brown Egg", 180),
    ("Large Egg", 174),
    ("Large Brown Egg", 182),
    ("Strange Doll", 126),
    ("Strange Doll 2", 127),
];

/// Names skipped while scanning (placeholders, and labels covered by `PINNED_NAMES`)
const SKIPPED_NAMES: [&str; 9] = [
    "Weeds",
    "SupplyCrate",
    "Twig",
    "Rotten Plant",
    "???",
    "DGA Dummy Object",
    "Egg",
    "Large Egg",
    "Strange Doll",
];

/// Read access to the base object catalog (`id -> descriptor string`)
pub trait ObjectCatalog {
    fn contains(&self, id: i32) -> bool;

    fn entries(&self) -> Box<dyn Iterator<Item = (i32, &str)> + '_>;

    /// Capacity hint for index construction
    fn len(&self) -> usize {
        0
    }
}

impl ObjectCatalog for BTreeMap<i32, String> {
    fn contains(&self, id: i32) -> bool {
        self.contains_key(&id)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (i32, &str)> + '_> {
        Box::new(self.iter().map(|(id, data)| (*id, data.as_str())))
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl<S: std::hash::BuildHasher> ObjectCatalog for HashMap<i32, String, S> {
    fn contains(&self, id: i32) -> bool {
        self.contains_key(&id)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (i32, &str)> + '_> {
        Box::new(self.iter().map(|(id, data)| (*id, data.as_str())))
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

/// Lazily built `name -> id` lookup.
///
/// The first lookup after construction or [`AssetIndex::invalidate`] scans the
/// whole catalog; every later lookup reuses the result.
#[derive(Debug, Default)]
pub struct AssetIndex {
    names: OnceCell<AHashMap<String, i32>>,
}

impl AssetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a display name (or a numeric id string) to an object id
    pub fn id_for(&self, name: &str, catalog: &dyn ObjectCatalog) -> Option<i32> {
        // Fast path: numeric ids
        if let Ok(id) = name.parse::<i32>() {
            if catalog.contains(id) {
                return Some(id);
            }
        }

        self.names
            .get_or_init(|| build_index(catalog))
            .get(name)
            .copied()
    }

    /// Drop the memoized index; the next lookup rebuilds it.
    pub fn invalidate(&mut self) {
        if self.names.take().is_some() {
            debug!("Object name index invalidated");
        }
    }

    #[inline]
    pub fn is_built(&self) -> bool {
        self.names.get().is_some()
    }
}

/// Extract the `n`th delimited field of an object descriptor string
#[inline]
fn nth_field(data: &str, n: usize) -> &str {
    data.split(FIELD_DELIMITER).nth(n).unwrap_or("")
}

fn is_skipped(id: i32, name: &str) -> bool {
    if name.eq_ignore_ascii_case("Stone") {
        return id != STONE_ID;
    }
    SKIPPED_NAMES.iter().any(|skip| name.eq_ignore_ascii_case(skip))
}

/// Scan the catalog into a fresh name index
pub fn build_index(catalog: &dyn ObjectCatalog) -> AHashMap<String, i32> {
    info!("Building map to resolve normal objects.");

    let mut mapping = AHashMap::with_capacity(catalog.len() + PINNED_NAMES.len());
    for (name, id) in PINNED_NAMES {
        mapping.insert(name.to_string(), id);
    }

    for (id, data) in catalog.entries() {
        if nth_field(data, TYPE_FIELD).eq_ignore_ascii_case(INTERNAL_TYPE) {
            continue;
        }

        let name = nth_field(data, NAME_FIELD);
        if is_skipped(id, name) {
            continue;
        }

        match mapping.entry(name.to_string()) {
            Entry::Occupied(existing) => {
                if *existing.get() != id {
                    warn!(
                        "{} with {} seems to be a duplicate object (already {}) and may not be resolved correctly.",
                        name,
                        id,
                        existing.get()
                    );
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
    }

    mapping
}
