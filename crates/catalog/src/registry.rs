use std::collections::HashMap;

use crate::{CatalogError, ItemDef};

/// Maximum stack size assumed for items missing from the catalog.
///
/// Orphaned ids in old save files must keep working, so lookups never fail;
/// they degrade to this limit instead.
pub const FALLBACK_MAX_STACK: u32 = 99;

/// Read-only lookup interface the inventory store depends on.
pub trait ItemCatalog {
    /// Look up a definition by item id.
    fn lookup(&self, item_id: &str) -> Option<&ItemDef>;

    /// Maximum stack size for an item, with the fallback for unknown ids.
    ///
    /// Clamped to at least 1 so a malformed definition cannot wedge the
    /// stacking arithmetic.
    fn max_stack_size(&self, item_id: &str) -> u32 {
        self.lookup(item_id)
            .map(|def| def.max_stack)
            .unwrap_or(FALLBACK_MAX_STACK)
            .max(1)
    }
}

/// Registry storing item definitions keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ItemDatabase {
    defs: Vec<ItemDef>,
    id_to_index: HashMap<String, usize>,
}

impl ItemDatabase {
    /// Construct a registry from the supplied definitions.
    pub fn new(defs: Vec<ItemDef>) -> Result<Self, CatalogError> {
        let mut id_to_index = HashMap::new();
        for (index, def) in defs.iter().enumerate() {
            if id_to_index.insert(def.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(def.id.clone()));
            }
        }
        Ok(Self { defs, id_to_index })
    }

    /// Number of definitions in the catalog.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Check whether the catalog holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterate over all definitions in load order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDef> {
        self.defs.iter()
    }
}

impl ItemCatalog for ItemDatabase {
    fn lookup(&self, item_id: &str) -> Option<&ItemDef> {
        self.id_to_index
            .get(item_id)
            .and_then(|&index| self.defs.get(index))
    }
}
