use std::fs;
use std::path::Path;

use crate::{CatalogError, ItemDatabase, ItemDef};

/// Load an item database from the provided JSON file path.
pub fn database_from_file(path: &Path) -> Result<ItemDatabase, CatalogError> {
    let data = fs::read_to_string(path)?;
    database_from_str(&data)
}

/// Load an item database from an in-memory JSON string.
pub fn database_from_str(input: &str) -> Result<ItemDatabase, CatalogError> {
    let defs: Vec<ItemDef> = serde_json::from_str(input)?;
    ItemDatabase::new(defs)
}
