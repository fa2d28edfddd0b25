//! Inventory save/load: human-readable JSON snapshots on disk.
//!
//! The codec copies slot contents verbatim in both directions. No catalog
//! validation happens at this layer, so stacks whose item id has since left
//! the catalog ("orphans") survive a round trip unchanged.

use anyhow::{Context, Result};
use satchel_core::ItemStack;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::InventoryStore;

/// One persisted slot. Empty slots are written with a blank id and count 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotRecord {
    /// Item id, or empty for an empty slot.
    pub item_id: String,
    /// Unit count, 0 for an empty slot.
    pub count: u32,
}

/// On-disk save file shape: `{ "slots": [ ... ] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct SaveFile {
    slots: Vec<SlotRecord>,
}

/// Well-known per-owner save location: `<saves_dir>/<owner>/inventory.json`.
pub fn inventory_path(saves_dir: &Path, owner: &str) -> PathBuf {
    saves_dir.join(owner).join("inventory.json")
}

/// Convert a live slot sequence to persisted records, one per slot in order.
pub fn to_records(slots: &[Option<ItemStack>]) -> Vec<SlotRecord> {
    slots
        .iter()
        .map(|slot| match slot {
            Some(stack) => SlotRecord {
                item_id: stack.item_id.clone(),
                count: stack.count,
            },
            None => SlotRecord::default(),
        })
        .collect()
}

/// Rebuild a slot sequence of exactly `capacity` entries from records.
///
/// Index `i < records.len()` copies the record (blank ids and zero counts
/// become empty slots); later indices are empty. Records beyond `capacity`
/// are dropped with a warning.
pub fn from_records(records: Vec<SlotRecord>, capacity: usize) -> Vec<Option<ItemStack>> {
    if records.len() > capacity {
        tracing::warn!(
            extra = records.len() - capacity,
            capacity,
            "save file has more slots than capacity, dropping the rest"
        );
    }

    let mut slots: Vec<Option<ItemStack>> = records
        .into_iter()
        .take(capacity)
        .map(|record| {
            if record.item_id.is_empty() || record.count == 0 {
                None
            } else {
                Some(ItemStack::new(record.item_id, record.count))
            }
        })
        .collect();
    slots.resize_with(capacity, || None);
    slots
}

/// Save an inventory snapshot to disk as pretty-printed JSON.
pub fn save_inventory(path: &Path, store: &InventoryStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create save directory")?;
    }

    let file = SaveFile {
        slots: to_records(&store.snapshot()),
    };
    let json = serde_json::to_string_pretty(&file).context("Failed to serialize inventory")?;
    fs::write(path, json).context("Failed to write inventory file")?;

    tracing::info!(path = %path.display(), slots = file.slots.len(), "saved inventory");
    Ok(())
}

/// Load a slot sequence from disk, padded/truncated to `capacity`.
pub fn load_inventory(path: &Path, capacity: usize) -> Result<Vec<Option<ItemStack>>> {
    let json = fs::read_to_string(path).context("Failed to read inventory file")?;
    let file: SaveFile = serde_json::from_str(&json).context("Failed to parse inventory file")?;

    tracing::info!(path = %path.display(), slots = file.slots.len(), "loaded inventory");
    Ok(from_records(file.slots, capacity))
}

/// Load a save file into an existing store.
///
/// The store is untouched on any failure; the snapshot is only applied once
/// the whole file has been read and parsed.
pub fn load_into(store: &mut InventoryStore, path: &Path) -> Result<()> {
    let slots = load_inventory(path, store.capacity())?;
    store.load_snapshot(slots);
    Ok(())
}
