#![warn(missing_docs)]
//! Item catalog schema + lookup.
//!
//! The catalog is read-only reference data: the inventory store consults it
//! for stack limits and use policy but never writes to it.

mod loader;
mod registry;

pub use loader::{database_from_file, database_from_str};
pub use registry::{ItemCatalog, ItemDatabase, FALLBACK_MAX_STACK};

use satchel_core::ItemEffect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Static item definition loaded from a catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    /// Stable identifier referenced by inventory slots and save files.
    pub id: String,
    /// Human-readable name for tooltips and menus.
    pub display_name: String,
    /// Longer flavor/help text.
    #[serde(default)]
    pub description: String,
    /// Icon asset path, resolved by the presentation layer.
    #[serde(default)]
    pub icon: Option<String>,
    /// Whether using the item consumes one unit.
    #[serde(default)]
    pub consumable: bool,
    /// Whether the item equips instead of being consumed.
    #[serde(default)]
    pub equippable: bool,
    /// Maximum units a single slot may hold.
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    /// Effects handed to the stat system when consumed.
    #[serde(default)]
    pub effects: Vec<ItemEffect>,
}

fn default_max_stack() -> u32 {
    FALLBACK_MAX_STACK
}

/// Errors emitted during catalog loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Wrap IO errors when reading catalog files.
    #[error("failed to read item catalog: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse item catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two definitions claimed the same id.
    #[error("duplicate item id in catalog: {0}")]
    DuplicateId(String),
}
