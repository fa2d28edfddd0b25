//! Item stacks held by inventory slots.

use serde::{Deserialize, Serialize};

/// A quantity of a single item type occupying one inventory slot.
///
/// A present stack always holds at least one item; the canonical empty slot
/// is `None` at the container level, so two empty slots are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Identifier referencing the item catalog.
    pub item_id: String,
    /// Number of items in this stack (>= 1).
    pub count: u32,
}

impl ItemStack {
    /// Create a new item stack.
    pub fn new(item_id: impl Into<String>, count: u32) -> Self {
        Self {
            item_id: item_id.into(),
            count,
        }
    }

    /// Check if this stack holds the same item type as another.
    pub fn can_merge(&self, other: &ItemStack) -> bool {
        self.item_id == other.item_id
    }

    /// Get remaining space given the item's maximum stack size.
    pub fn remaining_space(&self, max_stack: u32) -> u32 {
        max_stack.saturating_sub(self.count)
    }

    /// Try to add items up to `max_stack`, returning the amount that didn't fit.
    pub fn add(&mut self, amount: u32, max_stack: u32) -> u32 {
        let added = amount.min(self.remaining_space(max_stack));
        self.count += added;
        amount - added
    }

    /// Try to remove items from this stack, returning the amount actually removed.
    pub fn remove(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.count);
        self.count -= removed;
        removed
    }
}
