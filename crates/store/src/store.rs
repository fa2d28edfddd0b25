//! Fixed-capacity slot storage with stacking, relocation, and use semantics.

use satchel_catalog::ItemCatalog;
use satchel_core::{ItemEffect, ItemStack};

use crate::notifier::{ChangeCallback, ChangeNotifier};

/// Result of using the item in a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum UseOutcome {
    /// One unit was consumed; the effect list goes to the stat system.
    Consumed {
        /// Effects of the consumed item, cloned from its catalog entry.
        effects: Vec<ItemEffect>,
    },
    /// The item equips rather than consumes; storage is untouched.
    Equippable {
        /// Id of the equippable item, for the stat system to resolve.
        item_id: String,
    },
    /// Nothing happened: empty slot, bad index, or unknown item.
    Nothing,
}

/// Fixed-capacity ordered slot storage for item stacks.
///
/// Slot index is the stable identity used by callers, UI, and persistence
/// ordering; the slot count never changes after construction. All mutation
/// goes through the operations below, and each completed mutation fires the
/// change notifier exactly once.
#[derive(Debug)]
pub struct InventoryStore {
    slots: Vec<Option<ItemStack>>,
    notifier: ChangeNotifier,
}

impl InventoryStore {
    /// Create an empty inventory with the given number of slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            notifier: ChangeNotifier::new(),
        }
    }

    /// Create an inventory pre-populated from a snapshot.
    ///
    /// The snapshot is padded or truncated to `capacity`, same as
    /// [`load_snapshot`](Self::load_snapshot).
    pub fn from_snapshot(capacity: usize, slots: Vec<Option<ItemStack>>) -> Self {
        let mut store = Self::new(capacity);
        store.load_snapshot(slots);
        store
    }

    /// Number of slots; fixed for the lifetime of the store.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Add items, merging into existing stacks before opening new ones.
    ///
    /// Returns true only when every requested unit was placed. Partial
    /// placement persists even when the call returns false; callers that
    /// need the shortfall can diff [`count_item`](Self::count_item).
    /// A count below 1 is treated as 1. An empty id is rejected outright
    /// with no mutation and no notification; any other valid call fires
    /// one notification, even if no slot had room.
    pub fn add_item(&mut self, catalog: &dyn ItemCatalog, item_id: &str, count: u32) -> bool {
        if item_id.trim().is_empty() {
            return false;
        }
        let max_stack = catalog.max_stack_size(item_id);
        let mut remaining = count.max(1);

        // Merge pass: top up existing stacks of the same item.
        for stack in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if stack.item_id == item_id {
                remaining = stack.add(remaining, max_stack);
            }
        }

        // Fill pass: open new stacks in empty slots.
        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let placed = remaining.min(max_stack);
                *slot = Some(ItemStack::new(item_id, placed));
                remaining -= placed;
            }
        }

        if remaining > 0 {
            tracing::debug!(item_id, remaining, "inventory could not fit every item");
        }
        self.changed();
        remaining == 0
    }

    /// Remove up to `count` items from the slot at `index`.
    ///
    /// Fails (false, no notification, no mutation) on an out-of-range index
    /// or an empty slot. A count below 1 is treated as 1; removing the last
    /// unit empties the slot.
    pub fn remove_at(&mut self, index: usize, count: u32) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        let Some(stack) = slot.as_mut() else {
            return false;
        };

        stack.remove(count.max(1));
        if stack.count == 0 {
            *slot = None;
        }
        self.changed();
        true
    }

    /// Relocate the stack at `from` into `to`.
    ///
    /// No-op (false, no notification) when the indices are equal, either is
    /// out of range, or the source slot is empty. Otherwise, in priority
    /// order: an empty destination takes the whole stack; a same-item
    /// destination with headroom absorbs `min(headroom, source count)`
    /// units; anything else (including a full same-item destination) swaps
    /// the two slots. Exactly one notification on any successful case.
    pub fn move_or_swap(&mut self, catalog: &dyn ItemCatalog, from: usize, to: usize) -> bool {
        if from == to || from >= self.slots.len() || to >= self.slots.len() {
            return false;
        }
        let Some(source) = self.slots[from].take() else {
            return false;
        };
        let max_stack = catalog.max_stack_size(&source.item_id);

        match self.slots[to].take() {
            None => {
                self.slots[to] = Some(source);
            }
            Some(mut dest) if dest.can_merge(&source) && dest.remaining_space(max_stack) > 0 => {
                let transfer = dest.remaining_space(max_stack).min(source.count);
                dest.count += transfer;
                self.slots[to] = Some(dest);
                if transfer < source.count {
                    self.slots[from] = Some(ItemStack::new(source.item_id, source.count - transfer));
                }
            }
            Some(dest) => {
                self.slots[to] = Some(source);
                self.slots[from] = Some(dest);
            }
        }

        self.changed();
        true
    }

    /// Use the item at `index` according to its catalog entry.
    ///
    /// Consumables lose one unit (via [`remove_at`](Self::remove_at), which
    /// notifies); equippables report back without touching storage, since
    /// equip state belongs to the stat system. Unknown items, empty slots,
    /// and bad indices are no-ops.
    pub fn use_item(&mut self, catalog: &dyn ItemCatalog, index: usize) -> UseOutcome {
        let item_id = match self.slots.get(index).and_then(|slot| slot.as_ref()) {
            Some(stack) => stack.item_id.clone(),
            None => return UseOutcome::Nothing,
        };
        let Some(def) = catalog.lookup(&item_id) else {
            return UseOutcome::Nothing;
        };

        if def.consumable {
            let effects = def.effects.clone();
            self.remove_at(index, 1);
            UseOutcome::Consumed { effects }
        } else if def.equippable {
            UseOutcome::Equippable { item_id }
        } else {
            UseOutcome::Nothing
        }
    }

    /// Get a copy of the stack at `index`; `None` when empty or out of range.
    pub fn get(&self, index: usize) -> Option<ItemStack> {
        self.slots.get(index).and_then(|slot| slot.clone())
    }

    /// Get an owned copy of the whole slot sequence, in slot order.
    pub fn snapshot(&self) -> Vec<Option<ItemStack>> {
        self.slots.clone()
    }

    /// Replace the slot contents from a snapshot, then notify once.
    ///
    /// The incoming list is canonicalized (zero counts and empty ids become
    /// empty slots), padded with empties when short, and truncated with a
    /// warning when longer than the capacity.
    pub fn load_snapshot(&mut self, slots: Vec<Option<ItemStack>>) {
        let capacity = self.slots.len();
        if slots.len() > capacity {
            tracing::warn!(
                extra = slots.len() - capacity,
                capacity,
                "snapshot longer than capacity, dropping trailing slots"
            );
        }

        let mut incoming: Vec<Option<ItemStack>> = slots
            .into_iter()
            .take(capacity)
            .map(|slot| slot.filter(|stack| stack.count > 0 && !stack.item_id.is_empty()))
            .collect();
        incoming.resize_with(capacity, || None);

        self.slots = incoming;
        self.changed();
    }

    /// Total units of an item across all slots.
    pub fn count_item(&self, item_id: &str) -> u64 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.item_id == item_id)
            .map(|stack| u64::from(stack.count))
            .sum()
    }

    /// Check if the inventory holds at least `count` units of an item.
    pub fn has_item(&self, item_id: &str, count: u32) -> bool {
        self.count_item(item_id) >= u64::from(count)
    }

    /// Find the first slot containing an item.
    pub fn find_item(&self, item_id: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|stack| stack.item_id == item_id))
    }

    /// Number of empty slots.
    pub fn empty_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Check if every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Check if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }

    /// Register a change observer. See [`ChangeNotifier::subscribe`].
    pub fn subscribe(&mut self, key: &str, callback: ChangeCallback) -> bool {
        self.notifier.subscribe(key, callback)
    }

    /// Remove a change observer. See [`ChangeNotifier::unsubscribe`].
    pub fn unsubscribe(&mut self, key: &str) -> bool {
        self.notifier.unsubscribe(key)
    }

    fn changed(&mut self) {
        self.notifier.notify(&self.slots);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_catalog::{ItemDatabase, ItemDef};
    use satchel_core::EffectKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn def(id: &str, max_stack: u32) -> ItemDef {
        ItemDef {
            id: id.to_string(),
            display_name: id.to_string(),
            description: String::new(),
            icon: None,
            consumable: false,
            equippable: false,
            max_stack,
            effects: Vec::new(),
        }
    }

    fn catalog() -> ItemDatabase {
        let mut potion = def("potion", 99);
        potion.consumable = true;
        potion.effects = vec![ItemEffect {
            kind: EffectKind::HealthRestore,
            value: 25.0,
            duration: 0.0,
        }];

        let mut sword = def("sword", 1);
        sword.equippable = true;

        ItemDatabase::new(vec![potion, sword, def("pebble", 99)]).unwrap()
    }

    fn counted(store: &mut InventoryStore) -> Rc<RefCell<u32>> {
        let hits = Rc::new(RefCell::new(0));
        let hook = Rc::clone(&hits);
        store.subscribe("counter", Box::new(move |_| *hook.borrow_mut() += 1));
        hits
    }

    #[test]
    fn add_merges_then_fills_in_slot_order() {
        let cat = catalog();
        let mut store = InventoryStore::new(5);

        assert!(store.add_item(&cat, "potion", 150));
        assert_eq!(store.get(0), Some(ItemStack::new("potion", 99)));
        assert_eq!(store.get(1), Some(ItemStack::new("potion", 51)));
        assert_eq!(store.empty_slots(), 3);
    }

    #[test]
    fn add_into_full_inventory_fails_but_notifies() {
        let cat = catalog();
        let mut store = InventoryStore::from_snapshot(1, vec![Some(ItemStack::new("potion", 99))]);
        let hits = counted(&mut store);

        assert!(!store.add_item(&cat, "potion", 10));
        assert_eq!(store.get(0), Some(ItemStack::new("potion", 99)));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn add_partial_placement_persists_on_failure() {
        let cat = catalog();
        let mut store = InventoryStore::new(1);

        assert!(!store.add_item(&cat, "potion", 120));
        assert_eq!(store.count_item("potion"), 99);
    }

    #[test]
    fn add_rejects_blank_id_without_notifying() {
        let cat = catalog();
        let mut store = InventoryStore::new(3);
        let hits = counted(&mut store);

        assert!(!store.add_item(&cat, "", 5));
        assert!(!store.add_item(&cat, "   ", 5));
        assert!(store.is_empty());
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn add_clamps_count_to_at_least_one() {
        let cat = catalog();
        let mut store = InventoryStore::new(3);

        assert!(store.add_item(&cat, "potion", 0));
        assert_eq!(store.count_item("potion"), 1);
    }

    #[test]
    fn add_unknown_item_uses_fallback_limit() {
        let cat = catalog();
        let mut store = InventoryStore::new(2);

        assert!(store.add_item(&cat, "lost_relic", 150));
        assert_eq!(store.get(0), Some(ItemStack::new("lost_relic", 99)));
        assert_eq!(store.get(1), Some(ItemStack::new("lost_relic", 51)));
    }

    #[test]
    fn remove_decrements_and_clears_slot() {
        let cat = catalog();
        let mut store = InventoryStore::new(2);
        store.add_item(&cat, "potion", 5);

        assert!(store.remove_at(0, 3));
        assert_eq!(store.get(0), Some(ItemStack::new("potion", 2)));

        assert!(store.remove_at(0, 10)); // over-remove empties the slot
        assert_eq!(store.get(0), None);
    }

    #[test]
    fn remove_fails_cleanly_without_notifying() {
        let cat = catalog();
        let mut store = InventoryStore::new(2);
        store.add_item(&cat, "potion", 5);
        let hits = counted(&mut store);

        assert!(!store.remove_at(1, 1)); // empty slot
        assert!(!store.remove_at(9, 1)); // out of range
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(store.count_item("potion"), 5);
    }

    #[test]
    fn move_into_empty_slot_moves_wholesale() {
        let cat = catalog();
        let mut store = InventoryStore::from_snapshot(2, vec![Some(ItemStack::new("sword", 1))]);

        assert!(store.move_or_swap(&cat, 0, 1));
        assert_eq!(store.get(0), None);
        assert_eq!(store.get(1), Some(ItemStack::new("sword", 1)));
    }

    #[test]
    fn move_merges_partial_transfer() {
        let cat = catalog();
        let mut store = InventoryStore::from_snapshot(
            2,
            vec![
                Some(ItemStack::new("potion", 40)),
                Some(ItemStack::new("potion", 70)),
            ],
        );

        assert!(store.move_or_swap(&cat, 0, 1));
        assert_eq!(store.get(0), Some(ItemStack::new("potion", 11)));
        assert_eq!(store.get(1), Some(ItemStack::new("potion", 99)));
    }

    #[test]
    fn move_merge_emptying_the_source() {
        let cat = catalog();
        let mut store = InventoryStore::from_snapshot(
            2,
            vec![
                Some(ItemStack::new("potion", 10)),
                Some(ItemStack::new("potion", 20)),
            ],
        );

        assert!(store.move_or_swap(&cat, 0, 1));
        assert_eq!(store.get(0), None);
        assert_eq!(store.get(1), Some(ItemStack::new("potion", 30)));
    }

    #[test]
    fn move_swaps_different_items() {
        let cat = catalog();
        let mut store = InventoryStore::from_snapshot(
            2,
            vec![
                Some(ItemStack::new("sword", 1)),
                Some(ItemStack::new("potion", 7)),
            ],
        );

        assert!(store.move_or_swap(&cat, 0, 1));
        assert_eq!(store.get(0), Some(ItemStack::new("potion", 7)));
        assert_eq!(store.get(1), Some(ItemStack::new("sword", 1)));
    }

    #[test]
    fn move_swaps_when_destination_stack_is_full() {
        let cat = catalog();
        let mut store = InventoryStore::from_snapshot(
            2,
            vec![
                Some(ItemStack::new("potion", 40)),
                Some(ItemStack::new("potion", 99)),
            ],
        );

        assert!(store.move_or_swap(&cat, 0, 1));
        assert_eq!(store.get(0), Some(ItemStack::new("potion", 99)));
        assert_eq!(store.get(1), Some(ItemStack::new("potion", 40)));
    }

    #[test]
    fn move_noops_fire_no_notification() {
        let cat = catalog();
        let mut store = InventoryStore::from_snapshot(3, vec![Some(ItemStack::new("potion", 5))]);
        let hits = counted(&mut store);

        assert!(!store.move_or_swap(&cat, 0, 0)); // same slot
        assert!(!store.move_or_swap(&cat, 0, 9)); // destination out of range
        assert!(!store.move_or_swap(&cat, 9, 0)); // source out of range
        assert!(!store.move_or_swap(&cat, 1, 0)); // empty source
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(store.get(0), Some(ItemStack::new("potion", 5)));
    }

    #[test]
    fn successful_operations_notify_exactly_once() {
        let cat = catalog();
        let mut store = InventoryStore::new(4);
        let hits = counted(&mut store);

        store.add_item(&cat, "potion", 250); // touches three slots
        assert_eq!(*hits.borrow(), 1);

        store.move_or_swap(&cat, 0, 3);
        assert_eq!(*hits.borrow(), 2);

        store.remove_at(1, 1);
        assert_eq!(*hits.borrow(), 3);
    }

    #[test]
    fn use_consumable_removes_one_unit() {
        let cat = catalog();
        let mut store = InventoryStore::new(2);
        store.add_item(&cat, "potion", 3);

        let outcome = store.use_item(&cat, 0);
        match outcome {
            UseOutcome::Consumed { effects } => {
                assert_eq!(effects.len(), 1);
                assert_eq!(effects[0].kind, EffectKind::HealthRestore);
            }
            other => panic!("expected Consumed, got {other:?}"),
        }
        assert_eq!(store.get(0), Some(ItemStack::new("potion", 2)));
    }

    #[test]
    fn use_last_consumable_empties_the_slot() {
        let cat = catalog();
        let mut store = InventoryStore::new(1);
        store.add_item(&cat, "potion", 1);

        assert!(matches!(store.use_item(&cat, 0), UseOutcome::Consumed { .. }));
        assert_eq!(store.get(0), None);
    }

    #[test]
    fn use_equippable_reports_without_mutating() {
        let cat = catalog();
        let mut store = InventoryStore::new(1);
        store.add_item(&cat, "sword", 1);
        let hits = counted(&mut store);

        assert_eq!(
            store.use_item(&cat, 0),
            UseOutcome::Equippable {
                item_id: "sword".to_string()
            }
        );
        assert_eq!(store.get(0), Some(ItemStack::new("sword", 1)));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn use_unknown_or_plain_items_is_a_noop() {
        let cat = catalog();
        let mut store = InventoryStore::from_snapshot(
            3,
            vec![
                Some(ItemStack::new("lost_relic", 4)),
                Some(ItemStack::new("pebble", 2)),
            ],
        );

        assert_eq!(store.use_item(&cat, 0), UseOutcome::Nothing); // orphan id
        assert_eq!(store.use_item(&cat, 1), UseOutcome::Nothing); // not consumable/equippable
        assert_eq!(store.use_item(&cat, 2), UseOutcome::Nothing); // empty slot
        assert_eq!(store.use_item(&cat, 9), UseOutcome::Nothing); // out of range
        assert_eq!(store.count_item("lost_relic"), 4);
        assert_eq!(store.count_item("pebble"), 2);
    }

    #[test]
    fn get_is_a_defensive_copy() {
        let cat = catalog();
        let mut store = InventoryStore::new(1);
        store.add_item(&cat, "potion", 5);

        let mut copy = store.get(0).unwrap();
        copy.count = 1;
        assert_eq!(store.get(0), Some(ItemStack::new("potion", 5)));
    }

    #[test]
    fn load_snapshot_pads_truncates_and_canonicalizes() {
        let mut store = InventoryStore::new(3);
        let hits = counted(&mut store);

        store.load_snapshot(vec![
            Some(ItemStack::new("potion", 7)),
            Some(ItemStack::new("ghost", 0)), // zero count -> empty
            Some(ItemStack::new("", 5)),      // blank id -> empty
            Some(ItemStack::new("dropped", 1)), // beyond capacity
        ]);

        assert_eq!(store.capacity(), 3);
        assert_eq!(store.get(0), Some(ItemStack::new("potion", 7)));
        assert_eq!(store.get(1), None);
        assert_eq!(store.get(2), None);
        assert_eq!(store.find_item("dropped"), None);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn queries_reflect_slot_contents() {
        let cat = catalog();
        let mut store = InventoryStore::new(4);
        store.add_item(&cat, "potion", 120);
        store.add_item(&cat, "sword", 1);

        assert_eq!(store.count_item("potion"), 120);
        assert!(store.has_item("potion", 120));
        assert!(!store.has_item("potion", 121));
        assert_eq!(store.find_item("sword"), Some(2));
        assert_eq!(store.find_item("shield"), None);
        assert_eq!(store.empty_slots(), 1);
        assert!(!store.is_empty());
        assert!(!store.is_full());
    }

    #[test]
    fn capacity_never_changes() {
        let cat = catalog();
        let mut store = InventoryStore::new(5);

        store.add_item(&cat, "potion", 500);
        store.remove_at(0, 99);
        store.move_or_swap(&cat, 1, 0);
        store.load_snapshot(Vec::new());

        assert_eq!(store.capacity(), 5);
        assert_eq!(store.snapshot().len(), 5);
    }
}
