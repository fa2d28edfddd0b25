//! Observer list fired once per completed inventory mutation.

use std::fmt;

use satchel_core::ItemStack;

/// Callback invoked with the post-mutation slot sequence.
pub type ChangeCallback = Box<dyn FnMut(&[Option<ItemStack>])>;

/// Ordered observer list with idempotent subscribe/unsubscribe.
///
/// Observers are identified by caller-chosen keys and invoked synchronously
/// in registration order. Callbacks receive the slot data directly instead
/// of a handle back into the store, so no re-entrancy guard is needed.
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Vec<(String, ChangeCallback)>,
}

impl ChangeNotifier {
    /// Create a notifier with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer under a key. No-op returning false if the key
    /// is already registered.
    pub fn subscribe(&mut self, key: &str, callback: ChangeCallback) -> bool {
        if self.observers.iter().any(|(existing, _)| existing == key) {
            return false;
        }
        self.observers.push((key.to_string(), callback));
        true
    }

    /// Remove an observer by key. No-op returning false for unknown keys.
    pub fn unsubscribe(&mut self, key: &str) -> bool {
        match self
            .observers
            .iter()
            .position(|(existing, _)| existing == key)
        {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke every observer in registration order.
    pub fn notify(&mut self, slots: &[Option<ItemStack>]) {
        for (_, callback) in &mut self.observers {
            callback(slots);
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check whether any observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.observers.iter().map(|(key, _)| key.as_str()).collect();
        f.debug_struct("ChangeNotifier")
            .field("observers", &keys)
            .finish()
    }
}
