#![warn(missing_docs)]
//! Core item primitives shared across the workspace.

pub mod effect;
pub mod item;

// Re-export commonly used types
pub use effect::{EffectKind, ItemEffect};
pub use item::ItemStack;
