#![warn(missing_docs)]
//! Fixed-capacity slot inventory: storage, stacking, relocation,
//! change notification, and a JSON persistence round-trip.

mod notifier;
mod persist;
mod store;

pub use notifier::*;
pub use persist::*;
pub use store::*;
