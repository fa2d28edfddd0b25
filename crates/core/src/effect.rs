//! Consumable effect metadata carried by catalog entries.
//!
//! Effects are inert data from the inventory's perspective: consuming an
//! item hands this list to the stat system, which owns timers and modifiers.

use serde::{Deserialize, Serialize};

/// What a consumable effect modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Restore health immediately.
    HealthRestore,
    /// Raise maximum health for a duration.
    HealthBoost,
    /// Raise movement speed for a duration.
    SpeedBoost,
    /// Raise jump strength for a duration.
    JumpBoost,
    /// Restore stamina immediately.
    StaminaRestore,
    /// Raise maximum stamina for a duration.
    StaminaBoost,
    /// Grow the player for a duration.
    ScaleIncrease,
    /// Shrink the player for a duration.
    ScaleDecrease,
    /// Lower gravity for a duration.
    GravityReduction,
}

/// A single effect entry on a consumable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEffect {
    /// Which stat the effect touches.
    pub kind: EffectKind,
    /// Magnitude, interpreted per kind by the stat system.
    pub value: f32,
    /// Seconds the effect lasts; 0 means instant/permanent.
    #[serde(default)]
    pub duration: f32,
}

impl ItemEffect {
    /// Whether the effect applies once rather than over time.
    pub fn is_instant(&self) -> bool {
        self.duration == 0.0
    }
}
