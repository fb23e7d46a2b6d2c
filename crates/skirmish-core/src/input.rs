//! Player control input, sampled once per tick.

use serde::{Deserialize, Serialize};

/// Held-control state for the player vessel. Rotation and thrust apply
/// continuously while held; fire respects the weapon cooldown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust_forward: bool,
    pub thrust_backward: bool,
    pub fire: bool,
    pub shield_hold: bool,
    /// Edge-triggered; the engine consumes one jump per press.
    pub hyperspace: bool,
}
