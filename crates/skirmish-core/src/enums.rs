//! Shared enumerations for vessel classes, behaviors, and fire patterns.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Which side a projectile or vessel fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Friendly,
    Hostile,
}

/// Hostile hull class. Determines durability, armament, and silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostileArchetype {
    Basic,
    Advanced,
    Boss,
}

impl HostileArchetype {
    pub fn max_health(self) -> i32 {
        match self {
            HostileArchetype::Basic => 1,
            HostileArchetype::Advanced => 2,
            HostileArchetype::Boss => 5,
        }
    }

    /// Base ticks between fire opportunities.
    pub fn fire_rate(self) -> u32 {
        match self {
            HostileArchetype::Basic => 30,
            HostileArchetype::Advanced => 20,
            HostileArchetype::Boss => 10,
        }
    }

    /// Hull size, used as the muzzle offset.
    pub fn size(self) -> f64 {
        match self {
            HostileArchetype::Basic => 18.0,
            HostileArchetype::Advanced => 22.0,
            HostileArchetype::Boss => 35.0,
        }
    }

    /// Collision radius.
    pub fn radius(self) -> f64 {
        self.size() * 0.75
    }

    /// Score awarded to the player for destroying this hull.
    pub fn score_value(self) -> u64 {
        match self {
            HostileArchetype::Basic => SCORE_BASIC,
            HostileArchetype::Advanced => SCORE_ADVANCED,
            HostileArchetype::Boss => SCORE_BOSS,
        }
    }
}

/// Current behavior mode of a hostile vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostileBehavior {
    Idle,
    Pursuit,
    Attack,
    Evade,
    Retreat,
}

/// Current behavior mode of an allied vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlliedBehavior {
    Idle,
    Avoiding,
    Engaging,
    Clearing,
}

/// Boss fire pattern, re-rolled on a fixed interval with
/// phase-dependent weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackPattern {
    Normal,
    Spread,
    Rapid,
    Circular,
}

/// Boss escalation phase, derived from remaining health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossPhase {
    One,
    Two,
    Three,
}

impl BossPhase {
    /// Phase for a given health ratio. Transitions are one-way; callers
    /// must never regress a boss to an earlier phase.
    pub fn for_ratio(ratio: f64) -> BossPhase {
        if ratio > BOSS_PHASE1_RATIO {
            BossPhase::One
        } else if ratio > BOSS_PHASE2_RATIO {
            BossPhase::Two
        } else {
            BossPhase::Three
        }
    }
}
