//! ECS components attached to simulation entities.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{AlliedBehavior, AttackPattern, BossPhase, Faction, HostileArchetype, HostileBehavior};

/// World position in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// Velocity in pixels per tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Velocity(pub DVec2);

/// Steering and propulsion parameters for a self-propelled vessel.
#[derive(Debug, Clone, Copy)]
pub struct Mobility {
    /// Current facing in radians.
    pub heading: f64,
    /// Facing the vessel is rotating toward.
    pub target_heading: f64,
    /// Radians turned per tick.
    pub rotation_step: f64,
    /// Thrust impulse per tick at full power.
    pub thrust_power: f64,
    /// Multiplicative velocity decay per tick.
    pub friction: f64,
    /// Speed clamp.
    pub max_speed: f64,
}

/// Circular collision footprint.
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    pub radius: f64,
}

/// Hull points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Health { current: max, max }
    }

    pub fn ratio(&self) -> f64 {
        if self.max <= 0 {
            0.0
        } else {
            self.current as f64 / self.max as f64
        }
    }
}

/// Protective shield state. While active the bearer ignores projectile
/// and obstacle damage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shield {
    pub active: bool,
    /// Remaining ticks of protection while active.
    pub duration: u32,
    /// Ticks until the shield may activate again.
    pub cooldown: u32,
}

/// In-flight burst volley state. Advances every tick independently of the
/// main fire cooldown.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurstState {
    pub active: bool,
    /// Ticks elapsed since the volley began.
    pub timer: u32,
    /// Total shots in the volley.
    pub count: u32,
    /// Aim heading captured when the volley began.
    pub base_angle: f64,
    /// Total angular spread of the volley.
    pub spread: f64,
}

/// Weapon cadence state.
#[derive(Debug, Clone)]
pub struct FireControl {
    /// Ticks until the next fire opportunity.
    pub cooldown: u32,
    /// Base ticks between fire opportunities.
    pub fire_rate: u32,
    pub burst: BurstState,
    /// Shots fired in the current rapid-fire run.
    pub rapid_count: u32,
}

impl FireControl {
    pub fn new(fire_rate: u32) -> Self {
        FireControl {
            cooldown: 0,
            fire_rate,
            burst: BurstState::default(),
            rapid_count: 0,
        }
    }
}

/// Marker for the singular player vessel.
#[derive(Debug, Clone, Copy)]
pub struct PlayerShip;

/// Allied escort vessel.
#[derive(Debug, Clone)]
pub struct AlliedShip {
    /// Spawn sequence number, used for stable ordering and newest-first
    /// removal during reconciliation.
    pub seq: u64,
    /// The alpha draws extra hostile attention.
    pub is_alpha: bool,
    pub behavior: AlliedBehavior,
}

/// Hostile vessel.
#[derive(Debug, Clone)]
pub struct HostileShip {
    pub seq: u64,
    pub archetype: HostileArchetype,
    pub behavior: HostileBehavior,
}

/// Boss-only escalation controller.
#[derive(Debug, Clone)]
pub struct BossCore {
    pub phase: BossPhase,
    pub attack_pattern: AttackPattern,
    /// Ticks since the current pattern was rolled.
    pub pattern_timer: u32,
    pub teleport_cooldown: u32,
    /// Ticks since the last erratic-movement roll.
    pub erratic_timer: u32,
    /// Remaining ticks of the phase-transition pulse.
    pub transition_timer: u32,
    /// Set on the tick the boss teleports so steering is skipped.
    pub teleported: bool,
    /// Heading jitter rolled this tick, applied over the decided course.
    pub pending_jitter: Option<f64>,
}

impl Default for BossCore {
    fn default() -> Self {
        BossCore {
            phase: BossPhase::One,
            attack_pattern: AttackPattern::Normal,
            pattern_timer: 0,
            teleport_cooldown: 0,
            erratic_timer: 0,
            transition_timer: 0,
            teleported: false,
            pending_jitter: None,
        }
    }
}

/// Drifting polygonal obstacle.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub seq: u64,
    /// Diameter of the silhouette.
    pub size: f64,
    /// Current rotation of the silhouette.
    pub rotation: f64,
    pub rotation_speed: f64,
    /// Radial distances of the silhouette vertices.
    pub vertices: Vec<f64>,
}

/// In-flight projectile.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub faction: Faction,
    /// Flight heading, fixed at launch.
    pub angle: f64,
    /// Remaining ticks before the round fizzles.
    pub lifetime: i32,
}

/// Per-tick movement and fire intent produced by the decision layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intent {
    /// Thrust power for this tick, zero for none.
    pub thrust: f64,
    /// Aim heading to fire along, if a shot was requested.
    pub fire: Option<f64>,
}
