//! Per-tick snapshot of the observable simulation state.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{
    AlliedBehavior, AttackPattern, BossPhase, Faction, HostileArchetype, HostileBehavior,
};
use crate::events::CombatEvent;
use crate::types::SimTime;

/// Player vessel as seen by observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec2,
    pub velocity: DVec2,
    pub heading: f64,
    pub shield_active: bool,
}

/// Allied escort as seen by observers. Sorted by `seq` in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlliedView {
    pub seq: u64,
    pub position: DVec2,
    pub velocity: DVec2,
    pub heading: f64,
    pub health: i32,
    pub max_health: i32,
    pub is_alpha: bool,
    pub behavior: AlliedBehavior,
    pub shield_active: bool,
}

/// Hostile vessel as seen by observers. Sorted by `seq` in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostileView {
    pub seq: u64,
    pub archetype: HostileArchetype,
    pub position: DVec2,
    pub velocity: DVec2,
    pub heading: f64,
    pub health: i32,
    pub max_health: i32,
    pub behavior: HostileBehavior,
    pub shield_active: bool,
    /// Present for bosses only.
    pub boss: Option<BossView>,
}

/// Boss escalation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub phase: BossPhase,
    pub attack_pattern: AttackPattern,
    /// True while the phase-transition pulse is running.
    pub transitioning: bool,
}

/// Drifting obstacle as seen by observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub seq: u64,
    pub position: DVec2,
    pub velocity: DVec2,
    pub size: f64,
    pub rotation: f64,
    pub vertices: Vec<f64>,
}

/// In-flight projectile as seen by observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub faction: Faction,
    pub position: DVec2,
    pub angle: f64,
    pub lifetime: i32,
}

/// Live population counts, recomputed for every snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveCounts {
    pub allied: u32,
    pub basic: u32,
    pub advanced: u32,
    pub boss: u32,
}

/// Running totals exposed alongside each snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub shots_fired: u64,
    pub hostiles_destroyed: u64,
    pub allies_lost: u64,
    pub obstacles_shattered: u64,
    pub player_deaths: u64,
    pub field_resets: u64,
}

/// Complete observable state after one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub score: u64,
    pub player: Option<PlayerView>,
    pub allies: Vec<AlliedView>,
    pub hostiles: Vec<HostileView>,
    pub obstacles: Vec<ObstacleView>,
    pub projectiles: Vec<ProjectileView>,
    pub counts: LiveCounts,
    pub telemetry: TelemetryCounters,
    /// Events raised during this tick, in emission order.
    pub events: Vec<CombatEvent>,
}
