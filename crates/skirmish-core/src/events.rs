//! Combat events emitted during a tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{BossPhase, Faction, HostileArchetype};

/// Something notable that happened during a tick. Events are drained with
/// each snapshot and are purely observational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombatEvent {
    ShotFired {
        faction: Faction,
        position: DVec2,
    },
    HostileDestroyed {
        archetype: HostileArchetype,
        position: DVec2,
        score_awarded: u64,
    },
    AlliedDestroyed {
        seq: u64,
        was_alpha: bool,
    },
    ObstacleShattered {
        position: DVec2,
    },
    PlayerDestroyed,
    HyperspaceJump {
        position: DVec2,
        fizzled: bool,
    },
    BossPhaseChanged {
        seq: u64,
        phase: BossPhase,
    },
    BossTeleported {
        seq: u64,
        position: DVec2,
    },
    FieldReset,
}
