//! Live-tunable simulation configuration.
//!
//! The configuration is polled at the top of every tick; population counts
//! are reconciled idempotently against the live world.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Tactical-extension toggles. Accepted and carried so external layers
/// can round-trip them; the baseline engine does not act on them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TacticsConfig {
    pub formation: FormationType,
    pub auto_role_assignment: bool,
    pub adaptive_formation: bool,
    pub multi_target: bool,
    pub escort_mode: bool,
}

/// Formation shape requested by the tactical extension layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationType {
    #[default]
    None,
    Line,
    Wedge,
    Circle,
}

/// Knobs governing the simulated engagement. All fields may change
/// between ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Desired allied escort count.
    pub allied_count: u32,
    /// Desired non-boss hostile count.
    pub hostile_count: u32,
    /// Desired boss count.
    pub boss_count: u32,
    /// Desired drifting-obstacle count.
    pub obstacle_count: u32,
    pub world_width: f64,
    pub world_height: f64,
    /// When false the player vessel is absent from the field.
    pub player_active: bool,
    /// Pins the player to the field center with zero velocity.
    pub anchor_player: bool,
    /// Pins the alpha allied vessel to the field center.
    pub anchor_alpha: bool,
    /// Pass-through tactical toggles; see [`TacticsConfig`].
    pub tactics: TacticsConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            allied_count: 2,
            hostile_count: 3,
            boss_count: 0,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            player_active: true,
            anchor_player: false,
            anchor_alpha: false,
            tactics: TacticsConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Returns a copy with out-of-range values clamped to supported
    /// bounds, logging each adjustment.
    pub fn sanitized(&self) -> SimulationConfig {
        let mut cfg = self.clone();
        if cfg.allied_count > SHIP_COUNT_MAX {
            log::warn!("allied_count {} clamped to {}", cfg.allied_count, SHIP_COUNT_MAX);
            cfg.allied_count = SHIP_COUNT_MAX;
        }
        if cfg.hostile_count > SHIP_COUNT_MAX {
            log::warn!("hostile_count {} clamped to {}", cfg.hostile_count, SHIP_COUNT_MAX);
            cfg.hostile_count = SHIP_COUNT_MAX;
        }
        if cfg.boss_count > SHIP_COUNT_MAX {
            log::warn!("boss_count {} clamped to {}", cfg.boss_count, SHIP_COUNT_MAX);
            cfg.boss_count = SHIP_COUNT_MAX;
        }
        if cfg.obstacle_count > OBSTACLE_COUNT_MAX {
            log::warn!(
                "obstacle_count {} clamped to {}",
                cfg.obstacle_count,
                OBSTACLE_COUNT_MAX
            );
            cfg.obstacle_count = OBSTACLE_COUNT_MAX;
        }
        if !cfg.world_width.is_finite() || cfg.world_width < WORLD_DIM_MIN {
            log::warn!("world_width {} clamped to {}", cfg.world_width, WORLD_DIM_MIN);
            cfg.world_width = WORLD_DIM_MIN;
        } else if cfg.world_width > WORLD_DIM_MAX {
            log::warn!("world_width {} clamped to {}", cfg.world_width, WORLD_DIM_MAX);
            cfg.world_width = WORLD_DIM_MAX;
        }
        if !cfg.world_height.is_finite() || cfg.world_height < WORLD_DIM_MIN {
            log::warn!("world_height {} clamped to {}", cfg.world_height, WORLD_DIM_MIN);
            cfg.world_height = WORLD_DIM_MIN;
        } else if cfg.world_height > WORLD_DIM_MAX {
            log::warn!("world_height {} clamped to {}", cfg.world_height, WORLD_DIM_MAX);
            cfg.world_height = WORLD_DIM_MAX;
        }
        cfg
    }
}
