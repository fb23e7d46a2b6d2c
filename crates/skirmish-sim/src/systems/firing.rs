//! Firing system.
//!
//! Decrements weapon cooldowns, expands fire intents into archetype
//! patterns (single, spread, burst, rapid, circular), advances burst
//! sub-states, and spawns the resulting projectiles.

use std::f64::consts::PI;

use glam::DVec2;
use hecs::World;
use rand::Rng;

use skirmish_core::components::{
    AlliedShip, BossCore, BurstState, FireControl, HostileShip, Intent, PlayerShip, Position,
};
use skirmish_core::config::SimulationConfig;
use skirmish_core::constants::*;
use skirmish_core::enums::{AttackPattern, Faction, HostileArchetype};
use skirmish_core::events::CombatEvent;
use skirmish_core::geom::{heading_vec, normalize_angle, wrap_point};
use skirmish_core::state::TelemetryCounters;

use crate::spawn::spawn_projectile;

/// A projectile to spawn once all queries are released.
struct Shot {
    origin: DVec2,
    angle: f64,
    faction: Faction,
}

/// N angles evenly spaced across `cone`, centered on `aim`.
fn spread_angles(aim: f64, cone: f64, n: u32) -> Vec<f64> {
    if n <= 1 {
        return vec![aim];
    }
    (0..n)
        .map(|i| normalize_angle(aim - cone / 2.0 + cone * i as f64 / (n - 1) as f64))
        .collect()
}

/// Advances an active burst by one tick, returning the angle of the
/// shot due this tick, if any. The first shot fires on the tick the
/// burst starts; the sub-state clears itself after `count * 2` ticks.
pub(crate) fn advance_burst(burst: &mut BurstState) -> Option<f64> {
    if !burst.active {
        return None;
    }
    let mut shot = None;
    if burst.timer % BURST_SHOT_INTERVAL == 0 {
        let idx = burst.timer / BURST_SHOT_INTERVAL;
        if idx < burst.count {
            let angle = if burst.count > 1 {
                burst.base_angle - burst.spread / 2.0
                    + burst.spread * idx as f64 / (burst.count - 1) as f64
            } else {
                burst.base_angle
            };
            shot = Some(normalize_angle(angle));
        }
    }
    burst.timer += 1;
    if burst.timer >= burst.count * BURST_SHOT_INTERVAL {
        burst.active = false;
    }
    shot
}

/// Pattern an advanced hull opens with, resolved from a single draw:
/// burst below 0.3, spread below 0.5, plain fire otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdvancedPattern {
    Burst,
    Spread,
    Normal,
}

pub(crate) fn advanced_pattern(roll: f64) -> AdvancedPattern {
    if roll < ADVANCED_BURST_CHANCE {
        AdvancedPattern::Burst
    } else if roll < ADVANCED_BURST_CHANCE + ADVANCED_SPREAD_CHANCE {
        AdvancedPattern::Spread
    } else {
        AdvancedPattern::Normal
    }
}

pub(crate) fn start_burst(burst: &mut BurstState, aim: f64, count: u32) {
    burst.active = true;
    burst.timer = 0;
    burst.count = count;
    burst.base_angle = aim;
    burst.spread = BURST_SPREAD;
}

pub fn run<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &SimulationConfig,
    events: &mut Vec<CombatEvent>,
    telemetry: &mut TelemetryCounters,
) {
    let mut shots: Vec<Shot> = Vec::new();

    // Player: triple-barrel volley, no pattern state.
    for (_entity, (_player, position, fire_control, intent)) in
        world.query_mut::<(&PlayerShip, &Position, &mut FireControl, &mut Intent)>()
    {
        fire_control.cooldown = fire_control.cooldown.saturating_sub(1);
        if let Some(aim) = intent.fire.take() {
            if fire_control.cooldown == 0 {
                for offset in [-PLAYER_BARREL_ANGLE, 0.0, PLAYER_BARREL_ANGLE] {
                    let angle = normalize_angle(aim + offset);
                    shots.push(Shot {
                        origin: position.0 + heading_vec(angle) * PLAYER_SIZE,
                        angle,
                        faction: Faction::Friendly,
                    });
                }
                fire_control.cooldown = fire_control.fire_rate;
                events.push(CombatEvent::ShotFired {
                    faction: Faction::Friendly,
                    position: position.0,
                });
            }
        }
    }

    // Allied escorts: plain single shots on a short cooldown.
    for (_entity, (_ship, position, fire_control, intent)) in
        world.query_mut::<(&AlliedShip, &Position, &mut FireControl, &mut Intent)>()
    {
        fire_control.cooldown = fire_control.cooldown.saturating_sub(1);
        if let Some(aim) = intent.fire.take() {
            if fire_control.cooldown == 0 {
                shots.push(Shot {
                    origin: position.0 + heading_vec(aim) * PLAYER_SIZE,
                    angle: aim,
                    faction: Faction::Friendly,
                });
                fire_control.cooldown = fire_control.fire_rate;
                events.push(CombatEvent::ShotFired {
                    faction: Faction::Friendly,
                    position: position.0,
                });
            }
        }
    }

    // Hostiles: archetype pattern selection plus burst advancement.
    for (_entity, (ship, position, fire_control, intent, boss)) in world.query_mut::<(
        &HostileShip,
        &Position,
        &mut FireControl,
        &mut Intent,
        Option<&BossCore>,
    )>() {
        fire_control.cooldown = fire_control.cooldown.saturating_sub(1);
        let size = ship.archetype.size();
        let base = fire_control.fire_rate;

        if let Some(aim) = intent.fire.take() {
            if fire_control.cooldown == 0 && !fire_control.burst.active {
                match ship.archetype {
                    HostileArchetype::Basic => {
                        if rng.gen::<f64>() < BASIC_BURST_CHANCE {
                            start_burst(&mut fire_control.burst, aim, 2);
                        } else {
                            shots.push(Shot {
                                origin: position.0 + heading_vec(aim) * size,
                                angle: aim,
                                faction: Faction::Hostile,
                            });
                        }
                        fire_control.cooldown = base;
                    }
                    HostileArchetype::Advanced => match advanced_pattern(rng.gen::<f64>()) {
                        AdvancedPattern::Burst => {
                            start_burst(&mut fire_control.burst, aim, 3);
                            fire_control.cooldown = base;
                        }
                        AdvancedPattern::Spread => {
                            for angle in spread_angles(aim, SPREAD_CONE_ADVANCED, 3) {
                                shots.push(Shot {
                                    origin: position.0 + heading_vec(angle) * size,
                                    angle,
                                    faction: Faction::Hostile,
                                });
                            }
                            fire_control.cooldown =
                                (base as f64 * SPREAD_COOLDOWN_FACTOR) as u32;
                        }
                        AdvancedPattern::Normal => {
                            shots.push(Shot {
                                origin: position.0 + heading_vec(aim) * size,
                                angle: aim,
                                faction: Faction::Hostile,
                            });
                            fire_control.cooldown = base;
                        }
                    },
                    HostileArchetype::Boss => {
                        let pattern = boss.map_or(AttackPattern::Normal, |b| b.attack_pattern);
                        match pattern {
                            AttackPattern::Normal => {
                                shots.push(Shot {
                                    origin: position.0 + heading_vec(aim) * size,
                                    angle: aim,
                                    faction: Faction::Hostile,
                                });
                                fire_control.cooldown = base;
                            }
                            AttackPattern::Spread => {
                                for angle in
                                    spread_angles(aim, SPREAD_CONE_BOSS, SPREAD_COUNT_BOSS)
                                {
                                    shots.push(Shot {
                                        origin: position.0 + heading_vec(angle) * size,
                                        angle,
                                        faction: Faction::Hostile,
                                    });
                                }
                                fire_control.cooldown =
                                    (base as f64 * SPREAD_COOLDOWN_FACTOR) as u32;
                            }
                            AttackPattern::Rapid => {
                                shots.push(Shot {
                                    origin: position.0 + heading_vec(aim) * size,
                                    angle: aim,
                                    faction: Faction::Hostile,
                                });
                                fire_control.rapid_count += 1;
                                if fire_control.rapid_count >= RAPID_BURST_SIZE {
                                    fire_control.rapid_count = 0;
                                    fire_control.cooldown =
                                        (base as f64 * HEAVY_COOLDOWN_FACTOR) as u32;
                                } else {
                                    fire_control.cooldown = RAPID_SHOT_COOLDOWN;
                                }
                            }
                            AttackPattern::Circular => {
                                for i in 0..CIRCULAR_SHOT_COUNT {
                                    let angle = normalize_angle(
                                        aim + 2.0 * PI * i as f64 / CIRCULAR_SHOT_COUNT as f64,
                                    );
                                    shots.push(Shot {
                                        origin: position.0 + heading_vec(angle) * size,
                                        angle,
                                        faction: Faction::Hostile,
                                    });
                                }
                                fire_control.cooldown =
                                    (base as f64 * HEAVY_COOLDOWN_FACTOR) as u32;
                            }
                        }
                    }
                }
                events.push(CombatEvent::ShotFired {
                    faction: Faction::Hostile,
                    position: position.0,
                });
            }
        }

        if let Some(angle) = advance_burst(&mut fire_control.burst) {
            shots.push(Shot {
                origin: position.0 + heading_vec(angle) * size,
                angle,
                faction: Faction::Hostile,
            });
        }
    }

    telemetry.shots_fired += shots.len() as u64;
    for shot in shots {
        let origin = wrap_point(shot.origin, config.world_width, config.world_height);
        spawn_projectile(world, origin, shot.angle, shot.faction);
    }
}
