//! Per-tick behavior arbitration for hostile and allied vessels.
//!
//! Pure functions over plain data. Priorities are fixed: surviving
//! incoming fire beats obstacle avoidance, which beats combat, which
//! beats idle wandering. The caller applies the returned heading,
//! thrust, and fire request to the entity.

use std::f64::consts::PI;

use glam::DVec2;
use rand::Rng;

use skirmish_core::constants::*;
use skirmish_core::enums::{AlliedBehavior, HostileArchetype, HostileBehavior};
use skirmish_core::geom::{angle_to, normalize_angle};

use crate::targeting::{find_best_target, predict_lead, TargetCandidate};

/// An incoming projectile as seen by the evasion check.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileThreat {
    pub position: DVec2,
    pub angle: f64,
}

/// A drifting obstacle as seen by allied avoidance and gunnery.
#[derive(Debug, Clone, Copy)]
pub struct ObstacleInfo {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
}

/// A hostile vessel as seen by allied gunnery.
#[derive(Debug, Clone, Copy)]
pub struct HostileTarget {
    pub position: DVec2,
    pub velocity: DVec2,
}

/// Situation of one hostile vessel at the start of a tick.
pub struct HostileContext<'a> {
    pub position: DVec2,
    pub heading: f64,
    pub archetype: HostileArchetype,
    pub health_ratio: f64,
    /// Prospective targets, player first.
    pub candidates: &'a [TargetCandidate],
    /// Friendly projectiles currently in flight.
    pub threats: &'a [ProjectileThreat],
    /// Positions of the other hostile vessels.
    pub neighbors: &'a [DVec2],
    pub world_width: f64,
    pub world_height: f64,
}

/// Decided course of action for one hostile vessel.
#[derive(Debug, Clone, Copy)]
pub struct HostileDecision {
    pub behavior: HostileBehavior,
    pub target_heading: f64,
    /// Thrust power for this tick, zero for none.
    pub thrust: f64,
    /// Aim heading to fire along, if in firing position.
    pub fire: Option<f64>,
}

/// Returns the first projectile close enough and inbound enough to
/// warrant evasive action.
fn imminent_threat(
    position: DVec2,
    threats: &[ProjectileThreat],
) -> Option<ProjectileThreat> {
    threats.iter().copied().find(|t| {
        if t.position.distance(position) > HOSTILE_EVASION_RADIUS {
            return false;
        }
        let bearing = angle_to(t.position, position);
        normalize_angle(bearing - t.angle).abs() < EVASION_THREAT_CONE
    })
}

/// Arbitrates the behavior of one hostile vessel.
pub fn decide_hostile<R: Rng>(ctx: &HostileContext, rng: &mut R) -> HostileDecision {
    let is_boss = ctx.archetype == HostileArchetype::Boss;

    let best = find_best_target(ctx.position, ctx.candidates, HOSTILE_DETECTION_RADIUS);

    // Firing is evaluated independently of the movement arbitration:
    // a target in range whose solution falls inside the forward cone
    // draws fire whatever the hull is doing with its heading, so an
    // evading or retreating vessel keeps shooting.
    let mut lead = None;
    let mut fire = None;
    if let Some(target) = &best {
        let solution = predict_lead(
            ctx.position,
            target.position,
            target.velocity,
            HOSTILE_PROJECTILE_SPEED,
            ctx.world_width,
            ctx.world_height,
        );
        let in_range = target.distance < HOSTILE_ATTACK_RANGE;
        let in_cone = normalize_angle(solution - ctx.heading).abs() < FIRING_CONE;
        fire = (in_range && in_cone).then_some(solution);
        lead = Some(solution);
    }

    // Incoming fire trumps everything. Break perpendicular to the
    // round's flight path with some jitter so evasion is not exploitable.
    if let Some(threat) = imminent_threat(ctx.position, ctx.threats) {
        let jitter = (rng.gen::<f64>() - 0.5) * (PI / 2.0);
        return HostileDecision {
            behavior: HostileBehavior::Evade,
            target_heading: normalize_angle(threat.angle + PI / 2.0 + jitter),
            thrust: 1.0,
            fire,
        };
    }

    // Badly damaged non-boss hulls disengage and run.
    if !is_boss && ctx.health_ratio < HOSTILE_RETREAT_RATIO {
        if let Some(target) = &best {
            let away = angle_to(target.position, ctx.position);
            let thrust = if rng.gen::<f64>() < HOSTILE_RETREAT_THRUST_CHANCE {
                HOSTILE_RETREAT_THRUST_POWER
            } else {
                0.0
            };
            return HostileDecision {
                behavior: HostileBehavior::Retreat,
                target_heading: away,
                thrust,
                fire,
            };
        }
    }

    if let Some(target) = best {
        let in_range = target.distance < HOSTILE_ATTACK_RANGE;
        let (behavior, mut target_heading) = if in_range {
            if !is_boss && ctx.health_ratio < HOSTILE_EVADE_RATIO {
                // Degraded but still fighting: strafe across the
                // target's line of fire instead of boring straight in.
                let side = if rng.gen::<bool>() { PI / 2.0 } else { -PI / 2.0 };
                let bearing = angle_to(ctx.position, target.position);
                (HostileBehavior::Evade, normalize_angle(bearing + side))
            } else {
                (HostileBehavior::Attack, lead.unwrap_or(ctx.heading))
            }
        } else {
            (HostileBehavior::Pursuit, angle_to(ctx.position, target.position))
        };

        // Advanced hulls and bosses keep formation spacing.
        if ctx.archetype != HostileArchetype::Basic {
            if let Some(crowded) = ctx
                .neighbors
                .iter()
                .find(|n| n.distance(ctx.position) < HOSTILE_SEPARATION_DISTANCE)
            {
                target_heading = angle_to(*crowded, ctx.position);
            }
        }

        let thrust = if rng.gen::<f64>() < HOSTILE_THRUST_CHANCE {
            1.0
        } else {
            0.0
        };
        return HostileDecision {
            behavior,
            target_heading,
            thrust,
            fire,
        };
    }

    // Nothing in sensor range: wander.
    let target_heading = if rng.gen::<f64>() < IDLE_WANDER_CHANCE {
        rng.gen::<f64>() * 2.0 * PI - PI
    } else {
        ctx.heading
    };
    let thrust = if rng.gen::<f64>() < ALLIED_THRUST_FREQUENCY {
        1.0
    } else {
        0.0
    };
    HostileDecision {
        behavior: HostileBehavior::Idle,
        target_heading,
        thrust,
        fire: None,
    }
}

/// Situation of one allied vessel at the start of a tick.
pub struct AlliedContext<'a> {
    pub position: DVec2,
    pub heading: f64,
    pub hostiles: &'a [HostileTarget],
    pub obstacles: &'a [ObstacleInfo],
    pub world_width: f64,
    pub world_height: f64,
}

/// Decided course of action for one allied vessel.
#[derive(Debug, Clone, Copy)]
pub struct AlliedDecision {
    pub behavior: AlliedBehavior,
    pub target_heading: f64,
    pub thrust: f64,
    pub fire: Option<f64>,
}

fn nearest_obstacle(position: DVec2, obstacles: &[ObstacleInfo]) -> Option<(ObstacleInfo, f64)> {
    obstacles
        .iter()
        .map(|o| (*o, o.position.distance(position)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn nearest_hostile(position: DVec2, hostiles: &[HostileTarget]) -> Option<(HostileTarget, f64)> {
    hostiles
        .iter()
        .map(|h| (*h, h.position.distance(position)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Arbitrates the behavior of one allied vessel.
pub fn decide_allied<R: Rng>(ctx: &AlliedContext, rng: &mut R) -> AlliedDecision {
    let obstacle = nearest_obstacle(ctx.position, ctx.obstacles);

    // Obstacles ahead get dodged before anything else.
    if let Some((obs, dist)) = obstacle {
        if dist < ALLIED_OBSTACLE_DETECTION_RADIUS {
            let bearing = angle_to(ctx.position, obs.position);
            if normalize_angle(bearing - ctx.heading).abs() < ALLIED_AVOIDANCE_CONE {
                return AlliedDecision {
                    behavior: AlliedBehavior::Avoiding,
                    target_heading: angle_to(obs.position, ctx.position),
                    thrust: 0.5,
                    fire: None,
                };
            }
        }
    }

    let baseline_thrust = if rng.gen::<f64>() < ALLIED_THRUST_FREQUENCY {
        1.0
    } else {
        0.0
    };

    // Engage the nearest hostile in sensor range.
    if let Some((hostile, dist)) = nearest_hostile(ctx.position, ctx.hostiles) {
        if dist < ALLIED_ENEMY_DETECTION_RADIUS {
            // Lead prediction only applies inside firing range; beyond
            // it the vessel steers on the plain bearing.
            let aim = if dist <= ALLIED_ENEMY_FIRING_RANGE {
                predict_lead(
                    ctx.position,
                    hostile.position,
                    hostile.velocity,
                    FRIENDLY_PROJECTILE_SPEED,
                    ctx.world_width,
                    ctx.world_height,
                )
            } else {
                angle_to(ctx.position, hostile.position)
            };
            let in_cone = normalize_angle(aim - ctx.heading).abs() < FIRING_CONE;
            let fire = (dist <= ALLIED_ENEMY_FIRING_RANGE && in_cone).then_some(aim);
            return AlliedDecision {
                behavior: AlliedBehavior::Engaging,
                target_heading: aim,
                thrust: baseline_thrust,
                fire,
            };
        }
    }

    // No hostiles: clear obstacles in the firing arc. A very close
    // obstacle is shot at regardless of the arc.
    if let Some((obs, dist)) = obstacle {
        if dist < ALLIED_OBSTACLE_FIRING_RANGE {
            let lead = predict_lead(
                ctx.position,
                obs.position,
                obs.velocity,
                FRIENDLY_PROJECTILE_SPEED,
                ctx.world_width,
                ctx.world_height,
            );
            let in_cone = normalize_angle(lead - ctx.heading).abs() < FIRING_CONE;
            if in_cone || dist < ALLIED_IMMINENT_THREAT_DISTANCE {
                return AlliedDecision {
                    behavior: AlliedBehavior::Clearing,
                    target_heading: lead,
                    thrust: baseline_thrust,
                    fire: Some(lead),
                };
            }
        }
    }

    let target_heading = if rng.gen::<f64>() < IDLE_WANDER_CHANCE {
        rng.gen::<f64>() * 2.0 * PI - PI
    } else {
        ctx.heading
    };
    AlliedDecision {
        behavior: AlliedBehavior::Idle,
        target_heading,
        thrust: baseline_thrust,
        fire: None,
    }
}
