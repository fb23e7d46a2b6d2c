//! AI decision system.
//!
//! Builds plain-data views of the world, runs the pure decision
//! functions from `skirmish_ai`, and writes the resulting headings,
//! thrust, and fire requests back onto the entities. Vessels are
//! processed in spawn order so RNG consumption is stable.

use hecs::{Entity, World};
use rand::Rng;

use skirmish_ai::decision::{
    decide_allied, decide_hostile, AlliedContext, HostileContext, HostileTarget, ObstacleInfo,
    ProjectileThreat,
};
use skirmish_ai::targeting::{TargetCandidate, TargetId};
use skirmish_core::components::{
    AlliedShip, BossCore, Collider, Health, HostileShip, Intent, Mobility, Obstacle, PlayerShip,
    Position, Projectile, Shield, Velocity,
};
use skirmish_core::config::SimulationConfig;
use skirmish_core::enums::Faction;
use skirmish_core::geom::normalize_angle;

pub fn run<R: Rng>(world: &mut World, rng: &mut R, config: &SimulationConfig) {
    // Target candidates: player first, then allied in creation order,
    // so desirability ties resolve the same way every tick.
    let mut candidates: Vec<TargetCandidate> = Vec::new();
    for (_entity, (_player, position, velocity, shield)) in world
        .query::<(&PlayerShip, &Position, &Velocity, &Shield)>()
        .iter()
    {
        candidates.push(TargetCandidate {
            id: TargetId::Player,
            position: position.0,
            velocity: velocity.0,
            health_ratio: 1.0,
            is_alpha: false,
            shield_active: shield.active,
        });
    }
    let mut allied_candidates: Vec<TargetCandidate> = world
        .query::<(&AlliedShip, &Position, &Velocity, &Health, &Shield)>()
        .iter()
        .map(|(_entity, (ship, position, velocity, health, shield))| TargetCandidate {
            id: TargetId::Allied(ship.seq),
            position: position.0,
            velocity: velocity.0,
            health_ratio: health.ratio(),
            is_alpha: ship.is_alpha,
            shield_active: shield.active,
        })
        .collect();
    allied_candidates.sort_by_key(|c| match c.id {
        TargetId::Allied(seq) => seq,
        TargetId::Player => 0,
    });
    candidates.extend(allied_candidates);

    let threats: Vec<ProjectileThreat> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (projectile, _))| projectile.faction == Faction::Friendly)
        .map(|(_, (projectile, position))| ProjectileThreat {
            position: position.0,
            angle: projectile.angle,
        })
        .collect();

    let obstacles: Vec<ObstacleInfo> = world
        .query::<(&Obstacle, &Position, &Velocity, &Collider)>()
        .iter()
        .map(|(_, (_, position, velocity, collider))| ObstacleInfo {
            position: position.0,
            velocity: velocity.0,
            radius: collider.radius,
        })
        .collect();

    let mut hostile_targets: Vec<(u64, HostileTarget)> = world
        .query::<(&HostileShip, &Position, &Velocity)>()
        .iter()
        .map(|(_, (ship, position, velocity))| {
            (
                ship.seq,
                HostileTarget {
                    position: position.0,
                    velocity: velocity.0,
                },
            )
        })
        .collect();
    hostile_targets.sort_by_key(|(seq, _)| *seq);

    run_hostiles(world, rng, config, &candidates, &threats, &hostile_targets);
    run_allied(world, rng, config, &hostile_targets, &obstacles);
}

fn run_hostiles<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &SimulationConfig,
    candidates: &[TargetCandidate],
    threats: &[ProjectileThreat],
    hostile_targets: &[(u64, HostileTarget)],
) {
    struct Pending {
        entity: Entity,
        seq: u64,
        position: glam::DVec2,
        heading: f64,
        health_ratio: f64,
        archetype: skirmish_core::enums::HostileArchetype,
        skip: bool,
        jitter: Option<f64>,
    }

    let mut pending: Vec<Pending> = world
        .query::<(
            &HostileShip,
            &Position,
            &Mobility,
            &Health,
            Option<&BossCore>,
        )>()
        .iter()
        .map(|(entity, (ship, position, mobility, health, boss))| Pending {
            entity,
            seq: ship.seq,
            position: position.0,
            heading: mobility.heading,
            health_ratio: health.ratio(),
            archetype: ship.archetype,
            skip: boss.map_or(false, |b| b.teleported),
            jitter: boss.and_then(|b| b.pending_jitter),
        })
        .collect();
    pending.sort_by_key(|p| p.seq);

    for p in pending {
        if p.skip {
            continue;
        }
        let neighbors: Vec<glam::DVec2> = hostile_targets
            .iter()
            .filter(|(seq, _)| *seq != p.seq)
            .map(|(_, t)| t.position)
            .collect();
        let ctx = HostileContext {
            position: p.position,
            heading: p.heading,
            archetype: p.archetype,
            health_ratio: p.health_ratio,
            candidates,
            threats,
            neighbors: &neighbors,
            world_width: config.world_width,
            world_height: config.world_height,
        };
        let decision = decide_hostile(&ctx, rng);

        // Phase-3 erratic jitter overrides the decided course but not
        // the rest of the decision.
        let target_heading = match p.jitter {
            Some(j) => normalize_angle(decision.target_heading + j),
            None => decision.target_heading,
        };

        if let Ok(mut ship) = world.get::<&mut HostileShip>(p.entity) {
            ship.behavior = decision.behavior;
        }
        if let Ok(mut mobility) = world.get::<&mut Mobility>(p.entity) {
            mobility.target_heading = target_heading;
        }
        if let Ok(mut intent) = world.get::<&mut Intent>(p.entity) {
            intent.thrust = decision.thrust;
            intent.fire = decision.fire;
        }
    }
}

fn run_allied<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &SimulationConfig,
    hostile_targets: &[(u64, HostileTarget)],
    obstacles: &[ObstacleInfo],
) {
    let hostiles: Vec<HostileTarget> = hostile_targets.iter().map(|(_, t)| *t).collect();

    let mut pending: Vec<(Entity, u64, glam::DVec2, f64)> = world
        .query::<(&AlliedShip, &Position, &Mobility)>()
        .iter()
        .map(|(entity, (ship, position, mobility))| {
            (entity, ship.seq, position.0, mobility.heading)
        })
        .collect();
    pending.sort_by_key(|(_, seq, _, _)| *seq);

    for (entity, _seq, position, heading) in pending {
        let ctx = AlliedContext {
            position,
            heading,
            hostiles: &hostiles,
            obstacles,
            world_width: config.world_width,
            world_height: config.world_height,
        };
        let decision = decide_allied(&ctx, rng);

        if let Ok(mut ship) = world.get::<&mut AlliedShip>(entity) {
            ship.behavior = decision.behavior;
        }
        if let Ok(mut mobility) = world.get::<&mut Mobility>(entity) {
            mobility.target_heading = decision.target_heading;
        }
        if let Ok(mut intent) = world.get::<&mut Intent>(entity) {
            intent.thrust = decision.thrust;
            intent.fire = decision.fire;
        }
    }
}
