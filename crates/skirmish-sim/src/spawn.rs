//! Entity factories.
//!
//! The engine and the reconciliation system are the only callers; all
//! other systems mutate components in place but never spawn or despawn.

use std::f64::consts::PI;

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;

use skirmish_core::components::{
    AlliedShip, BossCore, Collider, FireControl, Health, HostileShip, Intent, Mobility, Obstacle,
    PlayerShip, Position, Projectile, Shield, Velocity,
};
use skirmish_core::config::SimulationConfig;
use skirmish_core::constants::*;
use skirmish_core::enums::{AlliedBehavior, Faction, HostileArchetype, HostileBehavior};
use skirmish_core::geom::heading_vec;

/// Center of the combat field.
pub fn field_center(config: &SimulationConfig) -> DVec2 {
    DVec2::new(config.world_width / 2.0, config.world_height / 2.0)
}

/// Uniformly random in-bounds point.
pub fn random_point<R: Rng>(rng: &mut R, config: &SimulationConfig) -> DVec2 {
    DVec2::new(
        rng.gen::<f64>() * config.world_width,
        rng.gen::<f64>() * config.world_height,
    )
}

/// Random point on one of the four field edges. Hostiles enter from
/// off-screen rather than materializing mid-field.
pub fn edge_point<R: Rng>(rng: &mut R, config: &SimulationConfig) -> DVec2 {
    match rng.gen_range(0..4u8) {
        0 => DVec2::new(rng.gen::<f64>() * config.world_width, 0.0),
        1 => DVec2::new(config.world_width, rng.gen::<f64>() * config.world_height),
        2 => DVec2::new(rng.gen::<f64>() * config.world_width, config.world_height),
        _ => DVec2::new(0.0, rng.gen::<f64>() * config.world_height),
    }
}

fn random_heading<R: Rng>(rng: &mut R) -> f64 {
    rng.gen::<f64>() * 2.0 * PI - PI
}

/// Spawns the player vessel at the field center, facing up.
pub fn spawn_player(world: &mut World, config: &SimulationConfig) -> Entity {
    let heading = -PI / 2.0;
    world.spawn((
        PlayerShip,
        Position(field_center(config)),
        Velocity(DVec2::ZERO),
        Mobility {
            heading,
            target_heading: heading,
            rotation_step: PLAYER_ROTATION_STEP,
            thrust_power: PLAYER_THRUST,
            friction: PLAYER_FRICTION,
            max_speed: PLAYER_MAX_SPEED,
        },
        Collider {
            radius: PLAYER_RADIUS,
        },
        Shield::default(),
        FireControl::new(PLAYER_FIRE_COOLDOWN),
        Intent::default(),
    ))
}

/// Spawns an allied escort at a random in-bounds point.
pub fn spawn_allied<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &SimulationConfig,
    seq: u64,
    is_alpha: bool,
) -> Entity {
    let heading = random_heading(rng);
    let position = random_point(rng, config);
    world.spawn((
        AlliedShip {
            seq,
            is_alpha,
            behavior: AlliedBehavior::Idle,
        },
        Position(position),
        Velocity(DVec2::ZERO),
        Mobility {
            heading,
            target_heading: heading,
            rotation_step: PLAYER_ROTATION_STEP,
            thrust_power: PLAYER_THRUST,
            friction: PLAYER_FRICTION,
            max_speed: PLAYER_MAX_SPEED,
        },
        Collider {
            radius: PLAYER_RADIUS,
        },
        Health::new(ALLIED_MAX_HEALTH),
        Shield::default(),
        FireControl::new(ALLIED_FIRE_COOLDOWN),
        Intent::default(),
    ))
}

/// Spawns a hostile vessel of the given archetype at a field edge.
/// Bosses additionally carry the escalation controller.
pub fn spawn_hostile<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &SimulationConfig,
    seq: u64,
    archetype: HostileArchetype,
) -> Entity {
    let heading = random_heading(rng);
    let position = edge_point(rng, config);
    let entity = world.spawn((
        HostileShip {
            seq,
            archetype,
            behavior: HostileBehavior::Idle,
        },
        Position(position),
        Velocity(DVec2::ZERO),
        Mobility {
            heading,
            target_heading: heading,
            rotation_step: HOSTILE_ROTATION_STEP,
            thrust_power: HOSTILE_THRUST,
            friction: PLAYER_FRICTION,
            max_speed: HOSTILE_MAX_SPEED,
        },
        Collider {
            radius: archetype.radius(),
        },
        Health::new(archetype.max_health()),
        Shield::default(),
        FireControl::new(archetype.fire_rate()),
        Intent::default(),
    ));
    if archetype == HostileArchetype::Boss {
        let _ = world.insert_one(entity, BossCore::default());
    }
    entity
}

/// Spawns a drifting obstacle with a jittered polygonal silhouette.
pub fn spawn_obstacle<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &SimulationConfig,
    seq: u64,
) -> Entity {
    let size = OBSTACLE_SIZE_MIN + rng.gen::<f64>() * OBSTACLE_SIZE_SPAN;
    let speed = OBSTACLE_SPEED_MIN + rng.gen::<f64>() * OBSTACLE_SPEED_SPAN;
    let drift = random_heading(rng);
    let vertex_count = OBSTACLE_VERTEX_MIN + rng.gen_range(0..OBSTACLE_VERTEX_SPAN);
    let vertices: Vec<f64> = (0..vertex_count)
        .map(|_| size / 2.0 + (rng.gen::<f64>() - 0.5) * OBSTACLE_VERTEX_JITTER)
        .collect();
    world.spawn((
        Obstacle {
            seq,
            size,
            rotation: 0.0,
            rotation_speed: (rng.gen::<f64>() - 0.5) * 0.04,
            vertices,
        },
        Position(random_point(rng, config)),
        Velocity(heading_vec(drift) * speed),
        Collider { radius: size / 2.0 },
    ))
}

/// Spawns a projectile already offset to the shooter's muzzle.
pub fn spawn_projectile(world: &mut World, origin: DVec2, angle: f64, faction: Faction) -> Entity {
    let (speed, lifetime) = match faction {
        Faction::Friendly => (FRIENDLY_PROJECTILE_SPEED, FRIENDLY_PROJECTILE_LIFETIME),
        Faction::Hostile => (HOSTILE_PROJECTILE_SPEED, HOSTILE_PROJECTILE_LIFETIME),
    };
    world.spawn((
        Projectile {
            faction,
            angle,
            lifetime,
        },
        Position(origin),
        Velocity(heading_vec(angle) * speed),
        Collider {
            radius: PROJECTILE_RADIUS,
        },
    ))
}
