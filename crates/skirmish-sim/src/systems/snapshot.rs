//! Snapshot construction.
//!
//! Assembles the read-only view of the world handed to the presentation
//! layer after each tick. Vessel lists are sorted by spawn sequence so
//! the serialized form is stable across runs with the same seed.

use hecs::World;

use skirmish_core::components::{
    AlliedShip, BossCore, Health, HostileShip, Mobility, Obstacle, PlayerShip, Position,
    Projectile, Shield, Velocity,
};
use skirmish_core::enums::HostileArchetype;
use skirmish_core::events::CombatEvent;
use skirmish_core::state::{
    AlliedView, BossView, GameSnapshot, HostileView, LiveCounts, ObstacleView, PlayerView,
    ProjectileView, TelemetryCounters,
};
use skirmish_core::types::SimTime;

pub fn build(
    world: &World,
    time: SimTime,
    score: u64,
    telemetry: TelemetryCounters,
    events: Vec<CombatEvent>,
) -> GameSnapshot {
    let player = world
        .query::<(&PlayerShip, &Position, &Velocity, &Mobility, &Shield)>()
        .iter()
        .map(|(_, (_, position, velocity, mobility, shield))| PlayerView {
            position: position.0,
            velocity: velocity.0,
            heading: mobility.heading,
            shield_active: shield.active,
        })
        .next();

    let mut allies: Vec<AlliedView> = world
        .query::<(&AlliedShip, &Position, &Velocity, &Mobility, &Health, &Shield)>()
        .iter()
        .map(|(_, (ship, position, velocity, mobility, health, shield))| AlliedView {
            seq: ship.seq,
            position: position.0,
            velocity: velocity.0,
            heading: mobility.heading,
            health: health.current,
            max_health: health.max,
            is_alpha: ship.is_alpha,
            behavior: ship.behavior,
            shield_active: shield.active,
        })
        .collect();
    allies.sort_by_key(|a| a.seq);

    let mut hostiles: Vec<HostileView> = world
        .query::<(
            &HostileShip,
            &Position,
            &Velocity,
            &Mobility,
            &Health,
            &Shield,
            Option<&BossCore>,
        )>()
        .iter()
        .map(
            |(_, (ship, position, velocity, mobility, health, shield, boss))| HostileView {
                seq: ship.seq,
                archetype: ship.archetype,
                position: position.0,
                velocity: velocity.0,
                heading: mobility.heading,
                health: health.current,
                max_health: health.max,
                behavior: ship.behavior,
                shield_active: shield.active,
                boss: boss.map(|b| BossView {
                    phase: b.phase,
                    attack_pattern: b.attack_pattern,
                    transitioning: b.transition_timer > 0,
                }),
            },
        )
        .collect();
    hostiles.sort_by_key(|h| h.seq);

    let mut obstacles: Vec<ObstacleView> = world
        .query::<(&Obstacle, &Position, &Velocity)>()
        .iter()
        .map(|(_, (obstacle, position, velocity))| ObstacleView {
            seq: obstacle.seq,
            position: position.0,
            velocity: velocity.0,
            size: obstacle.size,
            rotation: obstacle.rotation,
            vertices: obstacle.vertices.clone(),
        })
        .collect();
    obstacles.sort_by_key(|o| o.seq);

    let projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (projectile, position))| ProjectileView {
            faction: projectile.faction,
            position: position.0,
            angle: projectile.angle,
            lifetime: projectile.lifetime,
        })
        .collect();

    let mut counts = LiveCounts {
        allied: allies.len() as u32,
        ..Default::default()
    };
    for hostile in &hostiles {
        match hostile.archetype {
            HostileArchetype::Basic => counts.basic += 1,
            HostileArchetype::Advanced => counts.advanced += 1,
            HostileArchetype::Boss => counts.boss += 1,
        }
    }

    GameSnapshot {
        time,
        score,
        player,
        allies,
        hostiles,
        obstacles,
        projectiles,
        counts,
        telemetry,
        events,
    }
}
