//! Collision detection and resolution.
//!
//! Circle-circle tests over plain-data snapshots of the world, resolved
//! in a fixed category order so score attribution and removals stay
//! consistent. Shield exemptions differ per category and are applied
//! exactly where listed; hostile shields never stop friendly fire, they
//! only suppress targeting appeal.
//!
//! Returns true when the player was destroyed this tick; the engine
//! runs the field reset.

use glam::DVec2;
use hecs::{Entity, World};

use skirmish_core::components::{
    AlliedShip, Collider, Health, HostileShip, Obstacle, PlayerShip, Position, Projectile, Shield,
};
use skirmish_core::constants::*;
use skirmish_core::enums::{Faction, HostileArchetype};
use skirmish_core::events::CombatEvent;
use skirmish_core::state::TelemetryCounters;

#[derive(Clone, Copy)]
struct Body {
    entity: Entity,
    position: DVec2,
    radius: f64,
}

fn touching(a: &Body, b: &Body) -> bool {
    a.position.distance(b.position) < a.radius + b.radius
}

pub fn run(
    world: &mut World,
    score: &mut u64,
    events: &mut Vec<CombatEvent>,
    telemetry: &mut TelemetryCounters,
    despawn_buffer: &mut Vec<Entity>,
) -> bool {
    let mut friendly_shots: Vec<Body> = Vec::new();
    let mut hostile_shots: Vec<Body> = Vec::new();
    for (entity, (projectile, position, collider)) in world
        .query::<(&Projectile, &Position, &Collider)>()
        .iter()
    {
        let body = Body {
            entity,
            position: position.0,
            radius: collider.radius,
        };
        match projectile.faction {
            Faction::Friendly => friendly_shots.push(body),
            Faction::Hostile => hostile_shots.push(body),
        }
    }

    let obstacles: Vec<Body> = world
        .query::<(&Obstacle, &Position, &Collider)>()
        .iter()
        .map(|(entity, (_, position, collider))| Body {
            entity,
            position: position.0,
            radius: collider.radius,
        })
        .collect();

    let hostiles: Vec<(Body, HostileArchetype)> = world
        .query::<(&HostileShip, &Position, &Collider)>()
        .iter()
        .map(|(entity, (ship, position, collider))| {
            (
                Body {
                    entity,
                    position: position.0,
                    radius: collider.radius,
                },
                ship.archetype,
            )
        })
        .collect();

    let allies: Vec<(Body, u64, bool, bool)> = world
        .query::<(&AlliedShip, &Position, &Collider, &Shield)>()
        .iter()
        .map(|(entity, (ship, position, collider, shield))| {
            (
                Body {
                    entity,
                    position: position.0,
                    radius: collider.radius,
                },
                ship.seq,
                ship.is_alpha,
                shield.active,
            )
        })
        .collect();

    let player: Option<(Body, bool)> = world
        .query::<(&PlayerShip, &Position, &Collider, &Shield)>()
        .iter()
        .map(|(entity, (_, position, collider, shield))| {
            (
                Body {
                    entity,
                    position: position.0,
                    radius: collider.radius,
                },
                shield.active,
            )
        })
        .next();

    despawn_buffer.clear();
    let removed = despawn_buffer;
    let mut player_died = false;

    // 1. Friendly projectiles against obstacles: both removed.
    for shot in &friendly_shots {
        for obstacle in &obstacles {
            if removed.contains(&shot.entity) || removed.contains(&obstacle.entity) {
                continue;
            }
            if touching(shot, obstacle) {
                removed.push(shot.entity);
                removed.push(obstacle.entity);
                *score += SCORE_OBSTACLE;
                telemetry.obstacles_shattered += 1;
                events.push(CombatEvent::ObstacleShattered {
                    position: obstacle.position,
                });
            }
        }
    }

    // 2. Friendly projectiles against hostiles: one hull point per hit.
    for shot in &friendly_shots {
        for (hostile, archetype) in &hostiles {
            if removed.contains(&shot.entity) || removed.contains(&hostile.entity) {
                continue;
            }
            if touching(shot, hostile) {
                removed.push(shot.entity);
                let destroyed = match world.get::<&mut Health>(hostile.entity) {
                    Ok(mut health) => {
                        health.current -= 1;
                        health.current <= 0
                    }
                    Err(_) => false,
                };
                if destroyed {
                    removed.push(hostile.entity);
                    let awarded = archetype.score_value();
                    *score += awarded;
                    telemetry.hostiles_destroyed += 1;
                    events.push(CombatEvent::HostileDestroyed {
                        archetype: *archetype,
                        position: hostile.position,
                        score_awarded: awarded,
                    });
                }
            }
        }
    }

    // 3. Hostile projectiles against the player: shield blocks.
    if let Some((body, shielded)) = &player {
        for shot in &hostile_shots {
            if player_died || removed.contains(&shot.entity) {
                continue;
            }
            if touching(shot, body) {
                removed.push(shot.entity);
                if !*shielded {
                    player_died = true;
                }
            }
        }
    }

    // 4. Hostile projectiles against allied vessels: shield blocks.
    for shot in &hostile_shots {
        for (allied, seq, was_alpha, shielded) in &allies {
            if removed.contains(&shot.entity) || removed.contains(&allied.entity) {
                continue;
            }
            if touching(shot, allied) {
                removed.push(shot.entity);
                if *shielded {
                    continue;
                }
                let destroyed = match world.get::<&mut Health>(allied.entity) {
                    Ok(mut health) => {
                        health.current -= 1;
                        health.current <= 0
                    }
                    Err(_) => false,
                };
                if destroyed {
                    removed.push(allied.entity);
                    telemetry.allies_lost += 1;
                    events.push(CombatEvent::AlliedDestroyed {
                        seq: *seq,
                        was_alpha: *was_alpha,
                    });
                }
            }
        }
    }

    // 5. Player contact with obstacles and hostiles: lethal unshielded,
    // inert while shielded.
    if let Some((body, shielded)) = &player {
        if !*shielded && !player_died {
            let rammed = obstacles
                .iter()
                .any(|o| !removed.contains(&o.entity) && touching(body, o))
                || hostiles
                    .iter()
                    .any(|(h, _)| !removed.contains(&h.entity) && touching(body, h));
            if rammed {
                player_died = true;
            }
        }
    }

    if player_died {
        telemetry.player_deaths += 1;
        events.push(CombatEvent::PlayerDestroyed);
    }

    for entity in removed.drain(..) {
        let _ = world.despawn(entity);
    }
    player_died
}
