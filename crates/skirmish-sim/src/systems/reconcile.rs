//! Population reconciliation.
//!
//! Runs at the top of every tick and converges the live world onto the
//! polled configuration. Idempotent: with an unchanged configuration it
//! spawns and removes nothing. Surplus vessels are removed newest-first
//! so long-lived ships survive a count decrease.

use hecs::{Entity, World};
use rand::Rng;

use skirmish_core::components::{AlliedShip, HostileShip, Obstacle, PlayerShip};
use skirmish_core::config::SimulationConfig;
use skirmish_core::enums::HostileArchetype;

use crate::spawn;

/// Score above which reinforcements may spawn as advanced hulls.
const ADVANCED_SPAWN_SCORE: u64 = 1000;

/// Chance that a post-threshold reinforcement is advanced.
const ADVANCED_SPAWN_CHANCE: f64 = 0.5;

pub fn run<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &SimulationConfig,
    next_seq: &mut u64,
    score: u64,
    despawn_buffer: &mut Vec<Entity>,
) {
    reconcile_player(world, config, despawn_buffer);
    reconcile_allied(world, rng, config, next_seq, despawn_buffer);
    reconcile_hostiles(world, rng, config, next_seq, score, despawn_buffer);
    reconcile_obstacles(world, rng, config, next_seq, despawn_buffer);
}

fn reconcile_player(world: &mut World, config: &SimulationConfig, despawn_buffer: &mut Vec<Entity>) {
    let live: Vec<Entity> = world
        .query::<&PlayerShip>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    if config.player_active && live.is_empty() {
        spawn::spawn_player(world, config);
        log::debug!("player vessel spawned");
    } else if !config.player_active {
        despawn_buffer.extend(live);
        flush(world, despawn_buffer);
    }
}

fn reconcile_allied<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &SimulationConfig,
    next_seq: &mut u64,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut live: Vec<(Entity, u64, bool)> = world
        .query::<&AlliedShip>()
        .iter()
        .map(|(entity, ship)| (entity, ship.seq, ship.is_alpha))
        .collect();
    live.sort_by_key(|(_, seq, _)| *seq);

    let want = config.allied_count as usize;
    if live.len() > want {
        // Newest-first removal keeps the veterans.
        for (entity, _, _) in live.drain(want..).rev() {
            despawn_buffer.push(entity);
        }
        flush(world, despawn_buffer);
    }

    // Exactly one alpha, and veterans take precedence over recruits:
    // the oldest survivor inherits the flag before any spawning fills
    // the pool back up.
    let mut has_alpha = live.iter().any(|(_, _, alpha)| *alpha);
    if !has_alpha {
        if let Some(&(entity, seq, _)) = live.first() {
            if let Ok(mut ship) = world.get::<&mut AlliedShip>(entity) {
                ship.is_alpha = true;
                has_alpha = true;
                log::debug!("allied {seq} promoted to alpha");
            }
        }
    }

    for _ in live.len()..want {
        let seq = *next_seq;
        *next_seq += 1;
        spawn::spawn_allied(world, rng, config, seq, !has_alpha);
        has_alpha = true;
    }
}

fn reconcile_hostiles<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &SimulationConfig,
    next_seq: &mut u64,
    score: u64,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut regular: Vec<(Entity, u64)> = Vec::new();
    let mut bosses: Vec<(Entity, u64)> = Vec::new();
    for (entity, ship) in world.query::<&HostileShip>().iter() {
        if ship.archetype == HostileArchetype::Boss {
            bosses.push((entity, ship.seq));
        } else {
            regular.push((entity, ship.seq));
        }
    }
    regular.sort_by_key(|(_, seq)| *seq);
    bosses.sort_by_key(|(_, seq)| *seq);

    let want = config.hostile_count as usize;
    if regular.len() > want {
        for (entity, _) in regular.drain(want..).rev() {
            despawn_buffer.push(entity);
        }
    } else {
        for _ in regular.len()..want {
            let seq = *next_seq;
            *next_seq += 1;
            let archetype = if score > ADVANCED_SPAWN_SCORE
                && rng.gen::<f64>() < ADVANCED_SPAWN_CHANCE
            {
                HostileArchetype::Advanced
            } else {
                HostileArchetype::Basic
            };
            spawn::spawn_hostile(world, rng, config, seq, archetype);
        }
    }

    let want_bosses = config.boss_count as usize;
    if bosses.len() > want_bosses {
        for (entity, _) in bosses.drain(want_bosses..).rev() {
            despawn_buffer.push(entity);
        }
    } else {
        for _ in bosses.len()..want_bosses {
            let seq = *next_seq;
            *next_seq += 1;
            spawn::spawn_hostile(world, rng, config, seq, HostileArchetype::Boss);
        }
    }
    flush(world, despawn_buffer);
}

fn reconcile_obstacles<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &SimulationConfig,
    next_seq: &mut u64,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut live: Vec<(Entity, u64)> = world
        .query::<&Obstacle>()
        .iter()
        .map(|(entity, obstacle)| (entity, obstacle.seq))
        .collect();
    live.sort_by_key(|(_, seq)| *seq);

    let want = config.obstacle_count as usize;
    if live.len() > want {
        for (entity, _) in live.drain(want..).rev() {
            despawn_buffer.push(entity);
        }
        flush(world, despawn_buffer);
    } else {
        for _ in live.len()..want {
            let seq = *next_seq;
            *next_seq += 1;
            spawn::spawn_obstacle(world, rng, config, seq);
        }
    }
}

fn flush(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
