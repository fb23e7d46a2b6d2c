//! Tests for the simulation engine, reconciliation, combat resolution,
//! and the per-tick invariants.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{
    AlliedShip, BossCore, BurstState, Health, HostileShip, Obstacle, PlayerShip, Position,
    Projectile, Shield, Velocity,
};
use skirmish_core::config::SimulationConfig;
use skirmish_core::constants::*;
use skirmish_core::enums::{BossPhase, Faction, HostileArchetype};
use skirmish_core::events::CombatEvent;
use skirmish_core::input::InputState;
use skirmish_core::state::TelemetryCounters;

use crate::engine::{SimConfig, SimulationEngine};
use crate::spawn;
use crate::systems;

fn engine_with(config: SimulationConfig, seed: u64) -> SimulationEngine {
    SimulationEngine::new(SimConfig { seed, config })
}

fn busy_config() -> SimulationConfig {
    SimulationConfig {
        allied_count: 3,
        hostile_count: 4,
        boss_count: 1,
        obstacle_count: 5,
        ..Default::default()
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = engine_with(busy_config(), 12345);
    let mut engine_b = engine_with(busy_config(), 12345);

    for _ in 0..300 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = engine_with(busy_config(), 111);
    let mut engine_b = engine_with(busy_config(), 222);

    let mut diverged = false;
    for _ in 0..200 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        if serde_json::to_string(&snap_a).unwrap() != serde_json::to_string(&snap_b).unwrap() {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Reconciliation ----

#[test]
fn test_reconciliation_is_idempotent() {
    let mut world = hecs::World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let config = busy_config();
    let mut next_seq = 0;
    let mut buffer = Vec::new();

    systems::reconcile::run(&mut world, &mut rng, &config, &mut next_seq, 0, &mut buffer);
    let population = world.len();
    let seq_after_first = next_seq;

    systems::reconcile::run(&mut world, &mut rng, &config, &mut next_seq, 0, &mut buffer);
    assert_eq!(world.len(), population, "second pass must not spawn");
    assert_eq!(next_seq, seq_after_first, "second pass must not allocate seqs");
}

#[test]
fn test_population_matches_configuration() {
    let mut engine = engine_with(busy_config(), 5);
    let snap = engine.tick();
    assert!(snap.player.is_some());
    assert_eq!(snap.counts.allied, 3);
    assert_eq!(snap.counts.basic + snap.counts.advanced, 4);
    assert_eq!(snap.counts.boss, 1);
    assert_eq!(snap.obstacles.len(), 5);
}

#[test]
fn test_count_decrease_removes_newest_ships() {
    let mut engine = engine_with(busy_config(), 5);
    let before = engine.tick();
    let oldest: Vec<u64> = before.allies.iter().map(|a| a.seq).take(2).collect();

    let mut config = busy_config();
    config.allied_count = 2;
    engine.set_config(config);
    let after = engine.tick();

    let surviving: Vec<u64> = after.allies.iter().map(|a| a.seq).collect();
    assert_eq!(surviving, oldest, "surplus removal must drop newest first");
}

#[test]
fn test_exactly_one_alpha_after_alpha_loss() {
    let mut engine = engine_with(busy_config(), 5);
    let snap = engine.tick();
    let alpha_seq = snap.allies.iter().find(|a| a.is_alpha).unwrap().seq;

    let alpha_entity = engine
        .world()
        .query::<&AlliedShip>()
        .iter()
        .find(|(_, ship)| ship.seq == alpha_seq)
        .map(|(entity, _)| entity)
        .unwrap();
    engine.world_mut().despawn(alpha_entity).unwrap();

    let snap = engine.tick();
    let alphas: Vec<&skirmish_core::state::AlliedView> =
        snap.allies.iter().filter(|a| a.is_alpha).collect();
    assert_eq!(alphas.len(), 1);
    // The surviving veteran inherits the flag, not the replacement.
    assert!(alphas[0].seq != alpha_seq);
    assert_eq!(
        alphas[0].seq,
        snap.allies.iter().map(|a| a.seq).min().unwrap()
    );
}

#[test]
fn test_player_inactive_removes_vessel() {
    let mut config = busy_config();
    config.player_active = false;
    let mut engine = engine_with(config, 5);
    let snap = engine.tick();
    assert!(snap.player.is_none());
}

#[test]
fn test_config_clamping_via_engine() {
    let mut engine = engine_with(SimulationConfig::default(), 5);
    engine.set_config(SimulationConfig {
        allied_count: 99,
        world_width: 1.0,
        ..Default::default()
    });
    assert_eq!(engine.config().allied_count, SHIP_COUNT_MAX);
    assert_eq!(engine.config().world_width, WORLD_DIM_MIN);
}

// ---- Physics invariants ----

#[test]
fn test_positions_stay_in_bounds_and_speeds_clamped() {
    let mut engine = engine_with(busy_config(), 77);
    for _ in 0..400 {
        let snap = engine.tick();
        let w = engine.config().world_width;
        let h = engine.config().world_height;
        let mut points: Vec<DVec2> = Vec::new();
        if let Some(p) = &snap.player {
            points.push(p.position);
            assert!(p.velocity.length() <= PLAYER_MAX_SPEED + 1e-9);
        }
        for a in &snap.allies {
            points.push(a.position);
            assert!(a.velocity.length() <= PLAYER_MAX_SPEED + 1e-9);
        }
        for hv in &snap.hostiles {
            points.push(hv.position);
            assert!(hv.velocity.length() <= HOSTILE_MAX_SPEED + 1e-9);
        }
        for pr in &snap.projectiles {
            points.push(pr.position);
        }
        for p in points {
            assert!(p.x >= 0.0 && p.x <= w, "x out of bounds: {}", p.x);
            assert!(p.y >= 0.0 && p.y <= h, "y out of bounds: {}", p.y);
        }
    }
}

#[test]
fn test_anchored_player_is_pinned() {
    let mut config = busy_config();
    config.anchor_player = true;
    let mut engine = engine_with(config, 3);
    engine.set_input(InputState {
        thrust_forward: true,
        rotate_left: true,
        ..Default::default()
    });
    for _ in 0..50 {
        let snap = engine.tick();
        let player = snap.player.unwrap();
        let center = DVec2::new(
            engine.config().world_width / 2.0,
            engine.config().world_height / 2.0,
        );
        assert_eq!(player.position, center);
        assert_eq!(player.velocity, DVec2::ZERO);
    }
}

#[test]
fn test_anchored_alpha_is_pinned() {
    let mut config = busy_config();
    config.anchor_alpha = true;
    config.hostile_count = 0;
    config.boss_count = 0;
    let mut engine = engine_with(config, 3);
    for _ in 0..50 {
        let snap = engine.tick();
        let alpha = snap.allies.iter().find(|a| a.is_alpha).unwrap();
        let center = DVec2::new(
            engine.config().world_width / 2.0,
            engine.config().world_height / 2.0,
        );
        assert_eq!(alpha.position, center);
        assert_eq!(alpha.velocity, DVec2::ZERO);
    }
}

#[test]
fn test_edge_wrap_to_far_side() {
    // A vessel crossing x=0 with negative velocity lands at x=worldWidth.
    let mut config = busy_config();
    config.hostile_count = 0;
    config.boss_count = 0;
    config.obstacle_count = 0;
    let mut engine = engine_with(config, 3);
    engine.tick();
    {
        let world = engine.world_mut();
        let player = world
            .query::<&PlayerShip>()
            .iter()
            .map(|(e, _)| e)
            .next()
            .unwrap();
        world.get::<&mut Position>(player).unwrap().0 = DVec2::new(0.5, 300.0);
        world.get::<&mut Velocity>(player).unwrap().0 = DVec2::new(-2.0, 0.0);
    }
    let snap = engine.tick();
    let x = snap.player.unwrap().position.x;
    let w = engine.config().world_width;
    assert!(
        (x - w).abs() < 2.0 * PLAYER_MAX_SPEED,
        "expected wrap near x={w}, got {x}"
    );
    assert!(x > 0.0);
}

// ---- Burst fire ----

#[test]
fn test_burst_three_shot_schedule() {
    let mut burst = BurstState::default();
    systems::firing::start_burst(&mut burst, 0.0, 3);

    let mut shots = Vec::new();
    for tick in 0..6 {
        if let Some(angle) = systems::firing::advance_burst(&mut burst) {
            shots.push((tick, angle));
        }
    }
    assert_eq!(shots.len(), 3, "burst(3) emits exactly three shots");
    let ticks: Vec<u32> = shots.iter().map(|(t, _)| *t).collect();
    assert_eq!(ticks, vec![0, 2, 4], "shots are two ticks apart");
    assert!(!burst.active, "sub-state clears at count * 2 ticks");
    // Shots fan symmetrically across the burst cone.
    assert!((shots[0].1 + BURST_SPREAD / 2.0).abs() < 1e-9);
    assert!(shots[1].1.abs() < 1e-9);
    assert!((shots[2].1 - BURST_SPREAD / 2.0).abs() < 1e-9);
}

#[test]
fn test_finished_burst_emits_nothing() {
    let mut burst = BurstState::default();
    systems::firing::start_burst(&mut burst, 0.0, 2);
    for _ in 0..4 {
        systems::firing::advance_burst(&mut burst);
    }
    assert!(!burst.active);
    assert!(systems::firing::advance_burst(&mut burst).is_none());
}

#[test]
fn test_advanced_pattern_resolves_from_one_roll() {
    use systems::firing::{advanced_pattern, AdvancedPattern};

    assert_eq!(advanced_pattern(0.0), AdvancedPattern::Burst);
    assert_eq!(advanced_pattern(0.29), AdvancedPattern::Burst);
    assert_eq!(advanced_pattern(0.30), AdvancedPattern::Spread);
    assert_eq!(advanced_pattern(0.49), AdvancedPattern::Spread);
    assert_eq!(advanced_pattern(0.50), AdvancedPattern::Normal);
    assert_eq!(advanced_pattern(0.99), AdvancedPattern::Normal);

    // Sampled rates converge on the exclusive 30/20/50 split.
    let mut r = ChaCha8Rng::seed_from_u64(11);
    let n = 20_000;
    let mut burst = 0u32;
    let mut spread = 0u32;
    for _ in 0..n {
        match advanced_pattern(r.gen::<f64>()) {
            AdvancedPattern::Burst => burst += 1,
            AdvancedPattern::Spread => spread += 1,
            AdvancedPattern::Normal => {}
        }
    }
    let burst_frac = burst as f64 / n as f64;
    let spread_frac = spread as f64 / n as f64;
    assert!((burst_frac - 0.3).abs() < 0.02, "burst rate {burst_frac}");
    assert!((spread_frac - 0.2).abs() < 0.02, "spread rate {spread_frac}");
}

// ---- Boss abilities ----

#[test]
fn test_boss_teleport_keeps_momentum() {
    let (mut world, config) = bare_world();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let boss = spawn::spawn_hostile(&mut world, &mut rng, &config, 0, HostileArchetype::Boss);
    world.get::<&mut Health>(boss).unwrap().current = 1;
    world.get::<&mut BossCore>(boss).unwrap().phase = BossPhase::Three;
    let momentum = DVec2::new(3.0, -1.0);
    world.get::<&mut Velocity>(boss).unwrap().0 = momentum;

    let mut events = Vec::new();
    let mut teleported = false;
    for _ in 0..5000 {
        systems::boss::run(&mut world, &mut rng, &config, &mut events);
        if events
            .iter()
            .any(|e| matches!(e, CombatEvent::BossTeleported { .. }))
        {
            teleported = true;
            break;
        }
    }
    assert!(teleported, "cornered phase-3 boss should blink away");
    assert_eq!(world.get::<&Velocity>(boss).unwrap().0, momentum);
}

// ---- Collision resolution ----

fn bare_world() -> (hecs::World, SimulationConfig) {
    (hecs::World::new(), SimulationConfig::default())
}

fn place_projectile(world: &mut hecs::World, at: DVec2, faction: Faction) -> hecs::Entity {
    let entity = spawn::spawn_projectile(world, at, 0.0, faction);
    world.get::<&mut Velocity>(entity).unwrap().0 = DVec2::ZERO;
    entity
}

fn resolve(world: &mut hecs::World, score: &mut u64) -> (bool, Vec<CombatEvent>) {
    let mut events = Vec::new();
    let mut telemetry = TelemetryCounters::default();
    let mut buffer = Vec::new();
    let died = systems::collision::run(world, score, &mut events, &mut telemetry, &mut buffer);
    (died, events)
}

#[test]
fn test_basic_hostile_dies_in_one_hit_for_100() {
    let (mut world, config) = bare_world();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let hostile = spawn::spawn_hostile(&mut world, &mut rng, &config, 0, HostileArchetype::Basic);
    let at = world.get::<&Position>(hostile).unwrap().0;
    place_projectile(&mut world, at, Faction::Friendly);

    let mut score = 0;
    let (died, events) = resolve(&mut world, &mut score);
    assert!(!died);
    assert_eq!(score, 100);
    assert!(world.get::<&HostileShip>(hostile).is_err(), "hostile removed");
    assert!(events
        .iter()
        .any(|e| matches!(e, CombatEvent::HostileDestroyed { score_awarded: 100, .. })));
}

#[test]
fn test_advanced_hostile_takes_two_hits_for_200() {
    let (mut world, config) = bare_world();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let hostile =
        spawn::spawn_hostile(&mut world, &mut rng, &config, 0, HostileArchetype::Advanced);
    let at = world.get::<&Position>(hostile).unwrap().0;

    let mut score = 0;
    place_projectile(&mut world, at, Faction::Friendly);
    resolve(&mut world, &mut score);
    assert_eq!(score, 0, "first hit wounds only");
    assert_eq!(world.get::<&Health>(hostile).unwrap().current, 1);

    place_projectile(&mut world, at, Faction::Friendly);
    resolve(&mut world, &mut score);
    assert_eq!(score, 200);
    assert!(world.get::<&HostileShip>(hostile).is_err());
}

#[test]
fn test_boss_takes_five_hits_for_500() {
    let (mut world, config) = bare_world();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let boss = spawn::spawn_hostile(&mut world, &mut rng, &config, 0, HostileArchetype::Boss);
    let at = world.get::<&Position>(boss).unwrap().0;

    let mut score = 0;
    for hit in 1..=5 {
        place_projectile(&mut world, at, Faction::Friendly);
        resolve(&mut world, &mut score);
        if hit < 5 {
            assert_eq!(score, 0, "no score before the killing blow");
        }
    }
    assert_eq!(score, 500);
    assert!(world.get::<&HostileShip>(boss).is_err());
}

#[test]
fn test_obstacle_shatter_awards_100_and_removes_both() {
    let (mut world, config) = bare_world();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let obstacle = spawn::spawn_obstacle(&mut world, &mut rng, &config, 0);
    let at = world.get::<&Position>(obstacle).unwrap().0;
    let shot = place_projectile(&mut world, at, Faction::Friendly);

    let mut score = 0;
    resolve(&mut world, &mut score);
    assert_eq!(score, 100);
    assert!(world.get::<&Obstacle>(obstacle).is_err());
    assert!(world.get::<&Projectile>(shot).is_err());
}

#[test]
fn test_player_shield_blocks_hostile_projectile() {
    let (mut world, config) = bare_world();
    let player = spawn::spawn_player(&mut world, &config);
    world.get::<&mut Shield>(player).unwrap().active = true;
    let at = world.get::<&Position>(player).unwrap().0;
    let shot = place_projectile(&mut world, at, Faction::Hostile);

    let mut score = 0;
    let (died, _) = resolve(&mut world, &mut score);
    assert!(!died, "shielded player survives");
    assert!(world.get::<&Projectile>(shot).is_err(), "round is spent");
}

#[test]
fn test_unshielded_player_dies_to_hostile_projectile() {
    let (mut world, config) = bare_world();
    let player = spawn::spawn_player(&mut world, &config);
    let at = world.get::<&Position>(player).unwrap().0;
    place_projectile(&mut world, at, Faction::Hostile);

    let mut score = 0;
    let (died, events) = resolve(&mut world, &mut score);
    assert!(died);
    assert!(events.contains(&CombatEvent::PlayerDestroyed));
}

#[test]
fn test_allied_shield_blocks_damage() {
    let (mut world, config) = bare_world();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let allied = spawn::spawn_allied(&mut world, &mut rng, &config, 0, true);
    world.get::<&mut Shield>(allied).unwrap().active = true;
    let at = world.get::<&Position>(allied).unwrap().0;
    place_projectile(&mut world, at, Faction::Hostile);

    let mut score = 0;
    resolve(&mut world, &mut score);
    assert_eq!(
        world.get::<&Health>(allied).unwrap().current,
        ALLIED_MAX_HEALTH
    );
}

#[test]
fn test_hostile_shield_does_not_stop_friendly_fire() {
    // The exemption table is asymmetric: hostile shields only suppress
    // targeting appeal, they never absorb friendly rounds.
    let (mut world, config) = bare_world();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let hostile =
        spawn::spawn_hostile(&mut world, &mut rng, &config, 0, HostileArchetype::Advanced);
    world.get::<&mut Shield>(hostile).unwrap().active = true;
    let at = world.get::<&Position>(hostile).unwrap().0;
    place_projectile(&mut world, at, Faction::Friendly);

    let mut score = 0;
    resolve(&mut world, &mut score);
    assert_eq!(world.get::<&Health>(hostile).unwrap().current, 1);
}

#[test]
fn test_hostile_projectiles_pass_through_obstacles() {
    let (mut world, config) = bare_world();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let obstacle = spawn::spawn_obstacle(&mut world, &mut rng, &config, 0);
    let at = world.get::<&Position>(obstacle).unwrap().0;
    let shot = place_projectile(&mut world, at, Faction::Hostile);

    let mut score = 0;
    resolve(&mut world, &mut score);
    assert!(world.get::<&Obstacle>(obstacle).is_ok());
    assert!(world.get::<&Projectile>(shot).is_ok());
    assert_eq!(score, 0);
}

// ---- Player death and field reset ----

#[test]
fn test_player_death_resets_field_but_keeps_allies() {
    let mut engine = engine_with(busy_config(), 21);
    let before = engine.tick();
    let allied_seqs: Vec<u64> = before.allies.iter().map(|a| a.seq).collect();

    // Park an obstacle on the unshielded player.
    {
        let world = engine.world_mut();
        let player_pos = {
            let mut query = world.query::<(&PlayerShip, &Position)>();
            let (_, (_, position)) = query.iter().next().unwrap();
            position.0
        };
        let obstacle = world
            .query::<&Obstacle>()
            .iter()
            .map(|(e, _)| e)
            .next()
            .unwrap();
        world.get::<&mut Position>(obstacle).unwrap().0 = player_pos;
        world.get::<&mut Velocity>(obstacle).unwrap().0 = DVec2::ZERO;
    }

    let snap = engine.tick();
    assert!(snap.events.contains(&CombatEvent::FieldReset));
    assert_eq!(snap.score, 0);
    assert_eq!(snap.counts.basic + snap.counts.advanced, 4);
    assert_eq!(snap.counts.boss, 1);
    assert_eq!(snap.obstacles.len(), 5);
    assert!(snap.projectiles.is_empty());
    let after_seqs: Vec<u64> = snap.allies.iter().map(|a| a.seq).collect();
    assert_eq!(after_seqs, allied_seqs, "allied pool survives the reset");

    let player = snap.player.unwrap();
    let center = DVec2::new(
        engine.config().world_width / 2.0,
        engine.config().world_height / 2.0,
    );
    assert_eq!(player.position, center);
}

// ---- Long-run stability ----

#[test]
fn test_long_run_produces_combat() {
    let mut engine = engine_with(busy_config(), 99);
    let mut saw_shot = false;
    let mut last = None;
    for _ in 0..2000 {
        let snap = engine.tick();
        if !snap.projectiles.is_empty() {
            saw_shot = true;
        }
        last = Some(snap);
    }
    let last = last.unwrap();
    assert!(saw_shot, "hostiles and allies should exchange fire");
    assert!(last.telemetry.shots_fired > 0);
    assert_eq!(last.time.tick, 2000);
}
