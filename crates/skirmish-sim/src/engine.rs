//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, applies player input,
//! runs all systems, and produces `GameSnapshot`s. Completely headless,
//! enabling deterministic testing.

use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{Intent, Mobility, PlayerShip, Position, Shield, Velocity};
use skirmish_core::config::SimulationConfig;
use skirmish_core::constants::*;
use skirmish_core::events::CombatEvent;
use skirmish_core::geom::normalize_angle;
use skirmish_core::input::InputState;
use skirmish_core::state::{GameSnapshot, TelemetryCounters};
use skirmish_core::types::SimTime;

use crate::spawn;
use crate::systems;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial engagement configuration.
    pub config: SimulationConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            config: SimulationConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: SimulationConfig,
    input: InputState,
    hyperspace_latch: bool,
    rng: ChaCha8Rng,
    score: u64,
    next_seq: u64,
    telemetry: TelemetryCounters,
    events: Vec<CombatEvent>,
    despawn_buffer: Vec<hecs::Entity>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            config: config.config.sanitized(),
            input: InputState::default(),
            hyperspace_latch: false,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            score: 0,
            next_seq: 0,
            telemetry: TelemetryCounters::default(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Replace the engagement configuration. Out-of-range values are
    /// clamped; population changes take effect at the next tick.
    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config.sanitized();
    }

    /// Current engagement configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replace the held player input for subsequent ticks.
    pub fn set_input(&mut self, input: InputState) {
        self.input = input;
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current player score.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for test setups.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameSnapshot {
        let config = self.config.clone();

        // 1. Population reconciliation against the polled configuration
        systems::reconcile::run(
            &mut self.world,
            &mut self.rng,
            &config,
            &mut self.next_seq,
            self.score,
            &mut self.despawn_buffer,
        );
        // 2. Shield countdowns and autonomous activation
        systems::shield::run(&mut self.world, &mut self.rng);
        // 3. Boss escalation (phase, pattern, teleport, erratic jitter)
        systems::boss::run(&mut self.world, &mut self.rng, &config, &mut self.events);
        // 4. AI decisions (reads world, writes intents)
        systems::ai::run(&mut self.world, &mut self.rng, &config);
        // 5. Player input application
        self.apply_player_input();
        // 6. Physics integration, wrap, anchoring
        systems::movement::run(&mut self.world, &config);
        // 7. Firing (cooldowns, pattern expansion, projectile spawn)
        systems::firing::run(
            &mut self.world,
            &mut self.rng,
            &config,
            &mut self.events,
            &mut self.telemetry,
        );
        // 8. Collision resolution and scoring
        let player_died = systems::collision::run(
            &mut self.world,
            &mut self.score,
            &mut self.events,
            &mut self.telemetry,
            &mut self.despawn_buffer,
        );
        // 9. Expired projectile cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        if player_died {
            self.reset_combat_field(&config);
        }

        self.time.advance();
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(&self.world, self.time, self.score, self.telemetry, events)
    }

    /// Translate held input into heading, intent, and shield state on
    /// the player vessel.
    fn apply_player_input(&mut self) {
        let input = self.input;
        let anchored = self.config.anchor_player;
        let mut jump = false;
        for (_entity, (_player, mobility, intent, shield)) in self
            .world
            .query_mut::<(&PlayerShip, &mut Mobility, &mut Intent, &mut Shield)>()
        {
            if input.rotate_left {
                mobility.heading = normalize_angle(mobility.heading - mobility.rotation_step);
            }
            if input.rotate_right {
                mobility.heading = normalize_angle(mobility.heading + mobility.rotation_step);
            }
            mobility.target_heading = mobility.heading;

            intent.thrust = if anchored {
                0.0
            } else if input.thrust_forward {
                1.0
            } else if input.thrust_backward {
                -PLAYER_REVERSE_FACTOR
            } else {
                0.0
            };
            intent.fire = input.fire.then_some(mobility.heading);
            shield.active = input.shield_hold;

            if input.hyperspace && !self.hyperspace_latch && !anchored {
                jump = true;
            }
        }
        self.hyperspace_latch = input.hyperspace;

        // Hyperspace relocates to a random in-bounds point; rarely the
        // jump also bleeds off all velocity.
        if jump {
            let target = spawn::random_point(&mut self.rng, &self.config);
            let fizzle = self.rng.gen::<f64>() < HYPERSPACE_FIZZLE_CHANCE;
            for (_entity, (_player, position, velocity)) in self
                .world
                .query_mut::<(&PlayerShip, &mut Position, &mut Velocity)>()
            {
                position.0 = target;
                if fizzle {
                    velocity.0 = glam::DVec2::ZERO;
                }
            }
            self.events.push(CombatEvent::HyperspaceJump {
                position: target,
                fizzled: fizzle,
            });
        }
    }

    /// Player-death reset: clears hostiles, obstacles, and projectiles,
    /// zeroes the score, and recenters the player. The allied pool is
    /// preserved. Reconciliation runs again immediately so the field
    /// repopulates within the same tick.
    fn reset_combat_field(&mut self, config: &SimulationConfig) {
        log::info!("player destroyed at tick {}, resetting field", self.time.tick);

        self.despawn_buffer.clear();
        for (entity, _) in self
            .world
            .query::<&skirmish_core::components::HostileShip>()
            .iter()
        {
            self.despawn_buffer.push(entity);
        }
        for (entity, _) in self
            .world
            .query::<&skirmish_core::components::Obstacle>()
            .iter()
        {
            self.despawn_buffer.push(entity);
        }
        for (entity, _) in self
            .world
            .query::<&skirmish_core::components::Projectile>()
            .iter()
        {
            self.despawn_buffer.push(entity);
        }
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }

        self.score = 0;
        let center = spawn::field_center(config);
        for (_entity, (_player, position, velocity, mobility)) in self.world.query_mut::<(
            &PlayerShip,
            &mut Position,
            &mut Velocity,
            &mut Mobility,
        )>() {
            position.0 = center;
            velocity.0 = glam::DVec2::ZERO;
            mobility.heading = -std::f64::consts::PI / 2.0;
            mobility.target_heading = mobility.heading;
        }

        self.telemetry.field_resets += 1;
        self.events.push(CombatEvent::FieldReset);

        systems::reconcile::run(
            &mut self.world,
            &mut self.rng,
            config,
            &mut self.next_seq,
            self.score,
            &mut self.despawn_buffer,
        );
    }
}
