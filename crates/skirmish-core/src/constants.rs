//! Simulation constants and tuning parameters.
//!
//! All distances are in world units (pixels), all speeds in units per tick,
//! all durations in ticks.

use std::f64::consts::PI;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- World bounds ---

/// Default world width.
pub const DEFAULT_WORLD_WIDTH: f64 = 1200.0;

/// Default world height.
pub const DEFAULT_WORLD_HEIGHT: f64 = 600.0;

/// Smallest supported world dimension.
pub const WORLD_DIM_MIN: f64 = 200.0;

/// Largest supported world dimension.
pub const WORLD_DIM_MAX: f64 = 8192.0;

/// Maximum configured count per ship class (allied, hostile, boss).
pub const SHIP_COUNT_MAX: u32 = 10;

/// Maximum configured obstacle count.
pub const OBSTACLE_COUNT_MAX: u32 = 20;

/// Default drifting-obstacle population.
pub const DEFAULT_OBSTACLE_COUNT: u32 = 5;

// --- Player vessel ---

/// Thrust impulse per tick at full power.
pub const PLAYER_THRUST: f64 = 0.15;

/// Rotation step per tick (radians).
pub const PLAYER_ROTATION_STEP: f64 = 0.1;

/// Multiplicative velocity decay applied each tick.
pub const PLAYER_FRICTION: f64 = 0.98;

/// Speed clamp.
pub const PLAYER_MAX_SPEED: f64 = 8.0;

/// Collision radius.
pub const PLAYER_RADIUS: f64 = 15.0;

/// Hull size, used as the muzzle offset for fired projectiles.
pub const PLAYER_SIZE: f64 = 20.0;

/// Ticks between player fire actions.
pub const PLAYER_FIRE_COOLDOWN: u32 = 10;

/// Angular offset of the side gun barrels.
pub const PLAYER_BARREL_ANGLE: f64 = PI / 12.0;

/// Backward thrust is applied at half power.
pub const PLAYER_REVERSE_FACTOR: f64 = 0.5;

/// Chance that a hyperspace jump also zeroes velocity.
pub const HYPERSPACE_FIZZLE_CHANCE: f64 = 0.1;

// --- Allied vessels ---

/// Allied hull points.
pub const ALLIED_MAX_HEALTH: i32 = 3;

/// Radius within which obstacles are considered for avoidance.
pub const ALLIED_OBSTACLE_DETECTION_RADIUS: f64 = 100.0;

/// Half-angle of the forward cone checked for obstacle avoidance.
pub const ALLIED_AVOIDANCE_CONE: f64 = PI / 2.0;

/// Radius within which hostiles are considered as targets.
pub const ALLIED_ENEMY_DETECTION_RADIUS: f64 = 300.0;

/// Maximum range for firing on hostiles.
pub const ALLIED_ENEMY_FIRING_RANGE: f64 = 250.0;

/// Maximum range for firing on obstacles.
pub const ALLIED_OBSTACLE_FIRING_RANGE: f64 = 200.0;

/// Obstacles closer than this are fired on regardless of the firing cone.
pub const ALLIED_IMMINENT_THREAT_DISTANCE: f64 = 80.0;

/// Half-angle of the front firing cone.
pub const FIRING_CONE: f64 = PI / 3.0;

/// Ticks between allied shots.
pub const ALLIED_FIRE_COOLDOWN: u32 = 3;

/// Probability per idle tick of a spontaneous thrust impulse.
pub const ALLIED_THRUST_FREQUENCY: f64 = 0.02;

// --- Hostile vessels ---

/// Rotation step per tick for hostiles.
pub const HOSTILE_ROTATION_STEP: f64 = 0.08;

/// Hostile thrust impulse per tick at full power.
pub const HOSTILE_THRUST: f64 = 0.12;

/// Hostile speed clamp.
pub const HOSTILE_MAX_SPEED: f64 = 6.0;

/// Range at which hostiles open fire.
pub const HOSTILE_ATTACK_RANGE: f64 = 300.0;

/// Range at which hostiles acquire targets.
pub const HOSTILE_DETECTION_RADIUS: f64 = 400.0;

/// Range at which incoming friendly projectiles trigger evasion.
pub const HOSTILE_EVASION_RADIUS: f64 = 80.0;

/// Angular tolerance for an incoming projectile to count as a threat.
pub const EVASION_THREAT_CONE: f64 = PI / 3.0;

/// Advanced and boss hostiles keep at least this much spacing.
pub const HOSTILE_SEPARATION_DISTANCE: f64 = 50.0;

/// Health ratio below which non-boss hostiles retreat.
pub const HOSTILE_RETREAT_RATIO: f64 = 0.3;

/// Health ratio below which pursuing hostiles switch to evade.
pub const HOSTILE_EVADE_RATIO: f64 = 0.6;

/// Probability per tick of a hostile thrust impulse.
pub const HOSTILE_THRUST_CHANCE: f64 = 0.3;

/// Probability per tick of a retreating hostile thrust impulse.
pub const HOSTILE_RETREAT_THRUST_CHANCE: f64 = 0.5;

/// Thrust power multiplier while retreating.
pub const HOSTILE_RETREAT_THRUST_POWER: f64 = 1.5;

// --- Shared AI ---

/// Desired-heading convergence threshold; below this no rotation is applied.
pub const HEADING_EPSILON: f64 = 0.1;

/// Probability per idle tick of picking a new random wander heading.
pub const IDLE_WANDER_CHANCE: f64 = 0.01;

// --- Projectiles ---

/// Friendly projectile speed.
pub const FRIENDLY_PROJECTILE_SPEED: f64 = 8.0;

/// Friendly projectile lifetime in ticks.
pub const FRIENDLY_PROJECTILE_LIFETIME: i32 = 60;

/// Hostile projectile speed.
pub const HOSTILE_PROJECTILE_SPEED: f64 = 7.0;

/// Hostile projectile lifetime in ticks.
pub const HOSTILE_PROJECTILE_LIFETIME: i32 = 90;

/// Projectile collision radius.
pub const PROJECTILE_RADIUS: f64 = 3.0;

// --- Fire patterns ---

/// Total cone of a burst volley.
pub const BURST_SPREAD: f64 = PI / 12.0;

/// Ticks between consecutive burst shots.
pub const BURST_SHOT_INTERVAL: u32 = 2;

/// Total cone of an advanced predictive spread.
pub const SPREAD_CONE_ADVANCED: f64 = PI / 8.0;

/// Total cone of a boss spread volley.
pub const SPREAD_CONE_BOSS: f64 = PI / 6.0;

/// Shots in a boss spread volley.
pub const SPREAD_COUNT_BOSS: u32 = 5;

/// Shots in a rapid-fire burst.
pub const RAPID_BURST_SIZE: u32 = 3;

/// Ticks between rapid-fire shots.
pub const RAPID_SHOT_COOLDOWN: u32 = 5;

/// Shots in a circular volley.
pub const CIRCULAR_SHOT_COUNT: u32 = 8;

/// Cooldown multiplier after a spread volley.
pub const SPREAD_COOLDOWN_FACTOR: f64 = 1.5;

/// Cooldown multiplier after rapid and circular volleys.
pub const HEAVY_COOLDOWN_FACTOR: f64 = 2.0;

/// Chance a basic hostile opens with a two-shot burst.
pub const BASIC_BURST_CHANCE: f64 = 0.1;

/// Chance an advanced hostile opens with a three-shot burst.
pub const ADVANCED_BURST_CHANCE: f64 = 0.3;

/// Chance an advanced hostile fires a predictive spread. Burst,
/// spread, and plain fire resolve from a single draw.
pub const ADVANCED_SPREAD_CHANCE: f64 = 0.2;

// --- Boss controller ---

/// Health ratio above which the boss stays in phase 1.
pub const BOSS_PHASE1_RATIO: f64 = 0.6;

/// Health ratio above which the boss stays in phase 2.
pub const BOSS_PHASE2_RATIO: f64 = 0.3;

/// Ticks between attack-pattern re-rolls.
pub const BOSS_PATTERN_INTERVAL: u32 = 120;

/// Duration of the phase-transition visual pulse.
pub const BOSS_TRANSITION_TICKS: u32 = 60;

/// Shield duration granted on a phase transition.
pub const BOSS_TRANSITION_SHIELD_TICKS: u32 = 30;

/// Teleport cooldown.
pub const BOSS_TELEPORT_COOLDOWN: u32 = 180;

/// Teleport chance per eligible tick.
pub const BOSS_TELEPORT_CHANCE: f64 = 0.02;

/// Health at or below which a phase-3 boss may teleport.
pub const BOSS_TELEPORT_HEALTH: i32 = 1;

/// Ticks between erratic-movement rolls in phase 3.
pub const BOSS_ERRATIC_INTERVAL: u32 = 10;

/// Chance of an erratic heading change per roll.
pub const BOSS_ERRATIC_CHANCE: f64 = 0.3;

// --- Autonomous shields ---

/// Shield activation chance per tick for basic hostiles and allied vessels.
pub const SHIELD_CHANCE_BASIC: f64 = 0.005;

/// Shield activation chance per tick for advanced hostiles.
pub const SHIELD_CHANCE_ADVANCED: f64 = 0.01;

/// Shield duration for basic/advanced/allied vessels.
pub const SHIELD_DURATION: u32 = 60;

/// Shield cooldown after expiry.
pub const SHIELD_COOLDOWN: u32 = 300;

/// Boss periodic shield chance per tick (phase 2 and up).
pub const BOSS_SHIELD_CHANCE: f64 = 0.01;

/// Boss periodic shield duration.
pub const BOSS_SHIELD_DURATION: u32 = 90;

// --- Targeting ---

/// Fixed desirability of the player vessel as a target.
pub const PLAYER_BASE_DESIRABILITY: f64 = 50.0;

/// Desirability bonus for the alpha allied vessel.
pub const ALPHA_TARGET_BONUS: f64 = 150.0;

/// Desirability penalty for a shielded target.
pub const SHIELD_TARGET_PENALTY: f64 = 100.0;

// --- Obstacles ---

/// Minimum obstacle diameter.
pub const OBSTACLE_SIZE_MIN: f64 = 30.0;

/// Maximum extra obstacle diameter beyond the minimum.
pub const OBSTACLE_SIZE_SPAN: f64 = 30.0;

/// Minimum obstacle drift speed.
pub const OBSTACLE_SPEED_MIN: f64 = 1.0;

/// Maximum extra obstacle drift speed.
pub const OBSTACLE_SPEED_SPAN: f64 = 2.0;

/// Obstacle silhouette vertex count range: 8 to 10 inclusive.
pub const OBSTACLE_VERTEX_MIN: usize = 8;
pub const OBSTACLE_VERTEX_SPAN: usize = 3;

/// Radial jitter applied to silhouette vertices.
pub const OBSTACLE_VERTEX_JITTER: f64 = 10.0;

// --- Scoring ---

/// Score for shattering an obstacle.
pub const SCORE_OBSTACLE: u64 = 100;

/// Score for destroying a basic hostile.
pub const SCORE_BASIC: u64 = 100;

/// Score for destroying an advanced hostile.
pub const SCORE_ADVANCED: u64 = 200;

/// Score for destroying a boss.
pub const SCORE_BOSS: u64 = 500;
