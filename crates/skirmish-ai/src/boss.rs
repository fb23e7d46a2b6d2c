//! Boss escalation controller.
//!
//! Phase is derived from remaining health and only ever advances. Each
//! phase widens the pool of attack patterns the boss rolls from.

use std::f64::consts::PI;

use rand::Rng;

use skirmish_core::components::BossCore;
use skirmish_core::constants::*;
use skirmish_core::enums::{AttackPattern, BossPhase};

/// Phase implied by the boss's current health ratio, floored at the
/// phase already reached so transitions are one-way.
pub fn phase_for_health(current: BossPhase, ratio: f64) -> BossPhase {
    current.max(BossPhase::for_ratio(ratio))
}

/// Chance of rolling a spread pattern in phase 1.
const PHASE1_SPREAD_CHANCE: f64 = 0.3;

/// Rolls a new attack pattern from the pool available in `phase`.
/// Phase 1 leans heavily on normal fire; later phases draw uniformly
/// from a widening pool.
pub fn roll_attack_pattern<R: Rng>(phase: BossPhase, rng: &mut R) -> AttackPattern {
    match phase {
        BossPhase::One => {
            if rng.gen::<f64>() < PHASE1_SPREAD_CHANCE {
                AttackPattern::Spread
            } else {
                AttackPattern::Normal
            }
        }
        BossPhase::Two => {
            let pool = [AttackPattern::Spread, AttackPattern::Rapid, AttackPattern::Normal];
            pool[rng.gen_range(0..pool.len())]
        }
        BossPhase::Three => {
            let pool = [
                AttackPattern::Spread,
                AttackPattern::Rapid,
                AttackPattern::Circular,
                AttackPattern::Normal,
            ];
            pool[rng.gen_range(0..pool.len())]
        }
    }
}

/// Whether a cornered phase-3 boss blinks away this tick.
pub fn should_teleport<R: Rng>(boss: &BossCore, health: i32, rng: &mut R) -> bool {
    boss.phase == BossPhase::Three
        && health <= BOSS_TELEPORT_HEALTH
        && boss.teleport_cooldown == 0
        && rng.gen::<f64>() < BOSS_TELEPORT_CHANCE
}

/// Heading jitter for phase-3 erratic movement: uniform up to a
/// quarter turn to either side, or none.
pub fn erratic_jitter<R: Rng>(rng: &mut R) -> Option<f64> {
    if rng.gen::<f64>() < BOSS_ERRATIC_CHANCE {
        Some((rng.gen::<f64>() - 0.5) * PI)
    } else {
        None
    }
}
