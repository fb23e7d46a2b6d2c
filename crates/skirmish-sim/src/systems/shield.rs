//! Shield countdowns and autonomous activation.
//!
//! The player's shield is held-input driven and managed by the engine;
//! this system runs the timers and spontaneous activation rolls for
//! autonomous vessels only.

use hecs::World;
use rand::Rng;

use skirmish_core::components::{AlliedShip, BossCore, HostileShip, Shield};
use skirmish_core::constants::*;
use skirmish_core::enums::{BossPhase, HostileArchetype};

/// Ticks down an active shield or its cooldown. Returns true when the
/// shield may roll for activation this tick.
fn advance(shield: &mut Shield) -> bool {
    if shield.active {
        shield.duration = shield.duration.saturating_sub(1);
        if shield.duration == 0 {
            shield.active = false;
            shield.cooldown = SHIELD_COOLDOWN;
        }
        false
    } else if shield.cooldown > 0 {
        shield.cooldown -= 1;
        false
    } else {
        true
    }
}

pub fn run<R: Rng>(world: &mut World, rng: &mut R) {
    for (_entity, (_ship, shield)) in world.query_mut::<(&AlliedShip, &mut Shield)>() {
        if advance(shield) && rng.gen::<f64>() < SHIELD_CHANCE_BASIC {
            shield.active = true;
            shield.duration = SHIELD_DURATION;
        }
    }

    for (_entity, (ship, shield, boss)) in
        world.query_mut::<(&HostileShip, &mut Shield, Option<&BossCore>)>()
    {
        if !advance(shield) {
            continue;
        }
        match ship.archetype {
            HostileArchetype::Basic => {
                if rng.gen::<f64>() < SHIELD_CHANCE_BASIC {
                    shield.active = true;
                    shield.duration = SHIELD_DURATION;
                }
            }
            HostileArchetype::Advanced => {
                if rng.gen::<f64>() < SHIELD_CHANCE_ADVANCED {
                    shield.active = true;
                    shield.duration = SHIELD_DURATION;
                }
            }
            HostileArchetype::Boss => {
                // Bosses only shield periodically from phase 2 on; the
                // phase-transition pulse is applied by the boss system.
                let eligible = boss.map_or(false, |b| b.phase >= BossPhase::Two);
                if eligible && rng.gen::<f64>() < BOSS_SHIELD_CHANCE {
                    shield.active = true;
                    shield.duration = BOSS_SHIELD_DURATION;
                }
            }
        }
    }
}
