//! Boss escalation system.
//!
//! Recomputes the phase from health every tick, cycles attack patterns
//! on a fixed interval, and runs the phase-3 teleport and erratic
//! movement abilities. Decisions come from `skirmish_ai::boss`.

use hecs::World;
use rand::Rng;

use skirmish_ai::boss::{erratic_jitter, phase_for_health, roll_attack_pattern, should_teleport};
use skirmish_core::components::{BossCore, Health, HostileShip, Position, Shield};
use skirmish_core::config::SimulationConfig;
use skirmish_core::constants::*;
use skirmish_core::enums::BossPhase;
use skirmish_core::events::CombatEvent;

use crate::spawn;

pub fn run<R: Rng>(
    world: &mut World,
    rng: &mut R,
    config: &SimulationConfig,
    events: &mut Vec<CombatEvent>,
) {
    for (_entity, (ship, boss, health, shield, position)) in world.query_mut::<(
        &HostileShip,
        &mut BossCore,
        &Health,
        &mut Shield,
        &mut Position,
    )>() {
        boss.teleported = false;
        boss.pending_jitter = None;
        boss.teleport_cooldown = boss.teleport_cooldown.saturating_sub(1);
        boss.transition_timer = boss.transition_timer.saturating_sub(1);

        let phase = phase_for_health(boss.phase, health.ratio());
        if phase != boss.phase {
            boss.phase = phase;
            boss.transition_timer = BOSS_TRANSITION_TICKS;
            shield.active = true;
            shield.duration = BOSS_TRANSITION_SHIELD_TICKS;
            boss.attack_pattern = roll_attack_pattern(phase, rng);
            boss.pattern_timer = 0;
            log::info!("boss {} entered {:?}", ship.seq, phase);
            events.push(CombatEvent::BossPhaseChanged {
                seq: ship.seq,
                phase,
            });
        }

        boss.pattern_timer += 1;
        if boss.pattern_timer >= BOSS_PATTERN_INTERVAL {
            boss.pattern_timer = 0;
            boss.attack_pattern = roll_attack_pattern(boss.phase, rng);
        }

        // Teleport repositions only; momentum carries through the jump.
        if should_teleport(boss, health.current, rng) {
            position.0 = spawn::random_point(rng, config);
            boss.teleport_cooldown = BOSS_TELEPORT_COOLDOWN;
            boss.teleported = true;
            events.push(CombatEvent::BossTeleported {
                seq: ship.seq,
                position: position.0,
            });
            continue;
        }

        if boss.phase == BossPhase::Three {
            boss.erratic_timer += 1;
            if boss.erratic_timer >= BOSS_ERRATIC_INTERVAL {
                boss.erratic_timer = 0;
                boss.pending_jitter = erratic_jitter(rng);
            }
        }
    }
}
