//! Target selection and intercept prediction for hostile gunnery.
//!
//! Pure functions over plain data. Candidates are scored by desirability
//! scaled by proximity; ties resolve to the first candidate seen.

use glam::DVec2;

use skirmish_core::constants::*;
use skirmish_core::geom::{angle_to, wrap_point};

/// Identity of a prospective target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetId {
    Player,
    /// Allied vessel by spawn sequence number.
    Allied(u64),
}

/// A vessel a hostile may fire on.
#[derive(Debug, Clone, Copy)]
pub struct TargetCandidate {
    pub id: TargetId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub health_ratio: f64,
    pub is_alpha: bool,
    pub shield_active: bool,
}

/// The chosen target along with its scored appeal.
#[derive(Debug, Clone, Copy)]
pub struct TargetInfo {
    pub id: TargetId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub distance: f64,
    pub score: f64,
}

/// Intrinsic appeal of a candidate, before distance scaling.
///
/// The player is a fixed-value target. Allied vessels grow more
/// appealing as they take damage, the alpha draws a flat bonus, and an
/// active shield suppresses appeal.
pub fn base_desirability(candidate: &TargetCandidate) -> f64 {
    match candidate.id {
        TargetId::Player => PLAYER_BASE_DESIRABILITY,
        TargetId::Allied(_) => {
            let mut d = (1.0 - candidate.health_ratio) * 100.0;
            if candidate.is_alpha {
                d += ALPHA_TARGET_BONUS;
            }
            if candidate.shield_active {
                d -= SHIELD_TARGET_PENALTY;
            }
            d
        }
    }
}

/// Picks the best-scoring candidate within `detection_radius` of `from`.
///
/// Score is desirability scaled by `1 / (distance + 1)`. A later
/// candidate replaces the incumbent only by strictly exceeding its
/// score, so ordering of the candidate slice decides ties.
pub fn find_best_target(
    from: DVec2,
    candidates: &[TargetCandidate],
    detection_radius: f64,
) -> Option<TargetInfo> {
    let mut best: Option<TargetInfo> = None;
    for candidate in candidates {
        let distance = from.distance(candidate.position);
        if distance > detection_radius {
            continue;
        }
        let score = base_desirability(candidate) / (distance + 1.0);
        let replace = match &best {
            Some(incumbent) => score > incumbent.score,
            None => true,
        };
        if replace {
            best = Some(TargetInfo {
                id: candidate.id,
                position: candidate.position,
                velocity: candidate.velocity,
                distance,
                score,
            });
        }
    }
    best
}

/// Predicts where a shot fired now should aim to meet a moving target.
///
/// Flight time is estimated from current separation, the target is
/// advanced linearly, and the predicted point is folded back into the
/// field so gunnery stays accurate across the wrap seam.
pub fn predict_lead(
    shooter: DVec2,
    target_pos: DVec2,
    target_vel: DVec2,
    projectile_speed: f64,
    width: f64,
    height: f64,
) -> f64 {
    let flight_ticks = shooter.distance(target_pos) / projectile_speed;
    let predicted = wrap_point(target_pos + target_vel * flight_ticks, width, height);
    angle_to(shooter, predicted)
}
