//! Toroidal-world geometry helpers.

use std::f64::consts::PI;

use glam::DVec2;

/// Normalizes an angle into `(-PI, PI]`.
pub fn normalize_angle(mut angle: f64) -> f64 {
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `heading`.
pub fn heading_vec(heading: f64) -> DVec2 {
    DVec2::new(heading.cos(), heading.sin())
}

/// Heading of the straight-line path from `from` to `to`.
pub fn angle_to(from: DVec2, to: DVec2) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Wraps a moving body across the world edges.
///
/// A coordinate that crosses below zero is placed at the far edge and one
/// that crosses above the edge snaps back to zero, so a vessel exiting at
/// `x = -0.1` reappears at exactly `x = width`.
pub fn wrap_edge(pos: &mut DVec2, width: f64, height: f64) {
    if pos.x < 0.0 {
        pos.x = width;
    } else if pos.x > width {
        pos.x = 0.0;
    }
    if pos.y < 0.0 {
        pos.y = height;
    } else if pos.y > height {
        pos.y = 0.0;
    }
}

/// Wraps an abstract point (such as a predicted intercept) into `[0, w)`.
pub fn wrap_point(pos: DVec2, width: f64, height: f64) -> DVec2 {
    DVec2::new(pos.x.rem_euclid(width), pos.y.rem_euclid(height))
}

/// Wraps an obstacle, allowing it to fully leave the field before
/// reappearing on the opposite side.
pub fn wrap_with_margin(pos: &mut DVec2, size: f64, width: f64, height: f64) {
    if pos.x < -size {
        pos.x = width + size;
    } else if pos.x > width + size {
        pos.x = -size;
    }
    if pos.y < -size {
        pos.y = height + size;
    } else if pos.y > height + size {
        pos.y = -size;
    }
}

/// Clamps a velocity to `max_speed` preserving direction.
pub fn clamp_speed(vel: DVec2, max_speed: f64) -> DVec2 {
    let speed = vel.length();
    if speed > max_speed {
        vel * (max_speed / speed)
    } else {
        vel
    }
}

/// Euclidean distance between two points, ignoring wrap.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}
