//! Kinematic integration system.
//!
//! Rotates vessels toward their desired heading, applies thrust and
//! friction, clamps speed, advances positions, and wraps them across
//! the field edges. Obstacles and projectiles integrate separately.

use hecs::World;

use skirmish_core::components::{
    AlliedShip, BossCore, Intent, Mobility, Obstacle, PlayerShip, Position, Projectile, Velocity,
};
use skirmish_core::config::SimulationConfig;
use skirmish_core::constants::HEADING_EPSILON;
use skirmish_core::geom::{clamp_speed, heading_vec, normalize_angle, wrap_edge, wrap_with_margin};

pub fn run(world: &mut World, config: &SimulationConfig) {
    integrate_vessels(world, config);
    integrate_obstacles(world, config);
    integrate_projectiles(world, config);
}

fn integrate_vessels(world: &mut World, config: &SimulationConfig) {
    let center = glam::DVec2::new(config.world_width / 2.0, config.world_height / 2.0);

    for (_entity, (position, velocity, mobility, intent, player, allied, boss)) in world
        .query_mut::<(
            &mut Position,
            &mut Velocity,
            &mut Mobility,
            &mut Intent,
            Option<&PlayerShip>,
            Option<&AlliedShip>,
            Option<&BossCore>,
        )>()
    {
        // A freshly teleported boss skips this tick's movement entirely.
        if boss.map_or(false, |b| b.teleported) {
            intent.thrust = 0.0;
            continue;
        }

        // Gradual heading convergence; vessels never snap to a bearing.
        let diff = normalize_angle(mobility.target_heading - mobility.heading);
        if diff.abs() > HEADING_EPSILON {
            mobility.heading =
                normalize_angle(mobility.heading + mobility.rotation_step * diff.signum());
        }

        let anchored = (player.is_some() && config.anchor_player)
            || (allied.map_or(false, |a| a.is_alpha) && config.anchor_alpha);
        if anchored {
            position.0 = center;
            velocity.0 = glam::DVec2::ZERO;
            intent.thrust = 0.0;
            continue;
        }

        if intent.thrust != 0.0 {
            velocity.0 += heading_vec(mobility.heading) * mobility.thrust_power * intent.thrust;
            intent.thrust = 0.0;
        }
        velocity.0 *= mobility.friction;
        velocity.0 = clamp_speed(velocity.0, mobility.max_speed);
        position.0 += velocity.0;
        wrap_edge(&mut position.0, config.world_width, config.world_height);
    }
}

fn integrate_obstacles(world: &mut World, config: &SimulationConfig) {
    for (_entity, (position, velocity, obstacle)) in
        world.query_mut::<(&mut Position, &Velocity, &mut Obstacle)>()
    {
        obstacle.rotation = normalize_angle(obstacle.rotation + obstacle.rotation_speed);
        position.0 += velocity.0;
        wrap_with_margin(
            &mut position.0,
            obstacle.size,
            config.world_width,
            config.world_height,
        );
    }
}

fn integrate_projectiles(world: &mut World, config: &SimulationConfig) {
    for (_entity, (position, velocity, projectile)) in
        world.query_mut::<(&mut Position, &Velocity, &mut Projectile)>()
    {
        position.0 += velocity.0;
        wrap_edge(&mut position.0, config.world_width, config.world_height);
        projectile.lifetime -= 1;
    }
}
