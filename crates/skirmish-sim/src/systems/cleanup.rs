//! Expired projectile cleanup.

use hecs::{Entity, World};

use skirmish_core::components::Projectile;

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, projectile) in world.query::<&Projectile>().iter() {
        if projectile.lifetime <= 0 {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
