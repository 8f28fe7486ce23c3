//! Animation systems.

use crate::components::AnimatedCharacter;
use hecs::World;

/// Advance every animated character, looping at the end of its clip
pub fn update_enemy_animations(world: &mut World, dt: f32) {
    for (_id, animation) in world.query_mut::<&mut AnimatedCharacter>() {
        if animation.clip_length <= 0.0 {
            continue;
        }
        animation.time = (animation.time + dt * animation.speed).rem_euclid(animation.clip_length);
    }
}
