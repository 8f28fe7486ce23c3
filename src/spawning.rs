//! Data-driven entity spawning.
//!
//! Enemy types are described by data so new ones can be added without
//! touching spawning code.

use crate::assets::AssetProvider;
use crate::components::{AnimatedCharacter, AnimationState, Enemy, Model, Transform};
use crate::constants::*;
use crate::renderer::{Anchor, RenderSurface};
use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;

/// Definition of an enemy type - all the data needed to spawn one
#[derive(Debug, Clone)]
pub struct EnemyDef {
    /// Display name (for logs)
    pub name: &'static str,
    /// Model looked up through the asset provider
    pub model: &'static str,
    pub initial_state: AnimationState,
    pub clip_length: f32,
}

impl EnemyDef {
    /// Spawn this enemy type at the given position, attached to the scene.
    /// Playback speed and starting phase are randomized so crowds don't move in lockstep.
    pub fn spawn(
        &self,
        world: &mut World,
        assets: &dyn AssetProvider,
        render: &mut dyn RenderSurface,
        position: Vec3,
        rng: &mut impl Rng,
    ) -> Entity {
        let model = assets.get_model(self.model);
        render.attach(&model, Anchor::Scene);

        let yaw = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(ENEMY_ANIM_SPEED_MIN..=ENEMY_ANIM_SPEED_MAX);
        let mut animation = AnimatedCharacter::new(self.initial_state, self.clip_length, speed);
        animation.time = rng.gen_range(0.0..self.clip_length.max(f32::EPSILON));

        log::debug!("Spawned {} at {:?}", self.name, position);
        world.spawn((
            Enemy,
            Transform::new(position, yaw),
            Model(model),
            animation,
        ))
    }
}

/// Predefined enemy types
pub mod enemies {
    use super::*;

    pub const ZOMBIE: EnemyDef = EnemyDef {
        name: "Zombie",
        model: "zombie-01",
        initial_state: AnimationState::Idle,
        clip_length: ZOMBIE_IDLE_CLIP_LENGTH,
    };
}

/// Spawn a zombie at each spawn point
pub fn spawn_enemies(
    world: &mut World,
    assets: &dyn AssetProvider,
    render: &mut dyn RenderSurface,
    spawns: &[Vec3],
) -> Vec<Entity> {
    let mut rng = rand::thread_rng();
    spawns
        .iter()
        .map(|&position| enemies::ZOMBIE.spawn(world, assets, render, position, &mut rng))
        .collect()
}
