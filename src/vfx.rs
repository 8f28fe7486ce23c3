//! Visual effects for one-shot animations (muzzle flashes, bullet holes).
//!
//! These are separate from simulation state - they're spawned from events,
//! timed out per frame, and handed to the render surface without affecting
//! game logic.

use crate::assets::TextureHandle;
use crate::constants::*;
use crate::events::GameEvent;
use crate::navmesh::NavMesh;
use crate::weapon::GunId;
use glam::Vec3;

/// A one-shot visual effect
#[derive(Debug, Clone, PartialEq)]
pub struct VisualEffect {
    pub position: Vec3,
    /// Surface normal the effect faces along
    pub normal: Vec3,
    pub effect_type: EffectType,
    pub timer: f32,    // Time remaining
    pub duration: f32, // Total duration (for progress calculation)
}

impl VisualEffect {
    pub fn new(position: Vec3, normal: Vec3, effect_type: EffectType) -> Self {
        let duration = effect_type.duration();
        Self {
            position,
            normal,
            effect_type,
            timer: duration,
            duration,
        }
    }

    /// Progress from 0.0 (just started) to 1.0 (finished)
    pub fn progress(&self) -> f32 {
        1.0 - (self.timer / self.duration)
    }

    /// Returns true if effect is finished and should be removed
    pub fn is_finished(&self) -> bool {
        self.timer <= 0.0
    }

    /// Update the effect, returns true if still alive
    pub fn update(&mut self, dt: f32) -> bool {
        self.timer -= dt;
        !self.is_finished()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectType {
    /// Flash at the barrel of the gun that fired
    MuzzleFlash { gun: GunId },
    /// Decal where a round struck the level
    BulletHole { texture: TextureHandle },
}

impl EffectType {
    pub fn duration(&self) -> f32 {
        match self {
            EffectType::MuzzleFlash { .. } => MUZZLE_FLASH_DURATION,
            EffectType::BulletHole { .. } => BULLET_DECAL_DURATION,
        }
    }
}

/// Manager for all active visual effects
pub struct VfxManager {
    pub effects: Vec<VisualEffect>,
    decal_texture: TextureHandle,
}

impl VfxManager {
    pub fn new(decal_texture: TextureHandle) -> Self {
        Self {
            effects: Vec::new(),
            decal_texture,
        }
    }

    /// Spawn a new effect
    pub fn spawn(&mut self, position: Vec3, normal: Vec3, effect_type: EffectType) {
        self.effects.push(VisualEffect::new(position, normal, effect_type));
    }

    /// Update all effects, removing finished ones
    pub fn update(&mut self, dt: f32) {
        self.effects.retain_mut(|effect| effect.update(dt));
    }

    /// Handle a game event, spawning appropriate VFX
    pub fn handle_event(&mut self, event: &GameEvent, navmesh: &NavMesh) {
        if let GameEvent::ShotFired {
            gun,
            origin,
            direction,
        } = event
        {
            self.spawn(*origin, -*direction, EffectType::MuzzleFlash { gun: *gun });

            // Only the level surface is hit-tested; misses leave no decal
            if let Some((point, normal)) = navmesh.raycast(*origin, *direction, BULLET_DECAL_RANGE) {
                let texture = self.decal_texture.clone();
                self.spawn(point, normal, EffectType::BulletHole { texture });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetLibrary, AssetProvider};

    fn manager() -> VfxManager {
        VfxManager::new(AssetLibrary::prototype_level().get_texture("bullet-hole"))
    }

    #[test]
    fn test_shot_at_floor_spawns_flash_and_decal() {
        let mut vfx = manager();
        let floor = NavMesh::debug_floor(50.0);
        vfx.handle_event(
            &GameEvent::ShotFired {
                gun: GunId(0),
                origin: Vec3::new(0.0, 1.8, 0.0),
                direction: Vec3::new(0.0, -1.0, -1.0).normalize(),
            },
            &floor,
        );
        assert_eq!(vfx.effects.len(), 2);
        assert!(matches!(vfx.effects[1].effect_type, EffectType::BulletHole { .. }));
        assert!(vfx.effects[1].position.y.abs() < 1e-4);
    }

    #[test]
    fn test_shot_into_sky_leaves_no_decal() {
        let mut vfx = manager();
        let floor = NavMesh::debug_floor(50.0);
        vfx.handle_event(
            &GameEvent::ShotFired {
                gun: GunId(0),
                origin: Vec3::new(0.0, 1.8, 0.0),
                direction: Vec3::NEG_Z,
            },
            &floor,
        );
        assert_eq!(vfx.effects.len(), 1);
    }

    #[test]
    fn test_floor_beyond_decal_range_leaves_no_decal() {
        let mut vfx = manager();
        let floor = NavMesh::debug_floor(50.0);
        // Hits the floor about 30 units out
        vfx.handle_event(
            &GameEvent::ShotFired {
                gun: GunId(0),
                origin: Vec3::new(0.0, 1.8, 0.0),
                direction: Vec3::new(0.0, -0.06, -1.0).normalize(),
            },
            &floor,
        );
        assert_eq!(vfx.effects.len(), 1);
        assert!(matches!(vfx.effects[0].effect_type, EffectType::MuzzleFlash { .. }));
    }

    #[test]
    fn test_effects_expire() {
        let mut vfx = manager();
        vfx.spawn(Vec3::ZERO, Vec3::Y, EffectType::MuzzleFlash { gun: GunId(1) });
        vfx.update(MUZZLE_FLASH_DURATION * 0.5);
        assert_eq!(vfx.effects.len(), 1);
        assert!(vfx.effects[0].progress() > 0.0);
        vfx.update(MUZZLE_FLASH_DURATION);
        assert!(vfx.effects.is_empty());
    }
}
