//! Player locomotion: camera-relative movement, sprinting and navmesh clamping.

use crate::camera::Camera;
use crate::config::PlayerConfig;
use crate::input::{InputAction, InputState};
use crate::navmesh::{NavMesh, RegionId};
use crate::stamina::Stamina;
use glam::{Vec2, Vec3};

/// Unit move direction from the four direction flags: x is right, y is forward.
/// Opposing keys cancel out.
pub fn move_direction(input: &InputState) -> Vec2 {
    let axis = |positive: InputAction, negative: InputAction| {
        input.is_pressed(positive) as i32 as f32 - input.is_pressed(negative) as i32 as f32
    };
    Vec2::new(
        axis(InputAction::Right, InputAction::Left),
        axis(InputAction::Forward, InputAction::Backward),
    )
    .normalize_or_zero()
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    pub previous_position: Vec3,
    current_region: Option<RegionId>,
    speed: f32,
    sprint_multiplier: f32,
    vertical_damping: f32,
}

impl Player {
    pub fn new(config: &PlayerConfig, navmesh: &NavMesh) -> Self {
        let current_region = navmesh.get_region_for_point(config.spawn);
        if current_region.is_none() {
            log::warn!("Player spawn {:?} is off the navmesh", config.spawn);
        }
        Self {
            position: config.spawn,
            previous_position: config.spawn,
            current_region,
            speed: config.speed,
            sprint_multiplier: config.sprint_multiplier,
            vertical_damping: config.vertical_damping,
        }
    }

    pub fn current_region(&self) -> Option<RegionId> {
        self.current_region
    }

    /// Base speed, times the sprint multiplier only while sprinting with stamina left
    pub fn effective_speed(&self, sprinting: bool, stamina: &Stamina) -> f32 {
        if sprinting && !stamina.is_depleted() {
            self.speed * self.sprint_multiplier
        } else {
            self.speed
        }
    }

    /// Move for one frame and settle onto the walkable surface
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputState,
        stamina: &Stamina,
        camera: &Camera,
        navmesh: &NavMesh,
    ) {
        puffin::profile_function!();

        let direction = move_direction(input);
        let speed = self.effective_speed(input.is_pressed(InputAction::Sprint), stamina);
        let step = direction * speed * dt.max(0.0);
        let displacement = camera.right_flat() * step.x + camera.forward_flat() * step.y;

        self.previous_position = self.position;
        let target = self.position + displacement;

        let (clamped, region) = navmesh.clamp_movement(self.current_region, self.previous_position, target);
        if region.is_none() && self.current_region.is_some() {
            log::debug!("Player left the navmesh at {:?}", clamped);
        }
        self.position = clamped;
        self.current_region = region;

        // Ease toward the surface instead of snapping onto it
        if let Some(region) = self.current_region.and_then(|id| navmesh.region(id)) {
            let distance = region.plane.distance_to_point(self.position);
            self.position.y -= distance * self.vertical_damping;
        }
    }
}
