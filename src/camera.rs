use crate::config::CameraConfig;
use crate::constants::*;
use glam::{Vec2, Vec3};

/// Where shots come from and where they go
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// First-person camera riding at eye height above the player.
///
/// Yaw 0 looks down -Z. Positive yaw turns left, positive pitch looks up.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    eye_height: f32,
    sensitivity: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: Vec3::new(0.0, config.eye_height, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            eye_height: config.eye_height,
            sensitivity: config.look_sensitivity,
        }
    }

    /// Apply mouse movement in pixels
    pub fn look(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.yaw -= delta.x * self.sensitivity;
        self.pitch = (self.pitch - delta.y * self.sensitivity)
            .clamp(-CAMERA_MAX_PITCH, CAMERA_MAX_PITCH);
        self.yaw = self.yaw.rem_euclid(std::f32::consts::TAU);
    }

    /// Keep the eye above the player's feet
    pub fn follow(&mut self, feet: Vec3) {
        self.position = feet + Vec3::Y * self.eye_height;
    }

    /// Horizontal forward, ignoring pitch
    pub fn forward_flat(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal right, ignoring pitch
    pub fn right_flat(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Full view direction including pitch
    pub fn view_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            -self.yaw.sin() * cos_pitch,
            sin_pitch,
            -self.yaw.cos() * cos_pitch,
        )
    }

    pub fn aim(&self) -> Aim {
        Aim {
            origin: self.position,
            direction: self.view_direction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_axes() {
        let camera = Camera::new(&CameraConfig::default());
        assert!(approx(camera.forward_flat(), Vec3::NEG_Z));
        assert!(approx(camera.right_flat(), Vec3::X));
        assert!(approx(camera.view_direction(), Vec3::NEG_Z));
    }

    #[test]
    fn test_turn_right_quarter() {
        let mut camera = Camera::new(&CameraConfig {
            eye_height: 1.8,
            look_sensitivity: 1.0,
        });
        camera.look(Vec2::new(std::f32::consts::FRAC_PI_2, 0.0));
        assert!(approx(camera.forward_flat(), Vec3::X));
        assert!(approx(camera.right_flat(), Vec3::Z));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::new(&CameraConfig {
            eye_height: 1.8,
            look_sensitivity: 1.0,
        });
        camera.look(Vec2::new(0.0, -100.0));
        assert_eq!(camera.pitch, CAMERA_MAX_PITCH);
        assert!(camera.view_direction().y > 0.99);
    }

    #[test]
    fn test_follow_sets_eye_height() {
        let mut camera = Camera::new(&CameraConfig::default());
        camera.follow(Vec3::new(2.0, 0.5, -1.0));
        assert!(approx(camera.position, Vec3::new(2.0, 0.5 + CAMERA_EYE_HEIGHT, -1.0)));
    }
}
