//! First-person camera constants.

/// Eye height above the player's feet
pub const CAMERA_EYE_HEIGHT: f32 = 1.8;
/// Radians of rotation per pixel of mouse movement
pub const CAMERA_LOOK_SENSITIVITY: f32 = 0.002;
/// Pitch limit (just short of straight up/down)
pub const CAMERA_MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
