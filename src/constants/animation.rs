//! Animation-related constants.

/// Duration of the gun show (raise) animation in seconds
pub const GUN_SHOW_DURATION: f32 = 0.3;
/// Duration of the gun hide (lower) animation in seconds
pub const GUN_HIDE_DURATION: f32 = 0.2;
/// Height the gun rises from when shown
pub const GUN_SHOW_START_Y: f32 = -1.0;
/// X rotation the gun starts at when shown
pub const GUN_SHOW_START_ROT_X: f32 = -std::f32::consts::PI;
/// Duration of the recoil kick and settle in seconds
pub const RECOIL_DURATION: f32 = 0.08;
/// Muzzle flash VFX duration in seconds
pub const MUZZLE_FLASH_DURATION: f32 = 0.05;
/// Bullet hole decal lifetime in seconds
pub const BULLET_DECAL_DURATION: f32 = 10.0;
/// Farthest surface a shot can leave a decal on; misses leave none
pub const BULLET_DECAL_RANGE: f32 = 20.0;
/// Playback speed range for enemy idle animations
pub const ENEMY_ANIM_SPEED_MIN: f32 = 0.8;
pub const ENEMY_ANIM_SPEED_MAX: f32 = 1.2;
/// Length of the zombie idle clip in seconds
pub const ZOMBIE_IDLE_CLIP_LENGTH: f32 = 2.4;
