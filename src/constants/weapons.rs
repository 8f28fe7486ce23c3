//! Weapon catalogue defaults.

/// Pistol rate of fire (rounds per minute)
pub const PISTOL_RPM: f32 = 180.0;
/// Pistol magazine capacity
pub const PISTOL_MAG_SIZE: u32 = 12;
/// Pistol spare rounds carried at pickup
pub const PISTOL_RESERVE: u32 = 100;
/// Pistol reload time in seconds
pub const PISTOL_RELOAD_DURATION: f32 = 1.2;
/// Where the pistol sits relative to the camera
pub const PISTOL_HOLD_POSITION: [f32; 3] = [0.15, -0.2, -0.5];

/// Rifle rate of fire (rounds per minute)
pub const RIFLE_RPM: f32 = 600.0;
/// Rifle magazine capacity
pub const RIFLE_MAG_SIZE: u32 = 30;
/// Rifle spare rounds carried at pickup
pub const RIFLE_RESERVE: u32 = 120;
/// Rifle reload time in seconds
pub const RIFLE_RELOAD_DURATION: f32 = 2.0;
/// Where the rifle sits relative to the camera
pub const RIFLE_HOLD_POSITION: [f32; 3] = [0.2, -0.25, -0.6];

/// Recoil position kick
pub const GUN_RECOIL_POS_MOD: [f32; 3] = [0.0, 0.02, 0.1];
/// Recoil rotation kick
pub const GUN_RECOIL_ROT_MOD: [f32; 3] = [0.1, 0.0, 0.0];
