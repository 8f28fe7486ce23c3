//! Core gameplay constants (movement, stamina, navmesh).

/// Player walking speed in metres per second
pub const PLAYER_SPEED: f32 = 5.0;
/// Speed multiplier applied while sprinting with stamina left
pub const SPRINT_MULTIPLIER: f32 = 1.8;
/// Fraction of the distance to the region plane corrected each frame
pub const NAVMESH_VERTICAL_DAMPING: f32 = 0.2;
/// Vertical tolerance when testing whether a point lies in a region
pub const NAVMESH_CONTAINS_EPSILON: f32 = 1.0;
/// Where the player spawns when nothing else is configured
pub const PLAYER_SPAWN: [f32; 3] = [0.0, 0.0, 0.0];

/// Stamina pool size
pub const STAMINA_MAX: f32 = 100.0;
/// Stamina drained per second of sprinting
pub const STAMINA_DRAIN_RATE: f32 = 100.0;
/// Stamina recovered per second while not sprinting
pub const STAMINA_RECHARGE_RATE: f32 = 50.0;
