//! Frame timing constants.

/// Maximum delta time for one frame (prevents tunnelling after long stalls)
pub const MAX_FRAME_DT: f32 = 0.1;
