//! Per-frame world systems.
//!
//! - `animation`: enemy animation playback
//! - `rendering`: render data collection

pub mod animation;
pub mod rendering;

pub use animation::update_enemy_animations;
pub use rendering::{collect_renderables, RenderEntity};
