//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Every value here is also the default for the matching config field.

mod animation;
mod camera;
mod gameplay;
mod time;
mod weapons;

pub use animation::*;
pub use camera::*;
pub use gameplay::*;
pub use time::*;
pub use weapons::*;
