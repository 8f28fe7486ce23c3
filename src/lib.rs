//! First-person survival shooter core: input, stamina, navmesh locomotion,
//! weapons and the per-frame loop. Rendering, windowing and asset decoding
//! live behind the [`renderer::RenderSurface`] and [`assets::AssetProvider`] seams.

pub mod app;
pub mod assets;
pub mod camera;
pub mod components;
pub mod config;
pub mod constants;
pub mod equipment;
pub mod events;
pub mod game_loop;
pub mod hud;
pub mod input;
pub mod navmesh;
pub mod player;
pub mod renderer;
pub mod session;
pub mod spawning;
pub mod stamina;
pub mod systems;
pub mod tween;
pub mod vfx;
pub mod weapon;
