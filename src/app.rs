//! Application shell around a running game.
//!
//! Tracks whether assets are loaded, whether a game is running, and whether
//! it is paused. The shell owns the HUD and feeds it every event the game
//! publishes; it is also the only caller of `resume_game`.

use crate::assets::AssetProvider;
use crate::config::GameConfig;
use crate::game_loop::Game;
use crate::hud::HudState;
use crate::renderer::RenderSurface;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("assets are not loaded yet")]
    NotLoaded,
    #[error("a game is already running")]
    AlreadyStarted,
}

pub struct AppState<A: AssetProvider, R: RenderSurface> {
    assets: Option<A>,
    started: bool,
    paused: bool,
    game: Option<Game<A, R>>,
    pub hud: HudState,
}

impl<A: AssetProvider, R: RenderSurface> Default for AppState<A, R> {
    fn default() -> Self {
        Self {
            assets: None,
            started: false,
            paused: false,
            game: None,
            hud: HudState::new(),
        }
    }
}

impl<A: AssetProvider, R: RenderSurface> AppState<A, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The loader finished
    pub fn on_load(&mut self, assets: A) {
        log::info!("Assets loaded");
        self.assets = Some(assets);
    }

    pub fn is_loaded(&self) -> bool {
        self.assets.is_some() || self.game.is_some()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn start_game(&mut self, config: GameConfig, render: R) -> Result<(), AppError> {
        if self.started {
            return Err(AppError::AlreadyStarted);
        }
        let assets = self.assets.take().ok_or(AppError::NotLoaded)?;
        self.game = Some(Game::new(config, assets, render));
        self.started = true;
        self.paused = false;
        self.hud = HudState::new();
        self.sync();
        Ok(())
    }

    pub fn frame(&mut self, dt: f32) {
        if let Some(game) = self.game.as_mut() {
            game.frame(dt);
        }
        self.sync();
    }

    /// The host lost pointer lock
    pub fn pointer_lock_lost(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.pointer_lock_lost();
        }
        self.sync();
    }

    /// Called from the pause overlay
    pub fn resume_game(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.resume_game();
        }
        self.sync();
    }

    /// Tear the running game down and return to the loaded state
    pub fn end_game(&mut self) -> Option<Game<A, R>> {
        let mut game = self.game.take()?;
        game.teardown();
        self.started = false;
        self.paused = false;
        Some(game)
    }

    pub fn game(&self) -> Option<&Game<A, R>> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut Game<A, R>> {
        self.game.as_mut()
    }

    fn sync(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        for event in game.drain_events() {
            self.hud.handle_event(&event);
        }
        self.paused = game.is_paused();
    }
}
