//! Session-wide state shared by the update loop and its subscribers.
//!
//! Created when a game starts and torn down with it. Holds the pause flag
//! and the pending event queue, so nothing in the simulation reaches for
//! global state.

use crate::events::{EventQueue, GameEvent};

#[derive(Debug, Default)]
pub struct SessionContext {
    paused: bool,
    active: bool,
    /// Frames simulated so far (paused frames are not counted)
    pub frame: u64,
    /// Simulated seconds since the session started
    pub elapsed: f32,
    pub events: EventQueue,
}

impl SessionContext {
    pub fn start() -> Self {
        log::info!("Session started");
        Self {
            active: true,
            ..Self::default()
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Freeze the simulation. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        if self.paused || !self.active {
            return false;
        }
        self.paused = true;
        self.events.push(GameEvent::GamePaused);
        log::info!("Game paused at frame {}", self.frame);
        true
    }

    /// Returns false if the session was not paused.
    pub fn resume(&mut self) -> bool {
        if !self.paused || !self.active {
            return false;
        }
        self.paused = false;
        self.events.push(GameEvent::GameResumed);
        log::info!("Game resumed at frame {}", self.frame);
        true
    }

    pub fn advance_frame(&mut self, dt: f32) {
        self.frame += 1;
        self.elapsed += dt;
    }

    /// End the session. Pending events are discarded.
    pub fn teardown(&mut self) {
        self.active = false;
        self.paused = false;
        self.events.drain().for_each(drop);
        log::info!(
            "Session ended after {} frames ({:.1}s)",
            self.frame,
            self.elapsed
        );
    }
}
