//! Game event system for decoupled communication between systems.
//!
//! The simulation emits events, other systems consume them.
//! This lets VFX, the HUD and the application shell react without ever
//! taking part in simulation timing.

use crate::weapon::{GunId, GunKind};
use glam::Vec3;

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Pointer control was lost and the simulation is frozen
    GamePaused,
    /// The shell resumed the game
    GameResumed,
    /// Stamina changed this frame
    StaminaChanged { current: f32, maximum: f32 },
    /// Magazine or reserve count of a gun changed
    AmmoChanged {
        gun: GunId,
        magazine: u32,
        reserve: u32,
    },
    /// A gun left the player's hands and was detached from the camera
    GunUnequipped { gun: GunId },
    /// A gun finished its show animation and is ready to fire
    GunEquipped { gun: GunId, kind: GunKind },
    /// The in-flight equip/unequip transition finished; new requests are accepted again
    TransitionComplete,
    /// A round left the barrel
    ShotFired {
        gun: GunId,
        origin: Vec3,
        direction: Vec3,
    },
    /// Trigger pulled on an empty magazine
    DryFire { gun: GunId },
    ReloadStarted { gun: GunId, duration: f32 },
    ReloadFinished { gun: GunId },
}

/// Simple event queue - events are pushed during update, processed at end of frame
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
