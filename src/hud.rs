//! HUD read-model.
//!
//! Built purely from game events, so the overlay never reaches into the
//! simulation. Drawing it is up to the host.

use crate::events::GameEvent;
use crate::weapon::{GunId, GunKind};

#[derive(Debug, Clone, PartialEq)]
pub struct HudState {
    /// Stamina bar fill from 0.0 to 1.0
    pub stamina: f32,
    pub weapon: Option<(GunId, GunKind)>,
    pub magazine: u32,
    pub reserve: u32,
    pub reloading: bool,
    /// Show the "click to resume" overlay
    pub pause_overlay: bool,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            stamina: 1.0,
            weapon: None,
            magazine: 0,
            reserve: 0,
            reloading: false,
            pause_overlay: false,
        }
    }
}

impl HudState {
    pub fn new() -> Self {
        Self::default()
    }

    fn shows(&self, gun: GunId) -> bool {
        matches!(self.weapon, Some((id, _)) if id == gun)
    }

    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GamePaused => self.pause_overlay = true,
            GameEvent::GameResumed => self.pause_overlay = false,
            GameEvent::StaminaChanged { current, maximum } => {
                self.stamina = if *maximum > 0.0 {
                    (current / maximum).clamp(0.0, 1.0)
                } else {
                    0.0
                };
            }
            GameEvent::GunEquipped { gun, kind } => {
                self.weapon = Some((*gun, *kind));
                self.reloading = false;
            }
            GameEvent::GunUnequipped { gun } if self.shows(*gun) => {
                self.weapon = None;
                self.reloading = false;
            }
            GameEvent::AmmoChanged {
                gun,
                magazine,
                reserve,
            } if self.shows(*gun) => {
                self.magazine = *magazine;
                self.reserve = *reserve;
            }
            GameEvent::ReloadStarted { gun, .. } if self.shows(*gun) => self.reloading = true,
            GameEvent::ReloadFinished { gun } if self.shows(*gun) => self.reloading = false,
            _ => {}
        }
    }

    /// "12 | 100", or None with nothing equipped
    pub fn ammo_text(&self) -> Option<String> {
        self.weapon
            .map(|_| format!("{} | {}", self.magazine, self.reserve))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ammo_tracks_equipped_gun_only() {
        let mut hud = HudState::new();
        assert_eq!(hud.ammo_text(), None);

        hud.handle_event(&GameEvent::GunEquipped {
            gun: GunId(0),
            kind: GunKind::Pistol,
        });
        hud.handle_event(&GameEvent::AmmoChanged {
            gun: GunId(0),
            magazine: 11,
            reserve: 100,
        });
        hud.handle_event(&GameEvent::AmmoChanged {
            gun: GunId(1),
            magazine: 30,
            reserve: 120,
        });
        assert_eq!(hud.ammo_text().as_deref(), Some("11 | 100"));

        hud.handle_event(&GameEvent::GunUnequipped { gun: GunId(0) });
        assert_eq!(hud.ammo_text(), None);
    }

    #[test]
    fn test_pause_overlay_and_stamina() {
        let mut hud = HudState::new();
        hud.handle_event(&GameEvent::GamePaused);
        assert!(hud.pause_overlay);
        hud.handle_event(&GameEvent::GameResumed);
        assert!(!hud.pause_overlay);

        hud.handle_event(&GameEvent::StaminaChanged {
            current: 25.0,
            maximum: 100.0,
        });
        assert_eq!(hud.stamina, 0.25);
    }

    #[test]
    fn test_reload_indicator() {
        let mut hud = HudState::new();
        hud.handle_event(&GameEvent::GunEquipped {
            gun: GunId(2),
            kind: GunKind::Rifle,
        });
        hud.handle_event(&GameEvent::ReloadStarted {
            gun: GunId(2),
            duration: 2.0,
        });
        assert!(hud.reloading);
        hud.handle_event(&GameEvent::ReloadFinished { gun: GunId(2) });
        assert!(!hud.reloading);
    }
}
