//! Held weapons, hotkeys and the equip/unequip sequence.
//!
//! Switching guns is strictly serialized: the outgoing gun hides and leaves
//! the camera before the incoming one is attached and shown. A second request
//! while a switch is running is rejected, never queued.

use crate::assets::{AssetProvider, TextureHandle};
use crate::camera::Aim;
use crate::config::GunSpec;
use crate::events::{EventQueue, GameEvent};
use crate::input::{KeyBinding, KeyboardListener};
use crate::renderer::{Anchor, RenderSurface};
use crate::tween::{Easing, Tween};
use crate::weapon::{Gun, GunId, ReloadError, ReloadPolicy, TransitionError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquipError {
    #[error("weapon switch already in progress")]
    TransitionInProgress,
    #[error("not holding gun there")]
    NotHeld(GunId),
    #[error("already holding it")]
    AlreadyEquipped(GunId),
    #[error("no weapon on hotkey {}", .0 + 1)]
    HotkeyOutOfRange(usize),
    #[error("nothing equipped")]
    NothingEquipped,
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Reload(#[from] ReloadError),
}

/// A switch in flight
#[derive(Debug, Clone)]
enum Transition {
    /// Outgoing gun lowering; `to` is shown once it is detached
    Hiding { from: GunId, to: GunId, tween: Tween },
    /// Incoming gun rising into the hold pose
    Showing { to: GunId, tween: Tween, attached: bool },
}

struct HeldGun {
    gun: Gun,
    skin: TextureHandle,
}

pub struct EquipmentManager {
    held: Vec<HeldGun>,
    equipped: Option<GunId>,
    transition: Option<Transition>,
    next_id: u32,
    reload_policy: ReloadPolicy,
    show_duration: f32,
    hide_duration: f32,
}

impl EquipmentManager {
    pub fn new(reload_policy: ReloadPolicy, show_duration: f32, hide_duration: f32) -> Self {
        Self {
            held: Vec::new(),
            equipped: None,
            transition: None,
            next_id: 0,
            reload_policy,
            show_duration,
            hide_duration,
        }
    }

    /// Add a gun to the held list and bind the next number key to it.
    /// The first gun picked up answers to "1".
    pub fn pickup_weapon(
        &mut self,
        spec: &GunSpec,
        assets: &dyn AssetProvider,
        keyboard: &mut KeyboardListener,
    ) -> GunId {
        let id = GunId(self.next_id);
        self.next_id += 1;

        let model = assets.get_model(&spec.model);
        let skin = assets.get_texture(&spec.texture);
        let gun = Gun::new(id, spec, model, self.reload_policy);

        let slot = self.held.len();
        keyboard.on(&(slot + 1).to_string(), KeyBinding::Hotkey(slot));
        self.held.push(HeldGun { gun, skin });

        log::info!("Picked up {} ({}) on hotkey {}", spec.kind.name(), id, slot + 1);
        id
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    pub fn held_guns(&self) -> impl Iterator<Item = &Gun> {
        self.held.iter().map(|held| &held.gun)
    }

    pub fn gun(&self, id: GunId) -> Option<&Gun> {
        self.held.iter().find(|held| held.gun.id() == id).map(|held| &held.gun)
    }

    fn slot_mut(&mut self, id: GunId) -> Option<&mut HeldGun> {
        self.held.iter_mut().find(|held| held.gun.id() == id)
    }

    /// The last gun to finish equipping. During a switch this stays on the
    /// outgoing gun until the incoming one is fully shown.
    pub fn equipped(&self) -> Option<GunId> {
        self.equipped
    }

    pub fn equipped_gun(&self) -> Option<&Gun> {
        self.equipped.and_then(|id| self.gun(id))
    }

    /// The equipped gun, only while no switch is running
    pub fn ready_gun(&self) -> Option<&Gun> {
        if self.transition.is_some() {
            return None;
        }
        self.equipped_gun()
    }

    pub fn transition_in_progress(&self) -> bool {
        self.transition.is_some()
    }

    /// Start switching to `id`. Nothing moves until [`Self::advance_transition`] runs.
    pub fn equip(&mut self, id: GunId) -> Result<(), EquipError> {
        if self.transition.is_some() {
            log::debug!("Ignoring equip of {}: switch in progress", id);
            return Err(EquipError::TransitionInProgress);
        }
        if self.gun(id).is_none() {
            log::warn!("not holding gun there");
            return Err(EquipError::NotHeld(id));
        }
        if self.equipped == Some(id) {
            log::info!("already holding it");
            return Err(EquipError::AlreadyEquipped(id));
        }

        let hide_duration = self.hide_duration;
        let show_duration = self.show_duration;
        let transition = match self.equipped {
            Some(current) => {
                let outgoing = self
                    .slot_mut(current)
                    .ok_or(EquipError::NotHeld(current))?;
                let from_pose = outgoing.gun.pose();
                let to_pose = outgoing.gun.stowed_pose();
                outgoing.gun.disable()?;
                Transition::Hiding {
                    from: current,
                    to: id,
                    tween: Tween::new(from_pose, to_pose, hide_duration, Easing::QuadIn),
                }
            }
            None => {
                let incoming = self.slot_mut(id).ok_or(EquipError::NotHeld(id))?;
                incoming.gun.begin_equip()?;
                let tween = Tween::new(
                    incoming.gun.stowed_pose(),
                    incoming.gun.hold_pose(),
                    show_duration,
                    Easing::QuadOut,
                );
                Transition::Showing {
                    to: id,
                    tween,
                    attached: false,
                }
            }
        };

        log::debug!("Switching to {}", id);
        self.transition = Some(transition);
        Ok(())
    }

    /// Equip the gun bound to a zero-based hotkey slot
    pub fn select_by_hotkey(&mut self, slot: usize) -> Result<(), EquipError> {
        let Some(held) = self.held.get(slot) else {
            log::warn!("not holding gun there");
            return Err(EquipError::HotkeyOutOfRange(slot));
        };
        let id = held.gun.id();
        self.equip(id)
    }

    /// Step a running switch by one frame
    pub fn advance_transition(
        &mut self,
        dt: f32,
        render: &mut dyn RenderSurface,
        events: &mut EventQueue,
    ) {
        let Some(transition) = self.transition.take() else {
            return;
        };

        self.transition = match transition {
            Transition::Hiding { from, to, mut tween } => {
                let pose = tween.advance(dt);
                match self.slot_mut(from) {
                    Some(outgoing) => {
                        render.set_pose(outgoing.gun.model(), pose);
                        if tween.is_finished() {
                            render.set_visible(outgoing.gun.model(), false);
                            render.detach(outgoing.gun.model(), Anchor::Camera);
                            if let Err(e) = outgoing.gun.finish_unequip() {
                                log::error!("{} did not unequip cleanly: {}", from, e);
                            }
                            events.push(GameEvent::GunUnequipped { gun: from });
                            self.begin_show(to)
                        } else {
                            Some(Transition::Hiding { from, to, tween })
                        }
                    }
                    None => self.begin_show(to),
                }
            }
            Transition::Showing {
                to,
                mut tween,
                attached,
            } => {
                let Some(incoming) = self.slot_mut(to) else {
                    log::error!("{} vanished while being shown", to);
                    return;
                };
                if !attached {
                    render.attach(incoming.gun.model(), Anchor::Camera);
                    render.apply_texture(incoming.gun.model(), &incoming.skin);
                    render.set_visible(incoming.gun.model(), true);
                }
                let pose = tween.advance(dt);
                render.set_pose(incoming.gun.model(), pose);

                if tween.is_finished() {
                    if let Err(e) = incoming.gun.enable() {
                        log::error!("{} could not be enabled: {}", to, e);
                    }
                    let kind = incoming.gun.kind();
                    events.push(GameEvent::GunEquipped { gun: to, kind });
                    events.push(incoming.gun.ammo_event());
                    log::info!("Equipped {} ({})", kind.name(), to);
                    self.equipped = Some(to);
                    events.push(GameEvent::TransitionComplete);
                    None
                } else {
                    Some(Transition::Showing {
                        to,
                        tween,
                        attached: true,
                    })
                }
            }
        };
    }

    fn begin_show(&mut self, id: GunId) -> Option<Transition> {
        let show_duration = self.show_duration;
        let incoming = self.slot_mut(id)?;
        if let Err(e) = incoming.gun.begin_equip() {
            log::error!("{} cannot be shown: {}", id, e);
            return None;
        }
        let tween = Tween::new(
            incoming.gun.stowed_pose(),
            incoming.gun.hold_pose(),
            show_duration,
            Easing::QuadOut,
        );
        Some(Transition::Showing {
            to: id,
            tween,
            attached: false,
        })
    }

    /// Run the equipped gun for one frame. Trigger input is ignored mid-switch.
    pub fn update(
        &mut self,
        dt: f32,
        trigger_held: bool,
        aim: Aim,
        render: &mut dyn RenderSurface,
        events: &mut EventQueue,
    ) {
        if self.transition.is_some() {
            return;
        }
        let Some(id) = self.equipped else {
            return;
        };
        if let Some(held) = self.slot_mut(id) {
            held.gun.update(dt, trigger_held, aim, events);
            render.set_pose(held.gun.model(), held.gun.pose());
        }
    }

    /// Take whatever gun is on the camera off it, including one mid-switch
    pub fn teardown(&mut self, render: &mut dyn RenderSurface) {
        let on_camera = match self.transition.take() {
            Some(Transition::Hiding { from, .. }) => Some(from),
            Some(Transition::Showing {
                to, attached: true, ..
            }) => Some(to),
            Some(Transition::Showing { attached: false, .. }) => None,
            None => self.equipped,
        };
        if let Some(held) = on_camera.and_then(|id| self.gun(id)) {
            render.set_visible(held.model(), false);
            render.detach(held.model(), Anchor::Camera);
        }
        self.equipped = None;
    }

    /// Reload the equipped gun
    pub fn reload(&mut self, events: &mut EventQueue) -> Result<u32, EquipError> {
        if self.transition.is_some() {
            return Err(EquipError::TransitionInProgress);
        }
        let id = self.equipped.ok_or(EquipError::NothingEquipped)?;
        let held = self.slot_mut(id).ok_or(EquipError::NotHeld(id))?;
        Ok(held.gun.request_reload(events)?)
    }
}
