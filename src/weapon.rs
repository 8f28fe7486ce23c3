//! Gun state machine: equip lifecycle, firing modes, ammo and reload timing.
//!
//! ```text
//! Idle -> Equipping -> Equipped -> Firing     -> Equipped
//!                               -> Reloading  -> Equipped
//!                               -> Unequipping -> Idle
//! ```

use crate::assets::ModelHandle;
use crate::camera::Aim;
use crate::config::GunSpec;
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::tween::{Easing, Pose, Tween};
use glam::Vec3;
use serde::Deserialize;
use std::f32::consts::PI;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GunId(pub u32);

impl fmt::Display for GunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gun#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GunKind {
    Pistol,
    Rifle,
}

impl GunKind {
    pub fn name(&self) -> &'static str {
        match self {
            GunKind::Pistol => "pistol",
            GunKind::Rifle => "rifle",
        }
    }
}

/// How trigger input maps to shots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FiringMode {
    /// One shot per trigger press
    SemiAuto,
    /// Shots at the rate limit for as long as the trigger is held
    Auto,
}

impl FiringMode {
    /// Whether this frame's trigger input asks for a shot
    pub fn wants_shot(self, trigger_held: bool, trigger_was_held: bool) -> bool {
        match self {
            FiringMode::SemiAuto => trigger_held && !trigger_was_held,
            FiringMode::Auto => trigger_held,
        }
    }
}

/// What happens when the trigger is pulled on an empty magazine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReloadPolicy {
    /// Reload only on explicit request
    #[default]
    Manual,
    /// Start a reload when the trigger is pulled on an empty magazine
    AutoOnEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GunState {
    Idle,
    Equipping,
    Equipped,
    Unequipping,
    Firing,
    Reloading,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FireError {
    #[error("gun is disabled")]
    Disabled,
    #[error("gun cannot fire while {0:?}")]
    NotReady(GunState),
    #[error("magazine is empty")]
    EmptyMagazine,
    #[error("fire rate limit, {remaining:.3}s remaining")]
    Cooldown { remaining: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReloadError {
    #[error("gun is disabled")]
    Disabled,
    #[error("gun cannot reload while {0:?}")]
    NotReady(GunState),
    #[error("magazine is already full")]
    MagazineFull,
    #[error("no reserve ammo")]
    NoReserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move gun from {from:?} to {to:?}")]
pub struct TransitionError {
    pub from: GunState,
    pub to: GunState,
}

/// A round that left the barrel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    pub gun: GunId,
    pub magazine_ammo: u32,
}

pub struct Gun {
    id: GunId,
    kind: GunKind,
    firing_mode: FiringMode,
    rounds_per_minute: f32,
    magazine_size: u32,
    magazine_ammo: u32,
    reserve_ammo: u32,
    reload_duration: f32,
    reload_policy: ReloadPolicy,
    hold_position: Vec3,
    recoil_position: Vec3,
    recoil_rotation: Vec3,
    model: ModelHandle,

    state: GunState,
    enabled: bool,
    /// None until the first shot
    since_last_shot: Option<f32>,
    reload_remaining: f32,
    trigger_was_held: bool,
    recoil: Option<Tween>,
}

impl Gun {
    /// A full magazine plus the gun type's reserve, waiting in `Idle`
    pub fn new(id: GunId, spec: &GunSpec, model: ModelHandle, reload_policy: ReloadPolicy) -> Self {
        Self {
            id,
            kind: spec.kind,
            firing_mode: spec.firing_mode,
            rounds_per_minute: spec.rounds_per_minute,
            magazine_size: spec.magazine_size,
            magazine_ammo: spec.magazine_size,
            reserve_ammo: spec.reserve_ammo,
            reload_duration: spec.reload_duration,
            reload_policy,
            hold_position: spec.hold_position,
            recoil_position: spec.recoil_position,
            recoil_rotation: spec.recoil_rotation,
            model,
            state: GunState::Idle,
            enabled: false,
            since_last_shot: None,
            reload_remaining: 0.0,
            trigger_was_held: false,
            recoil: None,
        }
    }

    pub fn id(&self) -> GunId {
        self.id
    }

    pub fn kind(&self) -> GunKind {
        self.kind
    }

    pub fn firing_mode(&self) -> FiringMode {
        self.firing_mode
    }

    pub fn state(&self) -> GunState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn magazine_size(&self) -> u32 {
        self.magazine_size
    }

    pub fn magazine_ammo(&self) -> u32 {
        self.magazine_ammo
    }

    pub fn reserve_ammo(&self) -> u32 {
        self.reserve_ammo
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Seconds that must pass between two shots
    pub fn shot_interval(&self) -> f32 {
        60.0 / self.rounds_per_minute
    }

    /// Resting pose in front of the camera
    pub fn hold_pose(&self) -> Pose {
        Pose::new(self.hold_position, Vec3::new(0.0, PI, 0.0))
    }

    /// Below the view and tipped back; where show animations start and hide animations end
    pub fn stowed_pose(&self) -> Pose {
        let hold = self.hold_pose();
        Pose::new(
            Vec3::new(hold.position.x, GUN_SHOW_START_Y, hold.position.z),
            Vec3::new(GUN_SHOW_START_ROT_X, hold.rotation.y, hold.rotation.z),
        )
    }

    /// Current pose while held, including recoil
    pub fn pose(&self) -> Pose {
        match &self.recoil {
            Some(recoil) => recoil.value(),
            None => self.hold_pose(),
        }
    }

    /// Current ammo counts as an event
    pub fn ammo_event(&self) -> GameEvent {
        GameEvent::AmmoChanged {
            gun: self.id,
            magazine: self.magazine_ammo,
            reserve: self.reserve_ammo,
        }
    }

    /// Idle -> Equipping
    pub fn begin_equip(&mut self) -> Result<(), TransitionError> {
        self.transition(GunState::Idle, GunState::Equipping)
    }

    /// Equipping -> Equipped; fire and reload are accepted from now on
    pub fn enable(&mut self) -> Result<(), TransitionError> {
        self.transition(GunState::Equipping, GunState::Equipped)?;
        self.enabled = true;
        Ok(())
    }

    /// Any held state -> Unequipping. Cancels a running reload timer; rounds
    /// already moved stay in the magazine.
    pub fn disable(&mut self) -> Result<(), TransitionError> {
        match self.state {
            GunState::Equipped | GunState::Firing | GunState::Reloading => {
                self.enabled = false;
                self.state = GunState::Unequipping;
                self.reload_remaining = 0.0;
                self.recoil = None;
                Ok(())
            }
            from => Err(TransitionError {
                from,
                to: GunState::Unequipping,
            }),
        }
    }

    /// Unequipping -> Idle
    pub fn finish_unequip(&mut self) -> Result<(), TransitionError> {
        self.transition(GunState::Unequipping, GunState::Idle)
    }

    fn transition(&mut self, from: GunState, to: GunState) -> Result<(), TransitionError> {
        if self.state != from {
            return Err(TransitionError {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }

    /// Fire one round
    pub fn fire(&mut self) -> Result<Shot, FireError> {
        if !self.enabled {
            return Err(FireError::Disabled);
        }
        if self.state != GunState::Equipped {
            return Err(FireError::NotReady(self.state));
        }
        if self.magazine_ammo == 0 {
            return Err(FireError::EmptyMagazine);
        }
        if let Some(elapsed) = self.since_last_shot {
            let interval = self.shot_interval();
            if elapsed < interval {
                return Err(FireError::Cooldown {
                    remaining: interval - elapsed,
                });
            }
        }

        self.magazine_ammo -= 1;
        self.since_last_shot = Some(0.0);
        self.state = GunState::Firing;

        let rest = self.hold_pose();
        let kicked = rest.offset(self.recoil_position, self.recoil_rotation);
        self.recoil = Some(Tween::new(kicked, rest, RECOIL_DURATION, Easing::QuadOut));

        Ok(Shot {
            gun: self.id,
            magazine_ammo: self.magazine_ammo,
        })
    }

    /// Refill the magazine from reserve. Returns the number of rounds moved.
    pub fn reload(&mut self) -> Result<u32, ReloadError> {
        if !self.enabled {
            return Err(ReloadError::Disabled);
        }
        if self.state != GunState::Equipped {
            return Err(ReloadError::NotReady(self.state));
        }
        if self.magazine_ammo >= self.magazine_size {
            return Err(ReloadError::MagazineFull);
        }
        if self.reserve_ammo == 0 {
            return Err(ReloadError::NoReserve);
        }

        let moved = (self.magazine_size - self.magazine_ammo).min(self.reserve_ammo);
        self.magazine_ammo += moved;
        self.reserve_ammo -= moved;
        self.state = GunState::Reloading;
        self.reload_remaining = self.reload_duration;
        Ok(moved)
    }

    /// Reload and announce it
    pub fn request_reload(&mut self, events: &mut EventQueue) -> Result<u32, ReloadError> {
        let moved = self.reload()?;
        log::debug!("{} reloading {} rounds", self.id, moved);
        events.push(GameEvent::ReloadStarted {
            gun: self.id,
            duration: self.reload_duration,
        });
        events.push(self.ammo_event());
        Ok(moved)
    }

    /// Advance timers and apply this frame's trigger input
    pub fn update(&mut self, dt: f32, trigger_held: bool, aim: Aim, events: &mut EventQueue) {
        if self.state == GunState::Firing {
            self.state = GunState::Equipped;
        }
        if let Some(elapsed) = self.since_last_shot.as_mut() {
            *elapsed += dt;
        }
        if let Some(recoil) = self.recoil.as_mut() {
            recoil.advance(dt);
            if recoil.is_finished() {
                self.recoil = None;
            }
        }
        if self.state == GunState::Reloading {
            self.reload_remaining -= dt;
            if self.reload_remaining <= 0.0 {
                self.reload_remaining = 0.0;
                self.state = GunState::Equipped;
                events.push(GameEvent::ReloadFinished { gun: self.id });
            }
        }

        let pressed = trigger_held && !self.trigger_was_held;
        let wants_shot = self.firing_mode.wants_shot(trigger_held, self.trigger_was_held);
        self.trigger_was_held = trigger_held;
        if !wants_shot || !self.enabled {
            return;
        }

        match self.fire() {
            Ok(shot) => {
                events.push(GameEvent::ShotFired {
                    gun: shot.gun,
                    origin: aim.origin,
                    direction: aim.direction,
                });
                events.push(self.ammo_event());
            }
            Err(FireError::EmptyMagazine) => {
                if pressed {
                    log::debug!("{} dry fire", self.id);
                    events.push(GameEvent::DryFire { gun: self.id });
                }
                if self.reload_policy == ReloadPolicy::AutoOnEmpty && self.reserve_ammo > 0 {
                    if let Err(e) = self.request_reload(events) {
                        log::debug!("{} auto reload refused: {}", self.id, e);
                    }
                }
            }
            Err(e) => log::trace!("{} shot refused: {}", self.id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetLibrary, AssetProvider};
    use proptest::prelude::*;

    fn aim() -> Aim {
        Aim {
            origin: Vec3::new(0.0, 1.8, 0.0),
            direction: Vec3::NEG_Z,
        }
    }

    fn gun_with(spec: GunSpec, policy: ReloadPolicy) -> Gun {
        let model = AssetLibrary::prototype_level().get_model(&spec.model);
        let mut gun = Gun::new(GunId(0), &spec, model, policy);
        gun.begin_equip().unwrap();
        gun.enable().unwrap();
        gun
    }

    fn pistol() -> Gun {
        gun_with(GunSpec::builtin(GunKind::Pistol), ReloadPolicy::Manual)
    }

    #[test]
    fn test_lifecycle_transitions() {
        let spec = GunSpec::builtin(GunKind::Rifle);
        let model = AssetLibrary::prototype_level().get_model("rifle");
        let mut gun = Gun::new(GunId(3), &spec, model, ReloadPolicy::Manual);
        assert_eq!(gun.state(), GunState::Idle);
        assert_eq!(gun.fire(), Err(FireError::Disabled));
        assert!(gun.enable().is_err());

        gun.begin_equip().unwrap();
        gun.enable().unwrap();
        assert_eq!(gun.state(), GunState::Equipped);

        gun.disable().unwrap();
        assert_eq!(gun.state(), GunState::Unequipping);
        assert_eq!(gun.reload(), Err(ReloadError::Disabled));
        gun.finish_unequip().unwrap();
        assert_eq!(gun.state(), GunState::Idle);
        assert_eq!(
            gun.finish_unequip(),
            Err(TransitionError {
                from: GunState::Idle,
                to: GunState::Idle
            })
        );
    }

    #[test]
    fn test_fire_rate_limits_second_shot() {
        let mut gun = pistol();
        let mut events = EventQueue::new();

        assert!(gun.fire().is_ok());
        assert_eq!(gun.state(), GunState::Firing);
        gun.update(0.1, false, aim(), &mut events);
        assert_eq!(gun.state(), GunState::Equipped);

        assert!(matches!(gun.fire(), Err(FireError::Cooldown { .. })));
        assert_eq!(gun.magazine_ammo(), PISTOL_MAG_SIZE - 1);
    }

    #[test]
    fn test_twelve_round_magazine_empties() {
        let mut spec = GunSpec::builtin(GunKind::Pistol);
        spec.magazine_size = 12;
        spec.reserve_ammo = 0;
        let mut gun = gun_with(spec, ReloadPolicy::Manual);
        let mut events = EventQueue::new();

        let mut fired = 0;
        for _ in 0..13 {
            if gun.fire().is_ok() {
                fired += 1;
            }
            gun.update(gun.shot_interval() + 0.01, false, aim(), &mut events);
        }
        assert_eq!(fired, 12);
        assert_eq!(gun.magazine_ammo(), 0);
        assert_eq!(gun.fire(), Err(FireError::EmptyMagazine));
    }

    #[test]
    fn test_reload_moves_exact_amount() {
        let mut spec = GunSpec::builtin(GunKind::Pistol);
        spec.magazine_size = 12;
        spec.reserve_ammo = 5;
        let mut gun = gun_with(spec, ReloadPolicy::Manual);
        let mut events = EventQueue::new();

        assert_eq!(gun.reload(), Err(ReloadError::MagazineFull));
        for _ in 0..8 {
            gun.fire().unwrap();
            gun.update(1.0, false, aim(), &mut events);
        }
        assert_eq!(gun.magazine_ammo(), 4);

        // min(12 - 4, 5) = 5
        assert_eq!(gun.reload(), Ok(5));
        assert_eq!(gun.magazine_ammo(), 9);
        assert_eq!(gun.reserve_ammo(), 0);
        assert_eq!(gun.state(), GunState::Reloading);
        assert_eq!(gun.fire(), Err(FireError::NotReady(GunState::Reloading)));

        gun.update(PISTOL_RELOAD_DURATION + 0.01, false, aim(), &mut events);
        assert_eq!(gun.state(), GunState::Equipped);
        assert!(events
            .drain()
            .any(|e| e == GameEvent::ReloadFinished { gun: GunId(0) }));
        assert_eq!(gun.reload(), Err(ReloadError::NoReserve));
    }

    #[test]
    fn test_semi_auto_needs_fresh_press() {
        let mut gun = pistol();
        let mut events = EventQueue::new();

        for _ in 0..10 {
            gun.update(1.0, true, aim(), &mut events);
        }
        assert_eq!(gun.magazine_ammo(), PISTOL_MAG_SIZE - 1);

        gun.update(1.0, false, aim(), &mut events);
        gun.update(1.0, true, aim(), &mut events);
        assert_eq!(gun.magazine_ammo(), PISTOL_MAG_SIZE - 2);
    }

    #[test]
    fn test_auto_fires_at_rate_while_held() {
        let mut gun = gun_with(GunSpec::builtin(GunKind::Rifle), ReloadPolicy::Manual);
        let mut events = EventQueue::new();
        let interval = gun.shot_interval();

        // First shot immediately, then one per interval
        gun.update(0.0, true, aim(), &mut events);
        for _ in 0..4 {
            gun.update(interval + 0.001, true, aim(), &mut events);
        }
        assert_eq!(gun.magazine_ammo(), RIFLE_MAG_SIZE - 5);

        let shots = events
            .drain()
            .filter(|e| matches!(e, GameEvent::ShotFired { .. }))
            .count();
        assert_eq!(shots, 5);
    }

    #[test]
    fn test_auto_reload_policy() {
        let mut spec = GunSpec::builtin(GunKind::Pistol);
        spec.magazine_size = 1;
        spec.reserve_ammo = 3;
        let mut gun = gun_with(spec, ReloadPolicy::AutoOnEmpty);
        let mut events = EventQueue::new();

        gun.update(0.0, true, aim(), &mut events);
        gun.update(1.0, false, aim(), &mut events);
        gun.update(1.0, true, aim(), &mut events);

        assert_eq!(gun.state(), GunState::Reloading);
        assert_eq!(gun.magazine_ammo(), 1);
        assert_eq!(gun.reserve_ammo(), 2);
        let drained: Vec<GameEvent> = events.drain().collect();
        assert!(drained.contains(&GameEvent::DryFire { gun: GunId(0) }));
    }

    #[test]
    fn test_manual_policy_does_not_reload() {
        let mut spec = GunSpec::builtin(GunKind::Pistol);
        spec.magazine_size = 1;
        let mut gun = gun_with(spec, ReloadPolicy::Manual);
        let mut events = EventQueue::new();

        gun.update(0.0, true, aim(), &mut events);
        gun.update(1.0, false, aim(), &mut events);
        gun.update(1.0, true, aim(), &mut events);
        assert_eq!(gun.state(), GunState::Equipped);
        assert_eq!(gun.magazine_ammo(), 0);
    }

    #[test]
    fn test_recoil_returns_to_hold() {
        let mut gun = pistol();
        let mut events = EventQueue::new();
        gun.fire().unwrap();
        assert_ne!(gun.pose(), gun.hold_pose());
        gun.update(RECOIL_DURATION * 2.0, false, aim(), &mut events);
        assert_eq!(gun.pose(), gun.hold_pose());
    }

    #[test]
    fn test_disable_cancels_reload_timer() {
        let mut pistol = pistol();
        pistol.fire().unwrap();
        let mut events = EventQueue::new();
        pistol.update(1.0, false, aim(), &mut events);
        pistol.reload().unwrap();
        pistol.disable().unwrap();
        assert_eq!(pistol.state(), GunState::Unequipping);
        assert_eq!(pistol.magazine_ammo(), PISTOL_MAG_SIZE);
    }

    proptest! {
        #[test]
        fn reload_moves_min_of_gap_and_reserve(
            magazine_size in 1u32..60,
            reserve in 0u32..200,
            shots in 0u32..60,
        ) {
            let mut spec = GunSpec::builtin(GunKind::Pistol);
            spec.magazine_size = magazine_size;
            spec.reserve_ammo = reserve;
            let mut gun = gun_with(spec, ReloadPolicy::Manual);
            let mut events = EventQueue::new();
            for _ in 0..shots.min(magazine_size) {
                gun.fire().unwrap();
                gun.update(1.0, false, aim(), &mut events);
            }

            let gap = gun.magazine_size() - gun.magazine_ammo();
            let expected = gap.min(reserve);
            match gun.reload() {
                Ok(moved) => prop_assert_eq!(moved, expected),
                Err(_) => prop_assert_eq!(expected, 0),
            }
            prop_assert!(gun.magazine_ammo() <= gun.magazine_size());
            prop_assert_eq!(gun.magazine_ammo() + gun.reserve_ammo(), magazine_size + reserve);
        }
    }
}
