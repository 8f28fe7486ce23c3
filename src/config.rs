//! Game configuration.
//!
//! Loaded from a JSON file. Every field is optional and falls back to the
//! defaults in [`crate::constants`].

use crate::constants::*;
use crate::weapon::{FiringMode, GunKind, ReloadPolicy};
use glam::Vec3;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub camera: CameraConfig,
    pub stamina: StaminaConfig,
    pub timing: TimingConfig,
    /// Overrides for the built-in gun catalogue
    pub weapons: Vec<GunSpec>,
    /// Key identifier → binding name ("forward", "sprint", "reload", ...)
    pub key_bindings: BTreeMap<String, String>,
    pub reload_policy: ReloadPolicy,
    /// Gun picked up and equipped when the game starts
    pub starting_weapon: Option<GunKind>,
    /// Where placeholder enemies stand
    pub enemy_spawns: Vec<Vec3>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            camera: CameraConfig::default(),
            stamina: StaminaConfig::default(),
            timing: TimingConfig::default(),
            weapons: Vec::new(),
            key_bindings: default_key_bindings(),
            reload_policy: ReloadPolicy::default(),
            starting_weapon: Some(GunKind::Pistol),
            enemy_spawns: vec![Vec3::new(0.0, 0.0, -5.0)],
        }
    }
}

fn default_key_bindings() -> BTreeMap<String, String> {
    [
        ("w", "forward"),
        ("s", "backward"),
        ("a", "left"),
        ("d", "right"),
        ("shift", "sprint"),
        ("r", "reload"),
    ]
    .into_iter()
    .map(|(key, action)| (key.to_string(), action.to_string()))
    .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    pub sprint_multiplier: f32,
    pub vertical_damping: f32,
    pub spawn: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            vertical_damping: NAVMESH_VERTICAL_DAMPING,
            spawn: Vec3::from_array(PLAYER_SPAWN),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye_height: f32,
    pub look_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye_height: CAMERA_EYE_HEIGHT,
            look_sensitivity: CAMERA_LOOK_SENSITIVITY,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    pub maximum: f32,
    pub drain_rate: f32,
    pub recharge_rate: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            maximum: STAMINA_MAX,
            drain_rate: STAMINA_DRAIN_RATE,
            recharge_rate: STAMINA_RECHARGE_RATE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub max_frame_dt: f32,
    pub gun_show_duration: f32,
    pub gun_hide_duration: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: MAX_FRAME_DT,
            gun_show_duration: GUN_SHOW_DURATION,
            gun_hide_duration: GUN_HIDE_DURATION,
        }
    }
}

/// Static description of one gun type
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GunSpec {
    pub kind: GunKind,
    pub firing_mode: FiringMode,
    pub rounds_per_minute: f32,
    pub magazine_size: u32,
    pub reserve_ammo: u32,
    pub reload_duration: f32,
    pub hold_position: Vec3,
    #[serde(default = "default_recoil_position")]
    pub recoil_position: Vec3,
    #[serde(default = "default_recoil_rotation")]
    pub recoil_rotation: Vec3,
    pub model: String,
    #[serde(default = "default_skin")]
    pub texture: String,
}

fn default_recoil_position() -> Vec3 {
    Vec3::from_array(GUN_RECOIL_POS_MOD)
}

fn default_recoil_rotation() -> Vec3 {
    Vec3::from_array(GUN_RECOIL_ROT_MOD)
}

fn default_skin() -> String {
    "weapon-skin".to_string()
}

impl GunSpec {
    /// Built-in catalogue entry
    pub fn builtin(kind: GunKind) -> Self {
        match kind {
            GunKind::Pistol => Self {
                kind,
                firing_mode: FiringMode::SemiAuto,
                rounds_per_minute: PISTOL_RPM,
                magazine_size: PISTOL_MAG_SIZE,
                reserve_ammo: PISTOL_RESERVE,
                reload_duration: PISTOL_RELOAD_DURATION,
                hold_position: Vec3::from_array(PISTOL_HOLD_POSITION),
                recoil_position: default_recoil_position(),
                recoil_rotation: default_recoil_rotation(),
                model: "pistol".to_string(),
                texture: default_skin(),
            },
            GunKind::Rifle => Self {
                kind,
                firing_mode: FiringMode::Auto,
                rounds_per_minute: RIFLE_RPM,
                magazine_size: RIFLE_MAG_SIZE,
                reserve_ammo: RIFLE_RESERVE,
                reload_duration: RIFLE_RELOAD_DURATION,
                hold_position: Vec3::from_array(RIFLE_HOLD_POSITION),
                recoil_position: default_recoil_position(),
                recoil_rotation: default_recoil_rotation(),
                model: "rifle".to_string(),
                texture: default_skin(),
            },
        }
    }

    /// Seconds that must pass between two shots
    pub fn shot_interval(&self) -> f32 {
        60.0 / self.rounds_per_minute
    }
}

impl GameConfig {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: GameConfig = serde_json::from_str(json)?;
        config.validate();
        Ok(config)
    }

    /// Spec for a gun kind, preferring configured overrides
    pub fn gun_spec(&self, kind: GunKind) -> GunSpec {
        self.weapons
            .iter()
            .find(|spec| spec.kind == kind)
            .cloned()
            .unwrap_or_else(|| GunSpec::builtin(kind))
    }

    /// Replace values that would break the simulation with defaults
    pub fn validate(&mut self) {
        if self.stamina.maximum <= 0.0 {
            log::warn!("stamina.maximum must be positive, using {}", STAMINA_MAX);
            self.stamina.maximum = STAMINA_MAX;
        }
        if self.stamina.drain_rate < 0.0 || self.stamina.recharge_rate < 0.0 {
            log::warn!("stamina rates must not be negative, using defaults");
            self.stamina.drain_rate = STAMINA_DRAIN_RATE;
            self.stamina.recharge_rate = STAMINA_RECHARGE_RATE;
        }
        if self.player.speed < 0.0 {
            log::warn!("player.speed must not be negative, using {}", PLAYER_SPEED);
            self.player.speed = PLAYER_SPEED;
        }
        if self.player.sprint_multiplier < 1.0 {
            log::warn!(
                "player.sprint_multiplier below 1.0 slows sprinting, using {}",
                SPRINT_MULTIPLIER
            );
            self.player.sprint_multiplier = SPRINT_MULTIPLIER;
        }
        self.player.vertical_damping = self.player.vertical_damping.clamp(0.0, 1.0);
        if self.timing.max_frame_dt <= 0.0 {
            log::warn!("timing.max_frame_dt must be positive, using {}", MAX_FRAME_DT);
            self.timing.max_frame_dt = MAX_FRAME_DT;
        }
        self.timing.gun_show_duration = self.timing.gun_show_duration.max(0.0);
        self.timing.gun_hide_duration = self.timing.gun_hide_duration.max(0.0);

        self.weapons.retain(|spec| {
            let usable = spec.rounds_per_minute > 0.0 && spec.magazine_size > 0;
            if !usable {
                log::error!(
                    "Ignoring {:?} override: rounds_per_minute and magazine_size must be positive",
                    spec.kind
                );
            }
            usable
        });
        for spec in &mut self.weapons {
            spec.reload_duration = spec.reload_duration.max(0.0);
        }
    }
}
