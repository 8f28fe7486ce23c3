use crate::assets::ModelHandle;
use glam::Vec3;

/// World placement of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Heading around Y in radians
    pub yaw: f32,
}

impl Transform {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }
}

/// Enemy marker component
#[derive(Debug, Clone, Copy)]
pub struct Enemy;

/// Scene object drawn for this entity
#[derive(Debug, Clone)]
pub struct Model(pub ModelHandle);

/// Placeholder animation states; enemies have no behaviour yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
}

impl AnimationState {
    pub fn clip_name(&self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
        }
    }
}

/// Looping clip playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedCharacter {
    pub state: AnimationState,
    /// Seconds into the current clip
    pub time: f32,
    pub clip_length: f32,
    /// Playback rate multiplier
    pub speed: f32,
}

impl AnimatedCharacter {
    pub fn new(state: AnimationState, clip_length: f32, speed: f32) -> Self {
        Self {
            state,
            time: 0.0,
            clip_length,
            speed,
        }
    }

    /// Progress through the clip from 0.0 to 1.0
    pub fn phase(&self) -> f32 {
        if self.clip_length <= 0.0 {
            0.0
        } else {
            self.time / self.clip_length
        }
    }
}
