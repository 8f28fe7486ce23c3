//! Render surface seam.
//!
//! The simulation positions objects and asks for frames; it never draws.
//! [`RecordingSurface`] keeps every request in memory for headless runs and tests.

use crate::assets::{ModelHandle, TextureHandle};
use crate::systems::RenderEntity;
use crate::tween::Pose;
use crate::vfx::VisualEffect;
use glam::Vec3;
use std::collections::HashMap;

/// Parent an object can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// World space
    Scene,
    /// First-person view; objects follow the camera
    Camera,
}

/// Camera state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// Everything the surface needs to draw one frame
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub camera: CameraView,
    pub entities: Vec<RenderEntity>,
    pub effects: Vec<VisualEffect>,
}

pub trait RenderSurface {
    fn attach(&mut self, object: &ModelHandle, parent: Anchor);
    fn detach(&mut self, object: &ModelHandle, parent: Anchor);
    /// Pose relative to the object's parent
    fn set_pose(&mut self, object: &ModelHandle, pose: Pose);
    fn set_visible(&mut self, object: &ModelHandle, visible: bool);
    fn apply_texture(&mut self, object: &ModelHandle, texture: &TextureHandle);
    fn render_frame(&mut self, dt: f32, frame: &FrameSnapshot);
}

/// Structural calls, in the order they were made
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Attach { object: ModelHandle, parent: Anchor },
    Detach { object: ModelHandle, parent: Anchor },
    SetVisible { object: ModelHandle, visible: bool },
    ApplyTexture { object: ModelHandle, texture: TextureHandle },
}

/// Headless surface that remembers what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<RenderCall>,
    attached: HashMap<Anchor, Vec<ModelHandle>>,
    poses: HashMap<ModelHandle, Pose>,
    frames: u64,
    last_frame: Option<FrameSnapshot>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached_to(&self, anchor: Anchor) -> &[ModelHandle] {
        self.attached
            .get(&anchor)
            .map(|objects| objects.as_slice())
            .unwrap_or(&[])
    }

    pub fn pose_of(&self, object: &ModelHandle) -> Option<Pose> {
        self.poses.get(object).copied()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&FrameSnapshot> {
        self.last_frame.as_ref()
    }
}

impl RenderSurface for RecordingSurface {
    fn attach(&mut self, object: &ModelHandle, parent: Anchor) {
        let children = self.attached.entry(parent).or_default();
        if children.contains(object) {
            log::warn!("{} already attached to {:?}", object.name(), parent);
        } else {
            children.push(object.clone());
        }
        self.calls.push(RenderCall::Attach {
            object: object.clone(),
            parent,
        });
    }

    fn detach(&mut self, object: &ModelHandle, parent: Anchor) {
        if let Some(children) = self.attached.get_mut(&parent) {
            children.retain(|child| child != object);
        }
        self.calls.push(RenderCall::Detach {
            object: object.clone(),
            parent,
        });
    }

    fn set_pose(&mut self, object: &ModelHandle, pose: Pose) {
        self.poses.insert(object.clone(), pose);
    }

    fn set_visible(&mut self, object: &ModelHandle, visible: bool) {
        self.calls.push(RenderCall::SetVisible {
            object: object.clone(),
            visible,
        });
    }

    fn apply_texture(&mut self, object: &ModelHandle, texture: &TextureHandle) {
        self.calls.push(RenderCall::ApplyTexture {
            object: object.clone(),
            texture: texture.clone(),
        });
    }

    fn render_frame(&mut self, _dt: f32, frame: &FrameSnapshot) {
        self.frames += 1;
        self.last_frame = Some(frame.clone());
    }
}
