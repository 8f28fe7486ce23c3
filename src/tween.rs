//! Time-driven interpolation of object poses, advanced once per frame.

use glam::Vec3;

/// Position and Euler rotation (radians, XYZ) relative to the parent anchor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.lerp(other.rotation, t),
        }
    }

    pub fn offset(&self, position: Vec3, rotation: Vec3) -> Pose {
        Pose {
            position: self.position + position,
            rotation: self.rotation + rotation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Slow start, fast end
    QuadIn,
    /// Fast start, slow end
    QuadOut,
    QuadInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Interpolates between two poses over a fixed duration
#[derive(Debug, Clone)]
pub struct Tween {
    from: Pose,
    to: Pose,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: Pose, to: Pose, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Progress from 0.0 (just started) to 1.0 (finished)
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Current pose; exactly the target once finished
    pub fn value(&self) -> Pose {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(&self.to, self.easing.apply(self.progress()))
    }

    /// Advance by `dt` and return the new pose
    pub fn advance(&mut self, dt: f32) -> Pose {
        self.elapsed += dt.max(0.0);
        self.value()
    }

    pub fn target(&self) -> Pose {
        self.to
    }
}
