//! Stamina usage and regeneration.

use crate::config::StaminaConfig;

/// Bounded stamina pool. `current` always stays within `[0, maximum]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamina {
    maximum: f32,
    current: f32,
    drain_rate: f32,
    recharge_rate: f32,
}

impl Stamina {
    /// Starts full
    pub fn new(config: &StaminaConfig) -> Self {
        Self {
            maximum: config.maximum,
            current: config.maximum,
            drain_rate: config.drain_rate,
            recharge_rate: config.recharge_rate,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn percentage(&self) -> f32 {
        (self.current / self.maximum).clamp(0.0, 1.0)
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Drain while sprinting, recharge otherwise. Returns true if the value changed.
    pub fn update(&mut self, dt: f32, sprinting: bool) -> bool {
        let dt = dt.max(0.0);
        let previous = self.current;

        let delta = if sprinting {
            -self.drain_rate * dt
        } else {
            self.recharge_rate * dt
        };
        self.current = (self.current + delta).clamp(0.0, self.maximum);

        self.current != previous
    }
}
