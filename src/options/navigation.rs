use serde::{Deserialize, Serialize};

use crate::camera::SpeedMode;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Look and movement tuning for the free-look controller.
pub struct NavigationOptions {
    /// Radians of rotation per pixel of pointer movement.
    pub look_sensitivity: f64,
    /// Metres per second at normal speed.
    pub base_speed: f64,
    /// Speed factor while the slow modifier is held.
    pub slow_multiplier: f64,
    /// Speed factor while the fast modifier is held.
    pub fast_multiplier: f64,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            look_sensitivity: 0.001,
            base_speed: 10.0,
            slow_multiplier: 0.2,
            fast_multiplier: 5.0,
        }
    }
}

impl NavigationOptions {
    /// Speed factor for a resolved modifier state.
    #[must_use]
    pub fn multiplier(&self, mode: SpeedMode) -> f64 {
        match mode {
            SpeedMode::Normal => 1.0,
            SpeedMode::Slow => self.slow_multiplier,
            SpeedMode::Fast => self.fast_multiplier,
        }
    }
}
