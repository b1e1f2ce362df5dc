/// Per-frame `dt` source with a smoothed FPS readout.
///
/// Fed with host timestamps in milliseconds, as `requestAnimationFrame`
/// passes them.
pub struct FrameClock {
    /// Last host timestamp in milliseconds
    last_stamp_ms: Option<f64>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f64,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Clock with no frame seen yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_stamp_ms: None,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
        }
    }

    /// Seconds since the previous host timestamp. The first frame, and any
    /// timestamp that goes backwards or is not finite, yields `0`.
    pub fn tick_at(&mut self, stamp_ms: f64) -> f64 {
        if !stamp_ms.is_finite() {
            return 0.0;
        }
        let dt = self
            .last_stamp_ms
            .map_or(0.0, |last| ((stamp_ms - last) / 1000.0).max(0.0));
        self.last_stamp_ms = Some(stamp_ms);
        self.record(dt);
        dt
    }

    fn record(&mut self, dt: f64) {
        if dt > 0.0 {
            let instant_fps = 1.0 / dt;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_stamp_is_zero_dt() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_at(12_345.0), 0.0);
        assert!((clock.tick_at(12_361.0) - 0.016).abs() < 1e-9);
    }

    #[test]
    fn backwards_and_bad_stamps_clamp_to_zero() {
        let mut clock = FrameClock::new();
        let _ = clock.tick_at(100.0);
        assert_eq!(clock.tick_at(50.0), 0.0);
        assert_eq!(clock.tick_at(f64::NAN), 0.0);
        assert!((clock.tick_at(1050.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fps_moves_toward_frame_rate() {
        let mut clock = FrameClock::new();
        let mut stamp = 0.0;
        for _ in 0..500 {
            let _ = clock.tick_at(stamp);
            stamp += 1000.0 / 30.0;
        }
        assert!((clock.fps() - 30.0).abs() < 0.5);
    }
}
