/// Smoothed frame rate from host frame timestamps.
pub struct FrameTiming {
    /// Timestamp of the previous frame, in milliseconds.
    last_frame: Option<f64>,
    /// Timestamp of the last report.
    last_report: f64,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

/// Minimum gap between reports from [`FrameTiming::tick`].
const REPORT_INTERVAL_MS: f64 = 5000.0;

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Fresh timer; the first tick only records its timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: None,
            last_report: 0.0,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    // 5% new value, 95% old value
        }
    }

    /// Record a frame at `now_ms`. Returns the smoothed FPS at most once
    /// every few seconds, for logging.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        let Some(last) = self.last_frame.replace(now_ms) else {
            self.last_report = now_ms;
            return None;
        };

        let frame_time = (now_ms - last) as f32 / 1000.0;
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        if now_ms - self.last_report >= REPORT_INTERVAL_MS {
            self.last_report = now_ms;
            Some(self.smoothed_fps)
        } else {
            None
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_toward_frame_rate() {
        let mut timing = FrameTiming::new();
        for i in 0..400 {
            let _ = timing.tick(f64::from(i) * 10.0);
        }
        assert!((timing.fps() - 100.0).abs() < 1.0);
    }

    #[test]
    fn reports_are_throttled() {
        let mut timing = FrameTiming::new();
        let reports = (0..=1000)
            .filter_map(|i| timing.tick(f64::from(i) * 16.0))
            .count();
        // 16 s of frames, one report per 5 s.
        assert_eq!(reports, 3);
    }

    #[test]
    fn repeated_timestamp_is_ignored() {
        let mut timing = FrameTiming::new();
        let _ = timing.tick(100.0);
        let _ = timing.tick(100.0);
        assert_eq!(timing.fps(), 60.0);
    }
}
