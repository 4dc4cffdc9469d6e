//! Wall-clock frame timing

use std::time::{Duration, Instant};

/// Measures the delta between frames and keeps a running FPS estimate.
#[derive(Debug)]
pub struct FrameClock {
    /// When the last frame occurred
    last_frame: Instant,
    /// Total frames since start
    frame_count: u64,
    /// FPS over the last update interval
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Advance to `now` and return the seconds since the previous tick.
    ///
    /// Returns true in the second slot when the FPS estimate was refreshed.
    pub fn tick_at(&mut self, now: Instant) -> (f32, bool) {
        let delta = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        let refreshed = fps_elapsed >= self.fps_update_interval;
        if refreshed {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (delta, refreshed)
    }

    pub fn tick(&mut self) -> (f32, bool) {
        self.tick_at(Instant::now())
    }

    /// Start measuring from `now` without counting a frame, so time spent before
    /// the first frame (window and GPU setup) is not fed into the simulation.
    pub fn restart_at(&mut self, now: Instant) {
        self.last_frame = now;
        self.fps_update_time = now;
        self.fps_frame_count = self.frame_count;
    }

    pub fn restart(&mut self) {
        self.restart_at(Instant::now());
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_between_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let (delta, _) = clock.tick_at(start + Duration::from_millis(250));
        assert!((delta - 0.25).abs() < 1e-6);
        assert_eq!(clock.frame(), 1);

        let (delta, _) = clock.tick_at(start + Duration::from_millis(250));
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn test_restart_discards_setup_time() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        clock.restart_at(start + Duration::from_secs(2));
        let (delta, refreshed) = clock.tick_at(start + Duration::from_millis(2016));

        assert!((delta - 0.016).abs() < 1e-4, "delta was {}", delta);
        assert!(!refreshed);
    }

    #[test]
    fn test_fps_estimate() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let mut refreshed = false;
        for i in 1..=30 {
            let (_, r) = clock.tick_at(start + Duration::from_millis(i * 20));
            refreshed |= r;
        }

        // 25 frames in the first 500ms
        assert!(refreshed);
        assert!((clock.fps() - 50.0).abs() < 1.0, "fps was {}", clock.fps());
    }
}
