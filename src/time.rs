//! Frame clock.
//!
//! Seconds since startup feed the integrator; a rolling frame counter feeds
//! the FPS shown in the window title.

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Time {
    start: Instant,
    since_start: f32,
    window_start: Instant,
    window_frames: u32,
    fps: f32,
}

impl Time {
    /// Start the clock at zero.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            since_start: 0.0,
            window_start: now,
            window_frames: 0,
            fps: 0.0,
        }
    }

    /// Advance one frame. Returns `true` when a new FPS figure is available.
    pub fn update(&mut self) -> bool {
        self.tick(Instant::now())
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.since_start = (now - self.start).as_secs_f32();
        self.window_frames += 1;

        let window = now - self.window_start;
        if window < FPS_WINDOW {
            return false;
        }
        self.fps = self.window_frames as f32 / window.as_secs_f32();
        self.window_frames = 0;
        self.window_start = now;
        true
    }

    /// Seconds since the clock started, as of the last update.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.since_start
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let time = Time::new();
        assert_eq!(time.elapsed(), 0.0);
        assert_eq!(time.fps(), 0.0);
    }

    #[test]
    fn test_elapsed_is_relative_to_start() {
        let mut time = Time::new();
        let start = time.start;

        time.tick(start + Duration::from_millis(100));
        assert!((time.elapsed() - 0.1).abs() < 1e-4);

        time.tick(start + Duration::from_millis(150));
        assert!((time.elapsed() - 0.15).abs() < 1e-4);
    }

    #[test]
    fn test_fps_refreshes_every_half_second() {
        let mut time = Time::new();
        let start = time.start;

        let refreshes: Vec<u64> = (1..=60)
            .filter(|&i| time.tick(start + Duration::from_millis(i * 20)))
            .collect();

        // 20ms frames: windows close at 500ms and 1000ms.
        assert_eq!(refreshes, vec![25, 50]);
        assert!((time.fps() - 50.0).abs() < 0.5);
    }
}
