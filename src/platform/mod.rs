//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (FPS telemetry for the HUD)
//! - Canvas 2D surface and image loading (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use crate::consts::INITIAL_FPS;

/// Counts frames and publishes a frame rate once per elapsed second
#[derive(Debug, Clone)]
pub struct FrameClock {
    frames: u32,
    window_start_ms: f64,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            frames: 0,
            window_start_ms: 0.0,
            fps: INITIAL_FPS,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now_ms` and return the current estimate
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        self.frames += 1;
        let elapsed = now_ms - self.window_start_ms;
        if elapsed > 1000.0 {
            self.fps = (self.frames as f64 * 1000.0 / elapsed).round() as u32;
            self.frames = 0;
            self.window_start_ms = now_ms;
        }
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_fps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(16.0), 60);
    }

    #[test]
    fn test_fps_over_one_second() {
        let mut clock = FrameClock::new();
        // Start the window at t = 2000 (first update after > 1s)
        clock.frame(2000.0);
        let mut fps = 0;
        for i in 1..=30 {
            fps = clock.frame(2000.0 + i as f64 * 34.0);
        }
        // 30 frames over 1020ms
        assert_eq!(fps, 29);
        // Holds until the next full second
        assert_eq!(clock.frame(3100.0), 29);
    }
}
