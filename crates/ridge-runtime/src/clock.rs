//! Frame clock

use std::time::Instant;

/// Longest frame delta handed to movement, in seconds.
///
/// A stall (window drag, breakpoint) would otherwise teleport the camera.
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Tracks the time elapsed between frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds, within `[0, MAX_FRAME_DELTA]`
    pub delta_time: f32,
    /// Frames ticked so far
    pub frame_count: u64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Call once per frame; returns the new delta.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        self.frame_count += 1;

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return 0.0;
        }

        // saturating: an out-of-order instant yields zero, not a panic
        let elapsed = now.saturating_duration_since(self.last_instant).as_secs_f32();
        self.last_instant = now;

        self.delta_time = elapsed.clamp(0.0, MAX_FRAME_DELTA);
        self.total_time += self.delta_time as f64;
        self.delta_time
    }
}

/// Distance to move this frame: `base_speed * max(dt, 0)`.
///
/// Negative or NaN deltas produce no movement.
pub fn movement_speed(base_speed: f32, dt: f32) -> f32 {
    base_speed * dt.max(0.0)
}
