//! Frame clock tracking delta and total time

use std::time::Instant;

/// Tracks elapsed time between rendered frames
pub struct FrameClock {
    /// Total elapsed time across rendered frames in seconds
    total_time: f64,
    /// Time since the previous rendered frame in seconds
    delta_time: f64,
    /// Upper bound on a single delta (default: 250ms)
    max_delta: f64,
    /// Instant of the previous tick
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: 0.25,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    /// Create a clock with the default 250ms delta clamp
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom delta clamp in seconds
    pub fn with_max_delta(max_delta: f64) -> Self {
        Self {
            max_delta,
            ..Self::default()
        }
    }

    /// Advance the clock and return the new delta in seconds
    ///
    /// Call once per rendered frame. The first tick yields a zero
    /// delta; long gaps between frames are clamped to `max_delta`.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return 0.0;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        self.delta_time = elapsed.min(self.max_delta);
        self.total_time += self.delta_time;
        self.delta_time
    }

    /// Time since the previous rendered frame in seconds
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Total elapsed time across rendered frames in seconds
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}
