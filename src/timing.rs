//! Frame pacing
//!
//! `FrameTimer` enforces a minimum interval between updates by spinning on the
//! platform clock, then reports the elapsed time clamped to a maximum step so a
//! stall (debugger, window drag) never produces one huge simulation step.

/// Upper bound on the delta any frame reports, whatever the configuration asks.
pub const MAX_DELTA_SECONDS: f32 = 0.05;

/// True once `now` has reached or passed `target`, treating the millisecond
/// counter as wrapping.
pub fn ticks_passed(now: u32, target: u32) -> bool {
    (target.wrapping_sub(now) as i32) <= 0
}

/// Paces the frame loop against a millisecond clock.
///
/// Each `tick` busy-waits until `min_frame_ms` have passed since the previous
/// one, so the loop never runs faster than about 60 updates per second at the
/// default of 16 ms. The measured interval is then handed to the game in
/// seconds, capped at `max_delta`.
///
/// The clock is passed in per call rather than owned, which keeps the timer
/// independent of the platform and lets tests script time.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    /// Shortest gap between two ticks, in milliseconds
    min_frame_ms: u32,
    /// Longest delta a tick reports, in seconds. Never above `MAX_DELTA_SECONDS`.
    max_delta: f32,
    /// Clock reading taken by the previous tick (or `reset`)
    last_tick: u32,
}

impl FrameTimer {
    /// `max_delta` is lowered to `MAX_DELTA_SECONDS` if it is larger.
    pub fn new(min_frame_ms: u32, max_delta: f32, start: u32) -> Self {
        let max_delta = if max_delta > MAX_DELTA_SECONDS {
            log::warn!(
                "Max frame delta {:.3}s is above {:.3}s, using {:.3}s",
                max_delta,
                MAX_DELTA_SECONDS,
                MAX_DELTA_SECONDS
            );
            MAX_DELTA_SECONDS
        } else {
            max_delta
        };

        FrameTimer {
            min_frame_ms,
            max_delta,
            last_tick: start,
        }
    }

    pub fn reset(&mut self, now: u32) {
        self.last_tick = now;
    }

    pub fn last_tick(&self) -> u32 {
        self.last_tick
    }

    /// Wait until the minimum interval has passed since the previous tick,
    /// record the new tick and return the delta time in seconds.
    pub fn tick(&mut self, mut clock: impl FnMut() -> u32) -> f32 {
        let target = self.last_tick.wrapping_add(self.min_frame_ms);
        let mut now = clock();
        while !ticks_passed(now, target) {
            std::hint::spin_loop();
            now = clock();
        }

        let elapsed_ms = now.wrapping_sub(self.last_tick);
        self.last_tick = now;

        let delta = elapsed_ms as f32 / 1000.0;
        if delta > self.max_delta {
            log::trace!("Clamping frame delta {:.3}s to {:.3}s", delta, self.max_delta);
            self.max_delta
        } else {
            delta
        }
    }
}
