//=========================================================================
// Frame Clock
//=========================================================================
//
// Monotonic elapsed-time source polled once per core tick.
//
// Scenes never read the clock themselves: the runtime samples it once per
// frame and hands the same `elapsed` value to every consumer, so all
// animation functions in a frame agree on `t`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== FrameTime ===========================================================

/// One sample of the frame clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock was created.
    pub elapsed: f64,

    /// Seconds since the previous sample (0 on the first one).
    pub delta: f64,

    /// Number of samples taken, including this one.
    pub frame: u64,
}

//=== FrameClock ==========================================================

/// Monotonic clock measuring seconds since creation.
pub struct FrameClock {
    start: Instant,
    last_elapsed: f64,
    frame_count: u64,
}

impl FrameClock {
    /// Starts a new clock at zero.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Seconds since the clock was created.
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Samples the clock for a new frame.
    ///
    /// `Instant` is monotonic, but the sample is still clamped against the
    /// previous one so consumers can rely on non-decreasing time.
    pub fn tick(&mut self) -> FrameTime {
        let elapsed = self.elapsed().max(self.last_elapsed);
        let delta = elapsed - self.last_elapsed;
        self.last_elapsed = elapsed;
        self.frame_count += 1;

        FrameTime {
            elapsed,
            delta,
            frame: self.frame_count,
        }
    }

    /// Number of frames sampled so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since creation.
    pub fn average_fps(&self) -> f64 {
        if self.last_elapsed > 0.0 {
            self.frame_count as f64 / self.last_elapsed
        } else {
            0.0
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

//=== Helpers =============================================================

/// Converts a millisecond delay into clock seconds.
pub fn millis(ms: u64) -> f64 {
    Duration::from_millis(ms).as_secs_f64()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn new_clock_has_no_frames() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.average_fps(), 0.0);
    }

    #[test]
    fn ticks_are_monotonic() {
        let mut clock = FrameClock::new();
        let mut previous = clock.tick();
        for _ in 0..50 {
            let sample = clock.tick();
            assert!(sample.elapsed >= previous.elapsed);
            assert!(sample.delta >= 0.0);
            previous = sample;
        }
        assert_eq!(clock.frame_count(), 51);
    }

    #[test]
    fn elapsed_advances_with_wall_time() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(5));
        let sample = clock.tick();
        assert!(sample.elapsed >= 0.005);
        assert_eq!(sample.frame, 1);
    }

    #[test]
    fn millis_converts_to_seconds() {
        assert_eq!(millis(150), 0.15);
        assert_eq!(millis(0), 0.0);
    }
}
