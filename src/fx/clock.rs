//! Frame source for the perpetual animators
//!
//! Converts host timestamps (milliseconds) into `dt` expressed in 60 Hz frames,
//! which is the unit sprite velocities are tuned in.

use crate::consts::{FRAME_MS, MAX_FRAME_STEP};

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Advance to `now_ms` and return the elapsed time in frames.
    ///
    /// The first call returns exactly one frame. Backwards timestamps yield zero
    /// and long gaps are capped at `MAX_FRAME_STEP` so a backgrounded tab doesn't
    /// teleport everything on return.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / FRAME_MS) as f32,
            None => 1.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_one_step() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1234.0), 1.0);
    }

    #[test]
    fn test_frames_scale_with_elapsed_time() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let dt = clock.advance(FRAME_MS * 2.0);
        assert!((dt - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_long_pause_and_backwards_time_are_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(60_000.0), MAX_FRAME_STEP);
        assert_eq!(clock.advance(10.0), 0.0);
    }
}
