//! Fixed-step frame clock.

/// Frame length in milliseconds (~60 FPS).
pub const FRAME_MS: u64 = 16;

/// Longest wall-clock gap accepted in one call, so a stall (suspended
/// terminal, debugger) does not replay seconds of frames at once.
pub const MAX_DT_MS: u64 = 100;

/// Turns variable wall-clock deltas into whole frames.
///
/// Each frame carries the engine-clock timestamp (`elapsed_ms`) the engine
/// uses for time-based rules such as the post-hit grace window.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulated_ms: u64,
    elapsed_ms: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add wall-clock time since the last call.
    pub fn accumulate(&mut self, dt_ms: u64) {
        self.accumulated_ms += dt_ms.min(MAX_DT_MS);
    }

    /// Consume one frame if enough time has built up, returning its timestamp.
    pub fn next_frame(&mut self) -> Option<u64> {
        if self.accumulated_ms < FRAME_MS {
            return None;
        }
        self.accumulated_ms -= FRAME_MS;
        self.elapsed_ms += FRAME_MS;
        Some(self.elapsed_ms)
    }

    /// Engine time of the most recent frame.
    pub fn now_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut FrameClock) -> Vec<u64> {
        std::iter::from_fn(|| clock.next_frame()).collect()
    }

    #[test]
    fn test_whole_frames_only() {
        let mut clock = FrameClock::new();
        clock.accumulate(40);
        assert_eq!(drain(&mut clock), vec![16, 32]);
        // 8ms carried over
        clock.accumulate(8);
        assert_eq!(drain(&mut clock), vec![48]);
        assert_eq!(clock.now_ms(), 48);
    }

    #[test]
    fn test_short_delta_yields_nothing() {
        let mut clock = FrameClock::new();
        clock.accumulate(10);
        assert!(clock.next_frame().is_none());
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut clock = FrameClock::new();
        clock.accumulate(5_000);
        // 100ms -> 6 frames
        assert_eq!(drain(&mut clock).len(), 6);
    }
}
