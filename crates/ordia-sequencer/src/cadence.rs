/// Cadence phases. `Producing` exists only within a single housekeeping
/// call — the machine is polled, never suspended mid-production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Within the current block's time window
    Accumulating,
    /// Interval elapsed, block assembly in progress
    Producing,
}

/// Timer state for the block-production cadence.
///
/// Time is injected by the caller as monotonic nanoseconds, keeping the
/// state machine pure and testable without wall-clock waits. Elapsed time
/// is clamped at zero to guard against non-monotonic clock sources.
pub struct Cadence {
    phase: Phase,
    block_start_ns: u64,
}

impl Cadence {
    pub fn new(mono_now_ns: u64) -> Self {
        Cadence {
            phase: Phase::Accumulating,
            block_start_ns: mono_now_ns,
        }
    }

    /// Check whether the block interval has elapsed. Transitions into
    /// `Producing` and returns true at most once per interval; the caller
    /// must follow up with [`Cadence::finish`].
    pub fn poll(&mut self, mono_now_ns: u64, block_time_ns: u64) -> bool {
        let elapsed = mono_now_ns.saturating_sub(self.block_start_ns);
        if elapsed < block_time_ns {
            return false;
        }
        self.phase = Phase::Producing;
        true
    }

    /// Return to `Accumulating` and reset the block-start timestamp.
    /// Missed intervals are not caught up: only the timer resets, and the
    /// next poll re-evaluates normally.
    pub fn finish(&mut self, mono_now_ns: u64) {
        self.phase = Phase::Accumulating;
        self.block_start_ns = mono_now_ns;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn block_start_ns(&self) -> u64 {
        self.block_start_ns
    }
}
