use serde::{Deserialize, Serialize};

/// Hard ceiling on priority-queue capacity
pub const QUEUE_MAX: usize = 65_536;

/// Hard ceiling on transactions drained into one block, bounding the
/// drain buffer regardless of configuration
pub const MAX_BLOCK_TXNS: usize = 10_000;

/// Ceiling applied to externally supplied priority hints. The hint comes
/// from an upstream stage and is not derived from authenticated
/// transaction content, so it is clamped rather than trusted.
pub const MAX_PRIORITY_FEE: u64 = 1_000_000_000_000;

/// Sequencer tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Target block interval in nanoseconds
    pub block_time_ns: u64,
    /// Per-block drain cap (clamped to [`MAX_BLOCK_TXNS`] at use)
    pub max_txns_per_block: usize,
    /// Slots per epoch
    pub epoch_length_slots: u64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        SequencerConfig {
            block_time_ns: 400_000_000, // 400 ms
            max_txns_per_block: 10_000,
            epoch_length_slots: 432_000,
        }
    }
}

impl SequencerConfig {
    /// The effective per-block drain cap
    pub fn block_cap(&self) -> usize {
        self.max_txns_per_block.min(MAX_BLOCK_TXNS)
    }
}
