use ordia_core::{Hash, KeyPair};

use crate::config::SequencerConfig;

/// Mutable sequencing context: chain position, lifetime counters, the
/// rolling parent hash, and the signer's keypair.
///
/// Exclusively owned and mutated by the single sequencing thread.
pub struct SequencerState {
    /// Current slot (next block's slot number)
    pub slot: u64,
    /// Current epoch
    pub epoch: u64,
    /// Lifetime blocks produced
    pub block_count: u64,
    /// Lifetime transactions enqueued
    pub txn_count: u64,
    /// Transactions dropped because the queue was full
    pub dropped_txns: u64,
    /// Fragments discarded for exceeding the maximum transaction size
    pub oversized_frags: u64,
    /// Cumulative fees across all produced blocks
    pub fee_total: u64,
    /// Hash of the last produced block's full header bytes
    pub parent_hash: Hash,
    /// The sequencer's signing identity
    pub keypair: KeyPair,
    pub config: SequencerConfig,
}

impl SequencerState {
    /// Genesis state: slot 0, epoch 0, all-zero parent hash
    pub fn new(keypair: KeyPair, config: SequencerConfig) -> Self {
        SequencerState {
            slot: 0,
            epoch: 0,
            block_count: 0,
            txn_count: 0,
            dropped_txns: 0,
            oversized_frags: 0,
            fee_total: 0,
            parent_hash: Hash::ZERO,
            keypair,
            config,
        }
    }

    /// Advance the slot by one after a block is produced. Returns true
    /// when the new slot crosses an epoch boundary (a nonzero multiple of
    /// the epoch length).
    pub fn advance_slot(&mut self) -> bool {
        self.slot += 1;
        self.block_count += 1;

        let epoch_len = self.config.epoch_length_slots;
        if epoch_len > 0 && self.slot % epoch_len == 0 {
            self.epoch += 1;
            return true;
        }
        false
    }
}
