use std::mem::size_of;
use std::sync::Arc;

use ordia_core::{BlockHeader, KeyPair, TxEntry, MAX_TXN_SZ};
use ordia_queue::FeeHeap;
use tracing::{info, warn};

use crate::assembler::assemble_block;
use crate::cadence::Cadence;
use crate::config::{SequencerConfig, QUEUE_MAX};
use crate::error::SequencerError;
use crate::events::{BlockSink, MetricsSnapshot};
use crate::staging::{Fragment, FragmentStaging};
use crate::state::SequencerState;

/// Bytes of pre-sized storage the sequencer needs for a given queue
/// capacity and per-block drain cap. Everything is allocated once at
/// init and reused for the process lifetime.
pub fn scratch_footprint(queue_cap: usize, block_cap: usize) -> usize {
    size_of::<SequencerState>()
        + size_of::<Cadence>()
        + MAX_TXN_SZ // staging buffer
        + (queue_cap + block_cap) * size_of::<TxEntry>()
}

/// The sequencing engine: priority queue, ingestion staging, block
/// assembly, and the cadence state machine, behind a single-writer API.
pub struct Sequencer {
    state: SequencerState,
    heap: FeeHeap,
    staging: FragmentStaging,
    cadence: Cadence,
    drain_buf: Vec<TxEntry>,
    sink: Option<Arc<dyn BlockSink>>,
}

impl Sequencer {
    /// Initialize all fixed-size state within the caller's scratch
    /// budget. Fails with `InsufficientScratch` when the budget cannot
    /// hold the state plus a queue of the requested capacity; nothing is
    /// allocated on failure.
    pub fn init(
        scratch_bytes: usize,
        queue_cap: usize,
        config: SequencerConfig,
        keypair: KeyPair,
        mono_now_ns: u64,
    ) -> Result<Self, SequencerError> {
        let queue_cap = queue_cap.min(QUEUE_MAX);
        let block_cap = config.block_cap();

        let need = scratch_footprint(queue_cap, block_cap);
        if scratch_bytes < need {
            return Err(SequencerError::InsufficientScratch {
                need,
                have: scratch_bytes,
            });
        }

        info!(
            block_time_ns = config.block_time_ns,
            max_txns = config.max_txns_per_block,
            epoch_len = config.epoch_length_slots,
            queue_cap,
            "sequencer initialized"
        );

        Ok(Sequencer {
            state: SequencerState::new(keypair, config),
            heap: FeeHeap::with_capacity(queue_cap),
            staging: FragmentStaging::new(),
            cadence: Cadence::new(mono_now_ns),
            drain_buf: Vec::with_capacity(block_cap),
            sink: None,
        })
    }

    /// Attach the block publication sink
    pub fn set_sink(&mut self, sink: Arc<dyn BlockSink>) {
        self.sink = Some(sink);
    }

    /// Stage one delivered fragment of an in-flight transaction.
    /// Oversized fragments discard the staging buffer and are flagged for
    /// filtering.
    pub fn stage_fragment(&mut self, frag: &Fragment<'_>) -> Result<(), SequencerError> {
        match self.staging.stage(frag) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.state.oversized_frags += 1;
                warn!(source = frag.source, seq = frag.seq, %err, "fragment dropped");
                Err(err)
            }
        }
    }

    /// Complete the in-flight transaction and enqueue it. Returns true
    /// when the entry was enqueued; a full queue drops the entry (counted
    /// and logged, never retried — resubmission is the upstream's call).
    pub fn complete_fragment(&mut self, priority_hint: Option<u64>, mono_now_ns: u64) -> bool {
        let Some(entry) = self.staging.complete(priority_hint, mono_now_ns) else {
            return false;
        };

        match self.heap.push(entry) {
            Ok(()) => {
                self.state.txn_count += 1;
                true
            }
            Err(_) => {
                self.state.dropped_txns += 1;
                warn!(
                    queue_depth = self.heap.len(),
                    "queue full, dropping transaction"
                );
                false
            }
        }
    }

    /// Housekeeping tick: produce at most one block when the configured
    /// interval has elapsed. Missed intervals are never caught up with
    /// extra blocks; only the timer resets.
    ///
    /// `mono_now_ns` drives the cadence timer; `wall_now_ns` becomes the
    /// header timestamp.
    pub fn housekeeping(&mut self, mono_now_ns: u64, wall_now_ns: i64) -> Option<BlockHeader> {
        if !self
            .cadence
            .poll(mono_now_ns, self.state.config.block_time_ns)
        {
            return None;
        }

        let header = assemble_block(
            &mut self.state,
            &mut self.heap,
            &mut self.drain_buf,
            wall_now_ns,
        );

        self.state.parent_hash = header.hash();
        let new_epoch = self.state.advance_slot();
        self.cadence.finish(mono_now_ns);

        info!(
            slot = header.slot,
            txns = header.txn_count,
            fees = self.state.fee_total,
            queue = self.heap.len(),
            "produced block"
        );
        if new_epoch {
            info!(
                epoch = self.state.epoch,
                slot = self.state.slot,
                "epoch started"
            );
        }

        if let Some(sink) = &self.sink {
            sink.on_block_produced(&header, &self.drain_buf, new_epoch);
        }

        Some(header)
    }

    /// Snapshot the current observations
    pub fn metrics(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            slot: self.state.slot,
            epoch: self.state.epoch,
            block_count: self.state.block_count,
            txn_count: self.state.txn_count,
            queue_depth: self.heap.len(),
            fee_total: self.state.fee_total,
            dropped_txns: self.state.dropped_txns,
            oversized_frags: self.state.oversized_frags,
        }
    }

    pub fn queue_depth(&self) -> usize {
        self.heap.len()
    }

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    /// Graceful shutdown: log lifetime totals and wipe the private key
    /// material before returning.
    pub fn shutdown(mut self) {
        info!(
            blocks = self.state.block_count,
            txns = self.state.txn_count,
            fees = self.state.fee_total,
            "sequencer shutting down"
        );
        self.state.keypair.secret.wipe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIG_SCRATCH: usize = 1 << 30;

    fn test_sequencer(queue_cap: usize, config: SequencerConfig) -> Sequencer {
        Sequencer::init(BIG_SCRATCH, queue_cap, config, KeyPair::generate(), 0).unwrap()
    }

    fn submit(seq: &mut Sequencer, payload: &[u8], fee: u64, now: u64) -> bool {
        let frag = Fragment {
            source: 0,
            seq: 0,
            bytes: payload,
            priority_hint: Some(fee),
        };
        seq.stage_fragment(&frag).unwrap();
        seq.complete_fragment(frag.priority_hint, now)
    }

    #[test]
    fn test_insufficient_scratch() {
        let result = Sequencer::init(
            1024,
            QUEUE_MAX,
            SequencerConfig::default(),
            KeyPair::generate(),
            0,
        );
        assert!(matches!(
            result,
            Err(SequencerError::InsufficientScratch { .. })
        ));
    }

    #[test]
    fn test_footprint_scales_with_queue() {
        let small = scratch_footprint(64, 64);
        let large = scratch_footprint(QUEUE_MAX, 64);
        assert!(large > small);
        assert!(small > MAX_TXN_SZ);
    }

    #[test]
    fn test_ingest_and_produce() {
        let config = SequencerConfig {
            block_time_ns: 100,
            ..Default::default()
        };
        let mut seq = test_sequencer(64, config);

        assert!(submit(&mut seq, b"payload-a", 500, 1));
        assert!(submit(&mut seq, b"payload-b", 900, 2));
        assert_eq!(seq.queue_depth(), 2);

        // Before the interval: no block.
        assert!(seq.housekeeping(50, 50).is_none());

        let header = seq.housekeeping(100, 100).unwrap();
        assert_eq!(header.slot, 0);
        assert_eq!(header.txn_count, 2);
        assert!(header.verify_signature().is_ok());
        assert_eq!(seq.state().slot, 1);
        assert_eq!(seq.queue_depth(), 0);
    }

    #[test]
    fn test_at_most_one_block_per_tick() {
        let config = SequencerConfig {
            block_time_ns: 100,
            ..Default::default()
        };
        let mut seq = test_sequencer(64, config);

        // Ten intervals overrun, one call: exactly one block.
        assert!(seq.housekeeping(1_000, 1_000).is_some());
        assert_eq!(seq.state().block_count, 1);

        // Timer was reset; the very next call is within the new window.
        assert!(seq.housekeeping(1_050, 1_050).is_none());
    }

    #[test]
    fn test_parent_hash_chains_headers() {
        let config = SequencerConfig {
            block_time_ns: 100,
            ..Default::default()
        };
        let mut seq = test_sequencer(64, config);

        let first = seq.housekeeping(100, 100).unwrap();
        let second = seq.housekeeping(200, 200).unwrap();

        assert_eq!(second.parent_hash, first.hash());
        assert_eq!(second.slot, first.slot + 1);
    }

    #[test]
    fn test_full_queue_drops_and_counts() {
        let mut seq = test_sequencer(2, SequencerConfig::default());

        assert!(submit(&mut seq, b"a", 10, 0));
        assert!(submit(&mut seq, b"b", 20, 0));
        assert!(!submit(&mut seq, b"c", 30, 0));

        let metrics = seq.metrics();
        assert_eq!(metrics.txn_count, 2);
        assert_eq!(metrics.dropped_txns, 1);
        assert_eq!(metrics.queue_depth, 2);
    }

    #[test]
    fn test_oversized_fragment_counted() {
        let mut seq = test_sequencer(16, SequencerConfig::default());

        let big = vec![0u8; MAX_TXN_SZ + 1];
        let frag = Fragment {
            source: 3,
            seq: 9,
            bytes: &big,
            priority_hint: None,
        };
        assert!(seq.stage_fragment(&frag).is_err());
        assert!(!seq.complete_fragment(None, 0));

        let metrics = seq.metrics();
        assert_eq!(metrics.oversized_frags, 1);
        assert_eq!(metrics.queue_depth, 0);
    }

    #[test]
    fn test_queue_cap_clamped_to_max() {
        let seq = Sequencer::init(
            1 << 31,
            QUEUE_MAX * 2,
            SequencerConfig::default(),
            KeyPair::generate(),
            0,
        )
        .unwrap();
        assert_eq!(seq.heap.capacity(), QUEUE_MAX);
    }
}
