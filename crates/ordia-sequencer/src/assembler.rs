use ordia_core::{commit_sigs, BlockHeader, Sig, TxEntry};
use ordia_queue::FeeHeap;
use tracing::debug;

use crate::state::SequencerState;

/// Drain up to the configured per-block cap from the priority queue and
/// produce a signed block header.
///
/// Drained entries land in `drain_buf` in pop order (descending fee); the
/// buffer is cleared first and must be preallocated to the block cap so
/// assembly never allocates. The content root commits to the drained
/// entries' identity signatures in that order. An empty drain still
/// yields a fully populated, signed header — the cadence never skips an
/// interval for lack of transactions.
///
/// Side effect: the cumulative fee total in `state` grows by the sum of
/// drained fees.
pub fn assemble_block(
    state: &mut SequencerState,
    heap: &mut FeeHeap,
    drain_buf: &mut Vec<TxEntry>,
    wall_now_ns: i64,
) -> BlockHeader {
    let cap = state.config.block_cap();

    drain_buf.clear();
    while drain_buf.len() < cap {
        match heap.pop() {
            Ok(entry) => drain_buf.push(entry),
            Err(_) => break,
        }
    }

    let content_root = commit_sigs(drain_buf.iter().map(|e| &e.sig));

    let mut header = BlockHeader {
        slot: state.slot,
        parent_hash: state.parent_hash,
        content_root,
        timestamp: wall_now_ns,
        sequencer_pubkey: state.keypair.public,
        txn_count: drain_buf.len() as u32,
        signature: Sig::ZERO,
    };
    header.sign(&state.keypair.secret);

    for entry in drain_buf.iter() {
        state.fee_total += entry.fee;
    }

    debug!(
        slot = header.slot,
        txns = header.txn_count,
        "assembled block"
    );

    header
}
