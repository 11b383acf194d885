use ordia_core::{BlockHeader, TxEntry};
use serde::Serialize;

/// Structured observation of sequencer state, emitted on every block
/// production and on demand. Export format and transport belong to the
/// observability collaborator.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricsSnapshot {
    pub slot: u64,
    pub epoch: u64,
    pub block_count: u64,
    pub txn_count: u64,
    pub queue_depth: usize,
    pub fee_total: u64,
    pub dropped_txns: u64,
    pub oversized_frags: u64,
}

/// Publication boundary: receives each produced block (signed header plus
/// included transactions in drain order). The sink borrows the drained
/// entries for the duration of the call; serialization and downstream
/// framing are the collaborator's responsibility.
pub trait BlockSink: Send + Sync {
    fn on_block_produced(&self, header: &BlockHeader, txns: &[TxEntry], new_epoch: bool);
}
