use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use ordia_core::{BlockHeader, KeyPair, TxEntry};
use ordia_sequencer::{BlockSink, Fragment, Sequencer};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

use crate::config::NodeConfig;
use crate::feed::{run_feed, FeedTxn};

/// Monotonic + wall clocks for the sequencer. Housekeeping elapsed-time
/// checks use the monotonic reading; header timestamps use wall time.
struct NodeClock {
    start: Instant,
}

impl NodeClock {
    fn new() -> Self {
        NodeClock {
            start: Instant::now(),
        }
    }

    fn mono_ns(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }

    fn wall_ns(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as i64)
            .unwrap_or(0)
    }
}

/// Publication stand-in: logs each produced block. A real deployment
/// replaces this with the downstream execution/banking link.
struct LogSink;

impl BlockSink for LogSink {
    fn on_block_produced(&self, header: &BlockHeader, txns: &[TxEntry], new_epoch: bool) {
        let payload_bytes: usize = txns.iter().map(|e| e.payload_len()).sum();
        debug!(
            slot = header.slot,
            hash = %header.hash(),
            txns = txns.len(),
            payload_bytes,
            new_epoch,
            "publishing block"
        );
    }
}

/// The Ordia sequencer node
pub struct Node {
    config: NodeConfig,
}

impl Node {
    pub fn new(config: NodeConfig) -> Self {
        Node { config }
    }

    /// Run the node: a single task owns the sequencer (the single-writer
    /// guarantee lives here), fed by an in-process channel and polled at
    /// sub-interval granularity.
    pub async fn run(self) -> Result<()> {
        let key_hex = self
            .config
            .sequencer_key
            .as_ref()
            .ok_or_else(|| anyhow!("no sequencer_key in config; run 'ordia keygen' first"))?;
        let keypair = KeyPair::from_secret_hex(key_hex)
            .map_err(|e| anyhow!("invalid sequencer key: {e}"))?;

        info!("sequencer identity: {}", keypair.public);

        let clock = NodeClock::new();
        let mut sequencer = Sequencer::init(
            self.config.scratch_bytes,
            self.config.queue_capacity,
            self.config.sequencer.clone(),
            keypair,
            clock.mono_ns(),
        )?;
        sequencer.set_sink(Arc::new(LogSink));

        // The sender stays alive here so the ingestion channel never
        // closes even when the synthetic feed is disabled.
        let (txn_tx, mut txn_rx) = mpsc::channel::<FeedTxn>(1024);

        let feed_handle = if self.config.feed.enabled {
            Some(tokio::spawn(run_feed(self.config.feed.clone(), txn_tx.clone())))
        } else {
            None
        };

        let mut poll = interval(Duration::from_millis(self.config.poll_interval_ms.max(1)));
        let mut next_seq = 0u64;

        info!(
            poll_interval_ms = self.config.poll_interval_ms,
            "sequencer node running"
        );

        loop {
            tokio::select! {
                _ = poll.tick() => {
                    sequencer.housekeeping(clock.mono_ns(), clock.wall_ns());
                }
                maybe_txn = txn_rx.recv() => {
                    if let Some(txn) = maybe_txn {
                        let frag = Fragment {
                            source: 0,
                            seq: next_seq,
                            bytes: &txn.bytes,
                            priority_hint: txn.priority_hint,
                        };
                        next_seq += 1;

                        if sequencer.stage_fragment(&frag).is_ok() {
                            sequencer.complete_fragment(frag.priority_hint, clock.mono_ns());
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        if let Some(handle) = feed_handle {
            handle.abort();
        }

        let snapshot = sequencer.metrics();
        info!(
            slot = snapshot.slot,
            epoch = snapshot.epoch,
            blocks = snapshot.block_count,
            txns = snapshot.txn_count,
            dropped = snapshot.dropped_txns,
            fees = snapshot.fee_total,
            "final metrics"
        );

        sequencer.shutdown();
        Ok(())
    }
}
