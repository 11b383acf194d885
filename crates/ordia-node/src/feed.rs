use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

use crate::config::FeedConfig;

/// One reassembled-at-source transaction delivery destined for the
/// sequencer: complete payload bytes plus the out-of-band priority hint.
#[derive(Debug)]
pub struct FeedTxn {
    pub bytes: Vec<u8>,
    pub priority_hint: Option<u64>,
}

/// Synthetic transaction generator for Phase-1 devnets: emits well-formed
/// payloads (1-byte signature count, 64-byte identity signature, filler)
/// with randomized fees at a fixed rate. Stands in for the upstream
/// verification stage until real ingestion transport is wired up.
pub async fn run_feed(config: FeedConfig, tx: mpsc::Sender<FeedTxn>) {
    let period = Duration::from_nanos(1_000_000_000 / config.rate_per_sec.max(1));
    let mut ticker = interval(period);
    // StdRng rather than ThreadRng: the feed task is spawned and the rng
    // lives across await points.
    let mut rng = StdRng::from_entropy();

    info!(
        rate = config.rate_per_sec,
        min_fee = config.min_fee,
        max_fee = config.max_fee,
        "synthetic feed started"
    );

    loop {
        ticker.tick().await;

        let mut payload = Vec::with_capacity(128);
        payload.push(1u8); // one signature
        let mut sig = [0u8; 64];
        rng.fill(&mut sig[..]);
        payload.extend_from_slice(&sig);
        payload.extend_from_slice(&rng.gen::<[u8; 32]>());

        let fee = rng.gen_range(config.min_fee..=config.max_fee.max(config.min_fee));

        let txn = FeedTxn {
            bytes: payload,
            priority_hint: Some(fee),
        };

        if tx.send(txn).await.is_err() {
            debug!("feed channel closed, stopping");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_feed_emits_well_formed_txns() {
        let config = FeedConfig {
            enabled: true,
            rate_per_sec: 10_000,
            min_fee: 10,
            max_fee: 20,
        };
        let (tx, mut rx) = mpsc::channel(8);
        let handle = tokio::spawn(run_feed(config, tx));

        let txn = rx.recv().await.unwrap();
        assert!(txn.bytes.len() >= 65);
        assert_eq!(txn.bytes[0], 1);
        let hint = txn.priority_hint.unwrap();
        assert!((10..=20).contains(&hint));

        drop(rx);
        handle.abort();
    }
}
