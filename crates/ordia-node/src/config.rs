use std::path::PathBuf;

use anyhow::Result;
use ordia_core::KeyPair;
use ordia_sequencer::{scratch_footprint, SequencerConfig, QUEUE_MAX};
use serde::{Deserialize, Serialize};

/// Node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Sequencer secret key (hex)
    pub sequencer_key: Option<String>,

    /// Sequencer tunables (block time, per-block cap, epoch length)
    pub sequencer: SequencerConfig,

    /// Priority queue capacity (clamped to the hard ceiling)
    pub queue_capacity: usize,

    /// Scratch memory budget in bytes for all pre-sized sequencer state
    pub scratch_bytes: usize,

    /// Housekeeping poll interval in milliseconds; must stay well below
    /// the block time to keep cadence drift acceptable
    pub poll_interval_ms: u64,

    /// Built-in synthetic transaction feed (Phase-1 devnet aid)
    pub feed: FeedConfig,
}

/// Synthetic transaction feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub enabled: bool,
    /// Transactions per second
    pub rate_per_sec: u64,
    /// Fee range for generated transactions
    pub min_fee: u64,
    pub max_fee: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            enabled: false,
            rate_per_sec: 100,
            min_fee: 1_000,
            max_fee: 100_000,
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        let sequencer = SequencerConfig::default();
        let queue_capacity = QUEUE_MAX;
        let scratch_bytes = default_scratch_bytes(&sequencer, queue_capacity);

        NodeConfig {
            sequencer_key: None,
            sequencer,
            queue_capacity,
            scratch_bytes,
            poll_interval_ms: 10,
            feed: FeedConfig::default(),
        }
    }
}

/// Footprint for the given config, rounded up generously
fn default_scratch_bytes(config: &SequencerConfig, queue_capacity: usize) -> usize {
    let need = scratch_footprint(queue_capacity, config.block_cap());
    need.next_power_of_two()
}

impl NodeConfig {
    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NodeConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Generate a sample configuration with a fresh sequencer key and the
/// synthetic feed enabled
pub fn generate_sample_config() -> NodeConfig {
    let keypair = KeyPair::generate();

    NodeConfig {
        sequencer_key: Some(keypair.secret.to_hex()),
        feed: FeedConfig {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    }
}
