//! Ordia Sequencer - Block production core
//!
//! This crate assembles fee-ordered transactions into signed blocks at a
//! fixed wall-clock cadence. It covers ingestion staging, block assembly,
//! the slot/epoch cadence state machine, and the scratch-budgeted
//! lifecycle (init and key-wiping shutdown).
//!
//! The sequencer is single-writer by contract: exactly one thread of
//! control may own and drive a [`Sequencer`]. No internal locking is
//! provided; callers that cannot guarantee exclusive access must wrap the
//! sequencer in their own mutual-exclusion boundary.

pub mod assembler;
pub mod cadence;
pub mod config;
pub mod error;
pub mod events;
pub mod sequencer;
pub mod staging;
pub mod state;

pub use assembler::assemble_block;
pub use cadence::{Cadence, Phase};
pub use config::{SequencerConfig, MAX_BLOCK_TXNS, MAX_PRIORITY_FEE, QUEUE_MAX};
pub use error::SequencerError;
pub use events::{BlockSink, MetricsSnapshot};
pub use sequencer::{scratch_footprint, Sequencer};
pub use staging::{Fragment, FragmentStaging};
pub use state::SequencerState;
