//! Ordia Core - Core types and cryptography
//!
//! This crate provides the foundational types for the Ordia centralized
//! sequencer: hashes, ed25519 keys and signatures, transaction entries,
//! and the byte-exact block header layout.

pub mod crypto;
pub mod error;
pub mod types;

pub use crypto::{commit_sigs, hash_blake3, sign, verify, Hash, KeyPair, PublicKey, SecretKey, Sig};
pub use error::CoreError;
pub use types::*;
