use serde::{Deserialize, Serialize};

use crate::crypto::{hash_blake3, sign, verify, Hash, PublicKey, SecretKey, Sig};
use crate::error::CoreError;

/// Serialized header length:
/// slot (8) + parent_hash (32) + content_root (32) + timestamp (8)
/// + sequencer_pubkey (32) + txn_count (4) + signature (64)
pub const HEADER_LEN: usize = 180;

/// Length of the signed prefix — every field preceding the signature
pub const HEADER_SIGN_LEN: usize = HEADER_LEN - 64;

/// Header of one produced block.
///
/// The wire layout is a fixed little-endian field order; the signature
/// always covers exactly the bytes preceding the signature field. The
/// parent hash of block N+1 is the hash of block N's full header bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Monotonically increasing slot number
    pub slot: u64,
    /// Hash of the previous block's full header bytes (zeros for genesis)
    pub parent_hash: Hash,
    /// Commitment over the included transactions' identity signatures
    pub content_root: Hash,
    /// Wall-clock nanoseconds since the UNIX epoch
    pub timestamp: i64,
    /// The sequencer's public identity
    pub sequencer_pubkey: PublicKey,
    /// Number of transactions included
    pub txn_count: u32,
    /// Ed25519 signature over the preceding fields
    pub signature: Sig,
}

impl BlockHeader {
    /// Serialize the signed prefix: every field before the signature, in
    /// wire order.
    pub fn signing_bytes(&self) -> [u8; HEADER_SIGN_LEN] {
        let mut buf = [0u8; HEADER_SIGN_LEN];
        buf[0..8].copy_from_slice(&self.slot.to_le_bytes());
        buf[8..40].copy_from_slice(self.parent_hash.as_bytes());
        buf[40..72].copy_from_slice(self.content_root.as_bytes());
        buf[72..80].copy_from_slice(&self.timestamp.to_le_bytes());
        buf[80..112].copy_from_slice(self.sequencer_pubkey.as_bytes());
        buf[112..116].copy_from_slice(&self.txn_count.to_le_bytes());
        buf
    }

    /// Serialize the full header in wire order
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[..HEADER_SIGN_LEN].copy_from_slice(&self.signing_bytes());
        buf[HEADER_SIGN_LEN..].copy_from_slice(self.signature.as_bytes());
        buf
    }

    /// Decode a header from wire bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() < HEADER_LEN {
            return Err(CoreError::TruncatedHeader {
                size: bytes.len(),
                need: HEADER_LEN,
            });
        }

        let mut slot = [0u8; 8];
        slot.copy_from_slice(&bytes[0..8]);
        let mut timestamp = [0u8; 8];
        timestamp.copy_from_slice(&bytes[72..80]);
        let mut txn_count = [0u8; 4];
        txn_count.copy_from_slice(&bytes[112..116]);

        Ok(BlockHeader {
            slot: u64::from_le_bytes(slot),
            parent_hash: Hash::from_slice(&bytes[8..40]).expect("32-byte slice"),
            content_root: Hash::from_slice(&bytes[40..72]).expect("32-byte slice"),
            timestamp: i64::from_le_bytes(timestamp),
            sequencer_pubkey: PublicKey::from_slice(&bytes[80..112]).expect("32-byte slice"),
            txn_count: u32::from_le_bytes(txn_count),
            signature: Sig::from_slice(&bytes[116..180]).expect("64-byte slice"),
        })
    }

    /// Sign the header with the sequencer's secret key, storing the
    /// signature in place
    pub fn sign(&mut self, secret_key: &SecretKey) {
        self.signature = sign(secret_key, &self.signing_bytes());
    }

    /// Verify the stored signature against the embedded sequencer pubkey
    pub fn verify_signature(&self) -> Result<(), CoreError> {
        verify(
            &self.sequencer_pubkey,
            &self.signing_bytes(),
            &self.signature,
        )
    }

    /// Hash of the full header bytes — the next block's parent hash
    pub fn hash(&self) -> Hash {
        hash_blake3(&self.to_bytes())
    }
}
