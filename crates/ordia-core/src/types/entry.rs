use std::fmt;

use crate::crypto::Sig;
use crate::error::CoreError;

/// Maximum transaction payload size in bytes
pub const MAX_TXN_SZ: usize = 1232;

/// Default priority score applied when no priority hint accompanies a
/// transaction
pub const BASE_FEE: u64 = 5_000;

/// Offset of the embedded identity signature: the payload starts with a
/// 1-byte signature-count prefix followed by the first 64-byte signature.
const SIG_OFFSET: usize = 1;

/// One pending unit of work awaiting inclusion in a block.
///
/// Entries carry their payload inline in a fixed-size buffer so that queue
/// operations never allocate. They are created by ingestion staging,
/// consumed by the block assembler, and never mutated in between apart
/// from heap-maintenance moves.
#[derive(Clone)]
pub struct TxEntry {
    payload: [u8; MAX_TXN_SZ],
    payload_len: usize,
    /// Priority score (sort key, higher is more urgent)
    pub fee: u64,
    /// Monotonic arrival timestamp in nanoseconds
    pub received_at: u64,
    /// Identity signature extracted from the payload; zeroed when the
    /// payload is too short to carry one
    pub sig: Sig,
}

impl TxEntry {
    /// Build an entry from complete payload bytes.
    ///
    /// The identity signature is read at a fixed offset (after the 1-byte
    /// count prefix) when the payload is large enough; otherwise it stays
    /// zeroed.
    pub fn from_payload(bytes: &[u8], fee: u64, received_at: u64) -> Result<Self, CoreError> {
        if bytes.len() > MAX_TXN_SZ {
            return Err(CoreError::PayloadTooLarge {
                size: bytes.len(),
                max: MAX_TXN_SZ,
            });
        }

        let mut payload = [0u8; MAX_TXN_SZ];
        payload[..bytes.len()].copy_from_slice(bytes);

        let sig = if bytes.len() >= SIG_OFFSET + 64 {
            Sig::from_slice(&bytes[SIG_OFFSET..SIG_OFFSET + 64]).unwrap_or_default()
        } else {
            Sig::ZERO
        };

        Ok(TxEntry {
            payload,
            payload_len: bytes.len(),
            fee,
            received_at,
            sig,
        })
    }

    /// The transaction's payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload[..self.payload_len]
    }

    pub fn payload_len(&self) -> usize {
        self.payload_len
    }
}

impl fmt::Debug for TxEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxEntry")
            .field("payload_len", &self.payload_len)
            .field("fee", &self.fee)
            .field("received_at", &self.received_at)
            .field("sig", &self.sig)
            .finish()
    }
}
