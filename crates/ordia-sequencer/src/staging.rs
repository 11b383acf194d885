use ordia_core::{TxEntry, BASE_FEE, MAX_TXN_SZ};
use tracing::trace;

use crate::config::MAX_PRIORITY_FEE;
use crate::error::SequencerError;

/// One fragment delivery from the ingestion transport: an opaque source
/// index, a monotonically increasing sequence number, the fragment bytes,
/// and an optional out-of-band priority hint from the upstream
/// verification stage.
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    pub source: usize,
    pub seq: u64,
    pub bytes: &'a [u8],
    pub priority_hint: Option<u64>,
}

/// Reassembly buffer for one in-flight logical transaction.
///
/// Fragments append into a bounded buffer; completion turns the staged
/// bytes into a [`TxEntry`]. A fragment that would overflow the maximum
/// transaction size discards the whole in-progress unit.
pub struct FragmentStaging {
    buf: Box<[u8; MAX_TXN_SZ]>,
    len: usize,
}

impl FragmentStaging {
    pub fn new() -> Self {
        FragmentStaging {
            buf: Box::new([0u8; MAX_TXN_SZ]),
            len: 0,
        }
    }

    /// Append one fragment. On overflow the staging buffer is reset and
    /// the fragment is flagged for filtering.
    pub fn stage(&mut self, frag: &Fragment<'_>) -> Result<(), SequencerError> {
        if self.len + frag.bytes.len() > MAX_TXN_SZ {
            let size = self.len + frag.bytes.len();
            self.len = 0;
            return Err(SequencerError::OversizedFragment {
                size,
                max: MAX_TXN_SZ,
            });
        }

        self.buf[self.len..self.len + frag.bytes.len()].copy_from_slice(frag.bytes);
        self.len += frag.bytes.len();

        trace!(
            source = frag.source,
            seq = frag.seq,
            sz = frag.bytes.len(),
            staged = self.len,
            "staged fragment"
        );

        Ok(())
    }

    /// Complete the in-flight unit, consuming the staged bytes into a
    /// transaction entry. Returns `None` when nothing is staged.
    ///
    /// The priority score comes from the (untrusted, clamped) hint when
    /// present and positive, otherwise the base fee.
    pub fn complete(
        &mut self,
        priority_hint: Option<u64>,
        received_at: u64,
    ) -> Option<TxEntry> {
        if self.len == 0 {
            return None;
        }

        let fee = resolve_fee(priority_hint);
        let entry = TxEntry::from_payload(&self.buf[..self.len], fee, received_at)
            .expect("staged bytes bounded by MAX_TXN_SZ");
        self.len = 0;

        Some(entry)
    }

    /// Bytes currently staged
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for FragmentStaging {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the priority score for a completed transaction. Hints are
/// supplied by an upstream stage until full fee-instruction decoding
/// exists; they are clamped, never trusted as ground truth.
fn resolve_fee(priority_hint: Option<u64>) -> u64 {
    match priority_hint {
        Some(hint) if hint > 0 => hint.min(MAX_PRIORITY_FEE),
        _ => BASE_FEE,
    }
}
