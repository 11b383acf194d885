use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::signature::Sig;

/// A 32-byte Blake3 hash
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    pub const ZERO: Hash = Hash([0u8; 32]);

    pub fn new(data: [u8; 32]) -> Self {
        Hash(data)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != 32 {
            return None;
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Some(Hash(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes).ok_or(hex::FromHexError::InvalidStringLength)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Compute Blake3 hash of data
pub fn hash_blake3(data: &[u8]) -> Hash {
    let hash = blake3::hash(data);
    Hash(*hash.as_bytes())
}

/// Commitment over an ordered list of transaction identity signatures:
/// the hash of the concatenated signature bytes, in list order.
///
/// Returns `Hash::ZERO` for an empty list (empty blocks carry no content).
pub fn commit_sigs<'a, I>(sigs: I) -> Hash
where
    I: IntoIterator<Item = &'a Sig>,
{
    let mut hasher = blake3::Hasher::new();
    let mut count = 0usize;
    for sig in sigs {
        hasher.update(sig.as_bytes());
        count += 1;
    }
    if count == 0 {
        return Hash::ZERO;
    }
    Hash(*hasher.finalize().as_bytes())
}
