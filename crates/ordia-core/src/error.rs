use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Truncated header: {size} bytes (need {need})")]
    TruncatedHeader { size: usize, need: usize },

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}
