pub mod entry;
pub mod header;

pub use entry::{TxEntry, BASE_FEE, MAX_TXN_SZ};
pub use header::{BlockHeader, HEADER_LEN, HEADER_SIGN_LEN};
