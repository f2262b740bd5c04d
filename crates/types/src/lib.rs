pub mod address;
pub mod block;
pub mod bytes;
pub mod hash;
pub mod uint;

pub use address::Address;
pub use block::BlockTag;
pub use bytes::Bytes;
pub use hash::{keccak256, H160, H256};
pub use uint::{trim_leading_zeros, UintExt, U256};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid address checksum")]
    InvalidChecksum,

    #[error("Invalid block tag: {0}")]
    InvalidBlockTag(String),
}

pub type Result<T> = std::result::Result<T, TypesError>;

/// Decodes a hex string with an optional `0x` prefix. An odd number of
/// digits is accepted and read as if left-padded with a zero nibble.
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);

    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{}", digits))
    } else {
        hex::decode(digits)
    };

    decoded.map_err(|_| TypesError::InvalidHex(s.to_string()))
}
