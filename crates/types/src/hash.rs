use primitive_types::{H160 as PrimitiveH160, H256 as PrimitiveH256};
use sha3::{Digest, Keccak256};

pub type H160 = PrimitiveH160;
pub type H256 = PrimitiveH256;

/// Keccak-256 digest, the hash signed over an RLP-encoded transaction.
pub fn keccak256(data: &[u8]) -> H256 {
    H256::from_slice(&Keccak256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(&[]).as_bytes()),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_empty_list_encoding() {
        // keccak256(0xc0), the empty uncles hash
        assert_eq!(
            hex::encode(keccak256(&[0xc0]).as_bytes()),
            "1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347"
        );
    }
}
