use primitive_types::U256 as PrimitiveU256;

pub type U256 = PrimitiveU256;

/// Strips leading zero bytes. An all-zero input yields an empty slice.
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first_non_zero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first_non_zero..]
}

pub trait UintExt: Sized {
    /// Reads a big-endian value, `None` when it does not fit.
    fn from_be_slice(bytes: &[u8]) -> Option<Self>;

    /// Minimal big-endian form: no leading zero bytes, empty for zero.
    fn to_minimal_be_bytes(&self) -> Vec<u8>;
}

impl UintExt for U256 {
    fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        let bytes = trim_leading_zeros(bytes);
        if bytes.len() > 32 {
            return None;
        }
        Some(U256::from_big_endian(bytes))
    }

    fn to_minimal_be_bytes(&self) -> Vec<u8> {
        let mut bytes = [0u8; 32];
        self.to_big_endian(&mut bytes);
        trim_leading_zeros(&bytes).to_vec()
    }
}

impl UintExt for u64 {
    fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        let bytes = trim_leading_zeros(bytes);
        if bytes.len() > 8 {
            return None;
        }
        let mut array = [0u8; 8];
        array[8 - bytes.len()..].copy_from_slice(bytes);
        Some(u64::from_be_bytes(array))
    }

    fn to_minimal_be_bytes(&self) -> Vec<u8> {
        trim_leading_zeros(&self.to_be_bytes()).to_vec()
    }
}
