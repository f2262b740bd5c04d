use crate::{decode_hex, keccak256, Result, TypesError, H160};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_LENGTH: usize = 20;

/// A 20-byte account address, as it appears in the `to` field of a
/// transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(H160);

impl Address {
    pub const ZERO: Address = Address(H160::zero());

    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != ADDRESS_LENGTH {
            return Err(TypesError::InvalidLength {
                expected: ADDRESS_LENGTH,
                actual: slice.len(),
            });
        }
        Ok(Address(H160::from_slice(slice)))
    }

    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(H160::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// EIP-55 mixed-case rendering.
    pub fn checksum(&self) -> String {
        let lower = hex::encode(self.0.as_bytes());
        let hash = keccak256(lower.as_bytes());

        let mixed: String = lower
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let byte = hash.as_bytes()[i / 2];
                let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
                if ch.is_ascii_alphabetic() && nibble >= 8 {
                    ch.to_ascii_uppercase()
                } else {
                    ch
                }
            })
            .collect();

        format!("0x{}", mixed)
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != ADDRESS_LENGTH * 2 {
            return Err(TypesError::InvalidLength {
                expected: ADDRESS_LENGTH * 2,
                actual: digits.len(),
            });
        }

        let addr = Address::from_slice(&decode_hex(digits)?)?;

        // All-lowercase and all-uppercase inputs carry no checksum.
        let mixed_case = digits.chars().any(|c| c.is_ascii_uppercase())
            && digits.chars().any(|c| c.is_ascii_lowercase());
        if mixed_case && addr.checksum()[2..] != *digits {
            return Err(TypesError::InvalidChecksum);
        }

        Ok(addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.checksum())
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl From<H160> for Address {
    fn from(hash: H160) -> Self {
        Address(hash)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address::from_bytes(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(serde::de::Error::custom)
    }
}
