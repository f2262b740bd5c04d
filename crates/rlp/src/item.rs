use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use web3_types::{trim_leading_zeros, Bytes, UintExt, U256};

/// A decoded or to-be-encoded RLP value: a byte string or a list of items.
///
/// Integers and text are both carried as byte strings. Integers use the
/// minimal big-endian form, so zero is the empty string. Nothing records
/// which constructor produced a byte string; the typed accessors decide how
/// to read it back.
///
/// The serde form maps byte strings to `0x`-hex strings and lists to arrays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RlpItem {
    Bytes(Bytes),
    List(Vec<RlpItem>),
}

impl RlpItem {
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        RlpItem::Bytes(bytes.into())
    }

    pub fn from_text(text: &str) -> Self {
        RlpItem::Bytes(Bytes::from(text))
    }

    pub fn from_uint(value: u64) -> Self {
        RlpItem::Bytes(Bytes::from_vec(value.to_minimal_be_bytes()))
    }

    pub fn from_u256(value: U256) -> Self {
        RlpItem::Bytes(Bytes::from_vec(value.to_minimal_be_bytes()))
    }

    pub fn from_big_uint(value: &BigUint) -> Self {
        let bytes = value.to_bytes_be();
        RlpItem::Bytes(Bytes::from_slice(trim_leading_zeros(&bytes)))
    }

    pub fn from_items(items: impl IntoIterator<Item = RlpItem>) -> Self {
        RlpItem::List(items.into_iter().collect())
    }

    pub fn empty_list() -> Self {
        RlpItem::List(Vec::new())
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, RlpItem::Bytes(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    /// Byte count of a string, element count of a list.
    pub fn len(&self) -> usize {
        match self {
            RlpItem::Bytes(bytes) => bytes.len(),
            RlpItem::List(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RlpItem::Bytes(bytes) => Some(bytes),
            RlpItem::List(_) => None,
        }
    }

    /// `None` for lists and for byte strings that are not UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        self.as_bytes().and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Big-endian read; `None` when the string is wider than eight bytes.
    pub fn as_uint(&self) -> Option<u64> {
        self.as_bytes()
            .filter(|bytes| bytes.len() <= 8)
            .and_then(u64::from_be_slice)
    }

    pub fn as_u256(&self) -> Option<U256> {
        self.as_bytes()
            .filter(|bytes| bytes.len() <= 32)
            .and_then(U256::from_be_slice)
    }

    pub fn as_big_uint(&self) -> Option<BigUint> {
        self.as_bytes().map(BigUint::from_bytes_be)
    }

    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            RlpItem::Bytes(_) => None,
            RlpItem::List(items) => Some(items),
        }
    }

    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            RlpItem::Bytes(bytes) => Some(bytes),
            RlpItem::List(_) => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<RlpItem>> {
        match self {
            RlpItem::Bytes(_) => None,
            RlpItem::List(items) => Some(items),
        }
    }
}

impl From<Bytes> for RlpItem {
    fn from(bytes: Bytes) -> Self {
        RlpItem::Bytes(bytes)
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(bytes: Vec<u8>) -> Self {
        RlpItem::from_bytes(bytes)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(bytes: &[u8]) -> Self {
        RlpItem::from_bytes(bytes)
    }
}

impl From<&str> for RlpItem {
    fn from(text: &str) -> Self {
        RlpItem::from_text(text)
    }
}

impl From<String> for RlpItem {
    fn from(text: String) -> Self {
        RlpItem::Bytes(Bytes::from_vec(text.into_bytes()))
    }
}

impl From<u64> for RlpItem {
    fn from(value: u64) -> Self {
        RlpItem::from_uint(value)
    }
}

impl From<U256> for RlpItem {
    fn from(value: U256) -> Self {
        RlpItem::from_u256(value)
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

impl fmt::Display for RlpItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RlpItem::Bytes(bytes) => write!(f, "{}", bytes),
            RlpItem::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}
