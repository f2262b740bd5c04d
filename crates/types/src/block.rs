use crate::{Result, TypesError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Block selector passed alongside RPC calls: a named tag or a block number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockTag {
    #[default]
    Latest,
    Earliest,
    Pending,
    Number(u64),
}

impl BlockTag {
    pub fn number(&self) -> Option<u64> {
        match self {
            BlockTag::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        match self {
            BlockTag::Latest => Some("latest"),
            BlockTag::Earliest => Some("earliest"),
            BlockTag::Pending => Some("pending"),
            BlockTag::Number(_) => None,
        }
    }
}

impl FromStr for BlockTag {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "latest" => Ok(BlockTag::Latest),
            "earliest" => Ok(BlockTag::Earliest),
            "pending" => Ok(BlockTag::Pending),
            _ => {
                let parsed = match s.strip_prefix("0x") {
                    Some(digits) => u64::from_str_radix(digits, 16),
                    None => s.parse::<u64>(),
                };
                parsed
                    .map(BlockTag::Number)
                    .map_err(|_| TypesError::InvalidBlockTag(s.to_string()))
            }
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Number(n) => write!(f, "0x{:x}", n),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        BlockTag::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tag_parse() {
        assert_eq!("latest".parse::<BlockTag>().unwrap(), BlockTag::Latest);
        assert_eq!("earliest".parse::<BlockTag>().unwrap(), BlockTag::Earliest);
        assert_eq!("pending".parse::<BlockTag>().unwrap(), BlockTag::Pending);
        assert_eq!("0x10".parse::<BlockTag>().unwrap(), BlockTag::Number(16));
        assert_eq!("42".parse::<BlockTag>().unwrap(), BlockTag::Number(42));
        assert!("finalised".parse::<BlockTag>().is_err());
    }

    #[test]
    fn test_block_tag_display() {
        assert_eq!(BlockTag::Number(255).to_string(), "0xff");
        assert_eq!(BlockTag::Pending.to_string(), "pending");
        assert_eq!(BlockTag::default().number(), None);
    }

    #[test]
    fn test_block_tag_serde() {
        let json = serde_json::to_string(&BlockTag::Number(1)).unwrap();
        assert_eq!(json, "\"0x1\"");
        let back: BlockTag = serde_json::from_str("\"earliest\"").unwrap();
        assert_eq!(back, BlockTag::Earliest);
    }
}
