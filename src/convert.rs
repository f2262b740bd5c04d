//! JSON <-> item conversion used by the command line tool.

use anyhow::{bail, Context, Result};
use serde_json::Value;
use web3_rlp::RlpItem;
use web3_types::decode_hex;

/// Builds an item from a JSON tree.
///
/// Strings starting with `0x` are hex byte strings, other strings are UTF-8
/// text, non-negative integers use the minimal integer form, booleans are
/// 0 or 1 and arrays are lists.
pub fn json_to_item(value: &Value) -> Result<RlpItem> {
    match value {
        Value::String(s) if s.starts_with("0x") => {
            let bytes = decode_hex(s).with_context(|| format!("Invalid hex string {}", s))?;
            Ok(RlpItem::from_bytes(bytes))
        }
        Value::String(s) => Ok(RlpItem::from_text(s)),
        Value::Number(n) => match n.as_u64() {
            Some(n) => Ok(RlpItem::from_uint(n)),
            None => bail!("Only unsigned integers can be encoded, got {}", n),
        },
        Value::Bool(b) => Ok(RlpItem::from_uint(*b as u64)),
        Value::Array(values) => values
            .iter()
            .map(json_to_item)
            .collect::<Result<Vec<_>>>()
            .map(RlpItem::List),
        Value::Null => bail!("null has no RLP representation"),
        Value::Object(_) => bail!("JSON objects have no RLP representation"),
    }
}

/// Reads hex typed on the command line. Whitespace and a `0x` prefix are
/// ignored; an odd number of digits is an error, never padded.
pub fn hex_input(text: &str) -> Result<Vec<u8>> {
    let digits: String = text.split_whitespace().collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(&digits);
    if digits.len() % 2 != 0 {
        bail!("Hex input has an odd number of digits ({})", digits.len());
    }
    hex::decode(digits).context("Input is not valid hex")
}

/// Renders an item as JSON: byte strings as `0x` hex, lists as arrays.
pub fn item_to_json(item: &RlpItem) -> Result<Value> {
    serde_json::to_value(item).context("Failed to serialize item")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_to_item() {
        let item = json_to_item(&json!(["cat", "0x646f67", 1024, [], true])).unwrap();
        assert_eq!(
            item,
            RlpItem::from_items(vec![
                RlpItem::from_text("cat"),
                RlpItem::from_text("dog"),
                RlpItem::from_uint(1024),
                RlpItem::empty_list(),
                RlpItem::from_uint(1),
            ])
        );
    }

    #[test]
    fn test_json_to_item_rejects() {
        assert!(json_to_item(&json!(-1)).is_err());
        assert!(json_to_item(&json!(1.5)).is_err());
        assert!(json_to_item(&json!(null)).is_err());
        assert!(json_to_item(&json!({"a": 1})).is_err());
        assert!(json_to_item(&json!("0xzz")).is_err());
    }

    #[test]
    fn test_hex_input() {
        assert_eq!(hex_input("0xc3 8363 6174\n").unwrap(), vec![0xc3, 0x83, 0x63, 0x61, 0x74]);
        assert_eq!(hex_input("").unwrap(), Vec::<u8>::new());
        assert!(hex_input("0xzz").is_err());
    }

    #[test]
    fn test_hex_input_rejects_odd_length() {
        // a truncated "0x8180" must not become [0x08, 0x18]
        assert!(hex_input("0x818").is_err());
        assert!(hex_input("c 38").is_err());
    }

    #[test]
    fn test_item_to_json() {
        let item = RlpItem::from_items(vec![RlpItem::from_uint(0), RlpItem::from_text("cat")]);
        assert_eq!(item_to_json(&item).unwrap(), json!(["0x", "0x636174"]));
    }
}
