use crate::encode::{
    EMPTY_LIST_CODE, EMPTY_STRING_CODE, LONG_LIST_OFFSET, LONG_STRING_OFFSET, MAX_SHORT_LENGTH,
};
use crate::traits::Decode;
use crate::{DecoderError, RlpError, RlpItem, ValueError};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::trace;
use web3_types::{Bytes, UintExt, U256};

pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Decoding policy.
///
/// Strict mode rejects every input that is not the unique canonical encoding
/// of its value. Permissive mode additionally accepts non-minimal length
/// prefixes, a single byte below `0x80` wrapped in a `0x81` prefix, and
/// integers with leading zero bytes. Truncation, list payload mismatches and
/// the depth limit are enforced in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub strict: bool,
    /// Deepest list nesting accepted before decoding fails.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strict: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecoderConfig {
    pub fn permissive() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }
}

/// A validated item header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub list: bool,
    /// Prefix plus length-of-length bytes; zero for a single byte below `0x80`.
    pub header_len: usize,
    pub payload_len: usize,
}

impl Header {
    pub fn total_len(&self) -> usize {
        self.header_len + self.payload_len
    }
}

pub struct Decoder<'a> {
    data: &'a [u8],
    position: usize,
    depth: usize,
    config: DecoderConfig,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    /// A decoder that starts reading at `offset`.
    pub fn at(data: &'a [u8], offset: usize) -> Self {
        Decoder {
            data,
            position: offset,
            depth: 0,
            config: DecoderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.data.len()
    }

    pub fn is_empty_string(&self) -> Result<bool, RlpError> {
        self.first_byte().map(|prefix| prefix == EMPTY_STRING_CODE)
    }

    pub fn is_list(&self) -> Result<bool, RlpError> {
        self.first_byte().map(|prefix| prefix >= EMPTY_LIST_CODE)
    }

    pub fn decode_item(&mut self) -> Result<RlpItem, RlpError> {
        let header = self.decode_header()?;

        if !header.list {
            let payload = self.read_payload(&header)?;
            return Ok(RlpItem::Bytes(Bytes::from_slice(payload)));
        }

        self.nested(header, |decoder| decoder.decode_item())
            .map(RlpItem::List)
    }

    pub fn decode_bytes(&mut self) -> Result<Vec<u8>, RlpError> {
        let header = self.decode_header()?;
        if header.list {
            return Err(ValueError::TypeMismatch { expected: "byte string" }.into());
        }
        Ok(self.read_payload(&header)?.to_vec())
    }

    pub fn decode_list<T: Decode>(&mut self) -> Result<Vec<T>, RlpError> {
        let header = self.decode_header()?;
        if !header.list {
            return Err(ValueError::TypeMismatch { expected: "list" }.into());
        }
        self.nested(header, T::decode)
    }

    pub fn decode_u8(&mut self) -> Result<u8, RlpError> {
        u8::try_from(self.decode_u64()?).map_err(|_| ValueError::IntegerOverflow.into())
    }

    pub fn decode_u16(&mut self) -> Result<u16, RlpError> {
        u16::try_from(self.decode_u64()?).map_err(|_| ValueError::IntegerOverflow.into())
    }

    pub fn decode_u32(&mut self) -> Result<u32, RlpError> {
        u32::try_from(self.decode_u64()?).map_err(|_| ValueError::IntegerOverflow.into())
    }

    pub fn decode_u64(&mut self) -> Result<u64, RlpError> {
        let bytes = self.decode_integer_bytes(8)?;
        u64::from_be_slice(&bytes).ok_or_else(|| ValueError::IntegerOverflow.into())
    }

    pub fn decode_u256(&mut self) -> Result<U256, RlpError> {
        let bytes = self.decode_integer_bytes(32)?;
        U256::from_be_slice(&bytes).ok_or_else(|| ValueError::IntegerOverflow.into())
    }

    pub fn decode_big_uint(&mut self) -> Result<BigUint, RlpError> {
        let bytes = self.decode_integer_bytes(usize::MAX)?;
        Ok(BigUint::from_bytes_be(&bytes))
    }

    pub fn decode_bool(&mut self) -> Result<bool, RlpError> {
        match self.decode_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ValueError::InvalidValue(format!("boolean out of range: {}", other)).into()),
        }
    }

    /// Reads and validates the header at the current position without
    /// consuming it.
    pub fn peek_header(&self) -> Result<Header, RlpError> {
        let prefix = self.first_byte()?;
        let strict = self.config.strict;

        let header = match prefix {
            0x00..=0x7f => Header {
                list: false,
                header_len: 0,
                payload_len: 1,
            },
            0x80..=0xb7 => {
                let payload_len = (prefix - EMPTY_STRING_CODE) as usize;
                if strict && payload_len == 1 {
                    if let Some(&byte) = self.data.get(self.position + 1) {
                        if byte < EMPTY_STRING_CODE {
                            return Err(DecoderError::NonCanonicalEncoding(
                                "single byte below 0x80 must be encoded as itself",
                            )
                            .into());
                        }
                    }
                }
                Header {
                    list: false,
                    header_len: 1,
                    payload_len,
                }
            }
            0xb8..=0xbf => {
                let len_of_len = (prefix - LONG_STRING_OFFSET) as usize;
                Header {
                    list: false,
                    header_len: 1 + len_of_len,
                    payload_len: self.read_long_length(len_of_len)?,
                }
            }
            0xc0..=0xf7 => Header {
                list: true,
                header_len: 1,
                payload_len: (prefix - EMPTY_LIST_CODE) as usize,
            },
            0xf8..=0xff => {
                let len_of_len = (prefix - LONG_LIST_OFFSET) as usize;
                Header {
                    list: true,
                    header_len: 1 + len_of_len,
                    payload_len: self.read_long_length(len_of_len)?,
                }
            }
        };

        Ok(header)
    }

    /// Consumes the header at the current position and checks that its
    /// payload is present in the buffer.
    pub fn decode_header(&mut self) -> Result<Header, RlpError> {
        let header = self.peek_header()?;
        trace!(
            position = self.position,
            list = header.list,
            payload_len = header.payload_len,
            "rlp header"
        );

        self.position += header.header_len;
        let available = self.remaining();
        if header.payload_len > available {
            return Err(DecoderError::TruncatedInput {
                expected: header.payload_len,
                available,
            }
            .into());
        }

        Ok(header)
    }

    /// Consumes the payload of a byte string header returned by
    /// `decode_header`. A single byte below `0x80` is its own payload.
    pub fn read_payload(&mut self, header: &Header) -> Result<&'a [u8], RlpError> {
        let start = self.position;
        let end = start
            .checked_add(header.payload_len)
            .ok_or(DecoderError::LengthOverflow)?;
        if end > self.data.len() {
            return Err(DecoderError::TruncatedInput {
                expected: header.payload_len,
                available: self.remaining(),
            }
            .into());
        }

        self.position = end;
        Ok(&self.data[start..end])
    }

    /// Decodes list children with `decode_child` until the declared payload
    /// is consumed. A child that runs past the end of the payload fails.
    fn nested<T>(
        &mut self,
        header: Header,
        mut decode_child: impl FnMut(&mut Self) -> Result<T, RlpError>,
    ) -> Result<Vec<T>, RlpError> {
        if self.depth >= self.config.max_depth {
            return Err(DecoderError::DepthLimitExceeded(self.config.max_depth).into());
        }

        let start = self.position;
        let end = start + header.payload_len;

        self.depth += 1;
        let mut items = Vec::new();
        let mut result = Ok(());
        while self.position < end {
            match decode_child(self) {
                Ok(item) => items.push(item),
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
            if self.position > end {
                result = Err(DecoderError::ListLengthMismatch {
                    expected: header.payload_len,
                    actual: self.position - start,
                }
                .into());
                break;
            }
        }
        self.depth -= 1;

        result.map(|_| items)
    }

    fn decode_integer_bytes(&mut self, max_len: usize) -> Result<Vec<u8>, RlpError> {
        let bytes = self.decode_bytes()?;
        if self.config.strict && bytes.first() == Some(&0) {
            return Err(ValueError::LeadingZeros.into());
        }
        let significant = web3_types::trim_leading_zeros(&bytes);
        if significant.len() > max_len {
            return Err(ValueError::IntegerOverflow.into());
        }
        Ok(significant.to_vec())
    }

    fn read_long_length(&self, len_of_len: usize) -> Result<usize, RlpError> {
        let start = self.position + 1;
        let available = self.data.len().saturating_sub(start);
        if len_of_len > available {
            return Err(DecoderError::TruncatedInput {
                expected: len_of_len,
                available,
            }
            .into());
        }

        let len_bytes = &self.data[start..start + len_of_len];
        let len = decode_length(len_bytes, self.config.strict)?;
        if self.config.strict && len <= MAX_SHORT_LENGTH {
            return Err(DecoderError::NonCanonicalEncoding(
                "long form used for a length of 55 or less",
            )
            .into());
        }

        Ok(len)
    }

    fn first_byte(&self) -> Result<u8, RlpError> {
        self.data
            .get(self.position)
            .copied()
            .ok_or_else(|| DecoderError::UnexpectedEnd.into())
    }
}

fn decode_length(bytes: &[u8], strict: bool) -> Result<usize, RlpError> {
    if strict && bytes.first() == Some(&0) {
        return Err(DecoderError::NonCanonicalEncoding("leading zero in length prefix").into());
    }

    let mut len = 0usize;
    for &byte in bytes {
        len = len
            .checked_mul(256)
            .and_then(|l| l.checked_add(byte as usize))
            .ok_or(DecoderError::LengthOverflow)?;
    }

    Ok(len)
}

/// Decodes one item at `offset`, returning it with the offset just past it.
pub fn decode_at(data: &[u8], offset: usize) -> Result<(RlpItem, usize), RlpError> {
    decode_at_with(data, offset, &DecoderConfig::default())
}

pub fn decode_at_with(
    data: &[u8],
    offset: usize,
    config: &DecoderConfig,
) -> Result<(RlpItem, usize), RlpError> {
    let mut decoder = Decoder::at(data, offset).with_config(*config);
    match decoder.decode_item() {
        Ok(item) => Ok((item, decoder.position())),
        Err(e) => {
            tracing::debug!(offset, error = %e, "rejected rlp input");
            Err(e)
        }
    }
}

/// Decodes a buffer holding exactly one item.
pub fn decode_item(data: &[u8]) -> Result<RlpItem, RlpError> {
    decode_item_with(data, &DecoderConfig::default())
}

pub fn decode_item_with(data: &[u8], config: &DecoderConfig) -> Result<RlpItem, RlpError> {
    let (item, end) = decode_at_with(data, 0, config)?;
    if end != data.len() {
        return Err(DecoderError::TrailingBytes(data.len() - end).into());
    }
    Ok(item)
}

/// Decodes a buffer of back-to-back items. An empty buffer yields no items.
pub fn decode_all(data: &[u8]) -> Result<Vec<RlpItem>, RlpError> {
    decode_all_with(data, &DecoderConfig::default())
}

pub fn decode_all_with(data: &[u8], config: &DecoderConfig) -> Result<Vec<RlpItem>, RlpError> {
    let mut items = Vec::new();
    let mut offset = 0;
    while offset < data.len() {
        let (item, next) = decode_at_with(data, offset, config)?;
        items.push(item);
        offset = next;
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict_err(data: &[u8]) -> RlpError {
        decode_item(data).unwrap_err()
    }

    #[test]
    fn test_decode_single_byte() {
        let mut decoder = Decoder::new(&[0x00]);
        assert_eq!(decoder.decode_bytes().unwrap(), vec![0x00]);

        let mut decoder = Decoder::new(&[0x7f]);
        assert_eq!(decoder.decode_bytes().unwrap(), vec![0x7f]);
    }

    #[test]
    fn test_decode_string() {
        let mut decoder = Decoder::new(&[0x83, b'd', b'o', b'g']);
        assert_eq!(decoder.decode_bytes().unwrap(), b"dog");
        assert!(decoder.is_finished());
    }

    #[test]
    fn test_decode_list() {
        let data = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
        let mut decoder = Decoder::new(&data);
        let items: Vec<Vec<u8>> = decoder.decode_list().unwrap();
        assert_eq!(items, vec![b"cat".to_vec(), b"dog".to_vec()]);
    }

    #[test]
    fn test_decode_empty() {
        let mut decoder = Decoder::new(&[0x80]);
        assert_eq!(decoder.decode_bytes().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_empty_list() {
        let mut decoder = Decoder::new(&[0xc0]);
        let items: Vec<Vec<u8>> = decoder.decode_list().unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_decode_item_tree() {
        let data = [0xc7, 0xc0, 0xc1, 0xc0, 0xc3, 0xc0, 0xc1, 0xc0];
        let empty = RlpItem::empty_list();
        let one = RlpItem::from_items(vec![empty.clone()]);
        let two = RlpItem::from_items(vec![empty.clone(), one.clone()]);
        assert_eq!(
            decode_item(&data).unwrap(),
            RlpItem::from_items(vec![empty, one, two])
        );
    }

    #[test]
    fn test_decode_long_string() {
        let mut data = vec![0xb8, 56];
        data.extend_from_slice(&[0u8; 56]);
        assert_eq!(decode_item(&data).unwrap(), RlpItem::from_bytes(vec![0u8; 56]));
    }

    #[test]
    fn test_decode_at_offsets() {
        let data = [0x83, b'c', b'a', b't', 0xc1, 0x01, 0x80];
        let (first, next) = decode_at(&data, 0).unwrap();
        assert_eq!(first, RlpItem::from_text("cat"));
        assert_eq!(next, 4);

        let (second, next) = decode_at(&data, next).unwrap();
        assert_eq!(second, RlpItem::from_items(vec![RlpItem::from_uint(1)]));
        assert_eq!(next, 6);

        let (third, next) = decode_at(&data, next).unwrap();
        assert_eq!(third, RlpItem::from_uint(0));
        assert_eq!(next, data.len());

        assert_eq!(
            decode_at(&data, next).unwrap_err(),
            RlpError::from(DecoderError::UnexpectedEnd)
        );
    }

    #[test]
    fn test_decode_all() {
        let data = [0x01, 0x82, 0x04, 0x00, 0xc0];
        let items = decode_all(&data).unwrap();
        assert_eq!(
            items,
            vec![RlpItem::from_uint(1), RlpItem::from_uint(1024), RlpItem::empty_list()]
        );
        assert!(decode_all(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_reject_empty_input() {
        assert_eq!(strict_err(&[]), RlpError::from(DecoderError::UnexpectedEnd));
    }

    #[test]
    fn test_reject_truncated_string() {
        assert_eq!(
            strict_err(&[0x83, b'd', b'o']),
            RlpError::from(DecoderError::TruncatedInput { expected: 3, available: 2 })
        );
    }

    #[test]
    fn test_reject_truncated_length_prefix() {
        assert_eq!(
            strict_err(&[0xb9, 0x01]),
            RlpError::from(DecoderError::TruncatedInput { expected: 2, available: 1 })
        );
    }

    #[test]
    fn test_reject_truncated_list() {
        assert!(matches!(
            strict_err(&[0xc5, 0x83, b'c', b'a']),
            RlpError::Decoder(DecoderError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_reject_single_byte_with_prefix() {
        assert_eq!(
            strict_err(&[0x81, 0x00]),
            RlpError::from(DecoderError::NonCanonicalEncoding("single byte below 0x80 must be encoded as itself"))
        );
        assert!(decode_item(&[0x81, 0x80]).is_ok());
    }

    #[test]
    fn test_reject_long_form_for_short_length() {
        let mut data = vec![0xb8, 0x03];
        data.extend_from_slice(b"dog");
        assert!(matches!(
            strict_err(&data),
            RlpError::Decoder(DecoderError::NonCanonicalEncoding(_))
        ));

        assert!(matches!(
            strict_err(&[0xf8, 0x00]),
            RlpError::Decoder(DecoderError::NonCanonicalEncoding(_))
        ));
    }

    #[test]
    fn test_reject_leading_zero_length() {
        let mut data = vec![0xb9, 0x00, 0x38];
        data.extend_from_slice(&[0u8; 56]);
        assert_eq!(
            strict_err(&data),
            RlpError::from(DecoderError::NonCanonicalEncoding("leading zero in length prefix"))
        );

        let mut list = vec![0xf9, 0x00, 0x38];
        list.extend_from_slice(&[0x80u8; 56]);
        assert_eq!(
            strict_err(&list),
            RlpError::from(DecoderError::NonCanonicalEncoding("leading zero in length prefix"))
        );
        let item = decode_item_with(&list, &DecoderConfig::permissive()).unwrap();
        assert_eq!(item.len(), 56);
    }

    #[test]
    fn test_reject_list_length_mismatch() {
        // declares 2 payload bytes but the child string needs 4
        let data = [0xc2, 0x83, b'c', b'a', b't'];
        assert_eq!(
            strict_err(&data),
            RlpError::from(DecoderError::ListLengthMismatch { expected: 2, actual: 4 })
        );
    }

    #[test]
    fn test_reject_trailing_bytes() {
        assert_eq!(
            strict_err(&[0x80, 0x80]),
            RlpError::from(DecoderError::TrailingBytes(1))
        );
    }

    #[test]
    fn test_reject_length_overflow() {
        let data = [0xbf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
        assert!(matches!(
            strict_err(&data),
            RlpError::Decoder(DecoderError::TruncatedInput { .. } | DecoderError::LengthOverflow)
        ));
    }

    #[test]
    fn test_permissive_accepts_non_canonical_headers() {
        let config = DecoderConfig::permissive();

        let item = decode_item_with(&[0x81, 0x00], &config).unwrap();
        assert_eq!(item, RlpItem::from_bytes(vec![0x00u8]));

        let item = decode_item_with(&[0xb8, 0x03, b'd', b'o', b'g'], &config).unwrap();
        assert_eq!(item, RlpItem::from_text("dog"));

        let item = decode_item_with(&[0xf8, 0x00], &config).unwrap();
        assert_eq!(item, RlpItem::empty_list());

        let item = decode_item_with(&[0xb9, 0x00, 0x01, 0x7f], &config).unwrap();
        assert_eq!(item, RlpItem::from_bytes(vec![0x7fu8]));
    }

    #[test]
    fn test_permissive_still_rejects_truncation() {
        let config = DecoderConfig::permissive();
        assert!(decode_item_with(&[0x83, b'd'], &config).is_err());
        assert!(decode_item_with(&[0xc2, 0x83, b'c', b'a', b't'], &config).is_err());
    }

    #[test]
    fn test_depth_limit() {
        let config = DecoderConfig {
            strict: true,
            max_depth: 3,
        };
        let three = [0xc2, 0xc1, 0xc0];
        assert!(decode_item_with(&three, &config).is_ok());

        let four = [0xc3, 0xc2, 0xc1, 0xc0];
        assert_eq!(
            decode_item_with(&four, &config).unwrap_err(),
            RlpError::from(DecoderError::DepthLimitExceeded(3))
        );
    }

    #[test]
    fn test_deep_nesting_default_limit() {
        let mut item = RlpItem::empty_list();
        for _ in 0..DEFAULT_MAX_DEPTH {
            item = RlpItem::from_items(vec![item]);
        }
        let data = crate::encode_item(&item);

        assert_eq!(
            decode_item(&data).unwrap_err(),
            RlpError::from(DecoderError::DepthLimitExceeded(DEFAULT_MAX_DEPTH))
        );
    }

    #[test]
    fn test_decode_integers() {
        let mut decoder = Decoder::new(&[0x80, 0x0f, 0x82, 0x04, 0x00]);
        assert_eq!(decoder.decode_u64().unwrap(), 0);
        assert_eq!(decoder.decode_u8().unwrap(), 15);
        assert_eq!(decoder.decode_u16().unwrap(), 1024);
        assert!(decoder.is_finished());

        let mut decoder = Decoder::new(&[0x82, 0x04, 0x00]);
        assert_eq!(decoder.decode_u8().unwrap_err(), RlpError::from(ValueError::IntegerOverflow));
    }

    #[test]
    fn test_integer_leading_zeros() {
        let mut decoder = Decoder::new(&[0x82, 0x00, 0x01]);
        assert_eq!(decoder.decode_u64().unwrap_err(), RlpError::from(ValueError::LeadingZeros));

        let mut decoder = Decoder::new(&[0x00]);
        assert_eq!(decoder.decode_u64().unwrap_err(), RlpError::from(ValueError::LeadingZeros));

        let mut decoder = Decoder::new(&[0x82, 0x00, 0x01]).with_config(DecoderConfig::permissive());
        assert_eq!(decoder.decode_u64().unwrap(), 1);
    }

    #[test]
    fn test_decode_u256() {
        let mut data = vec![0xa0];
        data.extend_from_slice(&[0xff; 32]);
        let mut decoder = Decoder::new(&data);
        assert_eq!(decoder.decode_u256().unwrap(), U256::MAX);

        let mut data = vec![0xa1];
        data.extend_from_slice(&[0xff; 33]);
        let mut decoder = Decoder::new(&data);
        assert_eq!(decoder.decode_u256().unwrap_err(), RlpError::from(ValueError::IntegerOverflow));
    }

    #[test]
    fn test_decode_bool() {
        let mut decoder = Decoder::new(&[0x80, 0x01, 0x02]);
        assert!(!decoder.decode_bool().unwrap());
        assert!(decoder.decode_bool().unwrap());
        assert!(matches!(
            decoder.decode_bool(),
            Err(RlpError::Value(ValueError::InvalidValue(_)))
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let mut decoder = Decoder::new(&[0xc0]);
        assert_eq!(
            decoder.decode_bytes().unwrap_err(),
            RlpError::from(ValueError::TypeMismatch { expected: "byte string" })
        );

        let mut decoder = Decoder::new(&[0x80]);
        assert_eq!(
            decoder.decode_list::<u64>().unwrap_err(),
            RlpError::from(ValueError::TypeMismatch { expected: "list" })
        );
    }

    #[test]
    fn test_peek_header() {
        let decoder = Decoder::new(&[0xf8, 0x50]);
        assert_eq!(
            decoder.peek_header().unwrap(),
            Header { list: true, header_len: 2, payload_len: 80 }
        );
        assert_eq!(decoder.position(), 0);
        assert!(decoder.is_list().unwrap());

        let decoder = Decoder::new(&[0x42]);
        let header = decoder.peek_header().unwrap();
        assert_eq!(header.total_len(), 1);
        assert!(!decoder.is_empty_string().unwrap());
    }
}
