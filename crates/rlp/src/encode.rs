use crate::traits::Encode;
use crate::RlpItem;
use bytes::{BufMut, BytesMut};
use num_bigint::BigUint;
use web3_types::{trim_leading_zeros, UintExt, U256};

/// Prefix of a byte string with 0..=55 payload bytes, added to the length.
pub const EMPTY_STRING_CODE: u8 = 0x80;
/// Prefix of a long byte string, added to the length-of-length.
pub const LONG_STRING_OFFSET: u8 = 0xb7;
/// Prefix of a list with 0..=55 payload bytes, added to the length.
pub const EMPTY_LIST_CODE: u8 = 0xc0;
/// Prefix of a long list, added to the length-of-length.
pub const LONG_LIST_OFFSET: u8 = 0xf7;
/// Largest payload that still fits the single-byte prefix.
pub const MAX_SHORT_LENGTH: usize = 55;

#[derive(Debug, Default)]
pub struct Encoder {
    buffer: BytesMut,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            buffer: BytesMut::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Encoder {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        Vec::from(self.buffer)
    }

    pub fn encode_bytes(&mut self, bytes: &[u8]) {
        match bytes {
            [single] if *single < EMPTY_STRING_CODE => self.buffer.put_u8(*single),
            _ => {
                self.put_header(EMPTY_STRING_CODE, LONG_STRING_OFFSET, bytes.len());
                self.buffer.extend_from_slice(bytes);
            }
        }
    }

    pub fn encode_list<T: Encode>(&mut self, items: &[T]) {
        let mut list_encoder = Encoder::new();
        for item in items {
            item.encode(&mut list_encoder);
        }
        self.append_list_payload(&list_encoder.buffer);
    }

    pub fn encode_item(&mut self, item: &RlpItem) {
        let mut payload_lens = Vec::new();
        let total = list_payload_lens(item, &mut payload_lens);
        self.buffer.reserve(total);
        self.encode_item_with(item, &mut payload_lens.into_iter());
    }

    /// Writes `item` taking each list's payload length, in pre-order, from
    /// `payload_lens`.
    fn encode_item_with(
        &mut self,
        item: &RlpItem,
        payload_lens: &mut impl Iterator<Item = usize>,
    ) {
        match item {
            RlpItem::Bytes(bytes) => self.encode_bytes(bytes),
            RlpItem::List(items) => {
                let payload_len = payload_lens.next().unwrap_or_default();
                self.put_header(EMPTY_LIST_CODE, LONG_LIST_OFFSET, payload_len);
                for child in items {
                    self.encode_item_with(child, payload_lens);
                }
            }
        }
    }

    /// Wraps an already encoded sequence of items as a list.
    pub fn append_list_payload(&mut self, payload: &[u8]) {
        self.put_header(EMPTY_LIST_CODE, LONG_LIST_OFFSET, payload.len());
        self.buffer.extend_from_slice(payload);
    }

    /// Appends bytes that are already RLP, such as a cached child encoding.
    pub fn append_raw(&mut self, encoded: &[u8]) {
        self.buffer.extend_from_slice(encoded);
    }

    pub fn encode_u8(&mut self, value: u8) {
        self.encode_u64(value as u64);
    }

    pub fn encode_u16(&mut self, value: u16) {
        self.encode_u64(value as u64);
    }

    pub fn encode_u32(&mut self, value: u32) {
        self.encode_u64(value as u64);
    }

    pub fn encode_u64(&mut self, value: u64) {
        let bytes = value.to_be_bytes();
        self.encode_bytes(trim_leading_zeros(&bytes));
    }

    pub fn encode_u256(&mut self, value: &U256) {
        self.encode_bytes(&value.to_minimal_be_bytes());
    }

    pub fn encode_big_uint(&mut self, value: &BigUint) {
        let bytes = value.to_bytes_be();
        self.encode_bytes(trim_leading_zeros(&bytes));
    }

    pub fn encode_bool(&mut self, value: bool) {
        self.encode_u8(if value { 1 } else { 0 });
    }

    fn put_header(&mut self, short_base: u8, long_base: u8, payload_len: usize) {
        if payload_len <= MAX_SHORT_LENGTH {
            self.buffer.put_u8(short_base + payload_len as u8);
        } else {
            let len_bytes = payload_len.to_be_bytes();
            let len_bytes = trim_leading_zeros(&len_bytes);
            self.buffer.put_u8(long_base + len_bytes.len() as u8);
            self.buffer.extend_from_slice(len_bytes);
        }
    }
}

/// Number of bytes in the minimal big-endian form of `len`.
pub fn length_of_length(len: usize) -> usize {
    let bits = (usize::BITS - len.leading_zeros()) as usize;
    (bits + 7) / 8
}

/// Size of the header that precedes a payload of `payload_len` bytes.
pub fn header_len(payload_len: usize) -> usize {
    if payload_len <= MAX_SHORT_LENGTH {
        1
    } else {
        1 + length_of_length(payload_len)
    }
}

/// Exact size of `encode_item(item)`, computed without allocating.
pub fn encoded_len(item: &RlpItem) -> usize {
    match item {
        RlpItem::Bytes(bytes) => bytes_encoded_len(bytes),
        RlpItem::List(items) => {
            let payload_len: usize = items.iter().map(encoded_len).sum();
            header_len(payload_len) + payload_len
        }
    }
}

fn bytes_encoded_len(bytes: &[u8]) -> usize {
    match bytes {
        [single] if *single < EMPTY_STRING_CODE => 1,
        _ => header_len(bytes.len()) + bytes.len(),
    }
}

/// Records the payload length of every list in `item` in pre-order and
/// returns the encoded length of `item`. Each node is visited once.
fn list_payload_lens(item: &RlpItem, payload_lens: &mut Vec<usize>) -> usize {
    match item {
        RlpItem::Bytes(bytes) => bytes_encoded_len(bytes),
        RlpItem::List(items) => {
            let slot = payload_lens.len();
            payload_lens.push(0);
            let payload_len: usize = items
                .iter()
                .map(|child| list_payload_lens(child, payload_lens))
                .sum();
            payload_lens[slot] = payload_len;
            header_len(payload_len) + payload_len
        }
    }
}
