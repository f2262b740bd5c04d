pub mod decode;
pub mod encode;
pub mod error;
pub mod item;
pub mod traits;

pub use decode::{
    decode_all, decode_all_with, decode_at, decode_at_with, decode_item, decode_item_with,
    Decoder, DecoderConfig, Header, DEFAULT_MAX_DEPTH,
};
pub use encode::{encoded_len, length_of_length, Encoder, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
pub use error::{DecoderError, RlpError, ValueError};
pub use item::RlpItem;
pub use traits::{Decode, Encode};

use web3_types::Bytes;

pub fn encode<T: Encode>(value: &T) -> Bytes {
    let mut encoder = Encoder::new();
    value.encode(&mut encoder);
    Bytes::from_vec(encoder.finish())
}

/// Canonical encoding of an item tree.
pub fn encode_item(item: &RlpItem) -> Bytes {
    let mut encoder = Encoder::with_capacity(encoded_len(item));
    encoder.encode_item(item);
    Bytes::from_vec(encoder.finish())
}

/// Decodes a typed value from a buffer holding exactly that value.
pub fn decode<T: Decode>(data: &[u8]) -> Result<T, RlpError> {
    decode_with(data, &DecoderConfig::default())
}

pub fn decode_with<T: Decode>(data: &[u8], config: &DecoderConfig) -> Result<T, RlpError> {
    let mut decoder = Decoder::new(data).with_config(*config);
    let value = T::decode(&mut decoder)?;
    if !decoder.is_finished() {
        return Err(DecoderError::TrailingBytes(decoder.remaining()).into());
    }
    Ok(value)
}
