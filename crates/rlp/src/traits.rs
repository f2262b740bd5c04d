use crate::{Decoder, DecoderConfig, Encoder, RlpError, RlpItem, ValueError};
use num_bigint::BigUint;
use web3_types::{Address, BlockTag, Bytes, H256, U256};

pub trait Encode {
    fn encode(&self, encoder: &mut Encoder);

    /// Lifts the value into an item tree. Fails only if the implementation
    /// writes something other than exactly one item.
    fn to_item(&self) -> Result<RlpItem, RlpError> {
        let mut encoder = Encoder::new();
        self.encode(&mut encoder);
        let config = DecoderConfig {
            strict: true,
            max_depth: usize::MAX,
        };
        crate::decode_item_with(&encoder.finish(), &config)
    }
}

pub trait Decode: Sized {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError>;

    /// Reads the value back out of an item tree.
    fn from_item(item: &RlpItem) -> Result<Self, RlpError> {
        let encoded = crate::encode_item(item);
        let mut decoder = Decoder::new(&encoded);
        Self::decode(&mut decoder)
    }
}

macro_rules! impl_uint {
    ($($ty:ty => $encode:ident, $decode:ident);* $(;)?) => {
        $(
            impl Encode for $ty {
                fn encode(&self, encoder: &mut Encoder) {
                    encoder.$encode(*self);
                }
            }

            impl Decode for $ty {
                fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
                    decoder.$decode()
                }
            }
        )*
    };
}

impl_uint! {
    u16 => encode_u16, decode_u16;
    u32 => encode_u32, decode_u32;
    u64 => encode_u64, decode_u64;
    bool => encode_bool, decode_bool;
}

impl Encode for &[u8] {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self);
    }
}

impl Encode for Vec<u8> {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self);
    }
}

impl Decode for Vec<u8> {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        decoder.decode_bytes()
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self);
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        let bytes = decoder.decode_bytes()?;
        bytes.try_into().map_err(|bytes: Vec<u8>| {
            ValueError::InvalidLength {
                expected: N,
                actual: bytes.len(),
            }
            .into()
        })
    }
}

impl Encode for &str {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self.as_bytes());
    }
}

impl Encode for String {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self.as_bytes());
    }
}

impl Decode for String {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        let bytes = decoder.decode_bytes()?;
        String::from_utf8(bytes).map_err(|_| ValueError::InvalidUtf8.into())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_list(self);
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        decoder.decode_list()
    }
}

/// `None` is written as the empty string, as for a contract-creation `to`.
impl<T: Encode> Encode for Option<T> {
    fn encode(&self, encoder: &mut Encoder) {
        match self {
            Some(value) => value.encode(encoder),
            None => encoder.encode_bytes(&[]),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        if decoder.is_empty_string()? {
            decoder.decode_bytes()?;
            Ok(None)
        } else {
            Ok(Some(T::decode(decoder)?))
        }
    }
}

impl Encode for RlpItem {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_item(self);
    }

    fn to_item(&self) -> Result<RlpItem, RlpError> {
        Ok(self.clone())
    }
}

impl Decode for RlpItem {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        decoder.decode_item()
    }

    fn from_item(item: &RlpItem) -> Result<Self, RlpError> {
        Ok(item.clone())
    }
}

impl Encode for Bytes {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self.as_slice());
    }
}

impl Decode for Bytes {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        Ok(Bytes::from_vec(decoder.decode_bytes()?))
    }
}

impl Encode for Address {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self.as_bytes());
    }
}

impl Decode for Address {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        let bytes = decoder.decode_bytes()?;
        Address::from_slice(&bytes).map_err(|_| {
            ValueError::InvalidLength {
                expected: 20,
                actual: bytes.len(),
            }
            .into()
        })
    }
}

impl Encode for H256 {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self.as_bytes());
    }
}

impl Decode for H256 {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        let bytes: [u8; 32] = Decode::decode(decoder)?;
        Ok(H256::from(bytes))
    }
}

impl Encode for U256 {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_u256(self);
    }
}

impl Decode for U256 {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        decoder.decode_u256()
    }
}

impl Encode for BigUint {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_big_uint(self);
    }
}

impl Decode for BigUint {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        decoder.decode_big_uint()
    }
}

/// Block numbers are written as integers. Named tags are written as a
/// one-element list holding the name, a form no integer can take.
impl Encode for BlockTag {
    fn encode(&self, encoder: &mut Encoder) {
        match (self.number(), self.name()) {
            (Some(number), _) => encoder.encode_u64(number),
            (None, Some(name)) => encoder.encode_list(&[name]),
            (None, None) => encoder.encode_list::<&str>(&[]),
        }
    }
}

impl Decode for BlockTag {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        if !decoder.is_list()? {
            return decoder.decode_u64().map(BlockTag::Number);
        }

        let names: Vec<String> = decoder.decode_list()?;
        match names.as_slice() {
            [name] => match name.as_str() {
                "latest" => Ok(BlockTag::Latest),
                "earliest" => Ok(BlockTag::Earliest),
                "pending" => Ok(BlockTag::Pending),
                other => Err(ValueError::InvalidValue(format!("unknown block tag: {}", other)).into()),
            },
            _ => Err(ValueError::InvalidLength {
                expected: 1,
                actual: names.len(),
            }
            .into()),
        }
    }
}
