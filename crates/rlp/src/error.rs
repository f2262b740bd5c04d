use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RlpError {
    #[error("Decoder error: {0}")]
    Decoder(#[from] DecoderError),

    #[error("Value error: {0}")]
    Value(#[from] ValueError),
}

/// Structural failures while reading RLP bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecoderError {
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    #[error("Truncated input: expected {expected} bytes, {available} available")]
    TruncatedInput { expected: usize, available: usize },

    #[error("Non-canonical encoding: {0}")]
    NonCanonicalEncoding(&'static str),

    #[error("Declared length does not fit in memory")]
    LengthOverflow,

    #[error("List length mismatch: expected {expected}, got {actual}")]
    ListLengthMismatch { expected: usize, actual: usize },

    #[error("Nesting depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),

    #[error("{0} trailing bytes after item")]
    TrailingBytes(usize),
}

/// Failures converting a well-formed item into a typed value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Type mismatch: expected {expected}")]
    TypeMismatch { expected: &'static str },

    #[error("Integer overflow")]
    IntegerOverflow,

    #[error("Leading zeros in integer")]
    LeadingZeros,

    #[error("Invalid UTF-8 string")]
    InvalidUtf8,

    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
