use crate::messages::MsgKind;
use thiserror::Error;

/// Rejections raised while turning an in-memory record into wire bytes.
///
/// These are caller bugs: retrying with the same record fails the same way.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Kind mismatch: codec encodes {expected}, record is {got}")]
    KindMismatch { expected: MsgKind, got: MsgKind },

    #[error("Invalid field number: {0} (must be 1..=536870911)")]
    InvalidFieldNumber(u32),

    #[error("Failed to serialize contract msg as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// What went wrong while reading a byte stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("truncated varint")]
    TruncatedVarint,

    #[error("varint overflow")]
    VarintOverflow,

    #[error("length exceeds buffer: need {need} bytes, {available} remain")]
    LengthExceedsBuffer { need: u64, available: usize },

    #[error("unsupported wire type {0}")]
    UnsupportedWireType(u8),

    #[error("invalid field number {0}")]
    InvalidFieldNumber(u64),

    #[error("wire type mismatch for field {field}: expected {expected}, got {got}")]
    WireTypeMismatch { field: u32, expected: u8, got: u8 },

    #[error("invalid utf-8 in string field")]
    InvalidUtf8,

    #[error("integer out of range for field {field}: {value}")]
    IntegerOutOfRange { field: u32, value: u64 },

    #[error("invalid decimal integer {0:?}")]
    InvalidDecimal(String),
}

/// Malformed input bytes, with the absolute byte offset of the fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at byte offset {offset}")]
pub struct DecodeError {
    pub offset: usize,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(offset: usize, kind: DecodeErrorKind) -> Self {
        Self { offset, kind }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown message kind: {type_url}")]
    UnknownMessageKind { type_url: String },
}

/// Umbrella error for registry-level encode/decode calls.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
pub type Result<T> = std::result::Result<T, CodecError>;
