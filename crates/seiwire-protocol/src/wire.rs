//! Wire Primitives - tag/varint/length-delimited building blocks
//!
//! Byte-level encoding compatible with the protobuf binary format, restricted
//! to the two wire types this codec emits:
//!
//! ```text
//! field = tag payload
//! tag   = varint((field_number << 3) | wire_type)
//!
//! wire_type 0 (varint):           payload = varint
//! wire_type 2 (length-delimited): payload = varint(len) bytes[len]
//! ```
//!
//! Varints carry 7 bits per byte, least-significant group first, with the
//! high bit set on every byte except the last.
//!
//! Nothing here knows about message shapes. [`Writer`] appends to an owned
//! buffer; [`Reader`] is a cursor over a borrowed slice and reports every
//! fault with the absolute offset inside that slice.

use crate::error::{DecodeError, DecodeErrorKind, DecodeResult, EncodeError, EncodeResult};

/// Longest possible varint for a 64-bit value
pub const MAX_VARINT_LEN: usize = 10;

/// Largest field number a tag can carry (29 bits)
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Protobuf wire types.
///
/// Only `Varint` and `LengthDelimited` are ever written or skipped; the rest
/// exist so a tag carrying them can be recognized and rejected precisely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    /// Map the low 3 bits of a tag to a wire type. 6 and 7 are undefined.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            3 => Some(WireType::StartGroup),
            4 => Some(WireType::EndGroup),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// Append `value` as a varint.
#[inline]
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    while value >= 0x80 {
        buf.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Number of bytes `encode_varint` would write for `value`.
#[inline]
pub fn encoded_len_varint(value: u64) -> usize {
    // 1 byte per started 7-bit group, minimum one byte for zero
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Growable output buffer for one encoded message.
///
/// Mirrors the write side of the wire format: each method appends exactly
/// one primitive, so an encoder is a sequence of `tag` + payload calls.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn write_varint(&mut self, value: u64) {
        encode_varint(value, &mut self.buf);
    }

    /// Write `varint((field_number << 3) | wire_type)`.
    #[inline]
    pub fn write_tag(&mut self, field_number: u32, wire_type: WireType) -> EncodeResult<()> {
        if field_number == 0 || field_number > MAX_FIELD_NUMBER {
            return Err(EncodeError::InvalidFieldNumber(field_number));
        }
        self.write_varint(((field_number as u64) << 3) | wire_type.bits() as u64);
        Ok(())
    }

    /// Write `varint(len)` followed by the bytes.
    #[inline]
    pub fn write_length_delimited(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    /// UTF-8 is guaranteed by `&str`, so this is a length-delimited write.
    #[inline]
    pub fn write_string(&mut self, s: &str) {
        self.write_length_delimited(s.as_bytes());
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over an encoded buffer.
///
/// `end` bounds every read, so a reader created with [`Reader::with_limit`]
/// never reads past the declared length even if the slice continues.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Reader<'a> {
    /// Read the whole slice.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            end: buf.len(),
        }
    }

    /// Read only the first `length` bytes of the slice.
    pub fn with_limit(buf: &'a [u8], length: usize) -> DecodeResult<Self> {
        if length > buf.len() {
            return Err(DecodeError::new(
                0,
                DecodeErrorKind::LengthExceedsBuffer {
                    need: length as u64,
                    available: buf.len(),
                },
            ));
        }
        Ok(Self {
            buf,
            pos: 0,
            end: length,
        })
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.pos < self.end
    }

    /// Read one varint (at most 10 bytes, value must fit in 64 bits).
    pub fn read_varint(&mut self) -> DecodeResult<u64> {
        let start = self.pos;
        let mut value: u64 = 0;

        for i in 0..MAX_VARINT_LEN {
            let offset = start + i;
            if offset >= self.end {
                return Err(DecodeError::new(start, DecodeErrorKind::TruncatedVarint));
            }
            let byte = self.buf[offset];

            // The 10th group holds bit 63 only
            if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
                return Err(DecodeError::new(start, DecodeErrorKind::VarintOverflow));
            }

            value |= ((byte & 0x7F) as u64) << (7 * i);
            if byte & 0x80 == 0 {
                self.pos = offset + 1;
                return Ok(value);
            }
        }

        Err(DecodeError::new(start, DecodeErrorKind::VarintOverflow))
    }

    /// Read a tag and split it into field number and wire type.
    pub fn read_tag(&mut self) -> DecodeResult<(u32, WireType)> {
        let start = self.pos;
        let key = self.read_varint()?;

        let bits = (key & 0x07) as u8;
        let wire_type = WireType::from_bits(bits)
            .ok_or_else(|| DecodeError::new(start, DecodeErrorKind::UnsupportedWireType(bits)))?;

        let field_number = key >> 3;
        if field_number == 0 || field_number > MAX_FIELD_NUMBER as u64 {
            return Err(DecodeError::new(
                start,
                DecodeErrorKind::InvalidFieldNumber(field_number),
            ));
        }

        Ok((field_number as u32, wire_type))
    }

    /// Read a varint length, then borrow that many bytes.
    pub fn read_length_delimited(&mut self) -> DecodeResult<&'a [u8]> {
        let len = self.read_varint()?;
        let start = self.pos;
        let available = self.remaining();

        let len = match usize::try_from(len) {
            Ok(len) if len <= available => len,
            _ => {
                return Err(DecodeError::new(
                    start,
                    DecodeErrorKind::LengthExceedsBuffer {
                        need: len,
                        available,
                    },
                ))
            }
        };

        self.pos += len;
        Ok(&self.buf[start..start + len])
    }

    pub fn read_string(&mut self) -> DecodeResult<&'a str> {
        let bytes = self.read_length_delimited()?;
        let start = self.pos - bytes.len();
        std::str::from_utf8(bytes)
            .map_err(|e| DecodeError::new(start + e.valid_up_to(), DecodeErrorKind::InvalidUtf8))
    }

    /// Read a varint that must fit in 32 bits.
    pub fn read_u32(&mut self, field: u32) -> DecodeResult<u32> {
        let start = self.pos;
        let value = self.read_varint()?;
        u32::try_from(value).map_err(|_| {
            DecodeError::new(start, DecodeErrorKind::IntegerOutOfRange { field, value })
        })
    }

    /// Advance past one value of `wire_type` without interpreting it.
    pub fn skip_field(&mut self, wire_type: WireType) -> DecodeResult<()> {
        match wire_type {
            WireType::Varint => self.read_varint().map(|_| ()),
            WireType::LengthDelimited => self.read_length_delimited().map(|_| ()),
            other => Err(DecodeError::new(
                self.pos,
                DecodeErrorKind::UnsupportedWireType(other.bits()),
            )),
        }
    }

    /// Fail unless a known field arrived with the wire type its schema declares.
    pub fn expect_wire_type(
        &self,
        field: u32,
        expected: WireType,
        got: WireType,
    ) -> DecodeResult<()> {
        if expected == got {
            return Ok(());
        }
        Err(DecodeError::new(
            self.pos,
            DecodeErrorKind::WireTypeMismatch {
                field,
                expected: expected.bits(),
                got: got.bits(),
            },
        ))
    }
}
