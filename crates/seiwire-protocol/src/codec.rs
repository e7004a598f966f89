//! Message Codec Table - per-kind encode/decode over the wire primitives
//!
//! ## Encoding
//!
//! Fields are written in ascending field-number order, each as `tag` +
//! payload, skipping fields whose presence rule is not met. Repeated fields
//! emit one tag/payload pair per element in element order.
//!
//! ## Decoding
//!
//! Start from `Default`, then loop over tags until the reader's end:
//! - known field number: check its wire type, read, assign (append for repeated)
//! - unknown field number: [`Reader::skip_field`]
//!
//! Fields may arrive in any order. A missing field is never an error; only
//! structural faults are. Decoding returns a fully built record or an error,
//! never a partial record.
//!
//! ## Codec pairs
//!
//! [`CodecPair`] type-erases one kind's encode/decode over [`Msg`] so the
//! registry can hold any of them behind a string key.

use crate::error::{DecodeError, DecodeErrorKind, DecodeResult, EncodeError, EncodeResult};
use crate::messages::{
    ExecuteContract, InstantiateContract, Msg, MsgKind, RegisterPointer, StoreCode,
};
use crate::wire::{Reader, WireType, Writer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A protobuf-shaped record with a closed field table.
pub trait ProtoMessage: Sized + Default {
    /// Append every present field in field-number order.
    fn encode_fields(&self, writer: &mut Writer) -> EncodeResult<()>;

    /// Consume the payload of `field` if this record knows it.
    ///
    /// Returns `Ok(false)` for unknown field numbers, leaving the payload
    /// unread so the caller can skip it.
    fn merge_field(
        &mut self,
        field: u32,
        wire_type: WireType,
        reader: &mut Reader<'_>,
    ) -> DecodeResult<bool>;

    fn encode(&self) -> EncodeResult<Vec<u8>> {
        let mut writer = Writer::new();
        self.encode_fields(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Decode a whole buffer.
    fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        Self::decode_from(&mut Reader::new(bytes))
    }

    /// Decode the first `length` bytes of a larger buffer.
    fn decode_with_length(bytes: &[u8], length: usize) -> DecodeResult<Self> {
        Self::decode_from(&mut Reader::with_limit(bytes, length)?)
    }

    /// Decode until the reader's end.
    fn decode_from(reader: &mut Reader<'_>) -> DecodeResult<Self> {
        let mut message = Self::default();
        while reader.has_remaining() {
            let (field, wire_type) = reader.read_tag()?;
            if !message.merge_field(field, wire_type, reader)? {
                reader.skip_field(wire_type)?;
            }
        }
        Ok(message)
    }
}

/// One of the four transaction message kinds.
pub trait WireMessage: ProtoMessage + Clone + Into<Msg> {
    const KIND: MsgKind;

    /// Borrow the record out of a [`Msg`] if it is this kind.
    fn from_msg(msg: &Msg) -> Option<&Self>;

    /// Fill absent optional fields with their zero values.
    fn with_defaults(self) -> Self;
}

fn read_string_field(
    reader: &mut Reader<'_>,
    field: u32,
    wire_type: WireType,
) -> DecodeResult<String> {
    reader.expect_wire_type(field, WireType::LengthDelimited, wire_type)?;
    Ok(reader.read_string()?.to_owned())
}

fn read_bytes_field(
    reader: &mut Reader<'_>,
    field: u32,
    wire_type: WireType,
) -> DecodeResult<Vec<u8>> {
    reader.expect_wire_type(field, WireType::LengthDelimited, wire_type)?;
    Ok(reader.read_length_delimited()?.to_vec())
}

fn write_string_field(writer: &mut Writer, field: u32, value: &str) -> EncodeResult<()> {
    if !value.is_empty() {
        writer.write_tag(field, WireType::LengthDelimited)?;
        writer.write_string(value);
    }
    Ok(())
}

fn write_bytes_field(writer: &mut Writer, field: u32, value: &[u8]) -> EncodeResult<()> {
    if !value.is_empty() {
        writer.write_tag(field, WireType::LengthDelimited)?;
        writer.write_length_delimited(value);
    }
    Ok(())
}

fn write_repeated_bytes(writer: &mut Writer, field: u32, values: &[Vec<u8>]) -> EncodeResult<()> {
    for value in values {
        writer.write_tag(field, WireType::LengthDelimited)?;
        writer.write_length_delimited(value);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// StoreCode
// ---------------------------------------------------------------------------

impl ProtoMessage for StoreCode {
    fn encode_fields(&self, writer: &mut Writer) -> EncodeResult<()> {
        write_string_field(writer, 1, &self.sender)?;
        write_bytes_field(writer, 2, &self.wasm_byte_code)?;
        if let Some(permission) = &self.instantiate_permission {
            writer.write_tag(5, WireType::LengthDelimited)?;
            writer.write_length_delimited(permission);
        }
        Ok(())
    }

    fn merge_field(
        &mut self,
        field: u32,
        wire_type: WireType,
        reader: &mut Reader<'_>,
    ) -> DecodeResult<bool> {
        match field {
            1 => self.sender = read_string_field(reader, field, wire_type)?,
            2 => self.wasm_byte_code = read_bytes_field(reader, field, wire_type)?,
            5 => self.instantiate_permission = Some(read_bytes_field(reader, field, wire_type)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl WireMessage for StoreCode {
    const KIND: MsgKind = MsgKind::StoreCode;

    fn from_msg(msg: &Msg) -> Option<&Self> {
        match msg {
            Msg::StoreCode(m) => Some(m),
            _ => None,
        }
    }

    // instantiate_permission is a nested message; absent stays absent
    fn with_defaults(self) -> Self {
        self
    }
}

// ---------------------------------------------------------------------------
// InstantiateContract
// ---------------------------------------------------------------------------

/// Wire representation of `InstantiateContract.code_id` (field 3).
///
/// `Varint` is the baseline. `DecimalString` writes the id as a
/// length-delimited UTF-8 decimal, for chains whose schema declares the
/// field that way. Encoder and decoder of one codec always agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeIdEncoding {
    #[default]
    Varint,
    DecimalString,
}

impl InstantiateContract {
    pub fn encode_fields_with(
        &self,
        writer: &mut Writer,
        code_id_encoding: CodeIdEncoding,
    ) -> EncodeResult<()> {
        write_string_field(writer, 1, &self.sender)?;
        write_string_field(writer, 2, &self.admin)?;
        if let Some(code_id) = self.code_id {
            match code_id_encoding {
                CodeIdEncoding::Varint => {
                    writer.write_tag(3, WireType::Varint)?;
                    writer.write_varint(code_id);
                }
                CodeIdEncoding::DecimalString => {
                    writer.write_tag(3, WireType::LengthDelimited)?;
                    writer.write_string(&code_id.to_string());
                }
            }
        }
        write_string_field(writer, 4, &self.label)?;
        write_bytes_field(writer, 5, &self.msg)?;
        write_repeated_bytes(writer, 6, &self.funds)
    }

    pub fn merge_field_with(
        &mut self,
        field: u32,
        wire_type: WireType,
        reader: &mut Reader<'_>,
        code_id_encoding: CodeIdEncoding,
    ) -> DecodeResult<bool> {
        match field {
            1 => self.sender = read_string_field(reader, field, wire_type)?,
            2 => self.admin = read_string_field(reader, field, wire_type)?,
            3 => self.code_id = Some(read_code_id(reader, wire_type, code_id_encoding)?),
            4 => self.label = read_string_field(reader, field, wire_type)?,
            5 => self.msg = read_bytes_field(reader, field, wire_type)?,
            6 => self.funds.push(read_bytes_field(reader, field, wire_type)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn encode_with(&self, code_id_encoding: CodeIdEncoding) -> EncodeResult<Vec<u8>> {
        let mut writer = Writer::new();
        self.encode_fields_with(&mut writer, code_id_encoding)?;
        Ok(writer.into_bytes())
    }

    pub fn decode_with(bytes: &[u8], code_id_encoding: CodeIdEncoding) -> DecodeResult<Self> {
        let mut reader = Reader::new(bytes);
        let mut message = Self::default();
        while reader.has_remaining() {
            let (field, wire_type) = reader.read_tag()?;
            if !message.merge_field_with(field, wire_type, &mut reader, code_id_encoding)? {
                reader.skip_field(wire_type)?;
            }
        }
        Ok(message)
    }
}

fn read_code_id(
    reader: &mut Reader<'_>,
    wire_type: WireType,
    code_id_encoding: CodeIdEncoding,
) -> DecodeResult<u64> {
    match code_id_encoding {
        CodeIdEncoding::Varint => {
            reader.expect_wire_type(3, WireType::Varint, wire_type)?;
            reader.read_varint()
        }
        CodeIdEncoding::DecimalString => {
            reader.expect_wire_type(3, WireType::LengthDelimited, wire_type)?;
            let text = reader.read_string()?;
            let start = reader.position() - text.len();
            // u64::from_str accepts a leading '+'; the wire form never has one
            if text.starts_with('+') {
                return Err(DecodeError::new(
                    start,
                    DecodeErrorKind::InvalidDecimal(text.to_owned()),
                ));
            }
            text.parse::<u64>().map_err(|_| {
                DecodeError::new(start, DecodeErrorKind::InvalidDecimal(text.to_owned()))
            })
        }
    }
}

impl ProtoMessage for InstantiateContract {
    fn encode_fields(&self, writer: &mut Writer) -> EncodeResult<()> {
        self.encode_fields_with(writer, CodeIdEncoding::Varint)
    }

    fn merge_field(
        &mut self,
        field: u32,
        wire_type: WireType,
        reader: &mut Reader<'_>,
    ) -> DecodeResult<bool> {
        self.merge_field_with(field, wire_type, reader, CodeIdEncoding::Varint)
    }
}

impl WireMessage for InstantiateContract {
    const KIND: MsgKind = MsgKind::InstantiateContract;

    fn from_msg(msg: &Msg) -> Option<&Self> {
        match msg {
            Msg::InstantiateContract(m) => Some(m),
            _ => None,
        }
    }

    fn with_defaults(mut self) -> Self {
        self.code_id.get_or_insert(0);
        self
    }
}

// ---------------------------------------------------------------------------
// ExecuteContract
// ---------------------------------------------------------------------------

impl ProtoMessage for ExecuteContract {
    fn encode_fields(&self, writer: &mut Writer) -> EncodeResult<()> {
        write_string_field(writer, 1, &self.sender)?;
        write_string_field(writer, 2, &self.contract)?;
        write_bytes_field(writer, 3, &self.msg)?;
        write_repeated_bytes(writer, 4, &self.funds)
    }

    fn merge_field(
        &mut self,
        field: u32,
        wire_type: WireType,
        reader: &mut Reader<'_>,
    ) -> DecodeResult<bool> {
        match field {
            1 => self.sender = read_string_field(reader, field, wire_type)?,
            2 => self.contract = read_string_field(reader, field, wire_type)?,
            3 => self.msg = read_bytes_field(reader, field, wire_type)?,
            4 => self.funds.push(read_bytes_field(reader, field, wire_type)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl WireMessage for ExecuteContract {
    const KIND: MsgKind = MsgKind::ExecuteContract;

    fn from_msg(msg: &Msg) -> Option<&Self> {
        match msg {
            Msg::ExecuteContract(m) => Some(m),
            _ => None,
        }
    }

    fn with_defaults(self) -> Self {
        self
    }
}

// ---------------------------------------------------------------------------
// RegisterPointer
// ---------------------------------------------------------------------------

impl ProtoMessage for RegisterPointer {
    fn encode_fields(&self, writer: &mut Writer) -> EncodeResult<()> {
        write_string_field(writer, 1, &self.sender)?;
        if let Some(pointer_type) = self.pointer_type {
            writer.write_tag(2, WireType::Varint)?;
            writer.write_varint(pointer_type as u64);
        }
        write_string_field(writer, 3, &self.erc_address)
    }

    fn merge_field(
        &mut self,
        field: u32,
        wire_type: WireType,
        reader: &mut Reader<'_>,
    ) -> DecodeResult<bool> {
        match field {
            1 => self.sender = read_string_field(reader, field, wire_type)?,
            2 => {
                reader.expect_wire_type(field, WireType::Varint, wire_type)?;
                self.pointer_type = Some(reader.read_u32(field)?);
            }
            3 => self.erc_address = read_string_field(reader, field, wire_type)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl WireMessage for RegisterPointer {
    const KIND: MsgKind = MsgKind::RegisterPointer;

    fn from_msg(msg: &Msg) -> Option<&Self> {
        match msg {
            Msg::RegisterPointer(m) => Some(m),
            _ => None,
        }
    }

    fn with_defaults(mut self) -> Self {
        self.pointer_type.get_or_insert(0);
        self
    }
}

// ---------------------------------------------------------------------------
// Codec pairs
// ---------------------------------------------------------------------------

pub type EncodeFn = fn(&Msg) -> EncodeResult<Vec<u8>>;
pub type DecodeFn = fn(&[u8]) -> DecodeResult<Msg>;

/// The (encode, decode) pair registered for one identifier.
///
/// Identity is the `name`: two pairs with the same name are the same codec.
#[derive(Clone, Copy)]
pub struct CodecPair {
    name: &'static str,
    kind: MsgKind,
    encode: EncodeFn,
    decode: DecodeFn,
}

impl CodecPair {
    pub const fn new(
        name: &'static str,
        kind: MsgKind,
        encode: EncodeFn,
        decode: DecodeFn,
    ) -> Self {
        Self {
            name,
            kind,
            encode,
            decode,
        }
    }

    /// Codec pair backed by `M`'s [`ProtoMessage`] implementation.
    pub const fn of<M: WireMessage>(name: &'static str) -> Self {
        Self::new(name, M::KIND, encode_erased::<M>, decode_erased::<M>)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> MsgKind {
        self.kind
    }

    pub fn encode(&self, msg: &Msg) -> EncodeResult<Vec<u8>> {
        (self.encode)(msg)
    }

    pub fn decode(&self, bytes: &[u8]) -> DecodeResult<Msg> {
        (self.decode)(bytes)
    }

    /// Decode only the first `length` bytes of `bytes`.
    pub fn decode_with_length(&self, bytes: &[u8], length: usize) -> DecodeResult<Msg> {
        let limit = Reader::with_limit(bytes, length)?.end();
        (self.decode)(&bytes[..limit])
    }
}

impl PartialEq for CodecPair {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}

impl Eq for CodecPair {}

impl fmt::Debug for CodecPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecPair")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

fn kind_mismatch(expected: MsgKind, msg: &Msg) -> EncodeError {
    EncodeError::KindMismatch {
        expected,
        got: msg.kind(),
    }
}

fn encode_erased<M: WireMessage>(msg: &Msg) -> EncodeResult<Vec<u8>> {
    M::from_msg(msg)
        .ok_or_else(|| kind_mismatch(M::KIND, msg))?
        .encode()
}

fn decode_erased<M: WireMessage>(bytes: &[u8]) -> DecodeResult<Msg> {
    M::decode(bytes).map(Into::into)
}

fn encode_instantiate_decimal(msg: &Msg) -> EncodeResult<Vec<u8>> {
    InstantiateContract::from_msg(msg)
        .ok_or_else(|| kind_mismatch(MsgKind::InstantiateContract, msg))?
        .encode_with(CodeIdEncoding::DecimalString)
}

fn decode_instantiate_decimal(bytes: &[u8]) -> DecodeResult<Msg> {
    InstantiateContract::decode_with(bytes, CodeIdEncoding::DecimalString).map(Into::into)
}

pub const STORE_CODE: CodecPair = CodecPair::of::<StoreCode>("store-code");
pub const INSTANTIATE_CONTRACT: CodecPair =
    CodecPair::of::<InstantiateContract>("instantiate-contract");
pub const INSTANTIATE_CONTRACT_DECIMAL_CODE_ID: CodecPair = CodecPair::new(
    "instantiate-contract-decimal-code-id",
    MsgKind::InstantiateContract,
    encode_instantiate_decimal,
    decode_instantiate_decimal,
);
pub const EXECUTE_CONTRACT: CodecPair = CodecPair::of::<ExecuteContract>("execute-contract");
pub const REGISTER_POINTER: CodecPair = CodecPair::of::<RegisterPointer>("register-pointer");

/// Every codec pair this crate ships.
pub const BUILTIN_CODECS: [CodecPair; 5] = [
    STORE_CODE,
    INSTANTIATE_CONTRACT,
    INSTANTIATE_CONTRACT_DECIMAL_CODE_ID,
    EXECUTE_CONTRACT,
    REGISTER_POINTER,
];

pub fn codec_by_name(name: &str) -> Option<CodecPair> {
    BUILTIN_CODECS.into_iter().find(|codec| codec.name == name)
}

/// Default codec for a kind, honoring the `code_id` representation choice.
pub fn codec_for_kind(kind: MsgKind, code_id_encoding: CodeIdEncoding) -> CodecPair {
    match (kind, code_id_encoding) {
        (MsgKind::StoreCode, _) => STORE_CODE,
        (MsgKind::InstantiateContract, CodeIdEncoding::Varint) => INSTANTIATE_CONTRACT,
        (MsgKind::InstantiateContract, CodeIdEncoding::DecimalString) => {
            INSTANTIATE_CONTRACT_DECIMAL_CODE_ID
        }
        (MsgKind::ExecuteContract, _) => EXECUTE_CONTRACT,
        (MsgKind::RegisterPointer, _) => REGISTER_POINTER,
    }
}
