//! `google.protobuf.Any` - how a transaction body embeds each message
//!
//! ```text
//! Any { type_url = 1 (string), value = 2 (bytes) }
//! ```
//!
//! The registry pairs this envelope with a codec lookup on `type_url`; see
//! [`crate::Registry::encode_any`] and [`crate::Registry::decode_any`].

use crate::codec::ProtoMessage;
use crate::error::{DecodeResult, EncodeResult};
use crate::wire::{Reader, WireType, Writer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnyEnvelope {
    pub type_url: String,
    pub value: Vec<u8>,
}

impl AnyEnvelope {
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }
}

impl ProtoMessage for AnyEnvelope {
    fn encode_fields(&self, writer: &mut Writer) -> EncodeResult<()> {
        if !self.type_url.is_empty() {
            writer.write_tag(1, WireType::LengthDelimited)?;
            writer.write_string(&self.type_url);
        }
        if !self.value.is_empty() {
            writer.write_tag(2, WireType::LengthDelimited)?;
            writer.write_length_delimited(&self.value);
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
            1 => {
                reader.expect_wire_type(field, WireType::LengthDelimited, wire_type)?;
                self.type_url = reader.read_string()?.to_owned();
            }
            2 => {
                reader.expect_wire_type(field, WireType::LengthDelimited, wire_type)?;
                self.value = reader.read_length_delimited()?.to_vec();
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}
