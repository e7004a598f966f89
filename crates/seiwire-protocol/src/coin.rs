//! `cosmos.base.v1beta1.Coin`, the element type of `funds`.

use crate::codec::ProtoMessage;
use crate::error::{DecodeResult, EncodeResult};
use crate::wire::{Reader, WireType, Writer};
use serde::{Deserialize, Serialize};

/// A denomination and an amount. `amount` is a decimal integer string
/// (Cosmos `Int`), which is how it travels on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.to_string(),
        }
    }
}

impl ProtoMessage for Coin {
    fn encode_fields(&self, writer: &mut Writer) -> EncodeResult<()> {
        if !self.denom.is_empty() {
            writer.write_tag(1, WireType::LengthDelimited)?;
            writer.write_string(&self.denom);
        }
        if !self.amount.is_empty() {
            writer.write_tag(2, WireType::LengthDelimited)?;
            writer.write_string(&self.amount);
        }
        Ok(())
    }

    fn merge_field(
        &mut self,
        field: u32,
        wire_type: WireType,
        reader: &mut Reader<'_>,
    ) -> DecodeResult<bool> {
        let slot = match field {
            1 => &mut self.denom,
            2 => &mut self.amount,
            _ => return Ok(false),
        };
        reader.expect_wire_type(field, WireType::LengthDelimited, wire_type)?;
        *slot = reader.read_string()?.to_owned();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_wire_bytes() {
        let coin = Coin::new(1_000_000, "usei");
        let bytes = coin.encode().unwrap();

        let mut expected = vec![0x0A, 4];
        expected.extend_from_slice(b"usei");
        expected.extend_from_slice(&[0x12, 7]);
        expected.extend_from_slice(b"1000000");
        assert_eq!(bytes, expected);

        assert_eq!(Coin::decode(&bytes).unwrap(), coin);
    }

    #[test]
    fn test_coin_amount_beyond_u64() {
        let coin = Coin::new(u128::MAX, "wei");
        let decoded = Coin::decode(&coin.encode().unwrap()).unwrap();
        assert_eq!(decoded.amount, u128::MAX.to_string());
    }
}
