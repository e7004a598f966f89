//! # seiwire-protocol
//!
//! Binary codec and type registry for the transaction messages used to
//! deploy and drive CosmWasm contracts on Sei:
//!
//! - `MsgStoreCode`, `MsgInstantiateContract`, `MsgExecuteContract`
//! - `MsgRegisterPointer` (Sei EVM pointer registration)
//!
//! The wire format is the protobuf binary encoding, implemented as an
//! explicit field table per message rather than a general schema engine.
//!
//! ## Layers
//!
//! - [`wire`]: varint, tag and length-delimited primitives
//! - [`codec`]: per-kind encode/decode and the [`CodecPair`] table
//! - [`registry`]: type URL → codec pair, seeded from [`registry::baseline`]
//!
//! ## Example
//!
//! ```
//! use seiwire_protocol::{Msg, PointerType, Registry, RegisterPointer, type_url};
//!
//! let registry = Registry::with_baseline();
//! let msg = Msg::from(RegisterPointer::new("sei1abc", PointerType::Cw721, "0xbeef"));
//!
//! let bytes = registry.encode(type_url::MSG_REGISTER_POINTER, &msg).unwrap();
//! assert_eq!(bytes[0], 0x0A);
//!
//! let decoded = registry.decode(type_url::MSG_REGISTER_POINTER, &bytes).unwrap();
//! assert_eq!(decoded, msg);
//! ```

pub mod any;
mod b64;
pub mod codec;
pub mod coin;
pub mod error;
pub mod messages;
pub mod registry;
pub mod type_url;
pub mod wire;

pub use any::AnyEnvelope;
pub use codec::{
    codec_by_name, codec_for_kind, CodeIdEncoding, CodecPair, ProtoMessage, WireMessage,
};
pub use coin::Coin;
pub use error::{
    CodecError, DecodeError, DecodeErrorKind, DecodeResult, EncodeError, EncodeResult,
    RegistryError,
};
pub use messages::{
    ExecuteContract, InstantiateContract, Msg, MsgKind, PointerType, RegisterPointer, StoreCode,
};
pub use registry::Registry;
