//! Type Registry - message identifier → codec pair
//!
//! A `Registry` is built once, during setup, and then shared read-only:
//!
//! ```
//! use seiwire_protocol::{Registry, codec, type_url};
//! use std::sync::Arc;
//!
//! let mut registry = Registry::with_baseline();
//! registry.register(
//!     type_url::MSG_INSTANTIATE_CONTRACT,
//!     codec::INSTANTIATE_CONTRACT_DECIMAL_CODE_ID,
//! );
//!
//! // Frozen from here on: lookups only
//! let registry = Arc::new(registry);
//! assert!(registry.lookup(type_url::MSG_REGISTER_POINTER).is_ok());
//! ```
//!
//! `register` takes `&mut self`, so once the registry sits behind an `Arc`
//! the borrow checker rules out late registration. Callers that really need
//! it must wrap the registry in their own lock.

use crate::any::AnyEnvelope;
use crate::codec::{
    CodecPair, ProtoMessage, EXECUTE_CONTRACT, INSTANTIATE_CONTRACT, REGISTER_POINTER,
    STORE_CODE,
};
use crate::error::{RegistryError, Result};
use crate::messages::Msg;
use crate::type_url;
use std::collections::HashMap;

/// The identifiers every registry starts from, in insertion order.
pub fn baseline() -> Vec<(String, CodecPair)> {
    vec![
        (type_url::MSG_STORE_CODE.to_string(), STORE_CODE),
        (
            type_url::MSG_INSTANTIATE_CONTRACT.to_string(),
            INSTANTIATE_CONTRACT,
        ),
        (type_url::MSG_EXECUTE_CONTRACT.to_string(), EXECUTE_CONTRACT),
        (type_url::MSG_REGISTER_POINTER.to_string(), REGISTER_POINTER),
    ]
}

/// Maps message identifiers (type URLs) to codec pairs.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    codecs: HashMap<String, CodecPair>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding exactly [`baseline`].
    pub fn with_baseline() -> Self {
        Self::seed(baseline(), Vec::<(String, CodecPair)>::new())
    }

    /// Insert `baseline` in order, then `overrides` in order.
    ///
    /// Overrides always win over baseline entries for the same identifier,
    /// and within each sequence the later entry wins.
    pub fn seed<B, O, K1, K2>(baseline: B, overrides: O) -> Self
    where
        B: IntoIterator<Item = (K1, CodecPair)>,
        O: IntoIterator<Item = (K2, CodecPair)>,
        K1: Into<String>,
        K2: Into<String>,
    {
        let mut registry = Self::new();

        let mut baseline_count = 0usize;
        for (type_url, codec) in baseline {
            registry.register(type_url, codec);
            baseline_count += 1;
        }

        let mut override_count = 0usize;
        for (type_url, codec) in overrides {
            registry.register(type_url, codec);
            override_count += 1;
        }

        tracing::info!(
            baseline = baseline_count,
            overrides = override_count,
            registered = registry.len(),
            "Seeded message registry"
        );

        registry
    }

    /// Insert or replace the mapping for `type_url`. Returns the previous codec.
    pub fn register(&mut self, type_url: impl Into<String>, codec: CodecPair) -> Option<CodecPair> {
        let type_url = type_url.into();
        let previous = self.codecs.insert(type_url.clone(), codec);

        tracing::debug!(
            type_url = %type_url,
            codec = codec.name(),
            replaced = previous.is_some(),
            "Registered message codec"
        );

        previous
    }

    pub fn lookup(&self, type_url: &str) -> std::result::Result<CodecPair, RegistryError> {
        self.codecs
            .get(type_url)
            .copied()
            .ok_or_else(|| RegistryError::UnknownMessageKind {
                type_url: type_url.to_string(),
            })
    }

    pub fn contains(&self, type_url: &str) -> bool {
        self.codecs.contains_key(type_url)
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Registered identifiers, sorted.
    pub fn type_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = self.codecs.keys().map(String::as_str).collect();
        urls.sort_unstable();
        urls
    }

    /// Look up `type_url` and encode `msg` with its codec.
    pub fn encode(&self, type_url: &str, msg: &Msg) -> Result<Vec<u8>> {
        Ok(self.lookup(type_url)?.encode(msg)?)
    }

    /// Look up `type_url` and decode `bytes` with its codec.
    pub fn decode(&self, type_url: &str, bytes: &[u8]) -> Result<Msg> {
        Ok(self.lookup(type_url)?.decode(bytes)?)
    }

    /// Decode only the first `length` bytes of `bytes`.
    pub fn decode_with_length(&self, type_url: &str, bytes: &[u8], length: usize) -> Result<Msg> {
        Ok(self.lookup(type_url)?.decode_with_length(bytes, length)?)
    }

    /// Encode `msg` and wrap it in a `google.protobuf.Any`.
    pub fn encode_any(&self, type_url: &str, msg: &Msg) -> Result<Vec<u8>> {
        let value = self.encode(type_url, msg)?;
        Ok(AnyEnvelope::new(type_url, value).encode()?)
    }

    /// Decode a `google.protobuf.Any` and the message it carries.
    pub fn decode_any(&self, bytes: &[u8]) -> Result<(String, Msg)> {
        let any = AnyEnvelope::decode(bytes)?;
        let msg = self.decode(&any.type_url, &any.value)?;
        Ok((any.type_url, msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::INSTANTIATE_CONTRACT_DECIMAL_CODE_ID;
    use crate::error::CodecError;
    use crate::messages::{
        ExecuteContract, InstantiateContract, MsgKind, PointerType, RegisterPointer,
    };

    #[test]
    fn test_baseline_covers_all_kinds() {
        let registry = Registry::with_baseline();
        assert_eq!(registry.len(), 4);
        for kind in MsgKind::ALL {
            let codec = registry.lookup(kind.type_url()).unwrap();
            assert_eq!(codec.kind(), kind);
        }
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = Registry::with_baseline();
        let err = registry.lookup("/cosmos.bank.v1beta1.MsgSend").unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownMessageKind {
                type_url: "/cosmos.bank.v1beta1.MsgSend".to_string()
            }
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = Registry::with_baseline();
        let previous = registry.register(
            type_url::MSG_INSTANTIATE_CONTRACT,
            INSTANTIATE_CONTRACT_DECIMAL_CODE_ID,
        );
        assert_eq!(previous, Some(INSTANTIATE_CONTRACT));
        assert_eq!(
            registry.lookup(type_url::MSG_INSTANTIATE_CONTRACT).unwrap(),
            INSTANTIATE_CONTRACT_DECIMAL_CODE_ID
        );
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_seed_overrides_win() {
        let registry = Registry::seed(
            [("X", INSTANTIATE_CONTRACT)],
            [("X", INSTANTIATE_CONTRACT_DECIMAL_CODE_ID)],
        );
        assert_eq!(
            registry.lookup("X").unwrap(),
            INSTANTIATE_CONTRACT_DECIMAL_CODE_ID
        );
    }

    #[test]
    fn test_seed_last_override_wins() {
        let registry = Registry::seed(
            [("X", STORE_CODE)],
            [("X", EXECUTE_CONTRACT), ("X", REGISTER_POINTER)],
        );
        assert_eq!(registry.lookup("X").unwrap(), REGISTER_POINTER);
    }

    #[test]
    fn test_type_urls_sorted() {
        let registry = Registry::with_baseline();
        assert_eq!(
            registry.type_urls(),
            vec![
                type_url::MSG_EXECUTE_CONTRACT,
                type_url::MSG_INSTANTIATE_CONTRACT,
                type_url::MSG_STORE_CODE,
                type_url::MSG_REGISTER_POINTER,
            ]
        );
    }

    #[test]
    fn test_encode_decode_by_type_url() {
        let registry = Registry::with_baseline();
        let msg = Msg::ExecuteContract(ExecuteContract::new("sei1s", "sei1c"));

        let bytes = registry.encode(type_url::MSG_EXECUTE_CONTRACT, &msg).unwrap();
        let decoded = registry.decode(type_url::MSG_EXECUTE_CONTRACT, &bytes).unwrap();
        assert_eq!(decoded, msg);

        // Wrong codec for this record
        let err = registry.encode(type_url::MSG_STORE_CODE, &msg).unwrap_err();
        assert!(matches!(err, CodecError::Encode(_)));

        let err = registry.decode("/unknown", &bytes).unwrap_err();
        assert!(matches!(err, CodecError::Registry(_)));
    }

    #[test]
    fn test_any_roundtrip() {
        let registry = Registry::with_baseline();
        let msg = Msg::RegisterPointer(RegisterPointer::new(
            "sei1abc",
            PointerType::Cw721,
            "0x0000000000000000000000000000000000000001",
        ));

        let bytes = registry
            .encode_any(type_url::MSG_REGISTER_POINTER, &msg)
            .unwrap();
        let (url, decoded) = registry.decode_any(&bytes).unwrap();
        assert_eq!(url, type_url::MSG_REGISTER_POINTER);
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_decode_any_unknown_type_url() {
        let registry = Registry::with_baseline();
        let bytes = AnyEnvelope::new("/cosmos.bank.v1beta1.MsgSend", vec![0x0A, 0x00])
            .encode()
            .unwrap();
        let err = registry.decode_any(&bytes).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Registry(RegistryError::UnknownMessageKind { .. })
        ));
    }

    #[test]
    fn test_override_changes_wire_form() {
        let msg = Msg::InstantiateContract(InstantiateContract::new("sei1s", 7, "label"));

        let base = Registry::with_baseline();
        let overridden = Registry::seed(
            baseline(),
            [(
                type_url::MSG_INSTANTIATE_CONTRACT,
                INSTANTIATE_CONTRACT_DECIMAL_CODE_ID,
            )],
        );

        let a = base.encode(type_url::MSG_INSTANTIATE_CONTRACT, &msg).unwrap();
        let b = overridden.encode(type_url::MSG_INSTANTIATE_CONTRACT, &msg).unwrap();
        assert_ne!(a, b);
        assert_eq!(
            overridden.decode(type_url::MSG_INSTANTIATE_CONTRACT, &b).unwrap(),
            msg
        );
    }

    #[test]
    fn test_decode_with_length_through_registry() {
        let registry = Registry::seed(
            baseline(),
            [(
                type_url::MSG_INSTANTIATE_CONTRACT,
                INSTANTIATE_CONTRACT_DECIMAL_CODE_ID,
            )],
        );
        let msg = Msg::InstantiateContract(InstantiateContract::new("sei1s", 42, "label"));
        let mut bytes = registry.encode(type_url::MSG_INSTANTIATE_CONTRACT, &msg).unwrap();
        let len = bytes.len();
        bytes.extend_from_slice(&[0x80, 0x80]);

        assert_eq!(
            registry
                .decode_with_length(type_url::MSG_INSTANTIATE_CONTRACT, &bytes, len)
                .unwrap(),
            msg
        );
        assert!(registry
            .decode(type_url::MSG_INSTANTIATE_CONTRACT, &bytes)
            .is_err());

        let err = registry
            .decode_with_length(type_url::MSG_INSTANTIATE_CONTRACT, &bytes, bytes.len() + 1)
            .unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }
}
