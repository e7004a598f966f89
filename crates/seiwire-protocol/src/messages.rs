//! Message records - one struct per message kind
//!
//! | Kind                | # | Field                  | Wire             |
//! |---------------------|---|------------------------|------------------|
//! | StoreCode           | 1 | sender                 | string           |
//! |                     | 2 | wasm_byte_code         | bytes            |
//! |                     | 5 | instantiate_permission | bytes (nested)   |
//! | InstantiateContract | 1 | sender                 | string           |
//! |                     | 2 | admin                  | string           |
//! |                     | 3 | code_id                | varint u64       |
//! |                     | 4 | label                  | string           |
//! |                     | 5 | msg                    | bytes            |
//! |                     | 6 | funds                  | repeated bytes   |
//! | ExecuteContract     | 1 | sender                 | string           |
//! |                     | 2 | contract               | string           |
//! |                     | 3 | msg                    | bytes            |
//! |                     | 4 | funds                  | repeated bytes   |
//! | RegisterPointer     | 1 | sender                 | string           |
//! |                     | 2 | pointer_type           | varint u32       |
//! |                     | 3 | erc_address            | string           |
//!
//! Strings and bytes are omitted from the wire when empty. `Option` fields are
//! omitted when `None` and always written when `Some`, zero included. `funds`
//! elements are opaque pre-encoded `Coin` messages kept in caller order.

use crate::b64;
use crate::codec::ProtoMessage;
use crate::coin::Coin;
use crate::error::EncodeResult;
use crate::type_url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `/cosmwasm.wasm.v1.MsgStoreCode`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreCode {
    pub sender: String,
    #[serde(with = "b64")]
    pub wasm_byte_code: Vec<u8>,
    /// Pre-encoded `AccessConfig`
    #[serde(with = "b64::option", skip_serializing_if = "Option::is_none")]
    pub instantiate_permission: Option<Vec<u8>>,
}

/// `/cosmwasm.wasm.v1.MsgInstantiateContract`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstantiateContract {
    pub sender: String,
    pub admin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_id: Option<u64>,
    pub label: String,
    /// JSON-encoded instantiate message
    #[serde(with = "b64")]
    pub msg: Vec<u8>,
    #[serde(with = "b64::seq")]
    pub funds: Vec<Vec<u8>>,
}

/// `/cosmwasm.wasm.v1.MsgExecuteContract`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecuteContract {
    pub sender: String,
    pub contract: String,
    /// JSON-encoded execute message
    #[serde(with = "b64")]
    pub msg: Vec<u8>,
    #[serde(with = "b64::seq")]
    pub funds: Vec<Vec<u8>>,
}

/// `/seiprotocol.seichain.evm.MsgRegisterPointer`
///
/// `pointer_type` stays a raw `u32` so kinds added on-chain later still
/// round-trip; see [`PointerType`] for the known values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterPointer {
    pub sender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_type: Option<u32>,
    pub erc_address: String,
}

impl StoreCode {
    pub fn new(sender: impl Into<String>, wasm_byte_code: Vec<u8>) -> Self {
        Self {
            sender: sender.into(),
            wasm_byte_code,
            instantiate_permission: None,
        }
    }
}

impl InstantiateContract {
    pub fn new(sender: impl Into<String>, code_id: u64, label: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            code_id: Some(code_id),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Serialize `msg` as JSON into the `msg` field.
    pub fn with_json_msg<T: Serialize>(mut self, msg: &T) -> EncodeResult<Self> {
        self.msg = serde_json::to_vec(msg)?;
        Ok(self)
    }

    pub fn with_admin(mut self, admin: impl Into<String>) -> Self {
        self.admin = admin.into();
        self
    }

    /// Append one `Coin` to `funds`, after any already present.
    pub fn push_funds(&mut self, coin: &Coin) -> EncodeResult<()> {
        self.funds.push(coin.encode()?);
        Ok(())
    }
}

impl ExecuteContract {
    pub fn new(sender: impl Into<String>, contract: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            contract: contract.into(),
            ..Default::default()
        }
    }

    /// Serialize `msg` as JSON into the `msg` field.
    pub fn with_json_msg<T: Serialize>(mut self, msg: &T) -> EncodeResult<Self> {
        self.msg = serde_json::to_vec(msg)?;
        Ok(self)
    }

    /// Append one `Coin` to `funds`, after any already present.
    pub fn push_funds(&mut self, coin: &Coin) -> EncodeResult<()> {
        self.funds.push(coin.encode()?);
        Ok(())
    }
}

impl RegisterPointer {
    pub fn new(
        sender: impl Into<String>,
        pointer_type: PointerType,
        erc_address: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            pointer_type: Some(pointer_type as u32),
            erc_address: erc_address.into(),
        }
    }

    /// `None` when absent or not a kind this crate knows.
    pub fn known_pointer_type(&self) -> Option<PointerType> {
        self.pointer_type.and_then(|v| PointerType::try_from(v).ok())
    }
}

/// Pointer kinds accepted by `MsgRegisterPointer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum PointerType {
    Erc20 = 0,
    Erc721 = 1,
    Native = 2,
    Cw20 = 3,
    Cw721 = 4,
    Erc1155 = 5,
    Cw1155 = 6,
}

impl TryFrom<u32> for PointerType {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PointerType::Erc20),
            1 => Ok(PointerType::Erc721),
            2 => Ok(PointerType::Native),
            3 => Ok(PointerType::Cw20),
            4 => Ok(PointerType::Cw721),
            5 => Ok(PointerType::Erc1155),
            6 => Ok(PointerType::Cw1155),
            other => Err(other),
        }
    }
}

/// Identifies one of the four message schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MsgKind {
    StoreCode,
    InstantiateContract,
    ExecuteContract,
    RegisterPointer,
}

impl MsgKind {
    pub const ALL: [MsgKind; 4] = [
        MsgKind::StoreCode,
        MsgKind::InstantiateContract,
        MsgKind::ExecuteContract,
        MsgKind::RegisterPointer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MsgKind::StoreCode => "store-code",
            MsgKind::InstantiateContract => "instantiate-contract",
            MsgKind::ExecuteContract => "execute-contract",
            MsgKind::RegisterPointer => "register-pointer",
        }
    }

    /// Identifier this kind is registered under in the baseline registry.
    pub fn type_url(self) -> &'static str {
        match self {
            MsgKind::StoreCode => type_url::MSG_STORE_CODE,
            MsgKind::InstantiateContract => type_url::MSG_INSTANTIATE_CONTRACT,
            MsgKind::ExecuteContract => type_url::MSG_EXECUTE_CONTRACT,
            MsgKind::RegisterPointer => type_url::MSG_REGISTER_POINTER,
        }
    }
}

impl fmt::Display for MsgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MsgKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MsgKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown message kind: {}", s))
    }
}

/// Any one of the four message records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Msg {
    StoreCode(StoreCode),
    InstantiateContract(InstantiateContract),
    ExecuteContract(ExecuteContract),
    RegisterPointer(RegisterPointer),
}

impl Msg {
    pub fn kind(&self) -> MsgKind {
        match self {
            Msg::StoreCode(_) => MsgKind::StoreCode,
            Msg::InstantiateContract(_) => MsgKind::InstantiateContract,
            Msg::ExecuteContract(_) => MsgKind::ExecuteContract,
            Msg::RegisterPointer(_) => MsgKind::RegisterPointer,
        }
    }

    /// Fill absent fields with what an unset field decodes to.
    pub fn with_defaults(self) -> Self {
        use crate::codec::WireMessage;

        match self {
            Msg::StoreCode(m) => Msg::StoreCode(m.with_defaults()),
            Msg::InstantiateContract(m) => Msg::InstantiateContract(m.with_defaults()),
            Msg::ExecuteContract(m) => Msg::ExecuteContract(m.with_defaults()),
            Msg::RegisterPointer(m) => Msg::RegisterPointer(m.with_defaults()),
        }
    }
}

impl From<StoreCode> for Msg {
    fn from(m: StoreCode) -> Self {
        Msg::StoreCode(m)
    }
}

impl From<InstantiateContract> for Msg {
    fn from(m: InstantiateContract) -> Self {
        Msg::InstantiateContract(m)
    }
}

impl From<ExecuteContract> for Msg {
    fn from(m: ExecuteContract) -> Self {
        Msg::ExecuteContract(m)
    }
}

impl From<RegisterPointer> for Msg {
    fn from(m: RegisterPointer) -> Self {
        Msg::RegisterPointer(m)
    }
}
