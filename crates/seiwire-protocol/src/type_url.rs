//! Fully qualified message names used as registry keys and `Any.type_url`.

pub const MSG_STORE_CODE: &str = "/cosmwasm.wasm.v1.MsgStoreCode";
pub const MSG_INSTANTIATE_CONTRACT: &str = "/cosmwasm.wasm.v1.MsgInstantiateContract";
pub const MSG_EXECUTE_CONTRACT: &str = "/cosmwasm.wasm.v1.MsgExecuteContract";
pub const MSG_REGISTER_POINTER: &str = "/seiprotocol.seichain.evm.MsgRegisterPointer";
