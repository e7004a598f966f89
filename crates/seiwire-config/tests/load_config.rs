//! End-to-end: TOML file on disk → registry → wire bytes

use seiwire_config::{ConfigError, RegistryConfig};
use seiwire_protocol::wire::{Reader, WireType};
use seiwire_protocol::{type_url, InstantiateContract, Msg};
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_from_file_changes_code_id_wire_form() {
    let file = write_config(
        r#"
        code_id_encoding = "decimal-string"
        "#,
    );

    let registry = RegistryConfig::load(file.path())
        .unwrap()
        .build_registry()
        .unwrap();

    let msg = Msg::InstantiateContract(InstantiateContract::new("sei1s", 1234, "nft"));
    let bytes = registry
        .encode(type_url::MSG_INSTANTIATE_CONTRACT, &msg)
        .unwrap();

    // sender, then code_id as a length-delimited "1234"
    let mut reader = Reader::new(&bytes);
    assert_eq!(reader.read_tag().unwrap(), (1, WireType::LengthDelimited));
    reader.skip_field(WireType::LengthDelimited).unwrap();
    assert_eq!(reader.read_tag().unwrap(), (3, WireType::LengthDelimited));
    assert_eq!(reader.read_string().unwrap(), "1234");

    assert_eq!(
        registry
            .decode(type_url::MSG_INSTANTIATE_CONTRACT, &bytes)
            .unwrap(),
        msg
    );
}

#[test]
fn test_alias_decodes_any_envelope() {
    let file = write_config(
        r#"
        [[aliases]]
        type_url = "/sei.wasm.v1.MsgExecuteContract"
        kind = "execute-contract"
        "#,
    );

    let registry = RegistryConfig::load(file.path())
        .unwrap()
        .build_registry()
        .unwrap();

    let msg = Msg::ExecuteContract(seiwire_protocol::ExecuteContract::new("sei1s", "sei1c"));
    let any = registry
        .encode_any("/sei.wasm.v1.MsgExecuteContract", &msg)
        .unwrap();
    let (url, decoded) = registry.decode_any(&any).unwrap();
    assert_eq!(url, "/sei.wasm.v1.MsgExecuteContract");
    assert_eq!(decoded, msg);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = RegistryConfig::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_unknown_top_level_key_rejected() {
    let file = write_config("code_id_encodings = \"varint\"\n");
    let result = RegistryConfig::load(file.path());
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}
