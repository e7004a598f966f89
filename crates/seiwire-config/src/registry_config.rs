use seiwire_protocol::codec::{codec_by_name, codec_for_kind, CodeIdEncoding, CodecPair};
use seiwire_protocol::registry::{baseline, Registry};
use seiwire_protocol::MsgKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Registry setup for one chain / deployment.
///
/// ```toml
/// code_id_encoding = "decimal-string"
///
/// [[aliases]]
/// type_url = "/sei.custom.MsgExecute"
/// kind = "execute-contract"
///
/// [[overrides]]
/// type_url = "/cosmwasm.wasm.v1.MsgInstantiateContract"
/// codec = "instantiate-contract"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// How `InstantiateContract.code_id` travels on the wire
    #[serde(default)]
    pub code_id_encoding: CodeIdEncoding,

    /// Extra identifiers served by the default codec of a kind
    #[serde(default)]
    pub aliases: Vec<AliasEntry>,

    /// Identifiers bound to a named codec, applied last
    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AliasEntry {
    pub type_url: String,
    pub kind: MsgKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideEntry {
    pub type_url: String,
    /// One of the built-in codec names, e.g. `instantiate-contract-decimal-code-id`
    pub codec: String,
}

impl RegistryConfig {
    /// Load registry configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;

        tracing::info!(
            path = %path.display(),
            aliases = config.aliases.len(),
            overrides = config.overrides.len(),
            code_id_encoding = ?config.code_id_encoding,
            "Loaded registry config"
        );

        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: RegistryConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the registry configuration
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        let urls = self
            .aliases
            .iter()
            .map(|a| &a.type_url)
            .chain(self.overrides.iter().map(|o| &o.type_url));

        for type_url in urls {
            if !type_url.starts_with('/') || type_url.len() < 2 {
                return Err(ConfigError::InvalidConfig(format!(
                    "Type URL must start with '/': {:?}",
                    type_url
                )));
            }
            if !seen.insert(type_url.as_str()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "Type URL configured more than once: {}",
                    type_url
                )));
            }
        }

        for entry in &self.overrides {
            if codec_by_name(&entry.codec).is_none() {
                return Err(ConfigError::InvalidConfig(format!(
                    "Unknown codec {:?} for {}",
                    entry.codec, entry.type_url
                )));
            }
        }

        Ok(())
    }

    /// Overrides in the order they are applied on top of the baseline:
    /// `code_id_encoding`, then aliases, then explicit overrides.
    pub fn override_pairs(&self) -> Result<Vec<(String, CodecPair)>> {
        let mut pairs = Vec::new();

        if self.code_id_encoding != CodeIdEncoding::Varint {
            pairs.push((
                MsgKind::InstantiateContract.type_url().to_string(),
                codec_for_kind(MsgKind::InstantiateContract, self.code_id_encoding),
            ));
        }

        for alias in &self.aliases {
            pairs.push((
                alias.type_url.clone(),
                codec_for_kind(alias.kind, self.code_id_encoding),
            ));
        }

        for entry in &self.overrides {
            let codec = codec_by_name(&entry.codec).ok_or_else(|| {
                ConfigError::InvalidConfig(format!("Unknown codec {:?}", entry.codec))
            })?;
            pairs.push((entry.type_url.clone(), codec));
        }

        Ok(pairs)
    }

    /// Seed a registry from the baseline plus this config's overrides
    pub fn build_registry(&self) -> Result<Registry> {
        Ok(Registry::seed(baseline(), self.override_pairs()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seiwire_protocol::codec::{
        EXECUTE_CONTRACT, INSTANTIATE_CONTRACT, INSTANTIATE_CONTRACT_DECIMAL_CODE_ID,
    };
    use seiwire_protocol::type_url;

    #[test]
    fn test_empty_config_is_baseline() {
        let config = RegistryConfig::from_toml("").unwrap();
        assert_eq!(config, RegistryConfig::default());

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.lookup(type_url::MSG_INSTANTIATE_CONTRACT).unwrap(),
            INSTANTIATE_CONTRACT
        );
    }

    #[test]
    fn test_decimal_code_id_encoding() {
        let config = RegistryConfig::from_toml(r#"code_id_encoding = "decimal-string""#).unwrap();
        assert_eq!(config.code_id_encoding, CodeIdEncoding::DecimalString);

        let registry = config.build_registry().unwrap();
        assert_eq!(
            registry.lookup(type_url::MSG_INSTANTIATE_CONTRACT).unwrap(),
            INSTANTIATE_CONTRACT_DECIMAL_CODE_ID
        );
    }

    #[test]
    fn test_aliases_follow_code_id_encoding() {
        let toml = r#"
            code_id_encoding = "decimal-string"

            [[aliases]]
            type_url = "/sei.custom.MsgInstantiate"
            kind = "instantiate-contract"

            [[aliases]]
            type_url = "/sei.custom.MsgExecute"
            kind = "execute-contract"
        "#;

        let registry = RegistryConfig::from_toml(toml)
            .unwrap()
            .build_registry()
            .unwrap();
        assert_eq!(registry.len(), 6);
        assert_eq!(
            registry.lookup("/sei.custom.MsgInstantiate").unwrap(),
            INSTANTIATE_CONTRACT_DECIMAL_CODE_ID
        );
        assert_eq!(
            registry.lookup("/sei.custom.MsgExecute").unwrap(),
            EXECUTE_CONTRACT
        );
    }

    #[test]
    fn test_explicit_override_applied_last() {
        let toml = r#"
            code_id_encoding = "decimal-string"

            [[overrides]]
            type_url = "/cosmwasm.wasm.v1.MsgInstantiateContract"
            codec = "instantiate-contract"
        "#;

        let registry = RegistryConfig::from_toml(toml)
            .unwrap()
            .build_registry()
            .unwrap();
        assert_eq!(
            registry.lookup(type_url::MSG_INSTANTIATE_CONTRACT).unwrap(),
            INSTANTIATE_CONTRACT
        );
    }

    #[test]
    fn test_duplicate_type_url_rejected() {
        let toml = r#"
            [[aliases]]
            type_url = "/a.B"
            kind = "store-code"

            [[overrides]]
            type_url = "/a.B"
            codec = "store-code"
        "#;

        let result = RegistryConfig::from_toml(toml);
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_codec_rejected() {
        let toml = r#"
            [[overrides]]
            type_url = "/a.B"
            codec = "bank-send"
        "#;

        let err = RegistryConfig::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("bank-send"));
    }

    #[test]
    fn test_type_url_without_slash_rejected() {
        let toml = r#"
            [[aliases]]
            type_url = "cosmwasm.wasm.v1.MsgExecuteContract"
            kind = "execute-contract"
        "#;

        assert!(matches!(
            RegistryConfig::from_toml(toml),
            Err(ConfigError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let toml = r#"
            [[aliases]]
            type_url = "/a.B"
            kind = "bank-send"
        "#;

        assert!(matches!(
            RegistryConfig::from_toml(toml),
            Err(ConfigError::ParseError(_))
        ));
    }
}
