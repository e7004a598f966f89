pub mod registry_config;

pub use registry_config::{AliasEntry, ConfigError, OverrideEntry, RegistryConfig, Result};
