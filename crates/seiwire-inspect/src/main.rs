use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};
use seiwire_config::RegistryConfig;
use seiwire_protocol::{Msg, Registry};
use tracing_subscriber::EnvFilter;

/// Inspect and build the binary form of wasm / pointer transaction messages.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Registry config (TOML). Without it the baseline registry is used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode base64 message bytes using the codec registered for TYPE_URL
    Decode {
        #[arg(long)]
        type_url: String,

        /// Base64-encoded message bytes
        bytes: String,
    },

    /// Decode a base64 `google.protobuf.Any` and the message inside it
    DecodeAny {
        /// Base64-encoded Any bytes
        bytes: String,
    },

    /// Encode a JSON message (`{"kind": ..., "value": {...}}`) to base64
    Encode {
        /// Identifier to encode under (default: the kind's standard type URL)
        #[arg(long)]
        type_url: Option<String>,

        /// Wrap the result in a `google.protobuf.Any`
        #[arg(long, default_value_t = false)]
        any: bool,

        /// Fill absent optional fields with their zero values first
        #[arg(long, default_value_t = false)]
        defaults: bool,

        json: String,
    },

    /// List registered type URLs and their codecs
    List,
}

fn build_registry(config: Option<&PathBuf>) -> Result<Registry> {
    match config {
        Some(path) => {
            let config = RegistryConfig::load(path)
                .with_context(|| format!("loading registry config {}", path.display()))?;
            Ok(config.build_registry()?)
        }
        None => Ok(Registry::with_baseline()),
    }
}

fn decode_base64(input: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(input.trim())
        .context("input is not valid base64")
}

/// Execute one subcommand and return what it prints.
fn run(args: Args) -> Result<String> {
    let registry = build_registry(args.config.as_ref())?;
    let mut out = String::new();

    match args.command {
        Command::Decode { type_url, bytes } => {
            let bytes = decode_base64(&bytes)?;
            let msg = registry.decode(&type_url, &bytes)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&msg)?)?;
        }

        Command::DecodeAny { bytes } => {
            let bytes = decode_base64(&bytes)?;
            let (type_url, msg) = registry.decode_any(&bytes)?;
            let decoded = serde_json::json!({ "type_url": type_url, "msg": msg });
            writeln!(out, "{}", serde_json::to_string_pretty(&decoded)?)?;
        }

        Command::Encode {
            type_url,
            any,
            defaults,
            json,
        } => {
            let mut msg: Msg = serde_json::from_str(&json).context("parsing message JSON")?;
            if defaults {
                msg = msg.with_defaults();
            }

            let type_url = type_url.unwrap_or_else(|| msg.kind().type_url().to_string());
            let codec = registry.lookup(&type_url)?;
            if codec.kind() != msg.kind() {
                bail!(
                    "{} is registered for {}, but the message is {}",
                    type_url,
                    codec.kind(),
                    msg.kind()
                );
            }

            let bytes = if any {
                registry.encode_any(&type_url, &msg)?
            } else {
                registry.encode(&type_url, &msg)?
            };
            tracing::debug!(type_url = %type_url, len = bytes.len(), "Encoded message");
            writeln!(out, "{}", STANDARD.encode(bytes))?;
        }

        Command::List => {
            for type_url in registry.type_urls() {
                let codec = registry.lookup(type_url)?;
                writeln!(out, "{}\t{}", type_url, codec.name())?;
            }
        }
    }

    Ok(out)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    print!("{}", run(Args::parse())?);
    Ok(())
}
