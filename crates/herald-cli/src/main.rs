use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use herald_core::impls::{
    LoadContext, ManifestInspector, ModuleRegistry, ProcessModuleScan, ScanStrategy,
};
use herald_core::observability::CodecCounts;
use herald_core::ports::{ModuleCatalog, TypedModule};
use herald_core::{
    CodecBuilder, CodecConfig, Message, TypeDescriptor, TypeNameCodec, TypeNameSerializer,
    TypedCodecExt,
};

#[derive(Debug, Parser)]
#[command(name = "herald", about = "Encode and resolve message type tokens")]
struct Cli {
    /// JSON config file (CodecConfig)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the token for a type
    Encode { full_name: String, module: String },
    /// Resolve a token against the demo registry
    Decode {
        token: String,
        /// Override the module scan strategy
        #[arg(long, value_enum)]
        scan: Option<ScanArg>,
    },
    /// List modules in the demo registry and those seen by the process scan
    Scan,
    /// Publish and consume one message through the codec
    Demo,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ScanArg {
    Registry,
    Process,
}

impl From<ScanArg> for ScanStrategy {
    fn from(arg: ScanArg) -> Self {
        match arg {
            ScanArg::Registry => ScanStrategy::Registry,
            ScanArg::Process => ScanStrategy::Process,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct OrderPlaced {
    order_id: u64,
    amount_cents: u64,
}

impl Message for OrderPlaced {
    const FULL_NAME: &'static str = "Acme.Billing.OrderPlaced";
    const MODULE: &'static str = "Acme.Billing";
}

#[derive(Debug, Serialize, Deserialize)]
struct AuditEntryRecorded {
    actor: String,
}

impl Message for AuditEntryRecorded {
    const FULL_NAME: &'static str = "Plugin.Audit.EntryRecorded";
    const MODULE: &'static str = "Plugin.Audit";
}

/// デモ用のレジストリ。Plugin.Audit は別コンテキストなので fallback でしか見つからない
fn demo_registry() -> Arc<ModuleRegistry> {
    let registry = Arc::new(ModuleRegistry::new());
    registry.define::<OrderPlaced>(LoadContext::Default);
    registry.define_type("Acme.Billing.InvoiceIssued", "Acme.Billing", LoadContext::Default);
    registry.define_type("Acme.Shipping.Dispatched", "Acme.Shipping", LoadContext::Default);
    registry.define::<AuditEntryRecorded>(LoadContext::Isolated("plugins".to_string()));
    registry
}

fn load_config(path: Option<&PathBuf>) -> Result<CodecConfig> {
    let Some(path) = path else {
        return Ok(CodecConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    CodecConfig::from_json_str(&json).with_context(|| format!("parsing config {}", path.display()))
}

fn build_codec(config: &CodecConfig) -> Result<TypeNameCodec> {
    Ok(CodecBuilder::from_config(config, demo_registry()).build()?)
}

#[derive(Serialize)]
struct DecodeReport {
    token: String,
    scan: ScanStrategy,
    resolved: TypeDescriptor,
    counts: CodecCounts,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Encode { full_name, module } => {
            let codec = build_codec(&config)?;
            let token = codec.serialize(&TypeDescriptor::new(full_name, module))?;
            println!("{token}");
        }
        Command::Decode { token, scan } => {
            if let Some(scan) = scan {
                config.scan = scan.into();
            }
            let codec = build_codec(&config)?;
            let resolved = match codec.deserialize(&token) {
                Ok(ty) => ty,
                Err(e) if e.is_retryable() => {
                    bail!("{e} (the defining module may not be loaded yet; retry after loading it)")
                }
                Err(e) => return Err(e.into()),
            };
            let report = DecodeReport {
                token,
                scan: config.scan,
                resolved,
                counts: codec.counts(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Scan => {
            println!("registry:");
            for module in demo_registry().snapshot() {
                println!("  [{}] {}", module.context(), module.name());
            }

            let scan = ProcessModuleScan::new(
                config.maps_path.clone(),
                ManifestInspector::new(config.manifest_suffix.clone()),
            );
            println!("process ({}):", scan.maps_path().display());
            for module in scan.loaded_modules() {
                let kind = if module.is_inspectable() { "typed " } else { "native" };
                println!("  {kind} {}", module.display_name());
            }
        }
        Command::Demo => demo(&config)?,
    }
    Ok(())
}

/// publish 側でトークンを付け、consume 側で解決してから payload を読む
fn demo(config: &CodecConfig) -> Result<()> {
    let publisher = build_codec(config)?;
    let consumer = build_codec(config)?;

    let outgoing = [
        (
            publisher.token_for::<OrderPlaced>()?,
            serde_json::to_vec(&OrderPlaced {
                order_id: 42,
                amount_cents: 1999,
            })?,
        ),
        (
            publisher.token_for::<AuditEntryRecorded>()?,
            serde_json::to_vec(&AuditEntryRecorded {
                actor: "herald".to_string(),
            })?,
        ),
    ];

    for (token, body) in outgoing {
        tracing::info!(%token, bytes = body.len(), "published");

        if consumer.is_token_of::<OrderPlaced>(token.as_str())? {
            let msg: OrderPlaced = serde_json::from_slice(&body)?;
            println!("consumed {token}: {msg:?}");
        } else if consumer.is_token_of::<AuditEntryRecorded>(token.as_str())? {
            let msg: AuditEntryRecorded = serde_json::from_slice(&body)?;
            println!("consumed {token}: {msg:?}");
        } else {
            bail!("no consumer for {token}");
        }
    }

    println!("publisher: {:?}", publisher.counts());
    println!("consumer: {:?}", consumer.counts());
    Ok(())
}
