//! acl-translate entry point.
//!
//! Encodes ACLs from JSON into VPP ACL plugin rule records, or decodes dumped
//! rule records back into ACEs, without talking to a dataplane.
//!
//! Exits with 2 when an entry cannot be translated and with 1 on any other
//! failure.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hc2vpp_acl::acl::{
    converter, validator, Ace, Acl, AclContextManager, AclError, AclKind, AclRules,
};
use hc2vpp_acl::TranslatorConfig;
use vpp_acl_api::{AclRule, MacipAclRule};

/// VPP ACL rule translator
#[derive(Parser, Debug)]
#[command(name = "acl-translate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (JSON)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overrides the config file
    #[arg(short = 'l', long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a JSON list of ACLs into rule records
    Encode {
        /// JSON file holding a list of ACLs
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Decode a JSON list of dumped rule records into ACEs
    Decode {
        /// JSON file holding a list of rule records
        #[arg(short, long)]
        input: PathBuf,

        /// Name of the decoded ACL; invented from the config prefix if unset
        #[arg(long)]
        acl_name: Option<String>,

        /// Records are MAC+IP rules
        #[arg(long)]
        macip: bool,
    },
}

#[derive(Debug, Serialize)]
struct EncodedAcl {
    name: String,
    kind: AclKind,
    rules: AclRules,
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level {}", level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to set logger")?;
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn encode(input: &Path, config: &TranslatorConfig) -> Result<()> {
    let acls: Vec<Acl> = serde_json::from_str(&read_input(input)?)
        .with_context(|| format!("Failed to parse ACLs from {}", input.display()))?;

    let mut encoded = Vec::with_capacity(acls.len());
    for acl in acls {
        validator::validate_write(&acl)?;
        let rules = converter::encode_acl(&acl)
            .with_context(|| format!("Failed to encode ACL {}", acl.name))?;
        info!(acl = %acl.name, kind = %acl.kind, rules = rules.len(), "Encoded ACL");
        encoded.push(EncodedAcl {
            name: acl.name,
            kind: acl.kind,
            rules,
        });
    }

    print_json(&encoded, config.pretty)
}

fn decode(
    input: &Path,
    acl_name: Option<&str>,
    macip: bool,
    config: &TranslatorConfig,
) -> Result<()> {
    let content = read_input(input)?;
    let mut ctx = AclContextManager::new(config.artificial_name_prefix.as_str());
    let name = match acl_name {
        Some(name) => name.to_string(),
        None => ctx.acl_name(0),
    };

    let acl = if macip {
        let rules: Vec<MacipAclRule> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse MAC+IP rules from {}", input.display()))?;
        let aces = converter::to_macip_aces(&name, &rules, &mut ctx)?;
        Acl {
            name,
            kind: AclKind::MacIp,
            aces: aces.into_iter().map(Ace::MacIp).collect(),
        }
    } else {
        let rules: Vec<AclRule> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse rules from {}", input.display()))?;
        let aces = converter::to_standard_aces(&name, &rules, &mut ctx)?;
        Acl {
            name,
            kind: AclKind::Vpp,
            aces: aces.into_iter().map(Ace::Standard).collect(),
        }
    };

    info!(acl = %acl.name, kind = %acl.kind, aces = acl.aces.len(), "Decoded ACL");
    print_json(&acl, config.pretty)
}

/// Exit code for an error chain: 2 if an entry could not be translated.
fn exit_code(e: &anyhow::Error) -> ExitCode {
    let untranslatable = e
        .chain()
        .filter_map(|cause| cause.downcast_ref::<AclError>())
        .any(AclError::is_translation_error);
    if untranslatable {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn run(args: &Args, config: &TranslatorConfig) -> Result<()> {
    debug!(?config, "Loaded configuration");
    match &args.command {
        Command::Encode { input } => encode(input, config),
        Command::Decode {
            input,
            acl_name,
            macip,
        } => decode(input, acl_name.as_deref(), *macip, config),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = TranslatorConfig::load_or_default(args.config.as_deref());
    let level = args
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());

    if let Err(e) = init_logging(&level) {
        eprintln!("acl-translate: {:#}", e);
        return ExitCode::FAILURE;
    }

    match config
        .map_err(anyhow::Error::from)
        .and_then(|config| run(&args, &config))
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("acl-translate failed: {:#}", e);
            exit_code(&e)
        }
    }
}
