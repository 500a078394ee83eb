// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! scalemeta-inspect - portable metadata and vote inspector
//!
//! Resolves metadata tables, builds votes from loose inputs and decodes
//! values through the built-in codec registry.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use scalemeta::portable::{PortableRegistry, PortableTable};
use scalemeta::{Codec, KnownTypes, Registry, ResolverConfig, Vote, VoteInput};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "scalemeta-inspect")]
#[command(about = "Inspect portable type metadata and compact values")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve type names from a metadata JSON file
    Resolve {
        /// Metadata file (`{"types": [...]}` or a bare array)
        #[arg(value_name = "FILE")]
        metadata: PathBuf,

        /// Resolve a single type id
        #[arg(long)]
        id: Option<u32>,

        /// Print full definitions as JSON
        #[arg(long)]
        json: bool,

        /// Maximum resolution depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Longest type name (bytes) before resolution fails
        #[arg(long)]
        max_name_len: Option<usize>,

        /// Accept Range shapes whose fields are not named start/end
        #[arg(long)]
        relaxed_range: bool,
    },

    /// Build a vote from a hex byte or JSON input
    Vote {
        /// `0x82`, `true`, `-128`, `{"aye":true,"conviction":"Locked2x"}`
        #[arg(value_name = "INPUT", allow_hyphen_values = true)]
        input: String,
    },

    /// Decode a hex-encoded value through the codec registry
    Decode {
        /// Registered type name (`u32`, `Compact`, `Vote`, ...)
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Encoded bytes, `0x`-prefixed hex
        #[arg(value_name = "HEX")]
        bytes: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Resolve {
            metadata,
            id,
            json,
            max_depth,
            max_name_len,
            relaxed_range,
        } => {
            let mut config = ResolverConfig::from_env();
            if let Some(depth) = max_depth {
                config = config.with_max_depth(depth);
            }
            if let Some(len) = max_name_len {
                config = config.with_max_name_len(len);
            }
            if relaxed_range {
                config = config.with_range_field_names(false);
            }
            cmd_resolve(&metadata, id, json, config)?;
        }
        Commands::Vote { input } => cmd_vote(&input)?,
        Commands::Decode { type_name, bytes } => cmd_decode(&type_name, &bytes)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn cmd_resolve(
    path: &Path,
    id: Option<u32>,
    json: bool,
    config: ResolverConfig,
) -> anyhow::Result<()> {
    let table = PortableTable::from_path(path)
        .with_context(|| format!("Failed to load metadata from {}", path.display()))?;
    let registry = PortableRegistry::new(table, Arc::new(KnownTypes::new())).with_config(config);

    if let Some(id) = id {
        let def = registry
            .get_type_def(id)
            .with_context(|| format!("Failed to resolve type #{}", id))?;
        if json {
            println!("{}", serde_json::to_string_pretty(&*def)?);
        } else {
            println!("#{:<6} {}", def.id, def);
            for child in def.children() {
                println!("  -> #{:<6} {}", child.id, child.type_name);
            }
        }
        return Ok(());
    }

    if json {
        let defs = registry.resolve_all().context("Failed to resolve metadata")?;
        let defs: Vec<_> = defs.iter().map(|d| &**d).collect();
        println!("{}", serde_json::to_string_pretty(&defs)?);
        return Ok(());
    }

    let mut failures = 0usize;
    for id in registry.table().ids() {
        match registry.type_name(id) {
            Ok(name) => println!("#{:<6} {}", id, name),
            Err(e) => {
                failures += 1;
                println!("#{:<6} [ERROR] {}", id, e);
            }
        }
    }

    let stats = registry.cache_stats();
    log::debug!(
        "[INSPECT] {} types, {} name hits, {} name misses",
        registry.table().len(),
        stats.name_hits,
        stats.name_misses
    );

    if failures > 0 {
        bail!("{} of {} types failed to resolve", failures, registry.table().len());
    }
    Ok(())
}

fn parse_vote_input(input: &str) -> anyhow::Result<VoteInput> {
    let trimmed = input.trim();
    let json = if trimmed.starts_with("0x") {
        serde_json::Value::String(trimmed.to_string())
    } else {
        serde_json::from_str(trimmed)
            .with_context(|| format!("Vote input is neither hex nor JSON: {}", trimmed))?
    };
    Ok(VoteInput::from_json(&json)?)
}

fn cmd_vote(input: &str) -> anyhow::Result<()> {
    let vote = Vote::new(&KnownTypes::new(), parse_vote_input(input)?)?;

    println!("bytes:     0x{}", hex::encode(vote.to_bytes()));
    println!("decision:  {}", if vote.is_aye() { "aye" } else { "nay" });
    let canonical = vote
        .to_canonical()
        .context("Vote byte carries no valid conviction")?;
    println!("canonical: {}", canonical);
    Ok(())
}

fn cmd_decode(type_name: &str, encoded: &str) -> anyhow::Result<()> {
    let digits = encoded.trim().trim_start_matches("0x");
    let bytes = hex::decode(digits).with_context(|| format!("Invalid hex: {}", encoded))?;

    let registry = KnownTypes::new();
    let mut input = bytes.as_slice();
    let value = registry
        .decode_type(type_name, &mut input)
        .with_context(|| format!("Failed to decode `{}`", type_name))?;

    if !input.is_empty() {
        log::warn!("[INSPECT] {} trailing byte(s) ignored", input.len());
    }
    println!("type:      {}", value.type_name());
    println!("canonical: {}", value.to_canonical()?);
    Ok(())
}
