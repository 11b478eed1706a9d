//! Normalized entity cache replay tool
//!
//! Replays a newline-delimited JSON action log against a configured cache
//! and prints the resulting snapshot as JSON on stdout.
//!
//! Usage:
//!   entcache-replay --config cache.json --events actions.ndjson
//!   cat actions.ndjson | entcache-replay --pretty

use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use entcache_cli::{replay, ErrorPolicy};
use entcache_store::{CacheConfig, Store};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "entcache-replay")]
#[command(about = "Replay an action log against the normalized entity cache")]
struct Args {
    /// Cache config file (defaults to Transaction + CardTransaction)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Action log, one JSON action per line ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    events: PathBuf,

    /// What to do when an action is rejected
    #[arg(long, value_enum, default_value_t = ErrorPolicy::Halt)]
    on_error: ErrorPolicy,

    /// Pretty-print the snapshot
    #[arg(long)]
    pretty: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let config = match &args.config {
        Some(path) => CacheConfig::from_path(path)?,
        None => CacheConfig::default(),
    };
    let mut store = Store::from_config(&config)?;
    info!(
        "Registered entity types: {}",
        store.root().entity_types().collect::<Vec<_>>().join(", ")
    );

    let report = if args.events.as_os_str() == "-" {
        replay(&mut store, io::stdin().lock(), args.on_error)?
    } else {
        let file = File::open(&args.events)
            .with_context(|| format!("failed to open {}", args.events.display()))?;
        replay(&mut store, BufReader::new(file), args.on_error)?
    };

    let snapshot = store.snapshot();
    info!(
        "Replayed {} actions ({} changed state, {} skipped), revision {}",
        report.dispatched,
        report.changed,
        report.skipped,
        snapshot.revision()
    );

    let mut stdout = io::stdout().lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut stdout, &*snapshot)?;
    } else {
        serde_json::to_writer(&mut stdout, &*snapshot)?;
    }
    writeln!(stdout)?;
    Ok(())
}
