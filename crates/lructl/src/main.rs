//! lructl - replay command scripts against an LRU cache

mod command;
mod handler;
mod script;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lrucache::{Capacity, SharedLruCache};
use tracing::info;

use crate::handler::CommandHandler;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Script file to replay (reads stdin when omitted)
    script: Option<PathBuf>,

    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 1024, allow_negative_numbers = true)]
    capacity: i64,

    /// Print usage statistics after the script finishes
    #[arg(long)]
    stats: bool,

    /// Print usage statistics as JSON after the script finishes
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let capacity = Capacity::try_from(args.capacity)?;
    info!("Cache capacity: {}", capacity);
    match &args.script {
        Some(path) => info!("Replaying script: {}", path.display()),
        None => info!("Replaying script from stdin"),
    }

    let handler = CommandHandler::new(SharedLruCache::with_capacity(capacity));
    let input = script::open_input(args.script.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let executed = script::run(&handler, input, &mut out)?;
    info!("Executed {} command(s)", executed);

    if args.json {
        let report = handler.stats_report();
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else if args.stats {
        writeln!(out, "{}", handler.stats_report())?;
    }
    out.flush()?;

    Ok(())
}
