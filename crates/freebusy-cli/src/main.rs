//! `freebusy` CLI — merge busy periods and find free slots from the command line.
//!
//! Input is either a Google Calendar `freeBusy.query` response or a bare JSON
//! array of `{start, end}` objects. Output is pretty-printed JSON on stdout;
//! diagnostics go to stderr.
//!
//! ## Usage
//!
//! ```sh
//! # Merge the busy periods of every calendar in a response
//! freebusy merge -i response.json
//!
//! # Free slots in the response's own timeMin/timeMax window
//! freebusy free -i response.json
//!
//! # Free slots of at least 30 minutes in an explicit window (bare array on stdin)
//! echo '[{"start":"2026-03-16T09:00:00Z","end":"2026-03-16T10:00:00Z"}]' \
//!   | freebusy free --start 2026-03-16T08:00:00Z --end 2026-03-16T17:00:00Z --min-minutes 30
//!
//! # Only the first slot that fits
//! freebusy free -i response.json --min-minutes 60 --first
//!
//! # Busy blocks and free slots together
//! freebusy availability -i response.json -o availability.json
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use clap::{Args, Parser, Subcommand};
use freebusy_engine::wire::{self, AvailabilityDto, ProviderFreeBusy};
use freebusy_engine::{availability, first_free_slot, free_slots_at_least, merge_sources};
use serde::Serialize;
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "freebusy",
    version,
    about = "Merge calendar busy periods and find free slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct IoArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct WindowArgs {
    /// Window start (RFC 3339); defaults to the response's timeMin
    #[arg(long, value_parser = parse_instant)]
    start: Option<DateTime<Utc>>,
    /// Window end (RFC 3339); defaults to the response's timeMax
    #[arg(long, value_parser = parse_instant)]
    end: Option<DateTime<Utc>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge overlapping and touching busy periods across all calendars
    Merge {
        #[command(flatten)]
        files: IoArgs,
    },
    /// List free slots inside the query window
    Free {
        #[command(flatten)]
        files: IoArgs,
        #[command(flatten)]
        window: WindowArgs,
        /// Only report slots lasting at least this many minutes
        #[arg(long, default_value_t = 0)]
        min_minutes: i64,
        /// Print only the earliest qualifying slot (or null)
        #[arg(long)]
        first: bool,
    },
    /// Report merged busy blocks and free slots for the query window
    Availability {
        #[command(flatten)]
        files: IoArgs,
        #[command(flatten)]
        window: WindowArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Merge { files } => {
            let doc = read_document(files.input.as_deref())?;
            let merged = merge_sources(&doc.sources);
            info!(blocks = merged.len(), "merged busy periods");
            write_json(files.output.as_deref(), &wire::busy_blocks(&merged))?;
        }
        Commands::Free {
            files,
            window,
            min_minutes,
            first,
        } => {
            anyhow::ensure!(min_minutes >= 0, "--min-minutes must not be negative");
            let min_span =
                TimeDelta::try_minutes(min_minutes).context("--min-minutes is out of range")?;
            let doc = read_document(files.input.as_deref())?;
            let window = doc
                .window(window.start, window.end)
                .context("A query window is required: pass --start and --end")?;
            let merged = merge_sources(&doc.sources);

            if first {
                let slot = first_free_slot(&merged, window.start, window.end, min_span);
                let dto = slot.as_ref().map(wire::FreeSlotDto::from);
                write_json(files.output.as_deref(), &dto)?;
            } else {
                let slots = free_slots_at_least(&merged, window.start, window.end, min_span);
                info!(slots = slots.len(), "computed free slots");
                write_json(files.output.as_deref(), &wire::free_slot_dtos(&slots))?;
            }
        }
        Commands::Availability { files, window } => {
            let doc = read_document(files.input.as_deref())?;
            let window = doc
                .window(window.start, window.end)
                .context("A query window is required: pass --start and --end")?;
            let view = availability(&doc.sources, window);
            let dto = AvailabilityDto::new(&view, doc.failed_calendars);
            write_json(files.output.as_deref(), &dto)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!("freebusy_cli={0},freebusy_engine={0}", default_level).into()
                }),
        )
        .with_writer(io::stderr)
        .init();
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    wire::parse_timestamp(s).map_err(|e| e.to_string())
}

fn read_document(path: Option<&str>) -> Result<ProviderFreeBusy> {
    let json = read_input(path)?;
    let doc = wire::parse_busy_document(&json).context("Failed to parse free/busy input")?;
    debug!(
        calendars = doc.sources.len(),
        failed = doc.failed_calendars.len(),
        "parsed free/busy input"
    );
    Ok(doc)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
