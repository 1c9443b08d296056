//! Bartime CLI — next-bar boundary queries.
//!
//! Commands:
//! - `next` — boundary for an exchange product from a TOML market config
//! - `generic` — boundary on a plain clock grid (no calendar)
//! - `tables` — list every exchange special-time table

use anyhow::{bail, Context, Result};
use bartime_core::special_time::all_tables;
use bartime_core::{ExchangeBoundaryEngine, GenericBoundaryEngine, IntervalSpec, MarketConfig};
use chrono::{NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "bartime", about = "Bartime CLI — next bar boundary for exchange ticks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Next boundary for an exchange-traded product.
    Next {
        /// Path to the market TOML config (calendar + product sessions).
        #[arg(long)]
        config: PathBuf,

        /// Product id or contract symbol (e.g. IF or IF2406).
        #[arg(long)]
        product: String,

        /// Interval such as 15s, 5m, 1H, 1D, 1W.
        #[arg(long)]
        interval: String,

        /// Tick time (YYYY-MM-DD HH:MM:SS[.ffffff]).
        #[arg(long)]
        time: String,
    },
    /// Next boundary on a plain clock grid.
    Generic {
        /// Interval such as 15s, 5m, 4H, 1D.
        #[arg(long)]
        interval: String,

        /// Tick time (YYYY-MM-DD HH:MM:SS[.ffffff]).
        #[arg(long)]
        time: String,

        /// Hour-grid offset from midnight (HH:MM).
        #[arg(long, default_value = "00:00")]
        open_offset: String,

        /// Daily close time (HH:MM).
        #[arg(long, default_value = "00:00")]
        close: String,
    },
    /// List every exchange special-time table.
    Tables {
        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Next { config, product, interval, time } => {
            run_next(&config, &product, &interval, &time)
        }
        Commands::Generic { interval, time, open_offset, close } => {
            run_generic(&interval, &time, &open_offset, &close)
        }
        Commands::Tables { json } => run_tables(json),
    }
}

fn init_logging() {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();
}

fn parse_time(s: &str) -> Result<NaiveDateTime> {
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(t);
        }
    }
    bail!("unrecognised time '{s}' (expected YYYY-MM-DD HH:MM:SS[.ffffff])")
}

fn parse_clock(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .with_context(|| format!("invalid clock time '{s}' (expected HH:MM)"))
}

fn parse_interval(s: &str) -> Result<IntervalSpec> {
    s.parse::<IntervalSpec>()
        .with_context(|| format!("invalid interval '{s}'"))
}

fn run_next(config_path: &std::path::Path, product: &str, interval: &str, time: &str) -> Result<()> {
    let config = MarketConfig::from_file(config_path)?;
    let resolved = config.product(product)?;
    let interval = parse_interval(interval)?;
    let tick = parse_time(time)?;
    debug!(
        product = %resolved.product_id,
        category = %resolved.category,
        shape = ?resolved.schedule.shape(),
        "resolved product"
    );

    let engine = ExchangeBoundaryEngine::builder()
        .calendar(config.calendar())
        .build()?;

    match engine.next_bar(tick, interval, resolved.category, &resolved.schedule)? {
        Some(next) => println!("{}", next.format("%Y-%m-%d %H:%M:%S")),
        None => println!("none"),
    }
    Ok(())
}

fn run_generic(interval: &str, time: &str, open_offset: &str, close: &str) -> Result<()> {
    let interval = parse_interval(interval)?;
    let tick = parse_time(time)?;
    let offset = parse_clock(open_offset)? - NaiveTime::MIN;
    let close = parse_clock(close)?;

    let engine = GenericBoundaryEngine::new(offset, close)?;
    let next = engine.next_bar(tick, interval)?;
    println!("{}", next.format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}

fn run_tables(json: bool) -> Result<()> {
    let tables = all_tables();
    if json {
        println!("{}", serde_json::to_string_pretty(tables)?);
        return Ok(());
    }

    println!("{:<12} {:<7} {:>6} {:<12} TABLE", "CATEGORY", "UNIT", "LENGTH", "SHAPE");
    for entry in tables {
        let key = &entry.key;
        let length = key.length.map_or_else(|| "any".to_string(), |l| l.to_string());
        let shape = key.shape.map_or_else(|| "any".to_string(), |s| s.to_string());
        println!(
            "{:<12} {:<7} {:>6} {:<12} {}",
            key.category.to_string(),
            format!("{:?}", key.unit),
            length,
            shape,
            entry.table
        );
    }
    println!();
    println!("+1 = next calendar day, * = cross-day cutover (rolls to next trading day)");
    Ok(())
}
