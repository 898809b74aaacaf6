//! `slots` CLI — compute bookable slots, check a booking attempt, or list
//! the dates of a month that have working hours.
//!
//! A request document (JSON, or TOML when the file ends in `.toml`) carries
//! the owner's timezone, weekly working hours, bookings and event type.
//!
//! ## Usage
//!
//! ```sh
//! # Available slots for the document's date, as JSON (stdin → stdout)
//! cat request.json | slots compute
//!
//! # A specific date, every slot including blocked ones, pinned "now"
//! slots compute -i request.json --date 2026-03-16 --now 2026-03-16T08:00:00Z --all
//!
//! # Human-readable 12-hour output in the visitor's zone
//! slots compute -i request.toml --format 12h
//!
//! # Re-check a booking attempt before committing it
//! slots check -i request.json --start 2026-03-16T10:00:00Z
//!
//! # Calendar highlighting for March 2026
//! slots dates -i request.json --year 2026 --month 3
//! ```

use anyhow::{Context, Result};
use availability_engine::wire::{format_instant, parse_instant};
use availability_engine::{
    format_slot, parse_timezone, AvailabilityRequest, AvailabilityResponse, ClockFormat,
};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Compute bookable time slots from working hours and bookings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute slots for one date
    Compute {
        /// Request document (reads JSON from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Date to compute, YYYY-MM-DD (defaults to the document's date)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Current instant, RFC 3339 (defaults to the system clock)
        #[arg(long)]
        now: Option<String>,
        /// Include unavailable slots
        #[arg(long)]
        all: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Check whether a booking attempt is still free
    Check {
        /// Request document (reads JSON from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Start of the attempted booking, RFC 3339
        #[arg(long)]
        start: String,
        /// End of the attempted booking, RFC 3339 (must match the event length)
        #[arg(long)]
        end: Option<String>,
    },
    /// List the dates of a month that have working hours
    Dates {
        /// Request document (reads JSON from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[arg(long)]
        year: i32,
        /// Month number, 1 = January
        #[arg(long)]
        month: u32,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `{"slots":[{"start":..,"end":..}]}`
    Json,
    /// `9:00 AM - 9:30 AM`, one slot per line
    #[value(name = "12h")]
    TwelveHour,
    /// `09:00 - 09:30`, one slot per line
    #[value(name = "24h")]
    TwentyFourHour,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Compute {
            input,
            output,
            date,
            now,
            all,
            format,
        } => {
            let request = read_request(input.as_deref())?;
            let date = request.resolve_date(date)?;
            let now = match now {
                Some(raw) => parse_instant(&raw).context("Invalid --now")?,
                None => Utc::now(),
            };
            tracing::info!(%date, %now, owner_timezone = %request.owner_timezone, "computing availability");

            let rendered = render_compute(&request, date, now, all, format)?;
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check { input, start, end } => {
            let request = read_request(input.as_deref())?;
            let start = parse_instant(&start).context("Invalid --start")?;
            let end = end
                .map(|raw| parse_instant(&raw).context("Invalid --end"))
                .transpose()?;

            let free = request
                .check(start, end)
                .context("Failed to check booking attempt")?;
            tracing::info!(start = %format_instant(&start), free, "checked booking attempt");
            println!("{}", if free { "available" } else { "unavailable" });
        }
        Commands::Dates { input, year, month } => {
            let request = read_request(input.as_deref())?;
            let dates = request
                .dates(year, month)
                .context("Failed to list dates with availability")?;
            for date in dates {
                println!("{}", date);
            }
        }
    }

    Ok(())
}

fn render_compute(
    request: &AvailabilityRequest,
    date: NaiveDate,
    now: DateTime<Utc>,
    all: bool,
    format: OutputFormat,
) -> Result<String> {
    let slots = request
        .compute(date, now)
        .context("Failed to compute availability")?;
    let shown: Vec<_> = slots.iter().filter(|s| all || s.available).collect();

    let clock = match format {
        OutputFormat::Json if all => {
            let entries: Vec<serde_json::Value> = shown
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "start": format_instant(&s.start),
                        "end": format_instant(&s.end),
                        "available": s.available,
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&serde_json::json!({ "slots": entries }))?);
        }
        OutputFormat::Json => {
            let response = AvailabilityResponse::from_slots(&slots);
            return Ok(serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::TwelveHour => ClockFormat::TwelveHour,
        OutputFormat::TwentyFourHour => ClockFormat::TwentyFourHour,
    };

    let display_zone = request
        .target_timezone
        .as_deref()
        .unwrap_or(&request.owner_timezone);
    let tz = parse_timezone(display_zone)?;

    let mut out = String::new();
    for slot in shown {
        out.push_str(&format_slot(slot, &tz, clock));
        if !slot.available {
            out.push_str(" (unavailable)");
        }
        out.push('\n');
    }
    Ok(out)
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logger(verbose: bool, json: bool) {
    let default = if verbose {
        "availability_engine=debug,slots=debug"
    } else {
        "availability_engine=info,slots=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(filter);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);
    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}

/// Parse a request document, as TOML when the path ends in `.toml`, else JSON.
fn read_request(path: Option<&str>) -> Result<AvailabilityRequest> {
    let raw = read_input(path)?;
    if path.is_some_and(|p| p.ends_with(".toml")) {
        toml::from_str(&raw).context("Failed to parse TOML request")
    } else {
        AvailabilityRequest::from_json(&raw).context("Failed to parse JSON request")
    }
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
