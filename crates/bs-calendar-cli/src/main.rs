//! `bsdate`: convert dates between Bikram Sambat and Gregorian calendars.
//!
//! Every command prints one JSON document to stdout. Lookups that fail
//! (unknown month, day out of range, no match) print `{"error": "..."}` and
//! exit with status 1. Logs go to stderr, filtered by `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use bs_calendar::{
    convert_ad_to_bs, convert_ad_to_bs_with_events, convert_bs_to_ad,
    convert_bs_to_ad_with_events, CalendarError, CalendarStore, GregorianDate, NepaliDate,
    StoreConfig,
};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bsdate",
    version,
    about = "Convert dates between Bikram Sambat (BS) and Gregorian (AD)"
)]
struct Cli {
    /// Directory holding <YYYY>/<M>.json month files
    /// [default: $BS_CALENDAR_DATA_DIR, else ./data]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a BS date to AD
    BsToAd(DateArgs),
    /// Convert an AD date to BS
    AdToBs(DateArgs),
    /// Print the full record of a BS month
    Month(MonthArgs),
    /// Print every loaded month of a BS year
    Year {
        year: i32,
    },
    /// List BS years with data
    Years,
    /// Number of days in a BS month (falls back to a static table without data)
    Days(MonthArgs),
}

#[derive(Args)]
struct DateArgs {
    year: i32,
    #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    day: u32,
    /// Include the BS month's holiday, marriage and bratabandha lists
    #[arg(long)]
    events: bool,
}

#[derive(Args)]
struct MonthArgs {
    year: i32,
    #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli
        .data_dir
        .map(StoreConfig::new)
        .unwrap_or_else(StoreConfig::from_env);
    let store = CalendarStore::load_dir(&config);
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        months = store.len(),
        "calendar loaded"
    );

    let outcome: Result<Value, CalendarError> = match cli.command {
        Command::BsToAd(args) => {
            let date = NepaliDate::new(args.year, args.month, args.day);
            if args.events {
                convert_bs_to_ad_with_events(&store, &date).and_then(to_value)
            } else {
                convert_bs_to_ad(&store, &date).and_then(to_value)
            }
        }
        Command::AdToBs(args) => {
            let date = GregorianDate::new(args.year, args.month, args.day);
            if args.events {
                convert_ad_to_bs_with_events(&store, &date).and_then(to_value)
            } else {
                convert_ad_to_bs(&store, &date).and_then(to_value)
            }
        }
        Command::Month(args) => store
            .month(args.year, args.month)
            .ok_or_else(|| CalendarError::NotFound {
                year: args.year,
                month: args.month,
                available_years: store.years(),
            })
            .and_then(to_value),
        Command::Year { year } => store.year(year).and_then(to_value),
        Command::Years => Ok(json!({ "years": store.years() })),
        Command::Days(args) => Ok(json!({
            "year": args.year,
            "month": args.month,
            "days": store.days_in_month(args.year, args.month),
            "fromData": store.month(args.year, args.month).is_some(),
        })),
    };

    let (document, code) = match outcome {
        Ok(value) => (value, ExitCode::SUCCESS),
        Err(e) => (json!({ "error": e.to_string() }), ExitCode::FAILURE),
    };
    let text = if cli.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .context("failed to serialize output")?;
    println!("{text}");
    Ok(code)
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, CalendarError> {
    serde_json::to_value(value).map_err(|e| CalendarError::Parse(e.to_string()))
}
