//! Natal chart calculator
//!
//! Computes planetary positions, house cusps and aspects for a birth date,
//! time and place, and prints them as a table or as JSON.
//!
//! Usage:
//!   cargo run --bin natal_chart -- --date 1990-06-15 --time 14:30 \
//!       --utc-offset +02:00 --lat 48.85 --lon 2.35 [--house-system porphyry] [--json]

use std::path::PathBuf;

use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone};
use clap::{ArgAction, Parser};
use log::{debug, LevelFilter};
use starchart::{BirthData, Engine, EngineConfig, HouseSystem, NatalChart};

/// Type alias for the error type used throughout this binary
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Natal chart calculator
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes planetary positions, houses and aspects for a birth moment",
    long_about = None
)]
struct Args {
    /// Birth date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,

    /// Local birth time (HH:MM or HH:MM:SS)
    #[arg(long, default_value = "12:00", value_parser = parse_time)]
    time: NaiveTime,

    /// Offset of local time from UTC (+HH:MM or -HH:MM)
    #[arg(long, default_value = "+00:00", allow_hyphen_values = true, value_parser = parse_offset)]
    utc_offset: FixedOffset,

    /// Geographic latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Geographic longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// House system (equal-trisection, porphyry, equal, whole-sign)
    #[arg(long)]
    house_system: Option<HouseSystem>,

    /// JSON engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the chart as JSON
    #[arg(short, long, action = ArgAction::SetTrue)]
    json: bool,

    /// Log debugging information to stderr
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| format!("expected HH:MM[:SS]: {}", e))
}

fn parse_offset(s: &str) -> std::result::Result<FixedOffset, String> {
    s.parse::<FixedOffset>()
        .map_err(|e| format!("expected +HH:MM or -HH:MM: {}", e))
}

fn init_logger(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn print_chart(chart: &NatalChart) {
    print_section_header("Positions");
    for p in &chart.placements {
        println!(
            "{:<8} {:>9.4}°  {:<16} lat {:>7.3}°  house {:>2}{}",
            p.body,
            p.position.longitude,
            p.sign.to_string(),
            p.position.latitude,
            p.house,
            if p.retrograde { "  R" } else { "" }
        );
    }

    print_section_header(&format!("Houses ({})", chart.houses.system));
    for (i, cusp) in chart.houses.cusps.iter().enumerate() {
        println!(
            "{:>2}  {:>9.4}°  {}",
            i + 1,
            cusp,
            Engine::zodiac_sign_and_degree(*cusp)
        );
    }
    println!("Asc {:.4}°  MC {:.4}°", chart.houses.ascendant, chart.houses.midheaven);

    print_section_header("Aspects");
    if chart.aspects.is_empty() {
        println!("(none)");
    }
    for aspect in &chart.aspects {
        println!("{}", aspect);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(system) = args.house_system {
        config.house_system = system;
    }
    let engine = Engine::with_config(config)?;

    let local = args
        .utc_offset
        .from_local_datetime(&args.date.and_time(args.time))
        .single()
        .ok_or("birth time is not representable at that UTC offset")?;
    debug!("Birth moment {} ({} UTC)", local, local.naive_utc());

    let chart = engine.natal_chart(BirthData::from_datetime(&local, args.lat, args.lon))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
    } else {
        println!(
            "Chart for {} at ({:.4}, {:.4}), JD {:.5}",
            local, args.lat, args.lon, chart.birth.julian_day
        );
        print_chart(&chart);
    }

    Ok(())
}
