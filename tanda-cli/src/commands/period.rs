use super::print_json;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::time::Duration;
use tanda_core::period_index;

#[derive(Args)]
pub struct PeriodArgs {
    /// Game start (RFC 3339)
    #[arg(long, value_parser = parse_time)]
    pub start: DateTime<Utc>,

    /// Period length in seconds
    #[arg(long)]
    pub frequency: u64,

    /// Query time (RFC 3339), defaults to now
    #[arg(long, value_parser = parse_time)]
    pub now: Option<DateTime<Utc>>,

    /// Number of players, to report whether the game has ended
    #[arg(long)]
    pub players: Option<u64>,
}

#[derive(Serialize)]
struct PeriodReport {
    start: DateTime<Utc>,
    now: DateTime<Utc>,
    frequency_secs: u64,
    period: u64,
    ended: Option<bool>,
}

pub fn parse_time(input: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(input)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| format!("Invalid timestamp '{}': {}", input, e))
}

pub fn period(args: PeriodArgs, json: bool) -> anyhow::Result<()> {
    let now = args.now.unwrap_or_else(Utc::now);
    let index = period_index(args.start, Duration::from_secs(args.frequency), now)?;

    let report = PeriodReport {
        start: args.start,
        now,
        frequency_secs: args.frequency,
        period: index,
        ended: args.players.map(|players| index >= players),
    };

    if json {
        return print_json(&report);
    }

    println!("Period: {}", report.period);
    if let Some(ended) = report.ended {
        println!("Ended: {}", if ended { "yes" } else { "no" });
    }
    Ok(())
}
