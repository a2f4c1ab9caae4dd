pub mod period;
pub mod schedule;
pub mod simulate;

pub use period::{period, PeriodArgs};
pub use schedule::{schedule, ScheduleArgs};
pub use simulate::{simulate, SimulateArgs};

use anyhow::anyhow;
use serde::Serialize;
use tanda_core::BigUint;

/// Parse a random word given in decimal or as `0x`-prefixed hex.
pub fn parse_word(input: &str) -> anyhow::Result<BigUint> {
    let parsed = match input.strip_prefix("0x") {
        Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
        None => BigUint::parse_bytes(input.as_bytes(), 10),
    };
    parsed.ok_or_else(|| anyhow!("Invalid random word: {}", input))
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
