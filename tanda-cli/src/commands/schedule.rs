use super::{parse_word, print_json};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use tanda_core::{assign_turns, Address, ShuffleStrategy, TandaConfig};

#[derive(Args)]
pub struct ScheduleArgs {
    /// Random word, decimal or 0x-prefixed hex
    #[arg(long)]
    pub word: String,

    /// Players in registration order, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub players: Vec<String>,

    /// Shuffle strategy: legacy or hashed (defaults to the configured one)
    #[arg(long)]
    pub strategy: Option<String>,
}

#[derive(Serialize)]
struct ScheduleEntry {
    period: usize,
    player: Address,
}

fn parse_strategy(input: &str) -> anyhow::Result<ShuffleStrategy> {
    match input {
        "legacy" => Ok(ShuffleStrategy::Legacy),
        "hashed" => Ok(ShuffleStrategy::Hashed),
        other => Err(anyhow::anyhow!(
            "Unknown strategy '{}', expected legacy or hashed",
            other
        )),
    }
}

pub fn schedule(config: &TandaConfig, args: ScheduleArgs, json: bool) -> anyhow::Result<()> {
    let word = parse_word(&args.word)?;
    let strategy = match args.strategy.as_deref() {
        Some(name) => parse_strategy(name)?,
        None => config.shuffle,
    };

    let players: Vec<Address> = args.players.into_iter().map(Address::from).collect();
    let entries: Vec<ScheduleEntry> = assign_turns(&players, &word, strategy)
        .into_iter()
        .enumerate()
        .map(|(period, player)| ScheduleEntry { period, player })
        .collect();

    if json {
        return print_json(&entries);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Period", "Turn holder"]);
    for entry in &entries {
        table.add_row(vec![entry.period.to_string(), entry.player.to_string()]);
    }
    println!("{}", table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy() {
        assert_eq!(parse_strategy("legacy").unwrap(), ShuffleStrategy::Legacy);
        assert_eq!(parse_strategy("hashed").unwrap(), ShuffleStrategy::Hashed);
        assert!(parse_strategy("fisher").is_err());
    }
}
