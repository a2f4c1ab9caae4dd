use super::print_json;
use anyhow::ensure;
use chrono::Utc;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tanda_core::{
    protocol_fee, Address, Amount, GameId, InMemoryTokenLedger, ManualClock, MockOracle, Tanda,
    TandaConfig, TandaEvent, TokenId,
};
use tokio::sync::broadcast;

const MAX_PLAYERS: usize = 200;

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of players
    #[arg(short, long, default_value_t = 5)]
    pub players: usize,

    /// Deposit per player per period, in token units
    #[arg(short, long, default_value_t = 100)]
    pub amount: Amount,

    /// Period length in seconds (default 30 days)
    #[arg(short, long, default_value_t = 30 * 24 * 60 * 60)]
    pub frequency: u64,

    /// Token identifier
    #[arg(short, long, default_value = "usdc")]
    pub token: String,

    /// Seed for the simulated oracle, random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct PeriodOutcome {
    period: u64,
    turn_holder: Address,
    prize: Amount,
    fee: Amount,
    payout: Amount,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    game_id: GameId,
    token: TokenId,
    turn_order: Vec<Address>,
    periods: Vec<PeriodOutcome>,
    revenue_withdrawn: Amount,
    events: Vec<TandaEvent>,
}

fn drain(events: &mut broadcast::Receiver<TandaEvent>, into: &mut Vec<TandaEvent>) {
    while let Ok(event) = events.try_recv() {
        into.push(event);
    }
}

pub async fn simulate(config: TandaConfig, args: SimulateArgs, json: bool) -> anyhow::Result<()> {
    ensure!(
        (2..=MAX_PLAYERS).contains(&args.players),
        "Player count must be between 2 and {}",
        MAX_PLAYERS
    );

    let oracle = Arc::new(match args.seed {
        Some(seed) => MockOracle::with_seed(seed),
        None => MockOracle::new(),
    });
    let tokens = Arc::new(InMemoryTokenLedger::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let token = TokenId::new(args.token);
    let frequency = Duration::from_secs(args.frequency);
    let owner = config.owner.clone();
    let escrow = config.escrow.clone();
    let fee_percent = config.fee_percent;

    let players: Vec<Address> = (1..=args.players)
        .map(|i| Address::new(format!("player-{}", i)))
        .collect();
    let budget = args
        .amount
        .checked_mul(args.players as u64)
        .ok_or_else(|| anyhow::anyhow!("Deposit amount too large for {} players", args.players))?;
    for player in &players {
        tokens.mint(&token, player, budget)?;
        tokens.approve(&token, player, &escrow, budget);
    }

    let tanda = Tanda::new(config, oracle.clone(), tokens.clone(), clock.clone())?;
    let mut subscription = tanda.subscribe();
    let mut events = Vec::new();

    let game_id = tanda
        .start_game(frequency, args.amount, players.clone(), token.clone())
        .await?;
    let word = oracle.draw_word();
    let turn_order = tanda.fulfill_random_words(game_id, &[word]).await?;
    drain(&mut subscription, &mut events);

    let mut periods = Vec::new();
    for (period, holder) in turn_order.iter().enumerate() {
        let period = period as u64;
        for player in &players {
            tanda.deposit(player, game_id, args.amount).await?;
        }

        let prize = tanda.get_prize(game_id, period).await;
        clock.advance(frequency);
        let payout = tanda.claim_prize(holder, game_id, period).await?;
        periods.push(PeriodOutcome {
            period,
            turn_holder: holder.clone(),
            prize,
            fee: protocol_fee(prize, fee_percent)?,
            payout,
        });
        drain(&mut subscription, &mut events);
    }

    let withdrawn = tanda.withdraw_revenue(&owner, &[token.clone()]).await?;
    let revenue_withdrawn: Amount = withdrawn.iter().map(|(_, amount)| amount).sum();
    drain(&mut subscription, &mut events);

    tracing::info!(
        "Simulated game {} over {} periods, owner collected {} {}",
        game_id,
        periods.len(),
        revenue_withdrawn,
        token
    );

    let report = SimulationReport {
        game_id,
        token,
        turn_order,
        periods,
        revenue_withdrawn,
        events,
    };

    if json {
        return print_json(&report);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Period", "Turn holder", "Prize", "Fee", "Payout"]);
    for outcome in &report.periods {
        table.add_row(vec![
            outcome.period.to_string(),
            outcome.turn_holder.to_string(),
            outcome.prize.to_string(),
            outcome.fee.to_string(),
            outcome.payout.to_string(),
        ]);
    }

    println!("Game {} ({} {} per period)", report.game_id, args.amount, report.token);
    println!("{}", table);
    println!("Protocol revenue withdrawn: {} {}", report.revenue_withdrawn, report.token);
    println!("Escrow balance: {}", tokens.balance_of(&report.token, &escrow));
    println!("{} events emitted", report.events.len());
    Ok(())
}
