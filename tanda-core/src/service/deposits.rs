use super::Tanda;
use crate::error::{Result, TandaError};
use crate::events::TandaEvent;
use crate::ledger::Journal;
use crate::types::{Address, Amount, GameId, PlayerRecord, Turn};

impl Tanda {
    /// Pay `amount` into the current period of a game. Returns the period deposited into.
    pub async fn deposit(&self, caller: &Address, game_id: GameId, amount: Amount) -> Result<u64> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        let game = state
            .game(&game_id)
            .filter(|game| game.ready)
            .cloned()
            .ok_or(TandaError::GameNotReady)?;

        if amount != game.amount {
            return Err(TandaError::InvalidAmount);
        }

        let record = state
            .player(game_id, caller)
            .filter(|record| record.is_playing)
            .cloned()
            .ok_or(TandaError::NotAPlayer)?;

        let period = game.period_at(now)?;
        if period >= game.player_count() {
            return Err(TandaError::GameEnded);
        }

        if game.has_played_in_period(&record, period)? {
            return Err(TandaError::AlreadyDepositedInCurrentPeriod);
        }

        let turn = state.turn(game_id, period).cloned().ok_or_else(|| {
            TandaError::internal(format!("Game {} has no turn for period {}", game_id, period))
        })?;
        let prize = turn
            .prize
            .checked_add(amount)
            .ok_or(TandaError::ArithmeticOverflow)?;
        if prize > game.fully_funded_prize()? {
            return Err(TandaError::internal(format!(
                "Game {} period {} would be overfunded",
                game_id, period
            )));
        }

        let mut journal = Journal::new();
        state.put_player(
            game_id,
            caller.clone(),
            PlayerRecord {
                last_played: Some(now),
                ..record
            },
            &mut journal,
        );
        state.put_turn(game_id, period, Turn { prize, ..turn }, &mut journal);
        journal.emit(TandaEvent::PlayerDeposited {
            game_id,
            player: caller.clone(),
            period,
            amount,
        });

        let escrow = &self.config.escrow;
        let outcome = self
            .tokens
            .transfer_from(&game.token, escrow, caller, escrow, amount)
            .await
            .map(|_| period);

        if outcome.is_ok() {
            tracing::info!(
                "Player {} deposited {} {} into game {} period {}",
                caller,
                amount,
                game.token,
                game_id,
                period
            );
        }
        self.conclude(&mut state, journal, outcome)
    }
}
