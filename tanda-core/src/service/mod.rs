mod deposits;
mod registry;
mod settlement;

pub use registry::PendingTurnOrder;
pub use settlement::protocol_fee;

use crate::clock::Clock;
use crate::config::TandaConfig;
use crate::error::{Result, TandaError};
use crate::events::{EventBus, TandaEvent};
use crate::ledger::{Journal, LedgerState};
use crate::oracle::RandomnessOracle;
use crate::token::TokenLedger;
use crate::types::{Address, Amount, Game, GameId, PlayerRecord, TokenId};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

/// Coordinates every game sharing one ledger.
///
/// Each mutating operation holds the state lock from its first check to its
/// last transfer, so operations apply in a single total order. Effects are
/// written before any token transfer is awaited and are undone if the
/// operation fails at any later point.
pub struct Tanda {
    config: TandaConfig,
    state: Mutex<LedgerState>,
    oracle: Arc<dyn RandomnessOracle>,
    tokens: Arc<dyn TokenLedger>,
    clock: Arc<dyn Clock>,
    events: EventBus,
}

impl Tanda {
    pub fn new(
        config: TandaConfig,
        oracle: Arc<dyn RandomnessOracle>,
        tokens: Arc<dyn TokenLedger>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        let state = LedgerState::new(config.owner.clone());
        tracing::info!(
            "Tanda ready: owner {}, escrow {}, fee {}%",
            config.owner,
            config.escrow,
            config.fee_percent
        );

        Ok(Self {
            config,
            state: Mutex::new(state),
            oracle,
            tokens,
            clock,
            events: EventBus::new(),
        })
    }

    pub fn config(&self) -> &TandaConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TandaEvent> {
        self.events.subscribe()
    }

    /// Publish the journal's events on success, or undo its writes on failure.
    fn conclude<T>(&self, state: &mut LedgerState, journal: Journal, outcome: Result<T>) -> Result<T> {
        match outcome {
            Ok(value) => {
                self.events.publish(journal.into_events());
                Ok(value)
            }
            Err(e) => {
                tracing::warn!("Operation rolled back: {}", e);
                state.rollback(journal);
                Err(e)
            }
        }
    }

    pub async fn get_game(&self, game_id: GameId) -> Option<Game> {
        self.state.lock().await.game(&game_id).cloned()
    }

    pub async fn get_player(&self, game_id: GameId, player: &Address) -> Option<PlayerRecord> {
        self.state.lock().await.player(game_id, player).cloned()
    }

    /// `false` for unknown games and for addresses outside the player list.
    pub async fn is_playing(&self, game_id: GameId, player: &Address) -> bool {
        self.state
            .lock()
            .await
            .player(game_id, player)
            .map_or(false, |record| record.is_playing)
    }

    /// Prize accumulated for a period, zero when nothing is recorded.
    pub async fn get_prize(&self, game_id: GameId, period: u64) -> Amount {
        self.state
            .lock()
            .await
            .turn(game_id, period)
            .map_or(0, |turn| turn.prize)
    }

    /// Turn holder of a period, once the turn order is committed.
    pub async fn get_winner(&self, game_id: GameId, period: u64) -> Option<Address> {
        self.state
            .lock()
            .await
            .turn(game_id, period)
            .map(|turn| turn.player.clone())
    }

    pub fn get_fee(&self) -> u64 {
        self.config.fee_percent
    }

    pub async fn get_revenue(&self, token: &TokenId) -> Amount {
        self.state.lock().await.revenue(token)
    }

    /// Players by period, empty until the turn order is committed.
    pub async fn get_turn_order(&self, game_id: GameId) -> Vec<Address> {
        let state = self.state.lock().await;
        let Some(game) = state.game(&game_id) else {
            return Vec::new();
        };

        (0..game.player_count())
            .filter_map(|period| state.turn(game_id, period))
            .map(|turn| turn.player.clone())
            .collect()
    }

    pub async fn current_period(&self, game_id: GameId) -> Result<u64> {
        let state = self.state.lock().await;
        let game = state
            .game(&game_id)
            .ok_or(TandaError::GameNotFound(game_id))?;
        game.period_at(self.clock.now())
    }

    pub async fn is_ended(&self, game_id: GameId) -> Result<bool> {
        let state = self.state.lock().await;
        let game = state
            .game(&game_id)
            .ok_or(TandaError::GameNotFound(game_id))?;
        game.is_ended_at(self.clock.now())
    }

    pub async fn has_played_in_current_period(&self, game_id: GameId, player: &Address) -> Result<bool> {
        let state = self.state.lock().await;
        let game = state
            .game(&game_id)
            .ok_or(TandaError::GameNotFound(game_id))?;

        match state.player(game_id, player) {
            Some(record) => game.has_played_in_period(record, game.period_at(self.clock.now())?),
            None => Ok(false),
        }
    }

    pub async fn owner(&self) -> Address {
        self.state.lock().await.owner().clone()
    }
}
