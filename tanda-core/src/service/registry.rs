use super::Tanda;
use crate::error::{Result, TandaError};
use crate::events::TandaEvent;
use crate::ledger::Journal;
use crate::oracle::RandomnessRequest;
use crate::turn_order::assign_turns;
use crate::types::{Address, Amount, Game, GameId, PlayerRecord, TokenId, Turn};
use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use std::collections::HashSet;
use std::time::Duration;

/// A game waiting for its random word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTurnOrder {
    pub game_id: GameId,
    pub requested_at: DateTime<Utc>,
}

impl Tanda {
    /// Register a new game and request the random word that will order its turns.
    ///
    /// The game is not playable until [`Tanda::fulfill_random_words`] delivers
    /// that word. If the oracle never answers, the game stays pending.
    pub async fn start_game(
        &self,
        frequency: Duration,
        amount: Amount,
        players: Vec<Address>,
        token: TokenId,
    ) -> Result<GameId> {
        if frequency.is_zero() {
            return Err(TandaError::InvalidFrequency);
        }

        // A zero threshold would let the turn holder claim an unfunded period repeatedly.
        if amount == 0 {
            return Err(TandaError::InvalidAmount);
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = players.iter().find(|player| !seen.insert(*player)) {
            return Err(TandaError::DuplicatePlayer(duplicate.clone()));
        }

        // Held across the oracle call so a callback cannot overtake registration.
        let mut state = self.state.lock().await;
        let pending = self.request_turn_order().await?;
        let game_id = pending.game_id;

        if state.game(&game_id).is_some() {
            return Err(TandaError::GameAlreadyExists(game_id));
        }

        let mut journal = Journal::new();
        for player in &players {
            state.put_player(game_id, player.clone(), PlayerRecord::registered(), &mut journal);
        }
        state.put_game(
            Game {
                id: game_id,
                start_date: pending.requested_at,
                frequency,
                amount,
                token: token.clone(),
                ready: false,
                players: players.clone(),
            },
            &mut journal,
        );
        journal.emit(TandaEvent::GameStarted {
            game_id,
            frequency,
            token: token.clone(),
            amount,
            players,
        });

        tracing::info!(
            "Game {} started: {} {} every {:?}, waiting for turn order",
            game_id,
            amount,
            token,
            frequency
        );
        self.conclude(&mut state, journal, Ok(game_id))
    }

    async fn request_turn_order(&self) -> Result<PendingTurnOrder> {
        let request = RandomnessRequest::from_config(&self.config);
        let game_id = self.oracle.request_random_words(&request).await?;

        Ok(PendingTurnOrder {
            game_id,
            requested_at: self.clock.now(),
        })
    }

    /// Oracle callback. Only the first word is used.
    pub async fn fulfill_random_words(&self, request_id: GameId, words: &[BigUint]) -> Result<Vec<Address>> {
        let word = words
            .first()
            .ok_or(TandaError::MissingRandomWord(request_id))?;
        self.commit_turn_order(request_id, word).await
    }

    /// Shuffle the players with `word`, assign one period to each and open the game.
    ///
    /// Succeeds at most once per game; replays are rejected.
    pub async fn commit_turn_order(&self, game_id: GameId, word: &BigUint) -> Result<Vec<Address>> {
        let mut state = self.state.lock().await;
        let game = state
            .game(&game_id)
            .cloned()
            .ok_or(TandaError::UnknownRequest(game_id))?;

        if game.ready {
            return Err(TandaError::TurnOrderAlreadyCommitted(game_id));
        }

        let order = assign_turns(&game.players, word, self.config.shuffle);

        let mut journal = Journal::new();
        for (period, player) in order.iter().enumerate() {
            state.put_turn(
                game_id,
                period as u64,
                Turn {
                    player: player.clone(),
                    prize: 0,
                },
                &mut journal,
            );
        }
        state.put_game(Game { ready: true, ..game }, &mut journal);
        journal.emit(TandaEvent::TurnOrderCommitted {
            game_id,
            order: order.clone(),
        });

        tracing::info!("Game {} turn order committed, game is ready", game_id);
        self.conclude(&mut state, journal, Ok(order))
    }

    /// Games still waiting for their random word.
    pub async fn pending_games(&self) -> Vec<PendingTurnOrder> {
        let state = self.state.lock().await;
        let mut pending: Vec<PendingTurnOrder> = state
            .games()
            .filter(|game| !game.ready)
            .map(|game| PendingTurnOrder {
                game_id: game.id,
                requested_at: game.start_date,
            })
            .collect();
        pending.sort_by_key(|p| p.game_id);
        pending
    }

    /// Pending games older than `pending_alert_after`. Each one is logged as a warning.
    pub async fn stale_pending_games(&self) -> Vec<PendingTurnOrder> {
        let now = self.clock.now();
        let threshold = self.config.pending_alert_after;

        let stale: Vec<PendingTurnOrder> = self
            .pending_games()
            .await
            .into_iter()
            .filter(|pending| {
                (now - pending.requested_at)
                    .to_std()
                    .map_or(false, |waited| waited > threshold)
            })
            .collect();

        for pending in &stale {
            tracing::warn!(
                "Game {} has waited since {} for randomness",
                pending.game_id,
                pending.requested_at
            );
        }

        stale
    }
}
