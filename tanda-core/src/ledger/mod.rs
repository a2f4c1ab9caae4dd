mod journal;

pub use journal::Journal;

use crate::types::{Address, Amount, Game, GameId, PlayerRecord, TokenId, Turn};
use journal::Undo;
use std::collections::HashMap;

/// All game, player, turn and revenue records.
///
/// Writers take a [`Journal`] and log the previous value of every slot they
/// touch, so a failed operation can be undone with [`LedgerState::rollback`].
#[derive(Debug)]
pub struct LedgerState {
    games: HashMap<GameId, Game>,
    players: HashMap<(GameId, Address), PlayerRecord>,
    turns: HashMap<(GameId, u64), Turn>,
    revenue: HashMap<TokenId, Amount>,
    owner: Address,
}

impl LedgerState {
    pub fn new(owner: Address) -> Self {
        Self {
            games: HashMap::new(),
            players: HashMap::new(),
            turns: HashMap::new(),
            revenue: HashMap::new(),
            owner,
        }
    }

    pub fn game(&self, id: &GameId) -> Option<&Game> {
        self.games.get(id)
    }

    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    pub fn player(&self, game_id: GameId, address: &Address) -> Option<&PlayerRecord> {
        self.players.get(&(game_id, address.clone()))
    }

    pub fn turn(&self, game_id: GameId, period: u64) -> Option<&Turn> {
        self.turns.get(&(game_id, period))
    }

    pub fn revenue(&self, token: &TokenId) -> Amount {
        self.revenue.get(token).copied().unwrap_or(0)
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn put_game(&mut self, game: Game, journal: &mut Journal) {
        let id = game.id;
        let previous = self.games.insert(id, game);
        journal.record(Undo::Game(id, previous));
    }

    pub fn put_player(
        &mut self,
        game_id: GameId,
        address: Address,
        record: PlayerRecord,
        journal: &mut Journal,
    ) {
        let key = (game_id, address);
        let previous = self.players.insert(key.clone(), record);
        journal.record(Undo::Player(key, previous));
    }

    pub fn put_turn(&mut self, game_id: GameId, period: u64, turn: Turn, journal: &mut Journal) {
        let key = (game_id, period);
        let previous = self.turns.insert(key, turn);
        journal.record(Undo::Turn(key, previous));
    }

    pub fn put_revenue(&mut self, token: TokenId, amount: Amount, journal: &mut Journal) {
        let previous = self.revenue.insert(token.clone(), amount);
        journal.record(Undo::Revenue(token, previous));
    }

    pub fn set_owner(&mut self, owner: Address, journal: &mut Journal) {
        let previous = std::mem::replace(&mut self.owner, owner);
        journal.record(Undo::Owner(previous));
    }

    /// Restore every slot the journal touched, newest first.
    pub fn rollback(&mut self, journal: Journal) {
        for undo in journal.undo.into_iter().rev() {
            match undo {
                Undo::Game(id, previous) => restore(&mut self.games, id, previous),
                Undo::Player(key, previous) => restore(&mut self.players, key, previous),
                Undo::Turn(key, previous) => restore(&mut self.turns, key, previous),
                Undo::Revenue(token, previous) => restore(&mut self.revenue, token, previous),
                Undo::Owner(previous) => self.owner = previous,
            }
        }
    }
}

fn restore<K: std::hash::Hash + Eq, V>(map: &mut HashMap<K, V>, key: K, previous: Option<V>) {
    match previous {
        Some(value) => {
            map.insert(key, value);
        }
        None => {
            map.remove(&key);
        }
    }
}
