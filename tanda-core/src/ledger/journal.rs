use crate::events::TandaEvent;
use crate::types::{Address, Amount, Game, GameId, PlayerRecord, TokenId, Turn};

/// Prior value of one ledger slot, restored on rollback.
#[derive(Debug, Clone)]
pub(crate) enum Undo {
    Game(GameId, Option<Game>),
    Player((GameId, Address), Option<PlayerRecord>),
    Turn((GameId, u64), Option<Turn>),
    Revenue(TokenId, Option<Amount>),
    Owner(Address),
}

/// Undo log and pending notifications of one in-flight operation.
///
/// Events are only published once the operation commits; a rolled back
/// journal drops them.
#[derive(Debug, Default)]
pub struct Journal {
    pub(crate) undo: Vec<Undo>,
    events: Vec<TandaEvent>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: TandaEvent) {
        self.events.push(event);
    }

    pub(crate) fn record(&mut self, undo: Undo) {
        self.undo.push(undo);
    }

    pub fn into_events(self) -> Vec<TandaEvent> {
        self.events
    }
}
