use crate::types::{Address, Amount, GameId, TokenId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 256;

/// Notifications emitted by successful operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TandaEvent {
    GameStarted {
        game_id: GameId,
        frequency: Duration,
        token: TokenId,
        amount: Amount,
        players: Vec<Address>,
    },
    TurnOrderCommitted {
        game_id: GameId,
        order: Vec<Address>,
    },
    PlayerDeposited {
        game_id: GameId,
        player: Address,
        period: u64,
        amount: Amount,
    },
    PrizeClaimed {
        game_id: GameId,
        player: Address,
        period: u64,
        amount: Amount,
    },
    RevenueWithdrawn {
        token: TokenId,
        owner: Address,
        amount: Amount,
    },
    OwnershipTransferred {
        previous: Address,
        new: Address,
    },
}

pub struct EventBus {
    sender: broadcast::Sender<TandaEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TandaEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, events: Vec<TandaEvent>) {
        for event in events {
            tracing::debug!("Publishing event {:?}", event);
            // no subscribers is fine
            let _ = self.sender.send(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
