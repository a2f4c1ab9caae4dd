//! Tanda - game state machine for rotating savings pools
//!
//! A fixed group of players each deposit the same amount every period into
//! a shared pool. A verifiably random, pre-committed turn order decides which
//! player may withdraw each period's pool, net of a protocol fee.

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod ledger;
pub mod oracle;
pub mod service;
pub mod token;
pub mod turn_order;
pub mod types;

pub use clock::{period_index, Clock, ManualClock, SystemClock};
pub use config::TandaConfig;
pub use error::{Result, TandaError};
pub use events::TandaEvent;
pub use oracle::{MockOracle, RandomnessOracle, RandomnessRequest};
pub use service::{protocol_fee, PendingTurnOrder, Tanda};
pub use token::{InMemoryTokenLedger, TokenLedger};
pub use turn_order::{assign_turns, ShuffleStrategy};
pub use types::{Address, Amount, Game, GameId, PlayerRecord, TokenId, Turn};

pub use num_bigint::BigUint;
