use crate::clock::period_index;
use crate::error::{Result, TandaError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Token units, the smallest indivisible denomination of a token.
pub type Amount = u64;

/// A participant, the protocol owner or the escrow holder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier of the token a game is denominated in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Game identifier. Equal to the randomness request id issued by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(u64);

impl GameId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub start_date: DateTime<Utc>,
    pub frequency: Duration,
    pub amount: Amount,
    pub token: TokenId,
    pub ready: bool,
    pub players: Vec<Address>,
}

impl Game {
    pub fn player_count(&self) -> u64 {
        self.players.len() as u64
    }

    /// Period index of `at` within this game.
    pub fn period_at(&self, at: DateTime<Utc>) -> Result<u64> {
        period_index(self.start_date, self.frequency, at)
    }

    /// A game ends once its period index reaches the number of players, and never restarts.
    pub fn is_ended_at(&self, at: DateTime<Utc>) -> Result<bool> {
        Ok(self.period_at(at)? >= self.player_count())
    }

    /// Prize a period must hold before its turn holder may claim it.
    pub fn fully_funded_prize(&self) -> Result<Amount> {
        self.amount
            .checked_mul(self.player_count())
            .ok_or(TandaError::ArithmeticOverflow)
    }

    pub fn has_played_in_period(&self, record: &PlayerRecord, period: u64) -> Result<bool> {
        match record.last_played {
            Some(last) => Ok(self.period_at(last)? == period),
            None => Ok(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub is_playing: bool,
    pub last_played: Option<DateTime<Utc>>,
}

impl PlayerRecord {
    pub fn registered() -> Self {
        Self {
            is_playing: true,
            last_played: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub player: Address,
    pub prize: Amount,
}
