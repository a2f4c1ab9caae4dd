use crate::types::{Address, Amount, GameId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TandaError>;

#[derive(Error, Debug)]
pub enum TandaError {
    #[error("Frequency must be greater than zero")]
    InvalidFrequency,

    #[error("Game not ready")]
    GameNotReady,

    #[error("Game ended")]
    GameEnded,

    #[error("Caller is not a player of this game")]
    NotAPlayer,

    #[error("Deposit amount does not match the game amount")]
    InvalidAmount,

    #[error("Player already deposited in the current period")]
    AlreadyDepositedInCurrentPeriod,

    #[error("Not all players have deposited for this period")]
    NotAllPlayersHaveDeposited,

    #[error("It is not this player's turn to withdraw")]
    IsNotPlayerTurnToWithdraw,

    #[error("Unauthorized: caller is not the owner")]
    Unauthorized,

    #[error("Turn order already committed for game {0}")]
    TurnOrderAlreadyCommitted(GameId),

    #[error("No pending randomness request with id {0}")]
    UnknownRequest(GameId),

    #[error("Randomness response for game {0} carried no words")]
    MissingRandomWord(GameId),

    #[error("Game {0} already exists")]
    GameAlreadyExists(GameId),

    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    #[error("Duplicate player in game: {0}")]
    DuplicatePlayer(Address),

    #[error("Query time is before the game start")]
    BeforeStart,

    #[error("Insufficient balance: need {need}, have {available}")]
    InsufficientBalance { need: Amount, available: Amount },

    #[error("Insufficient allowance: need {need}, have {available}")]
    InsufficientAllowance { need: Amount, available: Amount },

    #[error("Randomness oracle error: {0}")]
    Oracle(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TandaError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn oracle(msg: impl Into<String>) -> Self {
        Self::Oracle(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
