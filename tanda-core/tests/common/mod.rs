#![allow(dead_code)]
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;
use tanda_core::{
    Address, Amount, BigUint, GameId, InMemoryTokenLedger, ManualClock, MockOracle, Tanda,
    TandaConfig, TokenId,
};

pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);
pub const STARTING_BALANCE: Amount = 1_000_000;

/// Word whose legacy shuffle of five players is [1, 3, 4, 2, 0].
pub const WORD: u64 = 12345;

pub struct Harness {
    pub tanda: Tanda,
    pub oracle: Arc<MockOracle>,
    pub tokens: Arc<InMemoryTokenLedger>,
    pub clock: Arc<ManualClock>,
    pub players: Vec<Address>,
    pub token: TokenId,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
}

pub fn owner() -> Address {
    Address::from("owner")
}

pub fn escrow() -> Address {
    Address::from("escrow")
}

impl Harness {
    pub fn new(player_count: usize) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let oracle = Arc::new(MockOracle::with_seed(7));
        let tokens = Arc::new(InMemoryTokenLedger::new());
        let clock = Arc::new(ManualClock::new(start()));
        let token = TokenId::from("usdc");

        let players: Vec<Address> = (0..player_count)
            .map(|i| Address::new(format!("player-{}", i)))
            .collect();
        for player in &players {
            tokens.mint(&token, player, STARTING_BALANCE).unwrap();
            tokens.approve(&token, player, &escrow(), STARTING_BALANCE);
        }

        let config = TandaConfig::new(owner(), escrow());
        let tanda = Tanda::new(config, oracle.clone(), tokens.clone(), clock.clone()).unwrap();

        Self {
            tanda,
            oracle,
            tokens,
            clock,
            players,
            token,
        }
    }

    pub async fn start_game(&self, amount: Amount, frequency: Duration) -> GameId {
        self.tanda
            .start_game(frequency, amount, self.players.clone(), self.token.clone())
            .await
            .unwrap()
    }

    pub async fn ready_game(&self, amount: Amount, frequency: Duration) -> GameId {
        self.ready_game_in(&self.token, amount, frequency).await
    }

    /// Ready game denominated in `token`. Players are funded and approved for it.
    pub async fn ready_game_in(&self, token: &TokenId, amount: Amount, frequency: Duration) -> GameId {
        if *token != self.token {
            for player in &self.players {
                self.tokens.mint(token, player, STARTING_BALANCE).unwrap();
                self.tokens.approve(token, player, &escrow(), STARTING_BALANCE);
            }
        }

        let game_id = self
            .tanda
            .start_game(frequency, amount, self.players.clone(), token.clone())
            .await
            .unwrap();
        self.tanda
            .fulfill_random_words(game_id, &[BigUint::from(WORD)])
            .await
            .unwrap();
        game_id
    }

    pub async fn fund_current_period(&self, game_id: GameId, amount: Amount) {
        for player in &self.players {
            self.tanda.deposit(player, game_id, amount).await.unwrap();
        }
    }

    pub fn balance(&self, address: &Address) -> Amount {
        self.tokens.balance_of(&self.token, address)
    }
}
