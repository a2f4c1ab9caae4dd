pub mod mock;

pub use mock::MockOracle;

use crate::config::TandaConfig;
use crate::error::Result;
use crate::types::GameId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters sent with every randomness request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomnessRequest {
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
}

impl RandomnessRequest {
    pub fn from_config(config: &TandaConfig) -> Self {
        Self {
            key_hash: config.key_hash,
            subscription_id: config.subscription_id,
            request_confirmations: config.request_confirmations,
            callback_gas_limit: config.callback_gas_limit,
            num_words: config.num_words,
        }
    }
}

/// External randomness service.
///
/// The returned request id doubles as the game id. The oracle answers each
/// request at most once through [`crate::Tanda::fulfill_random_words`].
#[async_trait]
pub trait RandomnessOracle: Send + Sync {
    async fn request_random_words(&self, request: &RandomnessRequest) -> Result<GameId>;
}
