use crate::error::{Result, TandaError};
use crate::turn_order::ShuffleStrategy;
use crate::types::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub mod constants {
    use std::time::Duration;

    pub const REQUEST_CONFIRMATIONS: u16 = 3;
    pub const CALLBACK_GAS_LIMIT: u32 = 2_500_000;
    pub const NUM_WORDS: u32 = 1;
    pub const FEE_PERCENT: u64 = 2;
    pub const PENDING_ALERT_AFTER: Duration = Duration::from_secs(6 * 60 * 60);
    pub const DEFAULT_ESCROW: &str = "tanda-escrow";
    pub const DEFAULT_OWNER: &str = "tanda-owner";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TandaConfig {
    #[serde(with = "hex_key")]
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
    pub fee_percent: u64,
    pub escrow: Address,
    pub owner: Address,
    pub shuffle: ShuffleStrategy,
    pub pending_alert_after: Duration,
}

impl Default for TandaConfig {
    fn default() -> Self {
        Self {
            key_hash: [0u8; 32],
            subscription_id: 0,
            request_confirmations: constants::REQUEST_CONFIRMATIONS,
            callback_gas_limit: constants::CALLBACK_GAS_LIMIT,
            num_words: constants::NUM_WORDS,
            fee_percent: constants::FEE_PERCENT,
            escrow: Address::from(constants::DEFAULT_ESCROW),
            owner: Address::from(constants::DEFAULT_OWNER),
            shuffle: ShuffleStrategy::default(),
            pending_alert_after: constants::PENDING_ALERT_AFTER,
        }
    }
}

impl TandaConfig {
    pub fn new(owner: Address, escrow: Address) -> Self {
        Self {
            owner,
            escrow,
            ..Self::default()
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_words != constants::NUM_WORDS {
            return Err(TandaError::config(format!(
                "Exactly {} random word must be requested",
                constants::NUM_WORDS
            )));
        }

        if self.fee_percent > 100 {
            return Err(TandaError::config("Fee percent cannot exceed 100"));
        }

        if self.escrow.is_empty() {
            return Err(TandaError::config("Escrow address cannot be empty"));
        }

        if self.owner.is_empty() {
            return Err(TandaError::config("Owner address cannot be empty"));
        }

        if self.owner == self.escrow {
            return Err(TandaError::config("Owner and escrow must differ"));
        }

        Ok(())
    }
}

mod hex_key {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(encoded.trim_start_matches("0x"), &mut bytes)
            .map_err(serde::de::Error::custom)?;
        Ok(bytes)
    }
}
