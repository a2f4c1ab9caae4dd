use crate::error::{Result, TandaError};
use crate::oracle::{RandomnessOracle, RandomnessRequest};
use crate::types::GameId;
use async_trait::async_trait;
use num_bigint::BigUint;
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};

/// In-process oracle issuing sequential request ids starting at 1.
pub struct MockOracle {
    next_id: AtomicU64,
    requests: RwLock<Vec<(GameId, RandomnessRequest)>>,
    rng: Mutex<StdRng>,
    failure: RwLock<Option<String>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            requests: RwLock::new(Vec::new()),
            rng: Mutex::new(rng),
            failure: RwLock::new(None),
        }
    }

    /// Make every following request fail with `reason`, or succeed again with `None`.
    pub fn set_failure(&self, reason: Option<String>) {
        *self.failure.write() = reason;
    }

    pub fn requests(&self) -> Vec<(GameId, RandomnessRequest)> {
        self.requests.read().clone()
    }

    /// Draw a fresh 256-bit word to answer a request with.
    pub fn draw_word(&self) -> BigUint {
        let mut bytes = [0u8; 32];
        self.rng.lock().fill_bytes(&mut bytes);
        BigUint::from_bytes_be(&bytes)
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RandomnessOracle for MockOracle {
    async fn request_random_words(&self, request: &RandomnessRequest) -> Result<GameId> {
        if let Some(reason) = self.failure.read().clone() {
            return Err(TandaError::oracle(reason));
        }

        let id = GameId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.requests.write().push((id, request.clone()));

        tracing::debug!("Oracle accepted randomness request {}", id);
        Ok(id)
    }
}
