use crate::error::{Result, TandaError};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::time::Duration;

/// Source of the current time for every time-dependent operation.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used by simulations and tests.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.write() = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write();
        match chrono::Duration::from_std(by)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
        {
            Some(next) => *now = next,
            None => tracing::warn!("Manual clock cannot advance by {:?}", by),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}

/// Index of the period containing `now`, counting whole `frequency` windows since `start`.
pub fn period_index(start: DateTime<Utc>, frequency: Duration, now: DateTime<Utc>) -> Result<u64> {
    if frequency.is_zero() {
        return Err(TandaError::InvalidFrequency);
    }

    let elapsed = (now - start)
        .to_std()
        .map_err(|_| TandaError::BeforeStart)?;

    u64::try_from(elapsed.as_nanos() / frequency.as_nanos())
        .map_err(|_| TandaError::ArithmeticOverflow)
}
