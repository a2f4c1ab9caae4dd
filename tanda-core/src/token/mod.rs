pub mod memory;

pub use memory::InMemoryTokenLedger;

use crate::error::Result;
use crate::types::{Address, Amount, TokenId};
use async_trait::async_trait;

/// Fungible-token transfer primitive used to move value into and out of escrow.
///
/// A failed transfer must leave balances untouched; the caller then discards
/// the enclosing operation.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Pull `amount` from `from` to `to`, spending `spender`'s allowance.
    async fn transfer_from(
        &self,
        token: &TokenId,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()>;

    /// Push `amount` held by `from` to `to`.
    async fn transfer(
        &self,
        token: &TokenId,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()>;
}
