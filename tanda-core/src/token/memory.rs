use crate::error::{Result, TandaError};
use crate::token::TokenLedger;
use crate::types::{Address, Amount, TokenId};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Books {
    balances: HashMap<(TokenId, Address), Amount>,
    // (token, owner, spender)
    allowances: HashMap<(TokenId, Address, Address), Amount>,
}

impl Books {
    fn balance(&self, token: &TokenId, holder: &Address) -> Amount {
        self.balances
            .get(&(token.clone(), holder.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn move_funds(&mut self, token: &TokenId, from: &Address, to: &Address, amount: Amount) -> Result<()> {
        let available = self.balance(token, from);
        if available < amount {
            return Err(TandaError::InsufficientBalance {
                need: amount,
                available,
            });
        }

        if from == to {
            return Ok(());
        }

        let credited = self
            .balance(token, to)
            .checked_add(amount)
            .ok_or(TandaError::ArithmeticOverflow)?;

        self.balances
            .insert((token.clone(), from.clone()), available - amount);
        self.balances.insert((token.clone(), to.clone()), credited);
        Ok(())
    }
}

/// Token ledger kept in process memory, with ERC-20 style allowances.
#[derive(Debug, Default)]
pub struct InMemoryTokenLedger {
    books: RwLock<Books>,
}

impl InMemoryTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&self, token: &TokenId, to: &Address, amount: Amount) -> Result<()> {
        let mut books = self.books.write();
        let balance = books
            .balance(token, to)
            .checked_add(amount)
            .ok_or(TandaError::ArithmeticOverflow)?;
        books.balances.insert((token.clone(), to.clone()), balance);
        Ok(())
    }

    pub fn approve(&self, token: &TokenId, owner: &Address, spender: &Address, amount: Amount) {
        self.books
            .write()
            .allowances
            .insert((token.clone(), owner.clone(), spender.clone()), amount);
    }

    pub fn balance_of(&self, token: &TokenId, holder: &Address) -> Amount {
        self.books.read().balance(token, holder)
    }

    pub fn allowance(&self, token: &TokenId, owner: &Address, spender: &Address) -> Amount {
        self.books
            .read()
            .allowances
            .get(&(token.clone(), owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl TokenLedger for InMemoryTokenLedger {
    async fn transfer_from(
        &self,
        token: &TokenId,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()> {
        let mut books = self.books.write();

        let key = (token.clone(), from.clone(), spender.clone());
        let allowed = books.allowances.get(&key).copied().unwrap_or(0);
        if allowed < amount {
            return Err(TandaError::InsufficientAllowance {
                need: amount,
                available: allowed,
            });
        }

        books.move_funds(token, from, to, amount)?;
        books.allowances.insert(key, allowed - amount);

        tracing::debug!("Pulled {} {} from {} to {}", amount, token, from, to);
        Ok(())
    }

    async fn transfer(
        &self,
        token: &TokenId,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()> {
        self.books.write().move_funds(token, from, to, amount)?;

        tracing::debug!("Pushed {} {} from {} to {}", amount, token, from, to);
        Ok(())
    }
}
