use super::Tanda;
use crate::error::{Result, TandaError};
use crate::events::TandaEvent;
use crate::ledger::Journal;
use crate::types::{Address, Amount, GameId, TokenId, Turn};

/// Fee kept by the protocol on a prize, rounded down.
pub fn protocol_fee(prize: Amount, fee_percent: u64) -> Result<Amount> {
    let fee = u128::from(prize) * u128::from(fee_percent) / 100;
    Amount::try_from(fee).map_err(|_| TandaError::ArithmeticOverflow)
}

impl Tanda {
    /// Pay a fully funded period out to its turn holder, net of the protocol fee.
    /// Returns the amount sent to the caller.
    pub async fn claim_prize(&self, caller: &Address, game_id: GameId, period: u64) -> Result<Amount> {
        let mut state = self.state.lock().await;

        let turn = state
            .turn(game_id, period)
            .filter(|turn| &turn.player == caller)
            .cloned()
            .ok_or(TandaError::IsNotPlayerTurnToWithdraw)?;

        let game = state
            .game(&game_id)
            .cloned()
            .ok_or(TandaError::GameNotFound(game_id))?;

        if turn.prize != game.fully_funded_prize()? {
            return Err(TandaError::NotAllPlayersHaveDeposited);
        }

        let fee = protocol_fee(turn.prize, self.config.fee_percent)?;
        let payout = turn.prize - fee;
        let revenue = state
            .revenue(&game.token)
            .checked_add(fee)
            .ok_or(TandaError::ArithmeticOverflow)?;

        let mut journal = Journal::new();
        state.put_turn(game_id, period, Turn { prize: 0, ..turn }, &mut journal);
        state.put_revenue(game.token.clone(), revenue, &mut journal);
        journal.emit(TandaEvent::PrizeClaimed {
            game_id,
            player: caller.clone(),
            period,
            amount: payout,
        });

        let outcome = self
            .tokens
            .transfer(&game.token, &self.config.escrow, caller, payout)
            .await
            .map(|_| payout);

        if outcome.is_ok() {
            tracing::info!(
                "Player {} claimed {} {} from game {} period {} (fee {})",
                caller,
                payout,
                game.token,
                game_id,
                period,
                fee
            );
        }
        self.conclude(&mut state, journal, outcome)
    }

    /// Owner only. Sweep accumulated fees for each token to the owner.
    ///
    /// All-or-nothing: if any payout fails, payouts already made in this call
    /// are sent back to escrow and every balance is restored.
    pub async fn withdraw_revenue(&self, caller: &Address, tokens: &[TokenId]) -> Result<Vec<(TokenId, Amount)>> {
        let mut state = self.state.lock().await;
        if state.owner() != caller {
            return Err(TandaError::Unauthorized);
        }
        let owner = caller.clone();

        let mut journal = Journal::new();
        let mut withdrawals: Vec<(TokenId, Amount)> = Vec::new();
        for token in tokens {
            if withdrawals.iter().any(|(seen, _)| seen == token) {
                continue;
            }
            let balance = state.revenue(token);
            state.put_revenue(token.clone(), 0, &mut journal);
            if balance > 0 {
                journal.emit(TandaEvent::RevenueWithdrawn {
                    token: token.clone(),
                    owner: owner.clone(),
                    amount: balance,
                });
            }
            withdrawals.push((token.clone(), balance));
        }

        let escrow = &self.config.escrow;
        let mut paid: Vec<&(TokenId, Amount)> = Vec::new();
        let mut failure = None;
        for withdrawal in withdrawals.iter().filter(|(_, amount)| *amount > 0) {
            let (token, amount) = withdrawal;
            match self.tokens.transfer(token, escrow, &owner, *amount).await {
                Ok(()) => paid.push(withdrawal),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        let outcome = match failure {
            None => {
                tracing::info!("Owner {} withdrew revenue for {} token(s)", owner, paid.len());
                Ok(withdrawals.clone())
            }
            Some(e) => {
                for (token, amount) in paid {
                    if let Err(refund) = self.tokens.transfer(token, &owner, escrow, *amount).await {
                        tracing::error!(
                            "Could not return {} {} to escrow after failed withdrawal: {}",
                            amount,
                            token,
                            refund
                        );
                    }
                }
                Err(e)
            }
        };
        self.conclude(&mut state, journal, outcome)
    }

    /// Owner only. Hand the owner role to `new_owner`.
    pub async fn transfer_ownership(&self, caller: &Address, new_owner: Address) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.owner() != caller {
            return Err(TandaError::Unauthorized);
        }
        if new_owner.is_empty() || new_owner == self.config.escrow {
            return Err(TandaError::config("New owner must be a non-escrow address"));
        }

        let mut journal = Journal::new();
        state.set_owner(new_owner.clone(), &mut journal);
        journal.emit(TandaEvent::OwnershipTransferred {
            previous: caller.clone(),
            new: new_owner.clone(),
        });

        tracing::info!("Ownership transferred from {} to {}", caller, new_owner);
        self.conclude(&mut state, journal, Ok(()))
    }
}
