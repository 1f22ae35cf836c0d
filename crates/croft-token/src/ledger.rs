//! Balances, mint, and transfer for the reward asset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use croft_access::{grants::require, Capability, CapabilityCheck};
use croft_types::traits::{RewardLedger, TransferError};
use croft_types::{short_hex, Address, Amount};

use crate::Result;

/// Account-balance ledger for the reward asset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RewardToken {
    balances: HashMap<Address, Amount>,
    total_supply: Amount,
}

impl RewardToken {
    /// Create an empty ledger with zero supply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` new units to `to`.
    ///
    /// # Errors
    ///
    /// - [`AccessError::Unauthorized`](croft_access::AccessError::Unauthorized)
    ///   if `minter` lacks [`Capability::MintRewardToken`]
    /// - [`TransferError::Overflow`] on arithmetic overflow
    pub fn mint(
        &mut self,
        access: &impl CapabilityCheck,
        minter: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<()> {
        require(access, minter, Capability::MintRewardToken)?;

        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;

        self.balances.insert(*to, new_balance);
        self.total_supply = new_supply;

        tracing::info!(to = %short_hex(to), amount, "reward tokens minted");
        Ok(())
    }

    /// Move `amount` units from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`TransferError::InsufficientFunds`] if `from` cannot cover the move
    /// - [`TransferError::Overflow`] on arithmetic overflow
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<()> {
        Ok(self.transfer_inner(from, to, amount)?)
    }

    /// Current balance of `account`; zero if unknown.
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Total units ever minted.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    fn transfer_inner(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> std::result::Result<(), TransferError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                available,
                required: amount,
            });
        }

        let new_from = available - amount;
        let new_to = if to == from {
            available
        } else {
            self.balance_of(to)
                .checked_add(amount)
                .ok_or(TransferError::Overflow)?
        };

        self.balances.insert(*from, new_from);
        self.balances.insert(*to, new_to);
        Ok(())
    }
}

impl RewardLedger for RewardToken {
    fn credit_balance(
        &mut self,
        engine: &Address,
        to: &Address,
        amount: Amount,
    ) -> std::result::Result<(), TransferError> {
        self.transfer_inner(engine, to, amount)
    }
}
