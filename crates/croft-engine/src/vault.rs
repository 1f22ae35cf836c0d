//! In-memory base-asset vault.
//!
//! Stand-in for the external transport that delivers the base asset,
//! used in v1 and in tests. It tracks external account balances plus the
//! engine's custodial balance, and fails the whole calling operation
//! when a transfer cannot complete.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use croft_types::traits::{BaseAssetVault, TransferError};
use croft_types::{Address, Amount};

/// In-memory vault: external balances plus the engine's custody.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryVault {
    balances: HashMap<Address, Amount>,
    held: Amount,
}

impl InMemoryVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `account` with `amount` base-asset units (development and
    /// testing).
    pub fn fund(&mut self, account: &Address, amount: Amount) {
        let balance = self.balances.entry(*account).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// External balance of `account`; zero if unknown.
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Base-asset units currently in the engine's custody.
    pub fn held(&self) -> Amount {
        self.held
    }
}

impl BaseAssetVault for InMemoryVault {
    fn transfer_in(&mut self, from: &Address, amount: Amount) -> Result<(), TransferError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                available,
                required: amount,
            });
        }
        let new_held = self.held.checked_add(amount).ok_or(TransferError::Overflow)?;

        self.balances.insert(*from, available - amount);
        self.held = new_held;
        Ok(())
    }

    fn transfer_out(&mut self, to: &Address, amount: Amount) -> Result<(), TransferError> {
        if self.held < amount {
            return Err(TransferError::InsufficientFunds {
                available: self.held,
                required: amount,
            });
        }
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;

        self.held -= amount;
        self.balances.insert(*to, new_balance);
        Ok(())
    }
}
