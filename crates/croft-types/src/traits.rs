//! Collaborator seams consumed by the farm engine.
//!
//! The engine treats permission checking, base-asset custody, and the
//! reward-asset ledger as external collaborators behind these traits, so
//! alternative backends can be substituted without touching the
//! accounting core.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount};

/// A capability required to invoke a privileged operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May trigger a reward distribution round.
    DistributeRewards,
    /// May mint new reward-asset units.
    MintRewardToken,
}

/// Permission backend consulted before privileged operations.
pub trait CapabilityCheck {
    /// Whether `caller` currently holds `capability`.
    fn has_capability(&self, caller: &Address, capability: Capability) -> bool;
}

/// Error raised by asset-moving collaborators.
///
/// A collaborator failure aborts the whole calling operation; the engine
/// propagates it unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The source account cannot cover the transfer.
    #[error("insufficient funds: account holds {available}, transfer needs {required}")]
    InsufficientFunds {
        /// Balance currently held by the source account.
        available: Amount,
        /// Amount the transfer requires.
        required: Amount,
    },

    /// Arithmetic overflow in a balance update.
    #[error("arithmetic overflow in balance update")]
    Overflow,
}

/// Transport for the base asset participants stake.
pub trait BaseAssetVault {
    /// Move `amount` base-asset units from `from` into the engine's custody.
    fn transfer_in(&mut self, from: &Address, amount: Amount) -> Result<(), TransferError>;

    /// Move `amount` base-asset units out of the engine's custody to `to`.
    fn transfer_out(&mut self, to: &Address, amount: Amount) -> Result<(), TransferError>;
}

/// Ledger for the reward asset.
pub trait RewardLedger {
    /// Move `amount` reward-asset units from the engine's pre-funded
    /// account `engine` to `to`.
    fn credit_balance(
        &mut self,
        engine: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TransferError>;
}
