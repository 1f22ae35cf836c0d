//! # croft-token
//!
//! The reward-asset ledger: account balances, capability-gated minting,
//! and transfers. The farm's reward pool is pre-funded by minting the
//! full pool capacity to the farm's account; withdrawals pay accrued
//! reward out of that account.
//!
//! ## Modules
//!
//! - [`ledger`] — Balances, mint, and transfer

pub mod ledger;

use croft_access::AccessError;
use croft_types::traits::TransferError;

/// Error types for reward-token operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Minting attempted without the mint capability.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// A balance move failed.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

/// Convenience result type for reward-token operations.
pub type Result<T> = std::result::Result<T, TokenError>;
