//! # croft-registry
//!
//! The staker set for the Croft farm: one record per address with nonzero
//! stake, a dense index with O(1) membership and removal, and the
//! total-value-locked sum the distribution engine divides by.
//!
//! ## Modules
//!
//! - [`index`] — Dense staker index with swap-remove semantics
//! - [`registry`] — Staker records and TVL accounting

pub mod index;
pub mod registry;

use croft_types::Amount;

/// Error types for registry operations.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// Deposit amount under the minimum threshold.
    #[error("deposit of {amount} is below the minimum of {minimum}")]
    BelowMinimum {
        /// The rejected deposit amount.
        amount: Amount,
        /// The configured minimum deposit.
        minimum: Amount,
    },

    /// Withdrawal attempted with no stake on record.
    #[error("no stake to withdraw")]
    NoStake,

    /// Position lookup for an address not currently staking.
    #[error("address is not in the staker set")]
    NotAMember,

    /// Positional lookup beyond the current staker count.
    #[error("position {position} is out of range for {len} stakers")]
    OutOfRange {
        /// The requested position.
        position: usize,
        /// The current staker count.
        len: usize,
    },

    /// Arithmetic overflow in stake accounting.
    #[error("arithmetic overflow in stake accounting")]
    Overflow,
}

/// Convenience result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
