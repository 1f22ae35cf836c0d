//! Observable ledger events.
//!
//! Events are recorded by the farm facade on successful state transitions
//! so a composition root can forward them to an outer surface. They are
//! observational only and never feed back into accounting.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount};

/// An observable ledger event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum FarmEvent {
    /// A staker locked base-asset units.
    Deposited {
        staker: Address,
        amount: Amount,
        /// The staker's total stake after this deposit.
        total_staked: Amount,
    },

    /// A staker withdrew stake and accrued reward.
    Withdrawn {
        staker: Address,
        stake: Amount,
        reward: Amount,
    },

    /// A reward round was distributed across the staker set.
    RewardsDistributed {
        round_amount: Amount,
        stakers: usize,
        pool_remaining: Amount,
    },
}
