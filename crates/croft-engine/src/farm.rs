//! The farm facade.
//!
//! Wires the staker registry, the reward pool, and the collaborator
//! seams into the deposit / withdraw / distribute operations. The facade
//! is a single logical state machine: every mutating operation takes
//! `&mut self`, so the borrow checker enforces the serialization the
//! accounting requires, and each call either fully commits or returns
//! before state changes. Callers sharing a farm across threads wrap it
//! in a mutex at the composition root.

use croft_access::grants::require;
use croft_access::Capability;
use croft_registry::registry::StakerRegistry;
use croft_registry::RegistryError;
use croft_types::events::FarmEvent;
use croft_types::traits::{BaseAssetVault, CapabilityCheck, RewardLedger};
use croft_types::{short_hex, Address, Amount};

use crate::config::FarmConfig;
use crate::distribution::proportional_shares;
use crate::pool::RewardPool;
use crate::{EngineError, Result};

/// Staking farm engine.
#[derive(Clone, Debug)]
pub struct Farm {
    /// The farm's own account in collaborator ledgers.
    address: Address,
    config: FarmConfig,
    registry: StakerRegistry,
    pool: RewardPool,
    events: Vec<FarmEvent>,
}

impl Farm {
    /// Create a farm whose account in collaborator ledgers is `address`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfig`] if the configuration fails validation
    pub fn new(address: Address, config: FarmConfig) -> Result<Self> {
        config.validate()?;
        let registry = StakerRegistry::new(config.min_deposit());
        let pool = RewardPool::new(config.pool_capacity());
        Ok(Self {
            address,
            config,
            registry,
            pool,
            events: Vec::new(),
        })
    }

    /// Lock `amount` base-asset units for `staker`.
    ///
    /// The vault transfer and the bookkeeping commit or fail together:
    /// the minimum is checked before any funds move, and if the registry
    /// rejects the deposit after the transfer landed, the transfer is
    /// returned to the staker.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::BelowMinimum`] if `amount` is under the minimum
    /// - [`TransferError::InsufficientFunds`](croft_types::traits::TransferError::InsufficientFunds)
    ///   if the staker cannot fund the transfer
    pub fn deposit(
        &mut self,
        vault: &mut impl BaseAssetVault,
        staker: &Address,
        amount: Amount,
    ) -> Result<()> {
        let minimum = self.config.min_deposit();
        if amount < minimum {
            return Err(RegistryError::BelowMinimum { amount, minimum }.into());
        }

        vault.transfer_in(staker, amount)?;
        if let Err(err) = self.registry.deposit(staker, amount) {
            // Return the funds if bookkeeping rejects the deposit.
            vault.transfer_out(staker, amount)?;
            return Err(err.into());
        }

        self.events.push(FarmEvent::Deposited {
            staker: *staker,
            amount,
            total_staked: self.registry.stake_of(staker),
        });
        tracing::info!(
            staker = %short_hex(staker),
            amount,
            tvl = self.registry.total_value_locked(),
            "deposit accepted"
        );
        Ok(())
    }

    /// Withdraw `staker`'s full stake and accrued reward, returning
    /// `(stake, reward)`.
    ///
    /// Balances are zeroed and the staker leaves the set before any
    /// asset moves (zero-then-transfer), then the vault returns the
    /// stake and the reward ledger pays the accrued reward out of the
    /// farm's account.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NoStake`] if `staker` has nothing on record
    /// - [`TransferError`](croft_types::traits::TransferError) if a
    ///   collaborator cannot complete a payout
    pub fn withdraw(
        &mut self,
        vault: &mut impl BaseAssetVault,
        ledger: &mut impl RewardLedger,
        staker: &Address,
    ) -> Result<(Amount, Amount)> {
        let (stake, reward) = self.registry.withdraw(staker)?;
        vault.transfer_out(staker, stake)?;
        if reward > 0 {
            ledger.credit_balance(&self.address, staker, reward)?;
        }

        self.events.push(FarmEvent::Withdrawn {
            staker: *staker,
            stake,
            reward,
        });
        tracing::info!(
            staker = %short_hex(staker),
            stake,
            reward,
            "withdrawal complete"
        );
        Ok((stake, reward))
    }

    /// Distribute one reward round across the current staker set,
    /// returning the amount distributed.
    ///
    /// Requires [`Capability::DistributeRewards`]. The round amount is
    /// the configured round size clipped to the remaining pool. Shares
    /// are proportional to stake, the truncation remainder goes to the
    /// staker in slot 0, and the pool is debited by exactly the round
    /// amount. Stakes and membership are unchanged.
    ///
    /// # Errors
    ///
    /// - [`AccessError::Unauthorized`](croft_access::AccessError::Unauthorized)
    ///   if `caller` lacks the capability
    /// - [`EngineError::NoStakers`] if the staker set is empty
    /// - [`EngineError::PoolExhausted`] if the pool is fully allocated
    pub fn distribute_round(
        &mut self,
        access: &impl CapabilityCheck,
        caller: &Address,
    ) -> Result<Amount> {
        require(access, caller, Capability::DistributeRewards)?;
        if self.registry.is_empty() {
            return Err(EngineError::NoStakers);
        }

        let round_amount = self.pool.next_round(self.config.round_size())?;
        let stakes = self.registry.stakes();
        let credits =
            proportional_shares(&stakes, self.registry.total_value_locked(), round_amount)?;
        self.registry.credit_rewards(&credits)?;
        self.pool.debit(round_amount)?;

        self.events.push(FarmEvent::RewardsDistributed {
            round_amount,
            stakers: stakes.len(),
            pool_remaining: self.pool.remaining(),
        });
        tracing::info!(
            round_amount,
            stakers = stakes.len(),
            pool_remaining = self.pool.remaining(),
            "reward round distributed"
        );
        Ok(round_amount)
    }

    /// Current stake for `staker`; zero if not a member.
    pub fn stake_of(&self, staker: &Address) -> Amount {
        self.registry.stake_of(staker)
    }

    /// Current accrued reward for `staker`; zero if not a member.
    pub fn reward_of(&self, staker: &Address) -> Amount {
        self.registry.reward_of(staker)
    }

    /// Sum of all locked stakes.
    pub fn total_value_locked(&self) -> Amount {
        self.registry.total_value_locked()
    }

    /// Current staker count.
    pub fn staker_count(&self) -> usize {
        self.registry.len()
    }

    /// Staker at `position` in the index.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::OutOfRange`] if `position` is beyond the set
    pub fn staker_at(&self, position: usize) -> Result<Address> {
        Ok(self.registry.member_at(position)?)
    }

    /// Position of `staker` in the index.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotAMember`] if `staker` is not a member
    pub fn position_of(&self, staker: &Address) -> Result<usize> {
        Ok(self.registry.index_of(staker)?)
    }

    /// Reward-asset units still available for future rounds.
    pub fn pool_remaining(&self) -> Amount {
        self.pool.remaining()
    }

    /// Total reward-asset units ever made distributable.
    pub fn pool_capacity(&self) -> Amount {
        self.pool.capacity()
    }

    /// The farm's account in collaborator ledgers.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The active configuration.
    pub fn config(&self) -> &FarmConfig {
        &self.config
    }

    /// Registry access for invariant checks in tests.
    pub fn registry(&self) -> &StakerRegistry {
        &self.registry
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<FarmEvent> {
        std::mem::take(&mut self.events)
    }
}
