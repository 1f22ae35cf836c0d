//! Staker records and total-value-locked accounting.
//!
//! One [`StakerRecord`] exists per address with nonzero stake. Records are
//! created on first deposit, grown by repeat deposits and reward credits,
//! and destroyed on withdrawal. `total_value_locked` always equals the sum
//! of all recorded stakes; [`StakerRegistry::check_invariants`] verifies
//! this and the index bijection for tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use croft_types::{short_hex, Address, Amount};

use crate::index::StakerIndex;
use crate::{RegistryError, Result};

/// Stake and accrued reward for one active staker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakerRecord {
    /// Locked base-asset units. Positive while the record exists.
    pub staked_amount: Amount,
    /// Reward-asset units credited by distribution rounds, paid out on
    /// withdrawal.
    pub accrued_reward: Amount,
}

/// Structural invariant violation found by [`StakerRegistry::check_invariants`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Human-readable description of the violated invariant.
    pub detail: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "registry invariant violated: {}", self.detail)
    }
}

/// The staker set: records, dense index, and the locked total.
#[derive(Clone, Debug)]
pub struct StakerRegistry {
    records: HashMap<Address, StakerRecord>,
    index: StakerIndex,
    total_value_locked: Amount,
    min_deposit: Amount,
}

impl StakerRegistry {
    /// Create an empty registry enforcing `min_deposit` per deposit.
    pub fn new(min_deposit: Amount) -> Self {
        Self {
            records: HashMap::new(),
            index: StakerIndex::new(),
            total_value_locked: 0,
            min_deposit,
        }
    }

    /// Record a deposit for `staker`.
    ///
    /// A first deposit creates the record and appends the staker to the
    /// index; a repeat deposit grows the existing stake in place, leaving
    /// membership and position untouched. Nothing is committed unless
    /// every check passes.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::BelowMinimum`] if `amount` is under the minimum
    /// - [`RegistryError::Overflow`] on arithmetic overflow
    pub fn deposit(&mut self, staker: &Address, amount: Amount) -> Result<()> {
        if amount < self.min_deposit {
            return Err(RegistryError::BelowMinimum {
                amount,
                minimum: self.min_deposit,
            });
        }

        let current = self.records.get(staker).map_or(0, |r| r.staked_amount);
        let new_stake = current.checked_add(amount).ok_or(RegistryError::Overflow)?;
        let new_tvl = self
            .total_value_locked
            .checked_add(amount)
            .ok_or(RegistryError::Overflow)?;

        let record = self.records.entry(*staker).or_insert(StakerRecord {
            staked_amount: 0,
            accrued_reward: 0,
        });
        record.staked_amount = new_stake;
        self.total_value_locked = new_tvl;
        self.index.insert(staker);

        tracing::trace!(
            staker = %short_hex(staker),
            amount,
            new_stake,
            tvl = self.total_value_locked,
            "stake deposited"
        );
        Ok(())
    }

    /// Remove `staker` entirely, returning `(stake, accrued_reward)`.
    ///
    /// The record is destroyed and the staker leaves the index before the
    /// caller moves any assets, so a re-entrant second withdrawal cannot
    /// observe stale balances.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NoStake`] if there is no record for `staker`
    pub fn withdraw(&mut self, staker: &Address) -> Result<(Amount, Amount)> {
        let record = self
            .records
            .get(staker)
            .cloned()
            .ok_or(RegistryError::NoStake)?;
        let new_tvl = self
            .total_value_locked
            .checked_sub(record.staked_amount)
            .ok_or(RegistryError::Overflow)?;

        self.index.remove(staker)?;
        self.records.remove(staker);
        self.total_value_locked = new_tvl;

        tracing::debug!(
            staker = %short_hex(staker),
            stake = record.staked_amount,
            reward = record.accrued_reward,
            "staker withdrawn"
        );
        Ok((record.staked_amount, record.accrued_reward))
    }

    /// Credit distribution shares to multiple stakers atomically: every
    /// credit is validated before any record is touched.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotAMember`] if a credited address has no record
    /// - [`RegistryError::Overflow`] on arithmetic overflow
    pub fn credit_rewards(&mut self, credits: &[(Address, Amount)]) -> Result<()> {
        for (staker, share) in credits {
            let record = self.records.get(staker).ok_or(RegistryError::NotAMember)?;
            record
                .accrued_reward
                .checked_add(*share)
                .ok_or(RegistryError::Overflow)?;
        }
        for (staker, share) in credits {
            if let Some(record) = self.records.get_mut(staker) {
                // Validated above; saturation cannot engage.
                record.accrued_reward = record.accrued_reward.saturating_add(*share);
                tracing::trace!(staker = %short_hex(staker), share, "reward credited");
            }
        }
        Ok(())
    }

    /// Current stake for `staker`; zero if not a member.
    pub fn stake_of(&self, staker: &Address) -> Amount {
        self.records.get(staker).map_or(0, |r| r.staked_amount)
    }

    /// Current accrued reward for `staker`; zero if not a member.
    pub fn reward_of(&self, staker: &Address) -> Amount {
        self.records.get(staker).map_or(0, |r| r.accrued_reward)
    }

    /// Sum of all recorded stakes.
    pub fn total_value_locked(&self) -> Amount {
        self.total_value_locked
    }

    /// Current staker count.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the staker set is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Position of `staker` in the index.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotAMember`] if `staker` is not a member
    pub fn index_of(&self, staker: &Address) -> Result<usize> {
        self.index.index_of(staker)
    }

    /// Staker at `position`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::OutOfRange`] if `position` is beyond the set
    pub fn member_at(&self, position: usize) -> Result<Address> {
        self.index.member_at(position)
    }

    /// Members in index order.
    pub fn members(&self) -> &[Address] {
        self.index.members()
    }

    /// Snapshot of `(address, stake)` pairs in index order.
    pub fn stakes(&self) -> Vec<(Address, Amount)> {
        self.index
            .members()
            .iter()
            .map(|addr| (*addr, self.stake_of(addr)))
            .collect()
    }

    /// The minimum accepted deposit.
    pub fn min_deposit(&self) -> Amount {
        self.min_deposit
    }

    /// Verify structural invariants, returning the first violation found.
    ///
    /// Exercised by tests after mutation sequences; not part of any hot
    /// path.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantViolation> {
        if self.records.len() != self.index.len() {
            return Err(InvariantViolation {
                detail: format!(
                    "{} records but {} index entries",
                    self.records.len(),
                    self.index.len()
                ),
            });
        }

        let mut sum: Amount = 0;
        for (addr, record) in &self.records {
            if record.staked_amount == 0 {
                return Err(InvariantViolation {
                    detail: format!("zero stake on record for {}", short_hex(addr)),
                });
            }
            if !self.index.contains(addr) {
                return Err(InvariantViolation {
                    detail: format!("record for {} has no index entry", short_hex(addr)),
                });
            }
            sum = sum.saturating_add(record.staked_amount);
        }

        for (position, addr) in self.index.members().iter().enumerate() {
            if self.index.index_of(addr) != Ok(position) {
                return Err(InvariantViolation {
                    detail: format!("reverse map mismatch at position {position}"),
                });
            }
        }

        if sum != self.total_value_locked {
            return Err(InvariantViolation {
                detail: format!(
                    "stake sum {sum} != total value locked {}",
                    self.total_value_locked
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croft_types::ONE_TOKEN;

    const MIN_DEPOSIT: Amount = ONE_TOKEN / 10;

    fn addr(tag: u8) -> Address {
        [tag; 32]
    }

    fn registry() -> StakerRegistry {
        StakerRegistry::new(MIN_DEPOSIT)
    }

    #[test]
    fn test_first_deposit_creates_record() {
        let mut reg = registry();
        reg.deposit(&addr(1), ONE_TOKEN / 2).expect("deposit");

        assert_eq!(reg.stake_of(&addr(1)), ONE_TOKEN / 2);
        assert_eq!(reg.reward_of(&addr(1)), 0);
        assert_eq!(reg.total_value_locked(), ONE_TOKEN / 2);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.member_at(0).expect("position 0"), addr(1));
        reg.check_invariants().expect("invariants");
    }

    #[test]
    fn test_repeat_deposit_accumulates_in_place() {
        let mut reg = registry();
        reg.deposit(&addr(1), ONE_TOKEN / 2).expect("first");
        reg.deposit(&addr(2), ONE_TOKEN).expect("other");
        reg.deposit(&addr(1), ONE_TOKEN / 2).expect("second");

        assert_eq!(reg.stake_of(&addr(1)), ONE_TOKEN);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.index_of(&addr(1)).expect("member"), 0);
        assert_eq!(reg.total_value_locked(), 2 * ONE_TOKEN);
        reg.check_invariants().expect("invariants");
    }

    #[test]
    fn test_deposit_below_minimum_rejected() {
        let mut reg = registry();
        let err = reg.deposit(&addr(1), 0).expect_err("zero deposit");
        assert!(matches!(err, RegistryError::BelowMinimum { amount: 0, .. }));

        let err = reg
            .deposit(&addr(1), MIN_DEPOSIT - 1)
            .expect_err("under minimum");
        assert!(matches!(err, RegistryError::BelowMinimum { .. }));

        // State unchanged.
        assert_eq!(reg.total_value_locked(), 0);
        assert_eq!(reg.len(), 0);
        reg.check_invariants().expect("invariants");
    }

    #[test]
    fn test_deposit_at_exact_minimum_accepted() {
        let mut reg = registry();
        reg.deposit(&addr(1), MIN_DEPOSIT).expect("deposit");
        assert_eq!(reg.stake_of(&addr(1)), MIN_DEPOSIT);
    }

    #[test]
    fn test_withdraw_returns_stake_and_reward() {
        let mut reg = registry();
        reg.deposit(&addr(1), ONE_TOKEN).expect("deposit");
        reg.credit_rewards(&[(addr(1), 5 * ONE_TOKEN)])
            .expect("credit");

        let (stake, reward) = reg.withdraw(&addr(1)).expect("withdraw");
        assert_eq!(stake, ONE_TOKEN);
        assert_eq!(reward, 5 * ONE_TOKEN);

        assert_eq!(reg.stake_of(&addr(1)), 0);
        assert_eq!(reg.reward_of(&addr(1)), 0);
        assert_eq!(reg.total_value_locked(), 0);
        assert!(reg.is_empty());
        reg.check_invariants().expect("invariants");
    }

    #[test]
    fn test_withdraw_without_stake_rejected() {
        let mut reg = registry();
        let err = reg.withdraw(&addr(1)).expect_err("no stake");
        assert!(matches!(err, RegistryError::NoStake));
    }

    #[test]
    fn test_second_withdraw_rejected() {
        let mut reg = registry();
        reg.deposit(&addr(1), ONE_TOKEN).expect("deposit");
        reg.withdraw(&addr(1)).expect("first withdraw");

        let err = reg.withdraw(&addr(1)).expect_err("second withdraw");
        assert!(matches!(err, RegistryError::NoStake));
    }

    #[test]
    fn test_withdraw_leaves_other_stakers_untouched() {
        let mut reg = registry();
        reg.deposit(&addr(1), ONE_TOKEN).expect("deposit 1");
        reg.deposit(&addr(2), 2 * ONE_TOKEN).expect("deposit 2");
        reg.deposit(&addr(3), 3 * ONE_TOKEN).expect("deposit 3");
        reg.credit_rewards(&[
            (addr(1), 100),
            (addr(2), 200),
            (addr(3), 300),
        ])
        .expect("credit");

        reg.withdraw(&addr(2)).expect("withdraw");

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.stake_of(&addr(1)), ONE_TOKEN);
        assert_eq!(reg.reward_of(&addr(1)), 100);
        assert_eq!(reg.stake_of(&addr(3)), 3 * ONE_TOKEN);
        assert_eq!(reg.reward_of(&addr(3)), 300);
        assert_eq!(reg.total_value_locked(), 4 * ONE_TOKEN);
        let err = reg.index_of(&addr(2)).expect_err("gone");
        assert!(matches!(err, RegistryError::NotAMember));
        reg.check_invariants().expect("invariants");
    }

    #[test]
    fn test_credit_rewards_unknown_member_is_atomic() {
        let mut reg = registry();
        reg.deposit(&addr(1), ONE_TOKEN).expect("deposit");

        let err = reg
            .credit_rewards(&[(addr(1), 100), (addr(9), 50)])
            .expect_err("unknown member");
        assert!(matches!(err, RegistryError::NotAMember));

        // First credit must not have been applied.
        assert_eq!(reg.reward_of(&addr(1)), 0);
        reg.check_invariants().expect("invariants");
    }

    #[test]
    fn test_stakes_snapshot_in_index_order() {
        let mut reg = registry();
        reg.deposit(&addr(1), ONE_TOKEN).expect("deposit 1");
        reg.deposit(&addr(2), 2 * ONE_TOKEN).expect("deposit 2");

        let stakes = reg.stakes();
        assert_eq!(stakes, vec![(addr(1), ONE_TOKEN), (addr(2), 2 * ONE_TOKEN)]);
    }

    #[test]
    fn test_conservation_across_mixed_sequence() {
        let mut reg = registry();
        reg.deposit(&addr(1), ONE_TOKEN).expect("deposit");
        reg.deposit(&addr(2), 3 * ONE_TOKEN).expect("deposit");
        reg.deposit(&addr(1), ONE_TOKEN).expect("re-deposit");
        reg.withdraw(&addr(2)).expect("withdraw");
        reg.deposit(&addr(3), MIN_DEPOSIT).expect("deposit");

        let expected: Amount = reg
            .members()
            .iter()
            .map(|a| reg.stake_of(a))
            .sum();
        assert_eq!(reg.total_value_locked(), expected);
        reg.check_invariants().expect("invariants");
    }
}
