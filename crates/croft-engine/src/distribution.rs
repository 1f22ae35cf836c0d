//! Proportional share computation for one reward round.
//!
//! Shares are computed to a resolution of [`SHARE_SCALE`]ths of the
//! round: a staker with stake `s` out of total `T` receives
//! `floor(s * SHARE_SCALE / T) * round / SHARE_SCALE`. Multiplication
//! happens before division, in 128-bit arithmetic, so no precision is
//! lost beyond the scale itself. Sub-scale dust plus any truncation loss
//! forms the remainder, which is credited entirely to the staker in
//! slot 0, so every round pays out exactly its full amount.

use croft_types::{Address, Amount};

use crate::{EngineError, Result};

/// Share resolution: rounds split in units of 1/1000.
pub const SHARE_SCALE: Amount = 1000;

/// Compute per-staker credits for one round.
///
/// `stakes` is the `(address, stake)` snapshot in index order, `total`
/// the sum of all stakes, `round_amount` the full quantity this round
/// pays out. The returned credits sum to exactly `round_amount`.
///
/// # Errors
///
/// - [`EngineError::NoStakers`] if `stakes` is empty or `total` is zero
/// - [`EngineError::Overflow`] on arithmetic overflow
pub fn proportional_shares(
    stakes: &[(Address, Amount)],
    total: Amount,
    round_amount: Amount,
) -> Result<Vec<(Address, Amount)>> {
    if stakes.is_empty() || total == 0 {
        return Err(EngineError::NoStakers);
    }

    let mut credits = Vec::with_capacity(stakes.len());
    let mut paid: Amount = 0;
    for (staker, stake) in stakes {
        let permille = stake
            .checked_mul(SHARE_SCALE)
            .ok_or(EngineError::Overflow)?
            / total;
        let share = permille
            .checked_mul(round_amount)
            .ok_or(EngineError::Overflow)?
            / SHARE_SCALE;
        paid = paid.checked_add(share).ok_or(EngineError::Overflow)?;
        credits.push((*staker, share));
    }

    // Truncation guarantees paid <= round_amount.
    let remainder = round_amount
        .checked_sub(paid)
        .ok_or(EngineError::Overflow)?;
    if remainder > 0 {
        if let Some((_, share)) = credits.first_mut() {
            *share = share.checked_add(remainder).ok_or(EngineError::Overflow)?;
        }
    }

    Ok(credits)
}
