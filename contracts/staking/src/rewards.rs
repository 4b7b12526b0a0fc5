//! Reward arithmetic. Pure functions, no storage access.

use common::{annual_interest, elapsed};

use crate::positions::FlexStake;

/// Reward owed by a lock position, fixed at stake time:
/// simple annual interest over the whole lock period.
pub fn lock_reward(amount: i128, rate: i128, lock_period: u64) -> Option<i128> {
    annual_interest(amount, rate, lock_period)
}

/// Accrual a flex position has earned since its checkpoint, at its own rate.
pub fn pending_flex(stake: &FlexStake, now: u64) -> Option<i128> {
    annual_interest(stake.amount, stake.rate, elapsed(stake.timestamp, now))
}

impl FlexStake {
    /// Settle accrual up to `now`.
    ///
    /// Returns the checkpointed position (`reward` increased, `timestamp`
    /// moved to `now`) and the accrued delta. Settling twice at the same
    /// instant yields a zero delta the second time.
    pub fn settle(&self, now: u64) -> Option<(FlexStake, i128)> {
        let delta = pending_flex(self, now)?;
        let mut settled = self.clone();
        settled.reward = settled.reward.checked_add(delta)?;
        settled.timestamp = settled.timestamp.max(now);
        Some((settled, delta))
    }

    /// Settle, then fold the whole unpaid reward into principal and adopt
    /// `new_rate` from `now` on. Returns the position and the amount
    /// added to principal.
    pub fn compound(&self, now: u64, new_rate: i128) -> Option<(FlexStake, i128)> {
        let (mut settled, _) = self.settle(now)?;
        let folded = settled.reward;
        settled.amount = settled.amount.checked_add(folded)?;
        settled.reward = 0;
        settled.rate = new_rate;
        Some((settled, folded))
    }
}
