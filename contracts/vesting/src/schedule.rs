//! Vesting schedule arithmetic. Pure functions over [`Vester`], no storage.
//!
//! A vester's allocation is split into two buckets:
//!
//! * the initial release, `total * initial_release_bps / 10_000`, paid once
//!   by `claim_first`;
//! * the periodic pool, everything else, paid by `claim` in
//!   `number_of_claims` instalments of `pool * monthly_release_bps / 10_000`.
//!   The final instalment pays whatever is left so the pool always drains
//!   exactly.
//!
//! The first instalment unlocks at `enrolled_at + cliff_seconds` and one more
//! unlocks every `claim_period_seconds` after that.

use common::{bps_of, mul_div_floor, BPS_DENOMINATOR};
use soroban_sdk::{contracttype, String};

/// A named schedule template.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingType {
    pub name: String,
    pub initial_release_bps: u32,
    pub monthly_release_bps: u32,
    /// Informational; the schedule ends after `number_of_claims` periods.
    pub total_lock_seconds: u64,
    pub claim_period_seconds: u64,
    pub number_of_claims: u32,
    pub cliff_seconds: u64,
}

impl VestingType {
    pub fn is_valid(&self) -> bool {
        i128::from(self.initial_release_bps) <= BPS_DENOMINATOR
            && i128::from(self.monthly_release_bps) <= BPS_DENOMINATOR
            && self.claim_period_seconds > 0
            && self.number_of_claims > 0
    }
}

/// A beneficiary's enrollment. `schedule` is a copy of the vesting type as
/// it was when the vester was added.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vester {
    pub vesting_type: String,
    pub total_amount: i128,
    /// Everything paid so far, initial release included.
    pub claimed_amount: i128,
    /// The part of `claimed_amount` paid by `claim_first`.
    pub initial_claimed: i128,
    pub first_claimed: bool,
    pub enrolled_at: u64,
    /// Periodic instalments paid so far.
    pub claims_made: u32,
    pub schedule: VestingType,
}

/// Why a claim cannot be paid right now.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    TooEarly,
    VestingFinished,
    AlreadyClaimed,
    Overflow,
}

/// A computed periodic payout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Instalment {
    pub amount: i128,
    /// `claims_made` after this payout.
    pub claims_made: u32,
}

impl Vester {
    pub fn enroll(schedule: VestingType, total_amount: i128, now: u64) -> Self {
        Self {
            vesting_type: schedule.name.clone(),
            total_amount,
            claimed_amount: 0,
            initial_claimed: 0,
            first_claimed: schedule.initial_release_bps == 0,
            enrolled_at: now,
            claims_made: 0,
            schedule,
        }
    }

    pub fn initial_amount(&self) -> Result<i128, ScheduleError> {
        bps_of(self.total_amount, self.schedule.initial_release_bps).ok_or(ScheduleError::Overflow)
    }

    /// Size of the periodic bucket.
    pub fn pool(&self) -> Result<i128, ScheduleError> {
        Ok(self.total_amount - self.initial_amount()?)
    }

    /// Periodic tokens not yet paid.
    pub fn pool_remaining(&self) -> Result<i128, ScheduleError> {
        let paid = self.claimed_amount - self.initial_claimed;
        Ok(self.pool()? - paid)
    }

    pub fn cliff_end(&self) -> Result<u64, ScheduleError> {
        self.enrolled_at
            .checked_add(self.schedule.cliff_seconds)
            .ok_or(ScheduleError::Overflow)
    }

    /// Instalments unlocked at `now`, or `None` before the cliff.
    pub fn vested_periods(&self, now: u64) -> Result<Option<u32>, ScheduleError> {
        let cliff_end = self.cliff_end()?;
        if now < cliff_end {
            return Ok(None);
        }
        let full_periods = (now - cliff_end) / self.schedule.claim_period_seconds;
        let unlocked = full_periods.saturating_add(1);
        let cap = u64::from(self.schedule.number_of_claims);
        // `cap` came from a u32, so the minimum always fits.
        Ok(Some(unlocked.min(cap) as u32))
    }

    /// The periodic payout `claim` would make at `now`.
    pub fn next_instalment(&self, now: u64) -> Result<Instalment, ScheduleError> {
        let vested = self
            .vested_periods(now)?
            .ok_or(ScheduleError::TooEarly)?;

        let remaining = self.pool_remaining()?;
        if remaining <= 0 {
            return Err(ScheduleError::VestingFinished);
        }
        if vested <= self.claims_made {
            return Err(ScheduleError::TooEarly);
        }

        let amount = if vested >= self.schedule.number_of_claims {
            remaining
        } else {
            let periods = i128::from(vested - self.claims_made);
            let scaled = i128::from(self.schedule.monthly_release_bps)
                .checked_mul(periods)
                .ok_or(ScheduleError::Overflow)?;
            mul_div_floor(self.pool()?, scaled, BPS_DENOMINATOR)
                .ok_or(ScheduleError::Overflow)?
                .min(remaining)
        };

        Ok(Instalment {
            amount,
            claims_made: vested,
        })
    }

    /// The initial release `claim_first` would pay at `now`.
    pub fn first_release(&self, now: u64) -> Result<i128, ScheduleError> {
        if self.first_claimed {
            return Err(ScheduleError::AlreadyClaimed);
        }
        if now < self.cliff_end()? {
            return Err(ScheduleError::TooEarly);
        }
        self.initial_amount()
    }

    /// Timestamp at which the next instalment unlocks, `None` once every
    /// instalment has been paid.
    pub fn next_claim_at(&self) -> Result<Option<u64>, ScheduleError> {
        if self.claims_made >= self.schedule.number_of_claims || self.pool_remaining()? <= 0 {
            return Ok(None);
        }
        let offset = u64::from(self.claims_made)
            .checked_mul(self.schedule.claim_period_seconds)
            .ok_or(ScheduleError::Overflow)?;
        self.cliff_end()?
            .checked_add(offset)
            .map(Some)
            .ok_or(ScheduleError::Overflow)
    }

    /// Record a periodic payout.
    pub fn apply_instalment(&mut self, instalment: &Instalment) {
        self.claimed_amount += instalment.amount;
        self.claims_made = instalment.claims_made;
    }

    /// Record the initial release.
    pub fn apply_first_release(&mut self, amount: i128) {
        self.claimed_amount += amount;
        self.initial_claimed = amount;
        self.first_claimed = true;
    }
}
