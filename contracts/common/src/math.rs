//! Fixed-point helpers for the accounting engines.
//!
//! All amounts are integer token units (`i128`) and every division floors, so
//! computed payouts can only round in the contract's favour. Helpers return
//! `None` instead of wrapping on overflow, negative input, or a zero divisor.

/// Denominator for basis-point ratios (1 bps = 0.01 %).
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Denominator for whole-percent rates.
pub const PERCENT_DENOMINATOR: i128 = 100;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// A 30-day month, the cadence used by vesting schedules.
pub const SECONDS_PER_MONTH: u64 = 30 * SECONDS_PER_DAY;

/// A 365-day year, the base for annual staking rates.
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// `floor(a * b / denominator)` for non-negative operands.
pub fn mul_div_floor(a: i128, b: i128, denominator: i128) -> Option<i128> {
    if a < 0 || b < 0 || denominator <= 0 {
        return None;
    }
    a.checked_mul(b)?.checked_div(denominator)
}

/// `floor(amount * bps / 10_000)`.
pub fn bps_of(amount: i128, bps: u32) -> Option<i128> {
    mul_div_floor(amount, i128::from(bps), BPS_DENOMINATOR)
}

/// Simple interest earned by `principal` at `rate_percent` per year over
/// `seconds`:
///
/// `floor(principal * rate_percent * seconds / (100 * SECONDS_PER_YEAR))`
///
/// The multiplication happens before the single division so short periods
/// are not truncated to zero prematurely.
pub fn annual_interest(principal: i128, rate_percent: i128, seconds: u64) -> Option<i128> {
    if rate_percent < 0 {
        return None;
    }
    let numerator = rate_percent.checked_mul(i128::from(seconds))?;
    let denominator = PERCENT_DENOMINATOR.checked_mul(i128::from(SECONDS_PER_YEAR))?;
    mul_div_floor(principal, numerator, denominator)
}

/// Seconds between two ledger timestamps; zero if the clock did not advance.
pub fn elapsed(from: u64, to: u64) -> u64 {
    to.saturating_sub(from)
}
