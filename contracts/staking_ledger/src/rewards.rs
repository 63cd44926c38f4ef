//! Period-based reward arithmetic.
//!
//! Rewards accrue once per *fully* elapsed reward period:
//!
//! ```text
//! elapsed_periods = floor((stop_mark - start_mark) / period_seconds)
//! reward          = floor(elapsed_periods * principal * percent / 1000)
//! ```
//!
//! The three factors are multiplied before the single division so no precision
//! is lost to early truncation. Every step is checked; an overflow surfaces as
//! `ContractError::ArithmeticOverflow` instead of wrapping.

use crate::config::{PoolConfig, RATE_DENOMINATOR};
use crate::records::StakerRecord;
use crate::ContractError;

/// Number of whole periods between two marks. A stop mark at or before the
/// start mark yields zero.
pub fn elapsed_periods(start_mark: u64, stop_mark: u64, period_seconds: u64) -> u64 {
    if period_seconds == 0 {
        return 0;
    }
    stop_mark.saturating_sub(start_mark) / period_seconds
}

/// Reward earned by `principal` between `start_mark` and `stop_mark`.
pub fn compute_reward(
    start_mark: u64,
    stop_mark: u64,
    principal: i128,
    period_seconds: u64,
    percent_per_period: u32,
) -> Result<i128, ContractError> {
    let periods = elapsed_periods(start_mark, stop_mark, period_seconds);
    if periods == 0 || principal <= 0 || percent_per_period == 0 {
        return Ok(0);
    }

    let scaled = i128::from(periods)
        .checked_mul(principal)
        .and_then(|v| v.checked_mul(i128::from(percent_per_period)))
        .ok_or(ContractError::ArithmeticOverflow)?;

    Ok(scaled / RATE_DENOMINATOR)
}

/// Reward accrued on `record` since its `time_stamp`, excluding any carried
/// reward.
pub fn accrued(record: &StakerRecord, config: &PoolConfig, now: u64) -> Result<i128, ContractError> {
    if !record.is_active() {
        return Ok(0);
    }
    compute_reward(
        record.time_stamp,
        config.accrual_stop(now),
        record.amount,
        config.reward_period,
        config.percent_per_period,
    )
}

pub(crate) fn checked_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

pub(crate) fn checked_sub(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::ArithmeticOverflow)
}
