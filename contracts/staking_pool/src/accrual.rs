//! Reward arithmetic for both staking buckets.
//!
//! Every formula multiplies first and divides once, truncating toward zero.
//! All steps are checked; an overflow aborts the invocation with
//! `ArithmeticOverflow` instead of wrapping or saturating.

use soroban_sdk::contracttype;

use crate::config::{ConfigHistory, RewardConfig};
use crate::ContractError;

/// Fixed-point scale for unlocked rewards.
pub const PRECISION: u128 = 1_000;

/// Fixed-point scale for locked rewards. Absorbs the multiplier unit, so a
/// multiplier of `LOCKED_PRECISION / PRECISION` pays the unlocked rate.
pub const LOCKED_PRECISION: u128 = 100_000;

/// Rate terms captured when a lock is created and used for every later
/// settlement of that lock.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockTerms {
    pub multiplier: u128,
    pub rewards_per_period: u128,
    pub period_length: u64,
}

impl LockTerms {
    /// Freeze the terms of `config` for a lock of `lock_duration` seconds.
    pub fn freeze(config: &RewardConfig, lock_duration: u64) -> Result<Self, ContractError> {
        Ok(Self {
            multiplier: lock_multiplier(config, lock_duration)?,
            rewards_per_period: config.rewards_per_period,
            period_length: config.period_length,
        })
    }
}

fn overflow() -> ContractError {
    ContractError::ArithmeticOverflow
}

/// `min + (max - min) * lock_duration / period_length`, capped at `max`.
pub fn lock_multiplier(config: &RewardConfig, lock_duration: u64) -> Result<u128, ContractError> {
    if config.period_length == 0 {
        return Err(ContractError::InvalidConfig);
    }
    let span = config
        .max_multiplier
        .checked_sub(config.min_multiplier)
        .ok_or(ContractError::InvalidConfig)?;
    let bonus = span
        .checked_mul(lock_duration as u128)
        .ok_or_else(overflow)?
        / config.period_length as u128;
    let multiplier = config.min_multiplier.checked_add(bonus).ok_or_else(overflow)?;
    Ok(multiplier.min(config.max_multiplier))
}

/// ```text
/// reward = multiplier × amount × rewards_per_period × duration
///          / (period_length × LOCKED_PRECISION)
/// ```
pub fn calc_locked_reward(
    amount: u128,
    duration: u64,
    terms: &LockTerms,
) -> Result<u128, ContractError> {
    if amount == 0 || duration == 0 {
        return Ok(0);
    }
    let numerator = terms
        .multiplier
        .checked_mul(amount)
        .and_then(|v| v.checked_mul(terms.rewards_per_period))
        .and_then(|v| v.checked_mul(duration as u128))
        .ok_or_else(overflow)?;
    let denominator = (terms.period_length as u128)
        .checked_mul(LOCKED_PRECISION)
        .ok_or_else(overflow)?;
    if denominator == 0 {
        return Err(ContractError::InvalidConfig);
    }
    Ok(numerator / denominator)
}

/// Reward for one constant-rate segment of unlocked stake.
fn segment_reward(
    amount: u128,
    config: &RewardConfig,
    duration: u64,
) -> Result<u128, ContractError> {
    let numerator = amount
        .checked_mul(config.rewards_per_period)
        .and_then(|v| v.checked_mul(duration as u128))
        .ok_or_else(overflow)?;
    let denominator = (config.period_length as u128)
        .checked_mul(PRECISION)
        .ok_or_else(overflow)?;
    if denominator == 0 {
        return Err(ContractError::InvalidConfig);
    }
    Ok(numerator / denominator)
}

/// Reward for `amount` of unlocked stake held over `from..to`.
///
/// Walks the history newest first. Each config prices the part of the
/// interval between its `effective_from` and the start of the next newer
/// config; the oldest entry covers anything before it. Segment rewards are
/// truncated individually and summed.
pub fn calc_unlocked_reward<H: ConfigHistory>(
    history: &H,
    amount: u128,
    from: u64,
    to: u64,
) -> Result<u128, ContractError> {
    if amount == 0 || to <= from {
        return Ok(0);
    }

    let mut total: u128 = 0;
    let mut segment_end = to;
    let mut index = history.count();

    while index > 0 && segment_end > from {
        index -= 1;
        let config = history.at(index).ok_or(ContractError::NotInitialized)?;
        let segment_start = if index == 0 {
            from
        } else {
            config.effective_from.max(from)
        };
        if segment_start >= segment_end {
            // Took effect at or after the end of the interval.
            continue;
        }
        let reward = segment_reward(amount, &config, segment_end - segment_start)?;
        total = total.checked_add(reward).ok_or_else(overflow)?;
        segment_end = segment_start;
    }

    Ok(total)
}
