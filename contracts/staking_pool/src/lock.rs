//! Unlock-time bookkeeping for the locked bucket.
//!
//! An unlock timestamp of `0` means "no lock". Once set, the timestamp can
//! only move forward for as long as the bucket holds principal.

use soroban_sdk::{log, Env};

use crate::ContractError;

/// New unlock timestamp for a stake requesting `requested` seconds at `now`.
///
/// A fresh lock (`current == 0`) must request at least `minimum_lock_time`.
/// An existing lock keeps the later of its current unlock time and
/// `now + requested`.
pub fn begin_or_extend(
    env: &Env,
    current: u64,
    requested: u64,
    now: u64,
    minimum_lock_time: u64,
) -> Result<u64, ContractError> {
    if current == 0 && requested < minimum_lock_time {
        log!(env, "lock shorter than minimum", requested, minimum_lock_time);
        return Err(ContractError::LockTooShort);
    }
    let candidate = now
        .checked_add(requested)
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(current.max(candidate))
}

pub fn remaining(unlock_timestamp: u64, now: u64) -> u64 {
    unlock_timestamp.saturating_sub(now)
}

pub fn is_unlocked(unlock_timestamp: u64, now: u64) -> bool {
    now >= unlock_timestamp
}
