//! Per-account state machine.
//!
//! Each account holds two independent buckets. A bucket is either `Empty` or
//! `Staked` with its own principal, settlement timestamp and owed reward; a
//! bucket whose principal reaches zero goes back to `Empty`, which drops its
//! timestamps and any forfeited reward along with it.
//!
//! Operations here validate everything before touching `self`, so an `Err`
//! leaves the account unchanged. Token movement and persistence belong to the
//! contract entry points.

use soroban_sdk::{contracttype, log, Env};

use crate::accrual::{self, LockTerms};
use crate::config::{ConfigHistory, RewardConfig};
use crate::lock;
use crate::ContractError;

// ── Types ────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnlockedPosition {
    pub principal: u128,
    pub last_update: u64,
    pub owed: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockedPosition {
    pub principal: u128,
    pub last_update: u64,
    pub owed: u128,
    pub unlock_timestamp: u64,
    /// Frozen when the bucket went from `Empty` to `Staked`.
    pub terms: LockTerms,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UnlockedBucket {
    Empty,
    Staked(UnlockedPosition),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LockedBucket {
    Empty,
    Staked(LockedPosition),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeAccount {
    pub unlocked: UnlockedBucket,
    pub locked: LockedBucket,
}

/// Read-only view of what an account could collect right now.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingRewards {
    pub unlocked: u128,
    pub locked: u128,
    /// Portion payable by `claim` at this timestamp.
    pub claimable: u128,
}

/// Units of principal leaving each bucket in one withdrawal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Withdrawal {
    pub unlocked: u128,
    pub locked: u128,
}

fn add(a: u128, b: u128) -> Result<u128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

// ── Accrual since last settlement ────────────────────────────────────────────

fn unlocked_accrual<H: ConfigHistory>(
    position: &UnlockedPosition,
    now: u64,
    history: &H,
) -> Result<u128, ContractError> {
    accrual::calc_unlocked_reward(history, position.principal, position.last_update, now)
}

/// Locked principal accrues up to its unlock time and not beyond.
fn locked_accrual(position: &LockedPosition, now: u64) -> Result<u128, ContractError> {
    let end = now.min(position.unlock_timestamp);
    let elapsed = end.saturating_sub(position.last_update);
    accrual::calc_locked_reward(position.principal, elapsed, &position.terms)
}

// ── State machine ────────────────────────────────────────────────────────────

impl Default for StakeAccount {
    fn default() -> Self {
        Self {
            unlocked: UnlockedBucket::Empty,
            locked: LockedBucket::Empty,
        }
    }
}

impl StakeAccount {
    pub fn is_empty(&self) -> bool {
        matches!(self.unlocked, UnlockedBucket::Empty) && matches!(self.locked, LockedBucket::Empty)
    }

    pub fn unlocked_principal(&self) -> u128 {
        match &self.unlocked {
            UnlockedBucket::Staked(p) => p.principal,
            UnlockedBucket::Empty => 0,
        }
    }

    pub fn locked_principal(&self) -> u128 {
        match &self.locked {
            LockedBucket::Staked(p) => p.principal,
            LockedBucket::Empty => 0,
        }
    }

    /// `0` when the locked bucket is empty.
    pub fn unlock_timestamp(&self) -> u64 {
        match &self.locked {
            LockedBucket::Staked(p) => p.unlock_timestamp,
            LockedBucket::Empty => 0,
        }
    }

    /// Settle the unlocked bucket up to `now`, then add `amount`.
    pub fn stake_unlocked<H: ConfigHistory>(
        &mut self,
        amount: u128,
        now: u64,
        history: &H,
    ) -> Result<(), ContractError> {
        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }
        let next = match &self.unlocked {
            UnlockedBucket::Empty => UnlockedPosition {
                principal: amount,
                last_update: now,
                owed: 0,
            },
            UnlockedBucket::Staked(position) => UnlockedPosition {
                principal: add(position.principal, amount)?,
                last_update: now,
                owed: add(position.owed, unlocked_accrual(position, now, history)?)?,
            },
        };
        self.unlocked = UnlockedBucket::Staked(next);
        Ok(())
    }

    /// Settle the locked bucket at its frozen terms, then add `amount` and
    /// begin or extend the lock. Only a fresh lock prices new terms from
    /// `config`; top-ups inherit the existing ones.
    pub fn stake_locked(
        &mut self,
        env: &Env,
        amount: u128,
        lock_duration: u64,
        now: u64,
        config: &RewardConfig,
    ) -> Result<(), ContractError> {
        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }
        let next = match &self.locked {
            LockedBucket::Empty => LockedPosition {
                principal: amount,
                last_update: now,
                owed: 0,
                unlock_timestamp: lock::begin_or_extend(
                    env,
                    0,
                    lock_duration,
                    now,
                    config.minimum_lock_time,
                )?,
                terms: LockTerms::freeze(config, lock_duration)?,
            },
            LockedBucket::Staked(position) => LockedPosition {
                principal: add(position.principal, amount)?,
                last_update: now,
                owed: add(position.owed, locked_accrual(position, now)?)?,
                unlock_timestamp: lock::begin_or_extend(
                    env,
                    position.unlock_timestamp,
                    lock_duration,
                    now,
                    config.minimum_lock_time,
                )?,
                terms: position.terms.clone(),
            },
        };
        self.locked = LockedBucket::Staked(next);
        Ok(())
    }

    /// Settle and zero every payable bucket, returning the total.
    ///
    /// The locked bucket is only payable once its lock has passed.
    pub fn claim<H: ConfigHistory>(
        &mut self,
        env: &Env,
        now: u64,
        history: &H,
    ) -> Result<u128, ContractError> {
        let unlocked_reward = match &self.unlocked {
            UnlockedBucket::Staked(p) => add(p.owed, unlocked_accrual(p, now, history)?)?,
            UnlockedBucket::Empty => 0,
        };

        let mut lock_pending = false;
        let locked_reward = match &self.locked {
            LockedBucket::Staked(p) if lock::is_unlocked(p.unlock_timestamp, now) => {
                add(p.owed, locked_accrual(p, now)?)?
            }
            LockedBucket::Staked(_) => {
                lock_pending = true;
                0
            }
            LockedBucket::Empty => 0,
        };

        let total = add(unlocked_reward, locked_reward)?;
        if total == 0 {
            if lock_pending {
                log!(env, "locked rewards not claimable before", self.unlock_timestamp());
                return Err(ContractError::LockNotPassed);
            }
            return Err(ContractError::NoRewardsAvailable);
        }

        if let UnlockedBucket::Staked(p) = &mut self.unlocked {
            p.owed = 0;
            p.last_update = now;
        }
        if !lock_pending {
            if let LockedBucket::Staked(p) = &mut self.locked {
                p.owed = 0;
                p.last_update = now;
            }
        }
        Ok(total)
    }

    /// Remove `amount` of principal from one bucket and return the reward
    /// that bucket pays out with it.
    ///
    /// `exit` is the emergency path and never pays anything, so it works on
    /// a pool with no reward balance. Before unlock it forfeits the unsettled
    /// locked interval; otherwise accrual is settled into `owed`. A partial
    /// exit keeps `owed` for a later claim. An exit that empties the bucket
    /// drops it.
    pub fn unstake<H: ConfigHistory>(
        &mut self,
        env: &Env,
        amount: u128,
        from_locked: bool,
        exit: bool,
        now: u64,
        history: &H,
    ) -> Result<u128, ContractError> {
        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }

        if from_locked {
            let available = self.locked_principal();
            let LockedBucket::Staked(mut position) = self.locked.clone() else {
                log!(env, "unstake exceeds locked principal", amount, available);
                return Err(ContractError::UnequalUnstake);
            };
            if amount > position.principal {
                log!(env, "unstake exceeds locked principal", amount, available);
                return Err(ContractError::UnequalUnstake);
            }
            let passed = lock::is_unlocked(position.unlock_timestamp, now);
            if !passed && !exit {
                log!(env, "lock has not passed", position.unlock_timestamp, now);
                return Err(ContractError::LockNotPassed);
            }

            let settled = if passed {
                add(position.owed, locked_accrual(&position, now)?)?
            } else {
                position.owed
            };
            let reward = if exit { 0 } else { settled };

            position.principal -= amount;
            self.locked = if position.principal == 0 {
                LockedBucket::Empty
            } else {
                position.owed = settled - reward;
                position.last_update = now;
                LockedBucket::Staked(position)
            };
            Ok(reward)
        } else {
            let available = self.unlocked_principal();
            let UnlockedBucket::Staked(mut position) = self.unlocked.clone() else {
                log!(env, "unstake exceeds unlocked principal", amount, available);
                return Err(ContractError::UnequalUnstake);
            };
            if amount > position.principal {
                log!(env, "unstake exceeds unlocked principal", amount, available);
                return Err(ContractError::UnequalUnstake);
            }

            let settled = add(position.owed, unlocked_accrual(&position, now, history)?)?;
            let reward = if exit { 0 } else { settled };

            position.principal -= amount;
            self.unlocked = if position.principal == 0 {
                UnlockedBucket::Empty
            } else {
                position.owed = settled - reward;
                position.last_update = now;
                UnlockedBucket::Staked(position)
            };
            Ok(reward)
        }
    }

    pub fn pending<H: ConfigHistory>(
        &self,
        now: u64,
        history: &H,
    ) -> Result<PendingRewards, ContractError> {
        let unlocked = match &self.unlocked {
            UnlockedBucket::Staked(p) => add(p.owed, unlocked_accrual(p, now, history)?)?,
            UnlockedBucket::Empty => 0,
        };
        let (locked, locked_claimable) = match &self.locked {
            LockedBucket::Staked(p) => {
                let reward = add(p.owed, locked_accrual(p, now)?)?;
                let claimable = if lock::is_unlocked(p.unlock_timestamp, now) {
                    reward
                } else {
                    0
                };
                (reward, claimable)
            }
            LockedBucket::Empty => (0, 0),
        };
        Ok(PendingRewards {
            unlocked,
            locked,
            claimable: add(unlocked, locked_claimable)?,
        })
    }
}
