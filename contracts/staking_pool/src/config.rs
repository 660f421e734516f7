//! Append-only history of reward parameters.
//!
//! Entries are stored in persistent storage under `(CFG, index)` with the
//! entry count in instance storage. Index 0 is written by `initialize`, so a
//! pool always has at least one config once it is live.

use soroban_sdk::{contracttype, log, symbol_short, Env, Symbol, Vec};

use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CFG");
const CONFIG_COUNT: Symbol = symbol_short!("CFG_CNT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Types ────────────────────────────────────────────────────────────────────

/// Parameters supplied by an admin. The pool stamps `effective_from` itself.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardParams {
    /// Reward units per `period_length` seconds per unit of unlocked principal,
    /// scaled by `accrual::PRECISION`.
    pub rewards_per_period: u128,
    /// Length of one reward period in seconds. Must be non-zero.
    pub period_length: u64,
    /// Shortest duration a fresh lock may request.
    pub minimum_lock_time: u64,
    pub min_multiplier: u128,
    pub max_multiplier: u128,
}

/// One immutable entry of the reward history.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardConfig {
    pub effective_from: u64,
    pub rewards_per_period: u128,
    pub period_length: u64,
    pub minimum_lock_time: u64,
    pub min_multiplier: u128,
    pub max_multiplier: u128,
}

impl RewardParams {
    pub fn validate(&self, env: &Env) -> Result<(), ContractError> {
        if self.period_length == 0 {
            log!(env, "period_length must be non-zero");
            return Err(ContractError::InvalidConfig);
        }
        if self.max_multiplier < self.min_multiplier {
            log!(
                env,
                "max_multiplier below min_multiplier",
                self.max_multiplier,
                self.min_multiplier
            );
            return Err(ContractError::InvalidConfig);
        }
        Ok(())
    }

    pub fn effective_at(self, effective_from: u64) -> RewardConfig {
        RewardConfig {
            effective_from,
            rewards_per_period: self.rewards_per_period,
            period_length: self.period_length,
            minimum_lock_time: self.minimum_lock_time,
            min_multiplier: self.min_multiplier,
            max_multiplier: self.max_multiplier,
        }
    }
}

// ── History seam ─────────────────────────────────────────────────────────────

/// Read access to an ordered (oldest first) config history.
///
/// The accrual engine only walks backwards from the newest entry, so
/// implementations never have to materialise the whole log.
pub trait ConfigHistory {
    fn count(&self) -> u32;
    fn at(&self, index: u32) -> Option<RewardConfig>;
}

impl ConfigHistory for Vec<RewardConfig> {
    fn count(&self) -> u32 {
        self.len()
    }

    fn at(&self, index: u32) -> Option<RewardConfig> {
        self.get(index)
    }
}

/// Storage-backed history owned by the pool.
pub struct ConfigStore<'a> {
    env: &'a Env,
}

impl<'a> ConfigStore<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    /// Append a new entry effective from the current ledger timestamp.
    ///
    /// Fails with `InvalidConfigOrdering` unless the timestamp is strictly
    /// after the latest entry's `effective_from`.
    pub fn append(&self, params: RewardParams) -> Result<RewardConfig, ContractError> {
        params.validate(self.env)?;

        let now = self.env.ledger().timestamp();
        let count = self.count();
        if let Some(latest) = self.latest() {
            if now <= latest.effective_from {
                log!(
                    self.env,
                    "config must take effect after the latest entry",
                    now,
                    latest.effective_from
                );
                return Err(ContractError::InvalidConfigOrdering);
            }
        }

        let config = params.effective_at(now);
        let key = (CONFIG, count);
        self.env.storage().persistent().set(&key, &config);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        let next = count.checked_add(1).ok_or(ContractError::ArithmeticOverflow)?;
        self.env.storage().instance().set(&CONFIG_COUNT, &next);

        Ok(config)
    }

    pub fn latest(&self) -> Option<RewardConfig> {
        match self.count() {
            0 => None,
            n => self.at(n - 1),
        }
    }

    /// Full history, oldest first.
    pub fn history(&self) -> Vec<RewardConfig> {
        let mut out = Vec::new(self.env);
        for i in 0..self.count() {
            if let Some(config) = self.at(i) {
                out.push_back(config);
            }
        }
        out
    }
}

impl ConfigHistory for ConfigStore<'_> {
    fn count(&self) -> u32 {
        self.env
            .storage()
            .instance()
            .get(&CONFIG_COUNT)
            .unwrap_or(0)
    }

    fn at(&self, index: u32) -> Option<RewardConfig> {
        let key = (CONFIG, index);
        let config: Option<RewardConfig> = self.env.storage().persistent().get(&key);
        if config.is_some() {
            self.env
                .storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
        config
    }
}
