#![no_std]

//! Dual-mode staking pool.
//!
//! Stakers deposit into an *unlocked* bucket (withdraw any time, paid at the
//! rate of whatever reward config was in effect for each stretch of time) or
//! a *locked* bucket (committed until an unlock timestamp, paid at a
//! multiplier frozen when the lock was opened). Reward parameters live in an
//! append-only history so a rate change never reprices time already served.
//!
//! A pool stakes either a fungible token or the ids of one NFT collection,
//! chosen by which initialiser bootstraps it.

pub mod accrual;
pub mod admin;
pub mod config;
pub mod events;
pub mod ledger;
pub mod lock;
pub mod nft;
pub mod votes;

use soroban_sdk::{
    contract, contractimpl, log, symbol_short, token, Address, Env, Symbol, Vec,
};

use admin::AdminRole;
use config::{ConfigHistory, ConfigStore, RewardConfig, RewardParams};
use ledger::{PendingRewards, StakeAccount, Withdrawal};
use nft::{NftDeposit, StakeKind};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_KIND: Symbol = symbol_short!("KIND");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const VOTES_TOKEN: Symbol = symbol_short!("VOTE_TOK");
const CAN_EXIT: Symbol = symbol_short!("CAN_EXIT");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

// Per-account persistent storage uses tuple keys: (prefix, account)
const ACCOUNT: Symbol = symbol_short!("ACCT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;
const INSTANCE_TTL_THRESHOLD: u32 = 518400;
const INSTANCE_TTL_EXTEND_TO: u32 = 1036800;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    ZeroAmount = 4,
    LockTooShort = 5,
    LockNotPassed = 6,
    UnequalUnstake = 7,
    ExitDisabled = 8,
    NoRewardsAvailable = 9,
    InsufficientPoolBalance = 10,
    InvalidConfigOrdering = 11,
    InvalidConfig = 12,
    ArithmeticOverflow = 13,
    WrongStakeKind = 14,
    NftNotStaked = 15,
    NftAlreadyStaked = 16,
    NotTokenOwner = 17,
}

/// Ledger amounts are `u128`; token interfaces take `i128`.
pub(crate) fn token_amount(amount: u128) -> Result<i128, ContractError> {
    i128::try_from(amount).map_err(|_| ContractError::ArithmeticOverflow)
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPool;

#[contractimpl]
impl StakingPool {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `stake_token`  – token users deposit.
    /// * `reward_token` – token rewards are paid in; may equal `stake_token`.
    /// * `votes_token`  – optional representative token minted 1:1 with
    ///                    principal. The pool must be allowed to mint it.
    ///                    Unstaking burns it from the staker, so a staker
    ///                    who transferred votes away cannot unstake until
    ///                    they hold them again.
    /// * `params`       – first reward config, effective immediately.
    /// * `can_exit`     – whether early exit from locks is allowed.
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        votes_token: Option<Address>,
        params: RewardParams,
        can_exit: bool,
    ) -> Result<(), ContractError> {
        Self::bootstrap(
            env,
            StakeKind::Fungible,
            admin,
            stake_token,
            reward_token,
            votes_token,
            params,
            can_exit,
        )
    }

    /// Bootstrap a pool that stakes ids of the NFT `collection`.
    ///
    /// Every id counts as one unit of principal; `params` are read with that
    /// in mind. The other arguments are as for `initialize`.
    pub fn initialize_nft(
        env: Env,
        admin: Address,
        collection: Address,
        reward_token: Address,
        votes_token: Option<Address>,
        params: RewardParams,
        can_exit: bool,
    ) -> Result<(), ContractError> {
        Self::bootstrap(
            env,
            StakeKind::NonFungible,
            admin,
            collection,
            reward_token,
            votes_token,
            params,
            can_exit,
        )
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` into the unlocked bucket.
    ///
    /// Reward accrued on existing unlocked principal is settled into `owed`
    /// before the new principal is added.
    pub fn stake_unlocked(env: Env, account: Address, amount: u128) -> Result<(), ContractError> {
        Self::require_kind(&env, StakeKind::Fungible)?;
        account.require_auth();

        let received = Self::pull_stake(&env, &account, amount)?;
        let now = env.ledger().timestamp();

        let mut state = Self::load_account(&env, &account);
        state.stake_unlocked(received, now, &ConfigStore::new(&env))?;
        Self::store_account(&env, &account, &state);
        Self::add_total_staked(&env, received)?;

        votes::mint(&env, &Self::votes_token(&env), &account, received)?;
        Self::bump_instance(&env);

        events::publish_staked(&env, account, received, amount, false, 0);

        Ok(())
    }

    /// Deposit `amount` into the locked bucket for at least `lock_duration`
    /// seconds from now.
    ///
    /// Opening a lock freezes the multiplier and rate of the current config.
    /// Topping up an open lock keeps those terms and can only push the unlock
    /// time later.
    pub fn stake_locked(
        env: Env,
        account: Address,
        amount: u128,
        lock_duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_kind(&env, StakeKind::Fungible)?;
        account.require_auth();

        let received = Self::pull_stake(&env, &account, amount)?;
        let now = env.ledger().timestamp();
        let config = ConfigStore::new(&env)
            .latest()
            .ok_or(ContractError::NotInitialized)?;

        let mut state = Self::load_account(&env, &account);
        state.stake_locked(&env, received, lock_duration, now, &config)?;
        let unlock_timestamp = state.unlock_timestamp();
        Self::store_account(&env, &account, &state);
        Self::add_total_staked(&env, received)?;

        votes::mint(&env, &Self::votes_token(&env), &account, received)?;
        Self::bump_instance(&env);

        events::publish_staked(&env, account, received, amount, true, unlock_timestamp);

        Ok(())
    }

    /// Deposit NFTs into the unlocked bucket, one unit of principal each.
    pub fn stake_nft_unlocked(
        env: Env,
        account: Address,
        token_ids: Vec<u32>,
    ) -> Result<(), ContractError> {
        Self::require_kind(&env, StakeKind::NonFungible)?;
        account.require_auth();

        let collection = Self::stake_token(&env)?;
        let received = nft::deposit(&env, &collection, &account, &token_ids, false)?;
        let now = env.ledger().timestamp();

        let mut state = Self::load_account(&env, &account);
        state.stake_unlocked(received, now, &ConfigStore::new(&env))?;
        Self::store_account(&env, &account, &state);
        Self::add_total_staked(&env, received)?;

        votes::mint(&env, &Self::votes_token(&env), &account, received)?;
        Self::bump_instance(&env);

        events::publish_nft_staked(&env, account, token_ids, false, 0);

        Ok(())
    }

    /// Deposit NFTs into the locked bucket. Lock rules are as for
    /// `stake_locked`.
    pub fn stake_nft_locked(
        env: Env,
        account: Address,
        token_ids: Vec<u32>,
        lock_duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_kind(&env, StakeKind::NonFungible)?;
        account.require_auth();

        let collection = Self::stake_token(&env)?;
        let received = nft::deposit(&env, &collection, &account, &token_ids, true)?;
        let now = env.ledger().timestamp();
        let config = ConfigStore::new(&env)
            .latest()
            .ok_or(ContractError::NotInitialized)?;

        let mut state = Self::load_account(&env, &account);
        state.stake_locked(&env, received, lock_duration, now, &config)?;
        let unlock_timestamp = state.unlock_timestamp();
        Self::store_account(&env, &account, &state);
        Self::add_total_staked(&env, received)?;

        votes::mint(&env, &Self::votes_token(&env), &account, received)?;
        Self::bump_instance(&env);

        events::publish_nft_staked(&env, account, token_ids, true, unlock_timestamp);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything currently claimable for `account`.
    ///
    /// Locked rewards become claimable once the lock has passed. If the pool
    /// cannot cover the payout the call fails and nothing is reset, so the
    /// reward stays owed.
    pub fn claim(env: Env, account: Address) -> Result<u128, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();

        let now = env.ledger().timestamp();
        let mut state = Self::load_account(&env, &account);
        let reward = state.claim(&env, now, &ConfigStore::new(&env))?;
        Self::ensure_payable(&env, reward)?;

        Self::store_account(&env, &account, &state);
        Self::pay_reward(&env, &account, reward)?;
        Self::bump_instance(&env);

        events::publish_claimed(&env, account, reward);

        Ok(reward)
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Withdraw `amount` of principal from one bucket, paying that bucket's
    /// reward alongside it. Returns the reward paid.
    ///
    /// `exit = true` needs the pool's exit flag and pays no reward, so it
    /// never depends on the reward balance. It is the only way out of a
    /// locked bucket before its unlock time and forfeits the locked reward
    /// not yet settled. Settled reward stays owed on a partial exit and is
    /// dropped when the exit empties the bucket.
    pub fn unstake(
        env: Env,
        account: Address,
        amount: u128,
        from_locked: bool,
        exit: bool,
    ) -> Result<u128, ContractError> {
        Self::require_kind(&env, StakeKind::Fungible)?;
        account.require_auth();
        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }

        let withdrawal = if from_locked {
            Withdrawal {
                unlocked: 0,
                locked: amount,
            }
        } else {
            Withdrawal {
                unlocked: amount,
                locked: 0,
            }
        };
        let reward = Self::withdraw(&env, &account, withdrawal, exit)?;

        let stake_token = Self::stake_token(&env)?;
        token::Client::new(&env, &stake_token).transfer(
            &env.current_contract_address(),
            &account,
            &token_amount(amount)?,
        );

        if reward > 0 {
            events::publish_claimed(&env, account.clone(), reward);
        }
        events::publish_unstaked(&env, account, amount, from_locked, exit);

        Ok(reward)
    }

    /// Withdraw staked NFTs, from whichever bucket each went into, paying
    /// those buckets' reward alongside. Returns the reward paid.
    ///
    /// Locked ids follow the same lock and `exit` rules as `unstake`.
    pub fn unstake_nft(
        env: Env,
        account: Address,
        token_ids: Vec<u32>,
        exit: bool,
    ) -> Result<u128, ContractError> {
        Self::require_kind(&env, StakeKind::NonFungible)?;
        account.require_auth();

        let withdrawal = nft::plan_withdrawal(&env, &account, &token_ids)?;
        let reward = Self::withdraw(&env, &account, withdrawal, exit)?;

        let collection = Self::stake_token(&env)?;
        nft::release(&env, &collection, &account, &token_ids);

        if reward > 0 {
            events::publish_claimed(&env, account.clone(), reward);
        }
        events::publish_nft_unstaked(&env, account, token_ids, exit);

        Ok(reward)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Stored state for `account`, or `None` if it holds nothing.
    pub fn get_account(env: Env, account: Address) -> Option<StakeAccount> {
        env.storage().persistent().get(&(ACCOUNT, account))
    }

    /// Owed plus accrued reward across both buckets, claimable or not.
    pub fn get_pending_rewards(env: Env, account: Address) -> Result<u128, ContractError> {
        let pending = Self::get_pending_breakdown(env, account)?;
        pending
            .unlocked
            .checked_add(pending.locked)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    pub fn get_pending_breakdown(
        env: Env,
        account: Address,
    ) -> Result<PendingRewards, ContractError> {
        let state = Self::load_account(&env, &account);
        state.pending(env.ledger().timestamp(), &ConfigStore::new(&env))
    }

    /// Seconds until the locked bucket can be withdrawn without exiting.
    pub fn get_remaining_lock(env: Env, account: Address) -> u64 {
        let state = Self::load_account(&env, &account);
        lock::remaining(state.unlock_timestamp(), env.ledger().timestamp())
    }

    pub fn is_lock_passed(env: Env, account: Address) -> bool {
        let state = Self::load_account(&env, &account);
        lock::is_unlocked(state.unlock_timestamp(), env.ledger().timestamp())
    }

    /// Sum of all principal in both buckets across all accounts.
    pub fn get_total_staked(env: Env) -> u128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    /// Reward-token balance not backing staked principal.
    pub fn get_available_rewards(env: Env) -> Result<u128, ContractError> {
        Self::available_rewards(&env)
    }

    pub fn get_latest_config(env: Env) -> Result<RewardConfig, ContractError> {
        ConfigStore::new(&env)
            .latest()
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_config(env: Env, index: u32) -> Option<RewardConfig> {
        ConfigStore::new(&env).at(index)
    }

    pub fn get_config_count(env: Env) -> u32 {
        ConfigStore::new(&env).count()
    }

    /// Every config ever appended, oldest first.
    pub fn get_config_history(env: Env) -> Vec<RewardConfig> {
        ConfigStore::new(&env).history()
    }

    pub fn can_exit(env: Env) -> bool {
        env.storage().instance().get(&CAN_EXIT).unwrap_or(false)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_stake_kind(env: Env) -> Result<StakeKind, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_KIND)
            .ok_or(ContractError::NotInitialized)
    }

    /// Who staked `token_id` and into which bucket, if the pool holds it.
    pub fn get_nft_deposit(env: Env, token_id: u32) -> Option<NftDeposit> {
        nft::get_deposit(&env, token_id)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Append a reward config effective from the current timestamp.
    ///
    /// Time before now keeps being priced by the configs that covered it.
    /// Requires at least `RewardManager`.
    pub fn append_config(
        env: Env,
        caller: Address,
        params: RewardParams,
    ) -> Result<RewardConfig, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::require_role(&env, &caller, AdminRole::RewardManager)?;

        let store = ConfigStore::new(&env);
        let config = store.append(params)?;
        Self::bump_instance(&env);

        events::publish_config_appended(&env, store.count() - 1, config.effective_from);

        Ok(config)
    }

    /// Enable or disable early exit from locks. Requires at least `Operator`.
    pub fn set_can_exit(env: Env, caller: Address, enabled: bool) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::require_role(&env, &caller, AdminRole::Operator)?;

        env.storage().instance().set(&CAN_EXIT, &enabled);
        Self::bump_instance(&env);

        events::publish_exit_toggled(&env, enabled);

        Ok(())
    }

    /// Send every reward token not backing principal to `caller`.
    ///
    /// Rewards owed to stakers are not reserved. Requires `SuperAdmin`.
    pub fn withdraw_leftover_rewards(env: Env, caller: Address) -> Result<u128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::require_role(&env, &caller, AdminRole::SuperAdmin)?;

        let amount = Self::available_rewards(&env)?;
        if amount == 0 {
            return Err(ContractError::NoRewardsAvailable);
        }
        Self::pay_reward(&env, &caller, amount)?;
        Self::bump_instance(&env);

        events::publish_leftover_withdrawn(&env, caller, amount);

        Ok(amount)
    }

    // ── Role management ──────────────────────────────────────────────────────

    /// Assign `role` to `target`. Only a `SuperAdmin` may call this.
    pub fn grant_role(
        env: Env,
        caller: Address,
        target: Address,
        role: AdminRole,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::require_role(&env, &caller, AdminRole::SuperAdmin)?;

        admin::set_role(&env, &target, role);

        events::publish_role_changed(&env, caller, target, Some(role));

        Ok(())
    }

    /// Remove any role held by `target`. Only a `SuperAdmin` may call this.
    pub fn revoke_role(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        admin::require_role(&env, &caller, AdminRole::SuperAdmin)?;

        admin::remove_role(&env, &target);

        events::publish_role_changed(&env, caller, target, None);

        Ok(())
    }

    pub fn get_role(env: Env, target: Address) -> Option<AdminRole> {
        admin::get_role(&env, &target)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn bootstrap(
        env: Env,
        kind: StakeKind,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        votes_token: Option<Address>,
        params: RewardParams,
        can_exit: bool,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        params.validate(&env)?;

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKE_KIND, &kind);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&VOTES_TOKEN, &votes_token);
        env.storage().instance().set(&CAN_EXIT, &can_exit);
        env.storage().instance().set(&TOTAL_STAKED, &0u128);

        let first = ConfigStore::new(&env).append(params)?;
        events::publish_config_appended(&env, 0, first.effective_from);

        admin::set_role(&env, &admin, AdminRole::SuperAdmin);
        Self::bump_instance(&env);

        events::publish_initialized(
            &env,
            kind,
            admin,
            stake_token,
            reward_token,
            votes_token,
            can_exit,
        );

        Ok(())
    }

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_kind(env: &Env, expected: StakeKind) -> Result<(), ContractError> {
        let kind = Self::get_stake_kind(env.clone())?;
        if kind != expected {
            log!(env, "pool stakes a different kind of token", kind as u32);
            return Err(ContractError::WrongStakeKind);
        }
        Ok(())
    }

    /// Run the ledger side of a withdrawal from one or both buckets: settle,
    /// check the reward is payable, persist, update totals, burn votes and
    /// pay the reward. Returning the principal is left to the caller.
    fn withdraw(
        env: &Env,
        account: &Address,
        withdrawal: Withdrawal,
        exit: bool,
    ) -> Result<u128, ContractError> {
        if exit && !Self::can_exit(env.clone()) {
            log!(env, "exit is disabled for this pool");
            return Err(ContractError::ExitDisabled);
        }

        let now = env.ledger().timestamp();
        let history = ConfigStore::new(env);
        let mut state = Self::load_account(env, account);
        let mut reward: u128 = 0;
        for (amount, from_locked) in [(withdrawal.unlocked, false), (withdrawal.locked, true)] {
            if amount == 0 {
                continue;
            }
            let paid = state.unstake(env, amount, from_locked, exit, now, &history)?;
            reward = reward
                .checked_add(paid)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        Self::ensure_payable(env, reward)?;

        let amount = withdrawal
            .unlocked
            .checked_add(withdrawal.locked)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Self::store_account(env, account, &state);
        Self::sub_total_staked(env, amount)?;
        votes::burn(env, &Self::votes_token(env), account, amount)?;
        Self::pay_reward(env, account, reward)?;
        Self::bump_instance(env);

        Ok(reward)
    }

    fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }

    fn stake_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn reward_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn votes_token(env: &Env) -> Option<Address> {
        env.storage().instance().get(&VOTES_TOKEN).unwrap_or(None)
    }

    fn load_account(env: &Env, account: &Address) -> StakeAccount {
        env.storage()
            .persistent()
            .get(&(ACCOUNT, account.clone()))
            .unwrap_or_default()
    }

    /// Persist `state`, or drop the entry once both buckets are empty.
    fn store_account(env: &Env, account: &Address, state: &StakeAccount) {
        let key = (ACCOUNT, account.clone());
        if state.is_empty() {
            env.storage().persistent().remove(&key);
            return;
        }
        env.storage().persistent().set(&key, state);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn add_total_staked(env: &Env, amount: u128) -> Result<(), ContractError> {
        let total = Self::get_total_staked(env.clone())
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        env.storage().instance().set(&TOTAL_STAKED, &total);
        Ok(())
    }

    fn sub_total_staked(env: &Env, amount: u128) -> Result<(), ContractError> {
        let total = Self::get_total_staked(env.clone())
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        env.storage().instance().set(&TOTAL_STAKED, &total);
        Ok(())
    }

    /// Move `amount` stake tokens from `from` into the pool and return how
    /// much actually arrived.
    fn pull_stake(env: &Env, from: &Address, amount: u128) -> Result<u128, ContractError> {
        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }
        let client = token::Client::new(env, &Self::stake_token(env)?);
        let pool = env.current_contract_address();

        let before = client.balance(&pool);
        client.transfer(from, &pool, &token_amount(amount)?);
        let after = client.balance(&pool);

        let received = after
            .checked_sub(before)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let received = u128::try_from(received).map_err(|_| ContractError::ArithmeticOverflow)?;
        if received == 0 {
            return Err(ContractError::ZeroAmount);
        }
        Ok(received)
    }

    /// Reward balance minus staked principal when both use the same token,
    /// otherwise the full reward balance.
    fn available_rewards(env: &Env) -> Result<u128, ContractError> {
        let reward_token = Self::reward_token(env)?;
        let balance =
            token::Client::new(env, &reward_token).balance(&env.current_contract_address());
        let balance = u128::try_from(balance).unwrap_or(0);

        if reward_token == Self::stake_token(env)? {
            Ok(balance.saturating_sub(Self::get_total_staked(env.clone())))
        } else {
            Ok(balance)
        }
    }

    fn ensure_payable(env: &Env, reward: u128) -> Result<(), ContractError> {
        if reward == 0 {
            return Ok(());
        }
        let available = Self::available_rewards(env)?;
        if reward > available {
            log!(env, "reward exceeds pool balance", reward, available);
            return Err(ContractError::InsufficientPoolBalance);
        }
        Ok(())
    }

    fn pay_reward(env: &Env, to: &Address, reward: u128) -> Result<(), ContractError> {
        if reward == 0 {
            return Ok(());
        }
        token::Client::new(env, &Self::reward_token(env)?).transfer(
            &env.current_contract_address(),
            to,
            &token_amount(reward)?,
        );
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────





#[cfg(test)]
mod test_nft;
