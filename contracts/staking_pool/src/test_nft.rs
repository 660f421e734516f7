extern crate std;

use soroban_sdk::{
    contract, contractimpl,
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Env, Vec,
};

use crate::config::RewardParams;
use crate::nft::{NftDeposit, StakeKind};
use crate::test::{expect_error, params, setup};
use crate::{ContractError, StakingPool, StakingPoolClient};

// ── Minimal NFT collection ───────────────────────────────────────────────────

#[contract]
pub struct Collection;

#[contractimpl]
impl Collection {
    pub fn mint(env: Env, to: Address, token_id: u32) {
        env.storage().persistent().set(&token_id, &to);
    }

    pub fn owner_of(env: Env, token_id: u32) -> Address {
        env.storage()
            .persistent()
            .get(&token_id)
            .expect("token does not exist")
    }

    pub fn transfer(env: Env, from: Address, to: Address, token_id: u32) {
        from.require_auth();
        let owner: Address = env
            .storage()
            .persistent()
            .get(&token_id)
            .expect("token does not exist");
        assert_eq!(owner, from, "sender does not own token");
        env.storage().persistent().set(&token_id, &to);
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

struct NftPool {
    env: Env,
    client: StakingPoolClient<'static>,
    id: Address,
    admin: Address,
    collection: CollectionClient<'static>,
    reward_token: Address,
    votes_token: Address,
}

impl NftPool {
    /// A fresh staker owning `token_ids`.
    fn staker(&self, token_ids: &[u32]) -> Address {
        let staker = Address::generate(&self.env);
        for token_id in token_ids {
            self.collection.mint(&staker, token_id);
        }
        staker
    }

    fn ids(&self, token_ids: &[u32]) -> Vec<u32> {
        Vec::from_slice(&self.env, token_ids)
    }

    fn at(&self, timestamp: u64) -> &Self {
        self.env.ledger().set_timestamp(timestamp);
        self
    }

    fn reward_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.reward_token).balance(who)
    }

    fn votes_balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.votes_token).balance(who)
    }
}

/// 100_000 per period of 100, so one locked id at multiplier 100 earns 1 a
/// second and one unlocked id earns 1 a second.
fn nft_params() -> RewardParams {
    RewardParams {
        rewards_per_period: 100_000,
        period_length: 100,
        minimum_lock_time: 10,
        min_multiplier: 10,
        max_multiplier: 100,
    }
}

fn setup_nft(params: RewardParams, can_exit: bool, reward_funding: i128) -> NftPool {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let collection_id = env.register(Collection, ());
    let collection = CollectionClient::new(&env, &collection_id);
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let id = env.register(StakingPool, ());
    let client = StakingPoolClient::new(&env, &id);
    let votes_token = env.register_stellar_asset_contract_v2(id.clone()).address();

    let admin = Address::generate(&env);
    client.initialize_nft(
        &admin,
        &collection_id,
        &reward_token,
        &Some(votes_token.clone()),
        &params,
        &can_exit,
    );
    if reward_funding > 0 {
        StellarAssetClient::new(&env, &reward_token).mint(&id, &reward_funding);
    }

    NftPool {
        env,
        client,
        id,
        admin,
        collection,
        reward_token,
        votes_token,
    }
}

// ── Initialisation ───────────────────────────────────────────────────────────

#[test]
fn test_initialize_nft_pool() {
    let pool = setup_nft(nft_params(), false, 0);

    assert_eq!(pool.client.get_stake_kind(), StakeKind::NonFungible);
    assert_eq!(pool.client.get_total_staked(), 0);
    assert_eq!(pool.client.get_role(&pool.admin), Some(crate::admin::AdminRole::SuperAdmin));
}

#[test]
fn test_calls_for_the_other_kind_fail() {
    let pool = setup_nft(nft_params(), false, 0);
    let staker = Address::generate(&pool.env);
    expect_error(
        pool.client.try_stake_unlocked(&staker, &100),
        ContractError::WrongStakeKind,
    );
    expect_error(
        pool.client.try_unstake(&staker, &100, &false, &false),
        ContractError::WrongStakeKind,
    );

    let fungible = setup(params(6, 17));
    assert_eq!(fungible.client.get_stake_kind(), StakeKind::Fungible);
    expect_error(
        fungible
            .client
            .try_stake_nft_unlocked(&staker, &vec![&fungible.env, 1]),
        ContractError::WrongStakeKind,
    );
    expect_error(
        fungible
            .client
            .try_unstake_nft(&staker, &vec![&fungible.env, 1], &false),
        ContractError::WrongStakeKind,
    );
}

// ── Staking ──────────────────────────────────────────────────────────────────

#[test]
fn test_stake_nfts_counts_one_unit_each() {
    let pool = setup_nft(nft_params(), false, 1_000_000);
    let staker = pool.staker(&[1, 2, 3]);

    pool.client.stake_nft_unlocked(&staker, &pool.ids(&[1, 2, 3]));

    assert_eq!(pool.client.get_total_staked(), 3);
    assert_eq!(pool.votes_balance(&staker), 3);
    assert_eq!(pool.client.get_account(&staker).unwrap().unlocked_principal(), 3);
    for token_id in 1..=3 {
        assert_eq!(pool.collection.owner_of(&token_id), pool.id);
        assert_eq!(
            pool.client.get_nft_deposit(&token_id),
            Some(NftDeposit {
                owner: staker.clone(),
                locked: false,
            })
        );
    }

    // 3 × 100_000 × 10 / 100 / 1000 = 30
    pool.at(10);
    assert_eq!(pool.client.claim(&staker), 30);
    assert_eq!(pool.reward_balance(&staker), 30);
}

#[test]
fn test_stake_rejects_bad_token_lists() {
    let pool = setup_nft(nft_params(), false, 0);
    let staker = pool.staker(&[1, 2]);
    let other = pool.staker(&[3]);

    expect_error(
        pool.client.try_stake_nft_unlocked(&staker, &pool.ids(&[])),
        ContractError::ZeroAmount,
    );
    expect_error(
        pool.client.try_stake_nft_unlocked(&staker, &pool.ids(&[1, 1])),
        ContractError::NftAlreadyStaked,
    );
    expect_error(
        pool.client.try_stake_nft_unlocked(&staker, &pool.ids(&[1, 3])),
        ContractError::NotTokenOwner,
    );
    assert_eq!(pool.collection.owner_of(&1), staker);

    pool.client.stake_nft_unlocked(&other, &pool.ids(&[3]));
    expect_error(
        pool.client.try_stake_nft_locked(&other, &pool.ids(&[3]), &50),
        ContractError::NftAlreadyStaked,
    );
    assert_eq!(pool.client.get_total_staked(), 1);
}

// ── Locked NFTs ──────────────────────────────────────────────────────────────

#[test]
fn test_locked_nfts_stay_until_unlock() {
    let pool = setup_nft(nft_params(), false, 1_000_000);
    let staker = pool.staker(&[7, 8]);

    pool.client.stake_nft_locked(&staker, &pool.ids(&[7, 8]), &50);
    assert_eq!(pool.client.get_remaining_lock(&staker), 50);

    pool.at(30);
    expect_error(
        pool.client.try_unstake_nft(&staker, &pool.ids(&[7]), &false),
        ContractError::LockNotPassed,
    );
    expect_error(
        pool.client.try_unstake_nft(&staker, &pool.ids(&[7]), &true),
        ContractError::ExitDisabled,
    );

    // 55 × 2 × 100_000 × 50 / 100 / 100_000 = 55
    pool.at(50);
    assert_eq!(pool.client.unstake_nft(&staker, &pool.ids(&[7, 8]), &false), 55);
    assert_eq!(pool.collection.owner_of(&7), staker);
    assert_eq!(pool.collection.owner_of(&8), staker);
    assert_eq!(pool.client.get_nft_deposit(&7), None);
    assert_eq!(pool.votes_balance(&staker), 0);
    assert_eq!(pool.client.get_total_staked(), 0);
    assert!(pool.client.get_account(&staker).is_none());
}

#[test]
fn test_unstake_spans_both_buckets() {
    let pool = setup_nft(nft_params(), false, 1_000_000);
    let staker = pool.staker(&[1, 2, 3]);

    pool.client.stake_nft_unlocked(&staker, &pool.ids(&[1]));
    pool.client.stake_nft_locked(&staker, &pool.ids(&[2, 3]), &100);

    // Unlocked: 1 × 100_000 × 100 / 100_000 = 100.
    // Locked:   100 × 2 × 100_000 × 100 / 10_000_000 = 200.
    pool.at(100);
    let paid = pool.client.unstake_nft(&staker, &pool.ids(&[3, 1]), &false);
    assert_eq!(paid, 300);

    let account = pool.client.get_account(&staker).unwrap();
    assert_eq!(account.unlocked_principal(), 0);
    assert_eq!(account.locked_principal(), 1);
    assert_eq!(pool.collection.owner_of(&2), pool.id);
    assert_eq!(pool.collection.owner_of(&3), staker);
}

#[test]
fn test_unstake_only_own_tokens() {
    let pool = setup_nft(nft_params(), false, 1_000_000);
    let alice = pool.staker(&[1]);
    let bob = pool.staker(&[2]);

    pool.client.stake_nft_unlocked(&alice, &pool.ids(&[1]));
    pool.client.stake_nft_unlocked(&bob, &pool.ids(&[2]));

    pool.at(10);
    expect_error(
        pool.client.try_unstake_nft(&bob, &pool.ids(&[1]), &false),
        ContractError::NftNotStaked,
    );
    expect_error(
        pool.client.try_unstake_nft(&alice, &pool.ids(&[1, 1]), &false),
        ContractError::NftNotStaked,
    );
    expect_error(
        pool.client.try_unstake_nft(&alice, &pool.ids(&[9]), &false),
        ContractError::NftNotStaked,
    );
    assert_eq!(pool.collection.owner_of(&1), pool.id);
    assert_eq!(pool.client.get_total_staked(), 2);
}

#[test]
fn test_nft_exit_on_unfunded_pool_returns_tokens() {
    let pool = setup_nft(nft_params(), true, 0);
    let staker = pool.staker(&[4, 5]);

    pool.client.stake_nft_locked(&staker, &pool.ids(&[4, 5]), &50);

    pool.at(20);
    assert_eq!(pool.client.unstake_nft(&staker, &pool.ids(&[4, 5]), &true), 0);
    assert_eq!(pool.collection.owner_of(&4), staker);
    assert_eq!(pool.collection.owner_of(&5), staker);
    assert_eq!(pool.client.get_total_staked(), 0);
    assert!(pool.client.get_account(&staker).is_none());
}
