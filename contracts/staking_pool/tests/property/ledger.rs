#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! State machine properties for the stake ledger.
//!
//! Random sequences of stake / unstake / claim / config / time steps are
//! replayed against a pool. After every step:
//! - `get_total_staked` equals the sum of all accounts' principal, and the
//!   pool's stake-token balance
//! - each staker's votes balance equals their principal
//! - a locked bucket's unlock timestamp never moves backwards while it holds
//!   principal
//! - an account with no principal in either bucket is absent from storage

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use staking_pool::config::RewardParams;
use staking_pool::{StakingPool, StakingPoolClient};

const STAKERS: usize = 3;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Harness {
    env: Env,
    client: StakingPoolClient<'static>,
    id: Address,
    admin: Address,
    stake_token: Address,
    votes_token: Address,
    stakers: Vec<Address>,
}

fn setup() -> Harness {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let id = env.register(StakingPool, ());
    let client = StakingPoolClient::new(&env, &id);
    let votes_token = env.register_stellar_asset_contract_v2(id.clone()).address();

    let admin = Address::generate(&env);
    client.initialize(
        &admin,
        &stake_token,
        &reward_token,
        &Some(votes_token.clone()),
        &RewardParams {
            rewards_per_period: 5,
            period_length: 100,
            minimum_lock_time: 10,
            min_multiplier: 10,
            max_multiplier: 100,
        },
        &true,
    );
    StellarAssetClient::new(&env, &reward_token).mint(&id, &i128::MAX);

    let mut stakers = Vec::new();
    for _ in 0..STAKERS {
        let staker = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&staker, &1_000_000_000);
        stakers.push(staker);
    }

    Harness {
        env,
        client,
        id,
        admin,
        stake_token,
        votes_token,
        stakers,
    }
}

#[derive(Clone, Debug)]
enum Op {
    StakeUnlocked { who: usize, amount: u128 },
    StakeLocked { who: usize, amount: u128, duration: u64 },
    Unstake { who: usize, amount: u128, locked: bool, exit: bool },
    Claim { who: usize },
    Advance { secs: u64 },
    AppendConfig { rate: u128, min: u128, span: u128 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..STAKERS, 1u128..100_000).prop_map(|(who, amount)| Op::StakeUnlocked { who, amount }),
        (0..STAKERS, 1u128..100_000, 0u64..400)
            .prop_map(|(who, amount, duration)| Op::StakeLocked { who, amount, duration }),
        (0..STAKERS, 1u128..120_000, any::<bool>(), any::<bool>()).prop_map(
            |(who, amount, locked, exit)| Op::Unstake { who, amount, locked, exit }
        ),
        (0..STAKERS).prop_map(|who| Op::Claim { who }),
        (0u64..200).prop_map(|secs| Op::Advance { secs }),
        (0u128..50, 0u128..100, 0u128..400)
            .prop_map(|(rate, min, span)| Op::AppendConfig { rate, min, span }),
    ]
}

fn apply(h: &Harness, op: &Op) {
    match *op {
        Op::StakeUnlocked { who, amount } => {
            let _ = h.client.try_stake_unlocked(&h.stakers[who], &amount);
        }
        Op::StakeLocked { who, amount, duration } => {
            let _ = h.client.try_stake_locked(&h.stakers[who], &amount, &duration);
        }
        Op::Unstake { who, amount, locked, exit } => {
            let _ = h.client.try_unstake(&h.stakers[who], &amount, &locked, &exit);
        }
        Op::Claim { who } => {
            let _ = h.client.try_claim(&h.stakers[who]);
        }
        Op::Advance { secs } => {
            let now = h.env.ledger().timestamp();
            h.env.ledger().set_timestamp(now + secs);
        }
        Op::AppendConfig { rate, min, span } => {
            let _ = h.client.try_append_config(
                &h.admin,
                &RewardParams {
                    rewards_per_period: rate,
                    period_length: 100,
                    minimum_lock_time: 10,
                    min_multiplier: min,
                    max_multiplier: min + span,
                },
            );
        }
    }
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_ledger_invariants_hold(ops in prop::collection::vec(op(), 1..40)) {
        let h = setup();
        let stake = TokenClient::new(&h.env, &h.stake_token);
        let votes = TokenClient::new(&h.env, &h.votes_token);
        let mut last_unlock = [0u64; STAKERS];

        for op in &ops {
            apply(&h, op);

            let mut sum: u128 = 0;
            for (i, staker) in h.stakers.iter().enumerate() {
                let (principal, unlock) = match h.client.get_account(staker) {
                    Some(account) => {
                        let principal = account.unlocked_principal() + account.locked_principal();
                        prop_assert!(principal > 0, "empty account left in storage");
                        (principal, account.unlock_timestamp())
                    }
                    None => (0, 0),
                };
                sum += principal;
                prop_assert_eq!(votes.balance(staker), principal as i128);

                if unlock != 0 && last_unlock[i] != 0 {
                    prop_assert!(unlock >= last_unlock[i], "unlock moved backwards");
                }
                last_unlock[i] = unlock;
            }

            let total = h.client.get_total_staked();
            prop_assert_eq!(total, sum);
            prop_assert_eq!(stake.balance(&h.id), total as i128);
        }
    }
}
