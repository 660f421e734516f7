#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use staking_pool::{config::RewardParams, StakingPool, StakingPoolClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    StakeUnlocked { amount: u64 },
    StakeLocked { amount: u64, duration: u32 },
    Unstake { amount: u64, locked: bool, exit: bool },
    Claim,
    Advance { secs: u32 },
    AppendConfig { rate: u16, min: u16, span: u16, period: u16 },
    ToggleExit { enabled: bool },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingPool, ());
    let client = StakingPoolClient::new(&env, &contract_id);
    let votes_token = env
        .register_stellar_asset_contract_v2(contract_id.clone())
        .address();

    let admin = Address::generate(&env);
    client.initialize(
        &admin,
        &stake_token,
        &stake_token,
        &Some(votes_token),
        &RewardParams {
            rewards_per_period: 100,
            period_length: 3600,
            minimum_lock_time: 60,
            min_multiplier: 100,
            max_multiplier: 300,
        },
        &false,
    );
    StellarAssetClient::new(&env, &stake_token).mint(&contract_id, &1_000_000_000_000);

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&user, &(u64::MAX as i128));
        users.push(user);
    }

    // Every call goes through try_*; only panics and broken accounting are
    // findings.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::StakeUnlocked { amount } => {
                let _ = client.try_stake_unlocked(caller, &(amount as u128));
            }
            FuzzAction::StakeLocked { amount, duration } => {
                let _ = client.try_stake_locked(caller, &(amount as u128), &(duration as u64));
            }
            FuzzAction::Unstake { amount, locked, exit } => {
                let _ = client.try_unstake(caller, &(amount as u128), &locked, &exit);
            }
            FuzzAction::Claim => {
                let _ = client.try_claim(caller);
            }
            FuzzAction::Advance { secs } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(secs as u64));
            }
            FuzzAction::AppendConfig { rate, min, span, period } => {
                let _ = client.try_append_config(
                    &admin,
                    &RewardParams {
                        rewards_per_period: rate as u128,
                        period_length: period as u64,
                        minimum_lock_time: 60,
                        min_multiplier: min as u128,
                        max_multiplier: min as u128 + span as u128,
                    },
                );
            }
            FuzzAction::ToggleExit { enabled } => {
                let _ = client.try_set_can_exit(&admin, &enabled);
            }
        }

        let staked: u128 = users
            .iter()
            .filter_map(|u| client.get_account(u))
            .map(|a| a.unlocked_principal() + a.locked_principal())
            .sum();
        assert_eq!(staked, client.get_total_staked());
    }
});
