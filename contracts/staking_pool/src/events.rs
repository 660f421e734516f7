#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Vec};

use crate::admin::AdminRole;
use crate::nft::StakeKind;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub kind: StakeKind,
    pub admin: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub votes_token: Option<Address>,
    pub can_exit: bool,
    pub timestamp: u64,
}

/// Fired on every deposit into either bucket.
///
/// `transfer_amount` is what the staker asked to move; `principal_added` is
/// what the pool actually received and credited.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub account: Address,
    pub principal_added: u128,
    pub transfer_amount: u128,
    pub locked: bool,
    pub unlock_timestamp: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEvent {
    pub account: Address,
    pub amount: u128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub account: Address,
    pub amount: u128,
    pub locked: bool,
    pub exit: bool,
    pub timestamp: u64,
}

/// NFT counterpart of `StakedEvent`; each id is one unit of principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NftStakedEvent {
    pub account: Address,
    pub token_ids: Vec<u32>,
    pub locked: bool,
    pub unlock_timestamp: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NftUnstakedEvent {
    pub account: Address,
    pub token_ids: Vec<u32>,
    pub exit: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigAppendedEvent {
    pub index: u32,
    pub effective_from: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeftoverWithdrawnEvent {
    pub to: Address,
    pub amount: u128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExitToggledEvent {
    pub enabled: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub caller: Address,
    pub target: Address,
    /// `None` when the role was revoked.
    pub role: Option<AdminRole>,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    kind: StakeKind,
    admin: Address,
    stake_token: Address,
    reward_token: Address,
    votes_token: Option<Address>,
    can_exit: bool,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            kind,
            admin,
            stake_token,
            reward_token,
            votes_token,
            can_exit,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    account: Address,
    principal_added: u128,
    transfer_amount: u128,
    locked: bool,
    unlock_timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("STAKED"), account.clone()),
        StakedEvent {
            account,
            principal_added,
            transfer_amount,
            locked,
            unlock_timestamp,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claimed(env: &Env, account: Address, amount: u128) {
    env.events().publish(
        (symbol_short!("CLMD"), account.clone()),
        ClaimedEvent {
            account,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, account: Address, amount: u128, locked: bool, exit: bool) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), account.clone()),
        UnstakedEvent {
            account,
            amount,
            locked,
            exit,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_nft_staked(
    env: &Env,
    account: Address,
    token_ids: Vec<u32>,
    locked: bool,
    unlock_timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("NFT_STK"), account.clone()),
        NftStakedEvent {
            account,
            token_ids,
            locked,
            unlock_timestamp,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_nft_unstaked(env: &Env, account: Address, token_ids: Vec<u32>, exit: bool) {
    env.events().publish(
        (symbol_short!("NFT_UNSTK"), account.clone()),
        NftUnstakedEvent {
            account,
            token_ids,
            exit,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_config_appended(env: &Env, index: u32, effective_from: u64) {
    env.events().publish(
        (symbol_short!("CFG_APND"),),
        ConfigAppendedEvent {
            index,
            effective_from,
        },
    );
}

pub fn publish_leftover_withdrawn(env: &Env, to: Address, amount: u128) {
    env.events().publish(
        (symbol_short!("LEFTOVER"),),
        LeftoverWithdrawnEvent {
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_exit_toggled(env: &Env, enabled: bool) {
    env.events().publish(
        (symbol_short!("EXIT_SET"),),
        ExitToggledEvent {
            enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_changed(env: &Env, caller: Address, target: Address, role: Option<AdminRole>) {
    env.events().publish(
        (symbol_short!("ROLE_SET"), target.clone()),
        RoleChangedEvent {
            caller,
            target,
            role,
            timestamp: env.ledger().timestamp(),
        },
    );
}
