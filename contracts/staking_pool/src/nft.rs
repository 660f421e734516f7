//! Non-fungible staking.
//!
//! A pool initialised over an NFT collection takes token ids instead of
//! amounts. Each id counts as one unit of principal in the same unlocked and
//! locked buckets, and the pool remembers which account deposited it into
//! which bucket until it is withdrawn.

use soroban_sdk::{contractclient, contracttype, log, symbol_short, Address, Env, Map, Symbol, Vec};

use crate::ledger::Withdrawal;
use crate::ContractError;

const DEPOSIT: Symbol = symbol_short!("NFT_DEP");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Subset of an NFT collection the pool calls into.
#[contractclient(name = "NftClient")]
pub trait NonFungibleInterface {
    fn owner_of(env: Env, token_id: u32) -> Address;
    fn transfer(env: Env, from: Address, to: Address, token_id: u32);
}

/// What the pool's stake token is, fixed at initialisation.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum StakeKind {
    Fungible = 0,
    NonFungible = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NftDeposit {
    pub owner: Address,
    pub locked: bool,
}

fn deposit_key(token_id: u32) -> (Symbol, u32) {
    (DEPOSIT, token_id)
}

pub fn get_deposit(env: &Env, token_id: u32) -> Option<NftDeposit> {
    env.storage().persistent().get(&deposit_key(token_id))
}

/// Pull every id in `token_ids` from `owner` into the pool and record which
/// bucket it went to. Returns the principal credited.
pub fn deposit(
    env: &Env,
    collection: &Address,
    owner: &Address,
    token_ids: &Vec<u32>,
    locked: bool,
) -> Result<u128, ContractError> {
    if token_ids.is_empty() {
        return Err(ContractError::ZeroAmount);
    }

    let client = NftClient::new(env, collection);
    let mut seen: Map<u32, bool> = Map::new(env);
    for token_id in token_ids.iter() {
        if seen.contains_key(token_id) || get_deposit(env, token_id).is_some() {
            log!(env, "token already staked", token_id);
            return Err(ContractError::NftAlreadyStaked);
        }
        if client.owner_of(&token_id) != *owner {
            log!(env, "caller does not own token", token_id, owner.clone());
            return Err(ContractError::NotTokenOwner);
        }
        seen.set(token_id, true);
    }

    let pool = env.current_contract_address();
    for token_id in token_ids.iter() {
        client.transfer(owner, &pool, &token_id);

        let key = deposit_key(token_id);
        let record = NftDeposit {
            owner: owner.clone(),
            locked,
        };
        env.storage().persistent().set(&key, &record);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    Ok(token_ids.len() as u128)
}

/// Check that `owner` staked every id in `token_ids` exactly once and count
/// how many leave each bucket. Nothing is changed.
pub fn plan_withdrawal(
    env: &Env,
    owner: &Address,
    token_ids: &Vec<u32>,
) -> Result<Withdrawal, ContractError> {
    if token_ids.is_empty() {
        return Err(ContractError::ZeroAmount);
    }

    let mut seen: Map<u32, bool> = Map::new(env);
    let mut plan = Withdrawal::default();
    for token_id in token_ids.iter() {
        let record = match get_deposit(env, token_id) {
            Some(record) if record.owner == *owner && !seen.contains_key(token_id) => record,
            _ => {
                log!(env, "token not staked by caller", token_id, owner.clone());
                return Err(ContractError::NftNotStaked);
            }
        };
        seen.set(token_id, true);

        if record.locked {
            plan.locked += 1;
        } else {
            plan.unlocked += 1;
        }
    }
    Ok(plan)
}

/// Hand every id in `token_ids` back to `owner` and forget its record.
/// Call `plan_withdrawal` first.
pub fn release(env: &Env, collection: &Address, owner: &Address, token_ids: &Vec<u32>) {
    let client = NftClient::new(env, collection);
    let pool = env.current_contract_address();
    for token_id in token_ids.iter() {
        env.storage().persistent().remove(&deposit_key(token_id));
        client.transfer(&pool, owner, &token_id);
    }
}
