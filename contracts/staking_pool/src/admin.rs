use soroban_sdk::{contracttype, log, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Roles ────────────────────────────────────────────────────────────────────

/// Pool admin hierarchy. A higher role carries every permission of the
/// roles below it.
///
/// - `Operator`      – toggles the pool-level exit flag.
/// - `RewardManager` – appends reward configs.
/// - `SuperAdmin`    – grants and revokes roles and withdraws leftover rewards.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminRole {
    Operator = 1,
    RewardManager = 2,
    SuperAdmin = 3,
}

impl AdminRole {
    pub fn rank(&self) -> u32 {
        *self as u32
    }

    pub fn covers(&self, required: AdminRole) -> bool {
        self.rank() >= required.rank()
    }
}

fn role_key(who: &Address) -> (Symbol, Address) {
    (ROLE_PREFIX, who.clone())
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

/// Callers must check authorization first.
pub fn set_role(env: &Env, who: &Address, role: AdminRole) {
    let key = role_key(who);
    env.storage().persistent().set(&key, &role);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn get_role(env: &Env, who: &Address) -> Option<AdminRole> {
    let key = role_key(who);
    let role: Option<AdminRole> = env.storage().persistent().get(&key);
    if role.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    role
}

pub fn remove_role(env: &Env, who: &Address) {
    env.storage().persistent().remove(&role_key(who));
}

/// Fails with `Unauthorized` unless `caller` holds at least `required`.
pub fn require_role(env: &Env, caller: &Address, required: AdminRole) -> Result<(), ContractError> {
    match get_role(env, caller) {
        Some(role) if role.covers(required) => Ok(()),
        _ => {
            log!(env, "caller lacks role", caller.clone(), required.rank());
            Err(ContractError::Unauthorized)
        }
    }
}
