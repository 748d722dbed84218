use soroban_sdk::{contracttype, Address, Env};

use crate::ledger::{Pool, Position};
use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Initialized,
    StakeToken,
    RewardToken,
    Pool,
    /// Persistent, one entry per participant.
    Position(Address),
}

// ── TTL constants ────────────────────────────────────────────────────────────

const DAY_IN_LEDGERS: u32 = 17_280;
const TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
const TTL_EXTEND_TO: u32 = 60 * DAY_IN_LEDGERS;

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Configuration ────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

pub fn set_tokens(env: &Env, stake_token: &Address, reward_token: &Address) {
    env.storage().instance().set(&DataKey::StakeToken, stake_token);
    env.storage().instance().set(&DataKey::RewardToken, reward_token);
}

pub fn stake_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::StakeToken)
        .ok_or(ContractError::NotInitialized)
}

pub fn reward_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::RewardToken)
        .ok_or(ContractError::NotInitialized)
}

// ── Pool ─────────────────────────────────────────────────────────────────────

pub fn load_pool(env: &Env) -> Result<Pool, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Pool)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_pool(env: &Env, pool: &Pool) {
    env.storage().instance().set(&DataKey::Pool, pool);
}

// ── Positions ────────────────────────────────────────────────────────────────

/// Missing entries read as an all-zero position.
pub fn load_position(env: &Env, staker: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&DataKey::Position(staker.clone()))
        .unwrap_or_default()
}

/// Writes the position, or drops the entry once it holds nothing at all.
pub fn save_position(env: &Env, staker: &Address, position: &Position) {
    let key = DataKey::Position(staker.clone());
    if *position == Position::default() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
