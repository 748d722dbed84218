#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub authority: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub reward_rate: i128,
    pub timestamp: u64,
}

/// Shared payload of the four participant completion signals.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerEvent {
    pub staker: Address,
    pub amount: i128,
    pub total_staked: i128,
    pub timestamp: u64,
}

/// Fired when the authority changes the emission rate.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub old_rate: i128,
    pub new_rate: i128,
    /// Accumulator value locked in under the old rate.
    pub accumulator: i128,
    pub timestamp: u64,
}

/// Fired when an authority handoff is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityProposedEvent {
    pub current: Address,
    pub proposed: Address,
    pub timestamp: u64,
}

/// Fired when a handoff completes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityAcceptedEvent {
    pub previous: Address,
    pub current: Address,
    pub timestamp: u64,
}

/// Fired when a pending handoff is withdrawn.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityCancelledEvent {
    pub current: Address,
    pub cancelled: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    authority: Address,
    stake_token: Address,
    reward_token: Address,
    reward_rate: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            authority,
            stake_token,
            reward_token,
            reward_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

fn publish_staker_event(
    env: &Env,
    topic: Symbol,
    staker: Address,
    amount: i128,
    total_staked: i128,
) {
    env.events().publish(
        (topic, staker.clone()),
        StakerEvent {
            staker,
            amount,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, total_staked: i128) {
    publish_staker_event(env, symbol_short!("STAKED"), staker, amount, total_staked);
}

pub fn publish_withdrawn(env: &Env, staker: Address, amount: i128, total_staked: i128) {
    publish_staker_event(env, symbol_short!("WITHDRAWN"), staker, amount, total_staked);
}

pub fn publish_reward_claimed(env: &Env, staker: Address, amount: i128, total_staked: i128) {
    publish_staker_event(env, symbol_short!("CLAIMED"), staker, amount, total_staked);
}

pub fn publish_emergency_exit(env: &Env, staker: Address, amount: i128, total_staked: i128) {
    publish_staker_event(env, symbol_short!("EMERG"), staker, amount, total_staked);
}

pub fn publish_reward_rate_set(env: &Env, old_rate: i128, new_rate: i128, accumulator: i128) {
    env.events().publish(
        (symbol_short!("RATE_SET"),),
        RewardRateSetEvent {
            old_rate,
            new_rate,
            accumulator,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_authority_proposed(env: &Env, current: Address, proposed: Address) {
    env.events().publish(
        (symbol_short!("AUTH_PROP"), current.clone()),
        AuthorityProposedEvent {
            current,
            proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_authority_accepted(env: &Env, previous: Address, current: Address) {
    env.events().publish(
        (symbol_short!("AUTH_ACPT"), current.clone()),
        AuthorityAcceptedEvent {
            previous,
            current,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_authority_cancelled(env: &Env, current: Address, cancelled: Address) {
    env.events().publish(
        (symbol_short!("AUTH_CNCL"), current.clone()),
        AuthorityCancelledEvent {
            current,
            cancelled,
            timestamp: env.ledger().timestamp(),
        },
    );
}
