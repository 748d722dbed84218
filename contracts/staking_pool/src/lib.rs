#![no_std]

pub mod assets;
pub mod boost;
pub mod events;
pub mod ledger;
pub mod rewards;
pub mod storage;

use common::{authority, reentrancy, CommonError};
use soroban_sdk::{contract, contracterror, contractimpl, contracttype, log, Address, Env};

use ledger::{LedgerError, Pool, Position};

// ── Contract errors ──────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    /// A token identity was missing at initialisation.
    ZeroAddress = 4,
    ZeroValue = 5,
    TransferFailed = 6,
    InsufficientBalance = 7,
    /// A guarded entry point was re-entered while another was running.
    Reentrant = 8,
    /// Negative amount or rate.
    InvalidInput = 9,
    MathOverflow = 10,
    NoPendingAuthority = 11,
}

impl From<LedgerError> for ContractError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::ZeroValue => ContractError::ZeroValue,
            LedgerError::InsufficientBalance { .. } => ContractError::InsufficientBalance,
            LedgerError::Overflow => ContractError::MathOverflow,
        }
    }
}

impl From<CommonError> for ContractError {
    fn from(e: CommonError) -> Self {
        match e {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            CommonError::AccessDenied => ContractError::Unauthorized,
            CommonError::NoPendingTransfer => ContractError::NoPendingAuthority,
            CommonError::Reentrant => ContractError::Reentrant,
        }
    }
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Snapshot of a participant's position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerInfo {
    pub staked: i128,
    pub stake_start: u64,
    pub pending_rewards: i128,
    pub boost_multiplier: u32,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPool;

#[contractimpl]
impl StakingPool {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `authority`    – the only address allowed to change the reward rate.
    /// * `stake_token`  – token participants deposit.
    /// * `reward_token` – token paid out as reward; the pool must be funded
    ///   with it separately.
    /// * `reward_rate`  – reward units emitted **per second** across all
    ///   stakers. Must be positive.
    pub fn initialize(
        env: Env,
        authority: Address,
        stake_token: Option<Address>,
        reward_token: Option<Address>,
        reward_rate: i128,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        let stake_token = stake_token.ok_or(ContractError::ZeroAddress)?;
        let reward_token = reward_token.ok_or(ContractError::ZeroAddress)?;
        Self::validate_rate(reward_rate)?;

        let now = env.ledger().timestamp();

        storage::set_initialized(&env);
        storage::set_tokens(&env, &stake_token, &reward_token);
        storage::save_pool(&env, &Pool::new(reward_rate, now));
        authority::set_authority(&env, &authority);
        storage::bump_instance(&env);

        events::publish_initialized(&env, authority, stake_token, reward_token, reward_rate);

        Ok(())
    }

    // ── Participant operations ──────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    ///
    /// The caller's position is settled first so the new tokens never earn
    /// retroactively. A position entering from zero starts a fresh boost
    /// streak; a top-up keeps the running one.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        staker.require_auth();
        reentrancy::non_reentrant(&env, || Self::do_stake(&env, &staker, amount))
    }

    /// Return `amount` staked tokens to the caller, keeping accrued reward.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        staker.require_auth();
        reentrancy::non_reentrant(&env, || Self::do_withdraw(&env, &staker, amount))
    }

    /// Pay out everything the caller has earned. Returns the amount paid.
    ///
    /// Fails with `ZeroValue` when there is nothing to claim.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        staker.require_auth();
        reentrancy::non_reentrant(&env, || Self::do_claim(&env, &staker))
    }

    /// Return the caller's whole stake without settling the caller's reward.
    ///
    /// Unclaimed reward, including accrual since the last settlement, is
    /// forfeited and the boost streak is reset. The pool accumulator is still
    /// brought up to date so it never moves backwards. Returns the amount
    /// returned.
    pub fn emergency_withdraw(env: Env, staker: Address) -> Result<i128, ContractError> {
        staker.require_auth();
        reentrancy::non_reentrant(&env, || Self::do_emergency_withdraw(&env, &staker))
    }

    // ── Authority operations ────────────────────────────────────────────────

    /// Update the reward emission rate.
    ///
    /// The accumulator is settled under the old rate first, so only accrual
    /// after this call uses `new_rate`.
    pub fn update_reward_rate(
        env: Env,
        caller: Address,
        new_rate: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        reentrancy::non_reentrant(&env, || Self::do_update_reward_rate(&env, &caller, new_rate))
    }

    /// Propose a new authority. Only the current authority can call this;
    /// the proposed address must call `accept_authority` to complete it.
    pub fn propose_authority(
        env: Env,
        current: Address,
        proposed: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current.require_auth();
        authority::propose_transfer(&env, &current, &proposed)?;

        events::publish_authority_proposed(&env, current, proposed);

        Ok(())
    }

    /// Accept a pending authority handoff.
    pub fn accept_authority(env: Env, proposed: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        proposed.require_auth();
        let previous = authority::accept_transfer(&env, &proposed)?;

        events::publish_authority_accepted(&env, previous, proposed);

        Ok(())
    }

    /// Withdraw a pending authority handoff.
    pub fn cancel_authority_transfer(env: Env, current: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current.require_auth();
        let cancelled = authority::cancel_transfer(&env, &current)?;

        events::publish_authority_cancelled(&env, current, cancelled);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    /// Accumulator value as of the current ledger timestamp.
    pub fn current_accumulator(env: Env) -> Result<i128, ContractError> {
        let pool = storage::load_pool(&env)?;
        Ok(pool.current_accumulator(&env, env.ledger().timestamp())?)
    }

    /// Real-time reward owed to `staker`, boost included, without mutating
    /// state.
    pub fn earned(env: Env, staker: Address) -> Result<i128, ContractError> {
        let now = env.ledger().timestamp();
        let accumulator = storage::load_pool(&env)?.current_accumulator(&env, now)?;
        Ok(storage::load_position(&env, &staker).earned(&env, accumulator, now)?)
    }

    /// Alias of [`StakingPool::earned`].
    pub fn pending_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::earned(env, staker)
    }

    /// Current boost multiplier of `staker` in percent (`100` = 1.0×).
    pub fn boost_multiplier(env: Env, staker: Address) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        Ok(storage::load_position(&env, &staker).boost_multiplier(env.ledger().timestamp()))
    }

    /// Raw ledger entry of `staker` as of its last settlement.
    pub fn get_position(env: Env, staker: Address) -> Result<Position, ContractError> {
        Self::require_initialized(&env)?;
        Ok(storage::load_position(&env, &staker))
    }

    /// Combined real-time view of a participant.
    pub fn get_staker_info(env: Env, staker: Address) -> Result<StakerInfo, ContractError> {
        let now = env.ledger().timestamp();
        let accumulator = storage::load_pool(&env)?.current_accumulator(&env, now)?;
        let position = storage::load_position(&env, &staker);

        Ok(StakerInfo {
            staked: position.amount,
            stake_start: position.stake_start,
            pending_rewards: position.earned(&env, accumulator, now)?,
            boost_multiplier: position.boost_multiplier(now),
        })
    }

    /// Global pool state as of its last settlement.
    pub fn get_pool(env: Env) -> Result<Pool, ContractError> {
        storage::load_pool(&env)
    }

    pub fn get_total_staked(env: Env) -> Result<i128, ContractError> {
        Ok(storage::load_pool(&env)?.total_staked)
    }

    pub fn get_reward_rate(env: Env) -> Result<i128, ContractError> {
        Ok(storage::load_pool(&env)?.reward_rate)
    }

    pub fn get_stake_token(env: Env) -> Result<Address, ContractError> {
        storage::stake_token(&env)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        storage::reward_token(&env)
    }

    pub fn get_authority(env: Env) -> Result<Address, ContractError> {
        authority::authority(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_pending_authority(env: Env) -> Option<Address> {
        authority::pending_authority(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn validate_amount(amount: i128) -> Result<(), ContractError> {
        if amount == 0 {
            return Err(ContractError::ZeroValue);
        }
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }
        Ok(())
    }

    fn validate_rate(rate: i128) -> Result<(), ContractError> {
        Self::validate_amount(rate)
    }

    /// Writes the staged pool and position. Only reached after every token
    /// transfer of the operation has succeeded.
    fn commit(env: &Env, pool: &Pool, staker: &Address, position: &Position) {
        storage::save_pool(env, pool);
        storage::save_position(env, staker, position);
        storage::bump_instance(env);
    }

    fn do_stake(env: &Env, staker: &Address, amount: i128) -> Result<(), ContractError> {
        Self::validate_amount(amount)?;

        let now = env.ledger().timestamp();
        let mut pool = storage::load_pool(env)?;
        let mut position = storage::load_position(env, staker);

        ledger::settle(env, &mut pool, Some(&mut position), now)?;
        position.deposit(amount, now)?;
        pool.deposit(amount)?;

        assets::transfer_in(env, &storage::stake_token(env)?, staker, amount)?;

        Self::commit(env, &pool, staker, &position);
        events::publish_staked(env, staker.clone(), amount, pool.total_staked);

        Ok(())
    }

    fn do_withdraw(env: &Env, staker: &Address, amount: i128) -> Result<(), ContractError> {
        Self::validate_amount(amount)?;

        let now = env.ledger().timestamp();
        let mut pool = storage::load_pool(env)?;
        let mut position = storage::load_position(env, staker);

        // Checked against the pre-settlement amount.
        if let Err(e) = position.ensure_covers(amount) {
            if let LedgerError::InsufficientBalance { actual, requested } = e {
                log!(env, "withdraw exceeds stake", staker.clone(), actual, requested);
            }
            return Err(e.into());
        }

        ledger::settle(env, &mut pool, Some(&mut position), now)?;
        position.withdraw(amount)?;
        pool.release(amount)?;

        assets::transfer_out(env, &storage::stake_token(env)?, staker, amount)?;

        Self::commit(env, &pool, staker, &position);
        events::publish_withdrawn(env, staker.clone(), amount, pool.total_staked);

        Ok(())
    }

    fn do_claim(env: &Env, staker: &Address) -> Result<i128, ContractError> {
        let now = env.ledger().timestamp();
        let mut pool = storage::load_pool(env)?;
        let mut position = storage::load_position(env, staker);

        ledger::settle(env, &mut pool, Some(&mut position), now)?;
        let reward = position.take_reward()?;

        assets::transfer_out(env, &storage::reward_token(env)?, staker, reward)?;

        Self::commit(env, &pool, staker, &position);
        events::publish_reward_claimed(env, staker.clone(), reward, pool.total_staked);

        Ok(reward)
    }

    fn do_emergency_withdraw(env: &Env, staker: &Address) -> Result<i128, ContractError> {
        let mut pool = storage::load_pool(env)?;
        let mut position = storage::load_position(env, staker);

        let amount = position.forfeit()?;
        // Fold accrual under the old total before it shrinks. The position
        // itself is not settled, so its reward is forfeited.
        pool.settle(env, env.ledger().timestamp())?;
        pool.release(amount)?;

        assets::transfer_out(env, &storage::stake_token(env)?, staker, amount)?;

        Self::commit(env, &pool, staker, &position);
        events::publish_emergency_exit(env, staker.clone(), amount, pool.total_staked);

        Ok(amount)
    }

    fn do_update_reward_rate(
        env: &Env,
        caller: &Address,
        new_rate: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        authority::require_authorized(env, caller)?;
        Self::validate_rate(new_rate)?;

        let mut pool = storage::load_pool(env)?;
        let accumulator = ledger::settle(env, &mut pool, None, env.ledger().timestamp())?;
        let old_rate = pool.reward_rate;
        pool.reward_rate = new_rate;

        storage::save_pool(env, &pool);
        storage::bump_instance(env);
        events::publish_reward_rate_set(env, old_rate, new_rate, accumulator);

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_authority;
