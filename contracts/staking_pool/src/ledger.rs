//! In-memory accounting state and its transitions.
//!
//! [`Pool`] is the global accumulator, [`Position`] a single participant's
//! ledger. Nothing here touches storage: the contract loads both records,
//! stages changes through these methods, and writes them back only once all
//! token transfers of the operation have succeeded.

use soroban_sdk::{contracttype, Env};

use crate::{boost, rewards};

/// Failure of an accounting transition. Carries the detail that contract
/// error codes cannot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LedgerError {
    ZeroValue,
    InsufficientBalance { actual: i128, requested: i128 },
    Overflow,
}

// ── Pool ────────────────────────────────────────────────────────────────────

/// Global accrual state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Reward units emitted per second across all stakers.
    pub reward_rate: i128,
    pub total_staked: i128,
    /// Cumulative reward per staked unit, scaled by [`rewards::SCALE`].
    pub accumulator: i128,
    pub last_settle: u64,
}

impl Pool {
    pub fn new(reward_rate: i128, now: u64) -> Self {
        Self {
            reward_rate,
            total_staked: 0,
            accumulator: 0,
            last_settle: now,
        }
    }

    /// Accumulator value at `now` without mutating anything.
    pub fn current_accumulator(&self, env: &Env, now: u64) -> Result<i128, LedgerError> {
        let elapsed = now.saturating_sub(self.last_settle);
        rewards::accumulate(
            env,
            self.accumulator,
            self.reward_rate,
            elapsed,
            self.total_staked,
        )
        .ok_or(LedgerError::Overflow)
    }

    /// Folds elapsed accrual into the stored accumulator and moves the
    /// settlement point to `now`. Returns the settled accumulator.
    pub fn settle(&mut self, env: &Env, now: u64) -> Result<i128, LedgerError> {
        self.accumulator = self.current_accumulator(env, now)?;
        self.last_settle = now;
        Ok(self.accumulator)
    }

    pub fn deposit(&mut self, amount: i128) -> Result<(), LedgerError> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    pub fn release(&mut self, amount: i128) -> Result<(), LedgerError> {
        if amount > self.total_staked {
            return Err(LedgerError::InsufficientBalance {
                actual: self.total_staked,
                requested: amount,
            });
        }
        self.total_staked -= amount;
        Ok(())
    }
}

// ── Position ────────────────────────────────────────────────────────────────

/// One participant's ledger entry. All-zero until the first stake.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub amount: i128,
    /// Start of the current continuous staking streak.
    pub stake_start: u64,
    /// Accumulator value already priced into `pending_reward`.
    pub reward_baseline: i128,
    /// Settled, unclaimed reward.
    pub pending_reward: i128,
}

impl Position {
    pub fn is_staked(&self) -> bool {
        self.amount > 0
    }

    pub fn boost_multiplier(&self, now: u64) -> u32 {
        boost::multiplier(self.amount, self.stake_start, now)
    }

    /// Reward owed at accumulator value `accumulator`, boosted at the tier
    /// in effect at `now`.
    pub fn earned(&self, env: &Env, accumulator: i128, now: u64) -> Result<i128, LedgerError> {
        rewards::earned(
            env,
            self.amount,
            accumulator,
            self.reward_baseline,
            self.pending_reward,
            self.boost_multiplier(now),
        )
        .ok_or(LedgerError::Overflow)
    }

    /// Moves everything earned so far into `pending_reward` and snapshots
    /// the accumulator. Must run before `amount` changes.
    pub fn settle(&mut self, env: &Env, accumulator: i128, now: u64) -> Result<(), LedgerError> {
        self.pending_reward = self.earned(env, accumulator, now)?;
        self.reward_baseline = accumulator;
        Ok(())
    }

    /// Adds to the stake. The boost clock restarts only when the position
    /// was empty; a top-up keeps the running streak.
    pub fn deposit(&mut self, amount: i128, now: u64) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroValue);
        }
        if !self.is_staked() {
            self.stake_start = now;
        }
        self.amount = self.amount.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Fails unless the position holds at least `amount`.
    pub fn ensure_covers(&self, amount: i128) -> Result<(), LedgerError> {
        if amount > self.amount {
            return Err(LedgerError::InsufficientBalance {
                actual: self.amount,
                requested: amount,
            });
        }
        Ok(())
    }

    pub fn withdraw(&mut self, amount: i128) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroValue);
        }
        self.ensure_covers(amount)?;
        self.amount -= amount;
        Ok(())
    }

    /// Empties `pending_reward` and returns what it held.
    pub fn take_reward(&mut self) -> Result<i128, LedgerError> {
        if self.pending_reward == 0 {
            return Err(LedgerError::ZeroValue);
        }
        Ok(core::mem::take(&mut self.pending_reward))
    }

    /// Zeroes the whole entry, forfeiting pending reward. Returns the stake
    /// that was held.
    pub fn forfeit(&mut self) -> Result<i128, LedgerError> {
        if !self.is_staked() {
            return Err(LedgerError::ZeroValue);
        }
        Ok(core::mem::take(self).amount)
    }
}

// ── Settlement ──────────────────────────────────────────────────────────────

/// Settles the pool and, when given, one position against the freshly
/// settled accumulator. Returns the accumulator.
pub fn settle(
    env: &Env,
    pool: &mut Pool,
    position: Option<&mut Position>,
    now: u64,
) -> Result<i128, LedgerError> {
    let accumulator = pool.settle(env, now)?;
    if let Some(position) = position {
        position.settle(env, accumulator, now)?;
    }
    Ok(accumulator)
}
