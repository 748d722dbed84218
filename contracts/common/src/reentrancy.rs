//! # Re-entrancy guard
//!
//! One lock per contract instance, held in instance storage for the duration
//! of a guarded entry point. Token transfers run foreign contract code
//! synchronously; if that code calls back into any guarded entry point, the
//! nested call fails with [`CommonError::Reentrant`] before touching state.
//!
//! The lock is contract-wide, not per caller.
//!
//! ```ignore
//! reentrancy::non_reentrant(&env, || Self::do_stake(&env, &staker, amount))
//! ```

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::CommonError;

const LOCKED: Symbol = symbol_short!("LOCKED");

/// `true` while a guarded entry point is executing.
pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCKED).unwrap_or(false)
}

/// Acquires the lock, failing if it is already held.
pub fn enter(env: &Env) -> Result<(), CommonError> {
    if is_locked(env) {
        return Err(CommonError::Reentrant);
    }
    env.storage().instance().set(&LOCKED, &true);
    Ok(())
}

/// Releases the lock.
pub fn exit(env: &Env) {
    env.storage().instance().remove(&LOCKED);
}

/// Runs `body` under the lock and releases it on every exit path, including
/// when `body` returns an error.
pub fn non_reentrant<T, E, F>(env: &Env, body: F) -> Result<T, E>
where
    E: From<CommonError>,
    F: FnOnce() -> Result<T, E>,
{
    enter(env)?;
    let result = body();
    exit(env);
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────
