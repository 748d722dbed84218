//! # Designated authority
//!
//! A single address is allowed to perform privileged configuration calls
//! (e.g. changing the reward rate). Ownership moves with a two-step handoff:
//! the current authority proposes a successor, and the successor must accept
//! before anything changes. Either side can be audited through
//! [`authority`] and [`pending_authority`].
//!
//! Callers are responsible for `require_auth()` on the address they pass in;
//! these helpers only compare against stored state.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::CommonError;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const AUTHORITY: Symbol = symbol_short!("AUTHORITY");
const PENDING_AUTHORITY: Symbol = symbol_short!("PEND_AUTH");

// ── Core Functions ───────────────────────────────────────────────────────────

/// Stores the designated authority. Only called during initialisation.
pub fn set_authority(env: &Env, authority: &Address) {
    env.storage().instance().set(&AUTHORITY, authority);
}

/// Returns the designated authority, if one has been set.
pub fn authority(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AUTHORITY)
}

/// Returns the address proposed as the next authority, if any.
pub fn pending_authority(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_AUTHORITY)
}

/// `true` when `caller` is the designated authority.
pub fn is_authorized(env: &Env, caller: &Address) -> bool {
    authority(env).is_some_and(|current| current == *caller)
}

/// Guard: fails with [`CommonError::AccessDenied`] unless `caller` is the
/// designated authority, or [`CommonError::NotInitialized`] when none is set.
pub fn require_authorized(env: &Env, caller: &Address) -> Result<(), CommonError> {
    let current = authority(env).ok_or(CommonError::NotInitialized)?;
    if current != *caller {
        return Err(CommonError::AccessDenied);
    }
    Ok(())
}

// ── Two-step handoff ─────────────────────────────────────────────────────────

/// Records `proposed` as the pending successor. Replaces any earlier proposal.
pub fn propose_transfer(
    env: &Env,
    caller: &Address,
    proposed: &Address,
) -> Result<(), CommonError> {
    require_authorized(env, caller)?;
    env.storage().instance().set(&PENDING_AUTHORITY, proposed);
    Ok(())
}

/// Completes the handoff. Returns the previous authority.
pub fn accept_transfer(env: &Env, caller: &Address) -> Result<Address, CommonError> {
    let pending = pending_authority(env).ok_or(CommonError::NoPendingTransfer)?;
    if pending != *caller {
        return Err(CommonError::AccessDenied);
    }
    let previous = authority(env).ok_or(CommonError::NotInitialized)?;

    env.storage().instance().set(&AUTHORITY, &pending);
    env.storage().instance().remove(&PENDING_AUTHORITY);
    Ok(previous)
}

/// Drops the pending proposal. Returns the address that had been proposed.
pub fn cancel_transfer(env: &Env, caller: &Address) -> Result<Address, CommonError> {
    require_authorized(env, caller)?;
    let pending = pending_authority(env).ok_or(CommonError::NoPendingTransfer)?;
    env.storage().instance().remove(&PENDING_AUTHORITY);
    Ok(pending)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
