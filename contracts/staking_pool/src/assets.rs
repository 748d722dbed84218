//! Token movement between participants and the pool.
//!
//! The stake and reward assets are token contracts addressed by the ids
//! fixed at initialisation. Transfers are invoked with `try_transfer` so a
//! refusing or trapping token surfaces as [`ContractError::TransferFailed`]
//! instead of aborting the host frame; the caller's staged state is then
//! simply never committed.

use soroban_sdk::{token, Address, Env};

use crate::ContractError;

/// Pulls `amount` of `asset` from `from` into the pool.
pub fn transfer_in(
    env: &Env,
    asset: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let pool = env.current_contract_address();
    match token::TokenClient::new(env, asset).try_transfer(from, &pool, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Pays `amount` of `asset` from the pool to `to`.
pub fn transfer_out(
    env: &Env,
    asset: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let pool = env.current_contract_address();
    match token::TokenClient::new(env, asset).try_transfer(&pool, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}
