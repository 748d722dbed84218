extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{ContractError, StakingPool, StakingPoolClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingPoolClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(StakingPool, ());
    let client = StakingPoolClient::new(&env, &contract_id);

    let authority = Address::generate(&env);
    client.initialize(
        &authority,
        &Some(stake_token.address()),
        &Some(reward_token.address()),
        &10,
    );

    (env, client, authority)
}

// ── Handoff ──────────────────────────────────────────────────────────────────

#[test]
fn test_initializer_is_the_authority() {
    let (_env, client, authority) = setup();
    assert_eq!(client.get_authority(), authority);
    assert_eq!(client.get_pending_authority(), None);
}

#[test]
fn test_two_step_handoff() {
    let (env, client, authority) = setup();
    let successor = Address::generate(&env);

    client.propose_authority(&authority, &successor);
    assert_eq!(client.get_pending_authority(), Some(successor.clone()));
    // Still the old authority until accepted.
    assert_eq!(client.get_authority(), authority);

    client.accept_authority(&successor);
    assert_eq!(client.get_authority(), successor);
    assert_eq!(client.get_pending_authority(), None);
}

#[test]
fn test_rate_control_follows_the_handoff() {
    let (env, client, authority) = setup();
    let successor = Address::generate(&env);

    client.propose_authority(&authority, &successor);
    client.accept_authority(&successor);

    let result = client.try_update_reward_rate(&authority, &20);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    client.update_reward_rate(&successor, &20);
    assert_eq!(client.get_reward_rate(), 20);
}

#[test]
fn test_non_authority_cannot_propose() {
    let (env, client, _authority) = setup();
    let intruder = Address::generate(&env);

    let result = client.try_propose_authority(&intruder, &intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_only_proposed_address_can_accept() {
    let (env, client, authority) = setup();
    let successor = Address::generate(&env);
    let intruder = Address::generate(&env);

    client.propose_authority(&authority, &successor);

    let result = client.try_accept_authority(&intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_authority(), authority);
}

#[test]
fn test_accept_without_proposal_fails() {
    let (env, client, _authority) = setup();

    let result = client.try_accept_authority(&Address::generate(&env));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAuthority),
        _ => unreachable!("Expected NoPendingAuthority error"),
    }
}

#[test]
fn test_cancel_handoff() {
    let (env, client, authority) = setup();
    let successor = Address::generate(&env);

    client.propose_authority(&authority, &successor);
    client.cancel_authority_transfer(&authority);
    assert_eq!(client.get_pending_authority(), None);

    let result = client.try_accept_authority(&successor);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAuthority),
        _ => unreachable!("Expected NoPendingAuthority error"),
    }

    let result = client.try_cancel_authority_transfer(&authority);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAuthority),
        _ => unreachable!("Expected NoPendingAuthority error"),
    }
}
