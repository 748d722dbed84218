#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use staking_pool::{StakingPool, StakingPoolClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: i64 },
    Withdraw { amount: i64 },
    ClaimRewards,
    EmergencyWithdraw,
    UpdateRewardRate { rate: i64 },
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let authority = Address::generate(&env);
    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingPool, ());
    let client = StakingPoolClient::new(&env, &contract_id);
    client.initialize(
        &authority,
        &Some(stake_token.clone()),
        &Some(reward_token.clone()),
        &1_000i128,
    );
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &i64::MAX.into());

    let mut users = vec![authority.clone()];
    for _ in 0..4 {
        users.push(Address::generate(&env));
    }
    for user in &users {
        StellarAssetClient::new(&env, &stake_token).mint(user, &i64::MAX.into());
    }

    // Errors are expected; panics and broken invariants are not.
    let mut last_accumulator = client.current_accumulator();
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount } => {
                let _ = client.try_stake(caller, &amount.into());
            }
            FuzzAction::Withdraw { amount } => {
                let _ = client.try_withdraw(caller, &amount.into());
            }
            FuzzAction::ClaimRewards => {
                let _ = client.try_claim_rewards(caller);
            }
            FuzzAction::EmergencyWithdraw => {
                let _ = client.try_emergency_withdraw(caller);
            }
            FuzzAction::UpdateRewardRate { rate } => {
                let _ = client.try_update_reward_rate(&authority, &rate.into());
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(seconds.into()));
            }
        }

        let staked: i128 = users.iter().map(|u| client.get_position(u).amount).sum();
        assert_eq!(client.get_total_staked(), staked);

        // A view that overflows surfaces as an error, which is acceptable.
        if let Ok(Ok(accumulator)) = client.try_current_accumulator() {
            assert!(accumulator >= last_accumulator);
            last_accumulator = accumulator;
        }
    }
});
