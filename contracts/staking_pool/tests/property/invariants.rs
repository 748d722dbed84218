//! Property-based state machine tests for the StakingPool contract.
//!
//! Random sequences of stake / withdraw / claim / emergency-exit / rate
//! changes interleaved with time jumps. Invariants checked after every step:
//! - `total_staked` equals the sum of all position amounts
//! - the accumulator never decreases
//! - right after a participant's own operation, `earned == pending_reward`
//! - claimed plus outstanding reward never exceeds twice the emission

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env};
use staking_pool::{StakingPool, StakingPoolClient};

const STAKERS: usize = 3;
const INITIAL_RATE: i128 = 10;

// ── Operations ────────────────────────────────────────────────────────────────

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    Stake {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
        #[proptest(strategy = "1i128..5_000")]
        amount: i128,
    },
    Withdraw {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
        #[proptest(strategy = "1i128..5_000")]
        amount: i128,
    },
    Claim {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
    },
    EmergencyExit {
        #[proptest(strategy = "0..STAKERS")]
        who: usize,
    },
    SetRate {
        #[proptest(strategy = "1i128..1_000")]
        rate: i128,
    },
    Advance {
        #[proptest(strategy = "0u64..3_000_000")]
        seconds: u64,
    },
}

// ── Harness ───────────────────────────────────────────────────────────────────

struct Harness {
    env: Env,
    client: StakingPoolClient<'static>,
    authority: Address,
    stakers: Vec<Address>,
    rate: i128,
    claimed: i128,
    emitted_upper_bound: i128,
}

impl Harness {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let stake_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let reward_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();

        let contract_id = env.register(StakingPool, ());
        let client = StakingPoolClient::new(&env, &contract_id);
        let authority = Address::generate(&env);
        client.initialize(
            &authority,
            &Some(stake_token.clone()),
            &Some(reward_token.clone()),
            &INITIAL_RATE,
        );

        StellarAssetClient::new(&env, &reward_token)
            .mint(&contract_id, &1_000_000_000_000_000i128);

        let stakers = (0..STAKERS)
            .map(|_| {
                let staker = Address::generate(&env);
                StellarAssetClient::new(&env, &stake_token).mint(&staker, &1_000_000i128);
                staker
            })
            .collect();

        Harness {
            env,
            client,
            authority,
            stakers,
            rate: INITIAL_RATE,
            claimed: 0,
            emitted_upper_bound: 0,
        }
    }

    /// Applies `op`. Returns the participant whose position the operation
    /// settled, when it succeeded.
    fn apply(&mut self, op: &Op) -> Option<usize> {
        let client = &self.client;
        match *op {
            Op::Stake { who, amount } => client
                .try_stake(&self.stakers[who], &amount)
                .is_ok()
                .then_some(who),
            Op::Withdraw { who, amount } => client
                .try_withdraw(&self.stakers[who], &amount)
                .is_ok()
                .then_some(who),
            Op::Claim { who } => match client.try_claim_rewards(&self.stakers[who]) {
                Ok(Ok(paid)) => {
                    self.claimed += paid;
                    Some(who)
                }
                _ => None,
            },
            Op::EmergencyExit { who } => client
                .try_emergency_withdraw(&self.stakers[who])
                .is_ok()
                .then_some(who),
            Op::SetRate { rate } => {
                if client.try_update_reward_rate(&self.authority, &rate).is_ok() {
                    self.rate = rate;
                }
                None
            }
            Op::Advance { seconds } => {
                let now = self.env.ledger().timestamp();
                self.env.ledger().set_timestamp(now + seconds);
                // Upper bound: full emission at the maximum 2.0× boost.
                self.emitted_upper_bound += self.rate * i128::from(seconds) * 2;
                None
            }
        }
    }

    fn sum_of_positions(&self) -> i128 {
        self.stakers
            .iter()
            .map(|s| self.client.get_position(s).amount)
            .sum()
    }

    fn outstanding_rewards(&self) -> i128 {
        self.stakers.iter().map(|s| self.client.earned(s)).sum()
    }
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(any::<Op>(), 1..40)
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// `total_staked` must equal the sum of every position after each step.
    #[test]
    fn prop_total_staked_equals_sum_of_positions(ops in ops()) {
        let mut h = Harness::new();
        for op in &ops {
            h.apply(op);
            prop_assert_eq!(h.client.get_total_staked(), h.sum_of_positions());
        }
    }

    /// The accumulator never moves backwards, whatever the operation.
    #[test]
    fn prop_accumulator_is_monotonic(ops in ops()) {
        let mut h = Harness::new();
        let mut last = h.client.current_accumulator();
        for op in &ops {
            h.apply(op);
            let now = h.client.current_accumulator();
            prop_assert!(now >= last, "accumulator fell from {} to {}", last, now);
            last = now;
        }
    }

    /// Right after a participant's own successful operation its live
    /// `earned` equals the settled `pending_reward`, and its baseline does
    /// not exceed the accumulator.
    #[test]
    fn prop_settled_position_is_consistent(ops in ops()) {
        let mut h = Harness::new();
        for op in &ops {
            if let Some(who) = h.apply(op) {
                let staker = &h.stakers[who];
                let position = h.client.get_position(staker);
                prop_assert_eq!(h.client.earned(staker), position.pending_reward);
                prop_assert!(position.reward_baseline <= h.client.current_accumulator());
            }
        }
    }

    /// Paid plus outstanding reward is bounded by the emission at maximum boost.
    #[test]
    fn prop_rewards_bounded_by_emission(ops in ops()) {
        let mut h = Harness::new();
        for op in &ops {
            h.apply(op);
            let owed = h.claimed + h.outstanding_rewards();
            prop_assert!(
                owed <= h.emitted_upper_bound,
                "owed {} exceeds bound {}",
                owed,
                h.emitted_upper_bound
            );
        }
    }
}
