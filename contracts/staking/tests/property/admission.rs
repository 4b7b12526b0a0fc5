#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for stake admission and lock maturity.
//!
//! Invariants tested:
//! - Amounts inside `[min_stake, max_stake]` are admitted, amounts outside are not
//! - A lock position can never be unstaked before `unlock_at`
//! - Unstaking a matured lock position returns exactly the principal

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use staking::{catalog::PackTerms, ContractError, StakingContract, StakingContractClient};

// ── Helpers ───────────────────────────────────────────────────────────────────

const MIN: i128 = 10_000;
const MAX: i128 = 1_000_000;

fn setup(lock_period: u64) -> (Env, StakingContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &token);
    client.add_staking_pack(
        &owner,
        &PackTerms {
            lock_period,
            rate: 13,
            max_stake_total: 0,
            min_stake: MIN,
            max_stake: MAX,
            is_usable: true,
            max_users: 100,
        },
    );
    StellarAssetClient::new(&env, &token).mint(&contract_id, &(10 * MAX));

    let staker = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&staker, &(2 * MAX));
    let expiry = env.ledger().sequence() + 10_000;
    TokenClient::new(&env, &token).approve(&staker, &contract_id, &(2 * MAX), &expiry);

    (env, client, token, staker)
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Admission is decided by the pack's inclusive amount bounds.
    #[test]
    fn prop_amount_bounds_are_inclusive(amount in 0i128..=(2 * MAX)) {
        let (_env, client, _token, staker) = setup(600);

        let result = client.try_stake(&staker, &1, &amount);
        if amount < MIN {
            prop_assert!(matches!(result, Err(Ok(ContractError::AmountTooLow))));
        } else if amount > MAX {
            prop_assert!(matches!(result, Err(Ok(ContractError::AmountTooHigh))));
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(client.get_total_stake(), amount);
        }
    }

    /// Before maturity the position is locked; at maturity the principal comes back whole.
    #[test]
    fn prop_lock_round_trip(
        amount in MIN..=MAX,
        lock_period in 1u64..=31_536_000,
        early_by in 1u64..=31_536_000,
    ) {
        let (env, client, token, staker) = setup(lock_period);
        client.stake(&staker, &1, &amount);
        let before = TokenClient::new(&env, &token).balance(&staker);

        let early = lock_period.saturating_sub(early_by);
        env.ledger().set_timestamp(early);
        prop_assert!(matches!(
            client.try_unstake_lock(&staker, &0),
            Err(Ok(ContractError::NotYetUnlockable))
        ));

        env.ledger().set_timestamp(lock_period);
        prop_assert_eq!(client.unstake_lock(&staker, &0), amount);
        prop_assert_eq!(TokenClient::new(&env, &token).balance(&staker), before + amount);
        prop_assert_eq!(client.get_total_stake(), 0);
    }
}
