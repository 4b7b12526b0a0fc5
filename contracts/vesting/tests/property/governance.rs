#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the admin vote ledger.
//!
//! Invariants tested:
//! - An action executes iff at least `admin_min_votes` distinct admins voted
//! - Each admin counts once per action
//! - Executing an action clears its tally

use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};
use vesting::{governance::Action, ContractError, VestingContract, VestingContractClient};

fn setup(admin_count: usize, quorum: u32) -> (VestingContractClient<'static>, Vec<Address>) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(VestingContract, ());
    let client = VestingContractClient::new(&env, &contract_id);

    let first = Address::generate(&env);
    client.initialize(&first, &token, &Address::generate(&env));

    let mut admins = vec![first.clone()];
    for _ in 1..admin_count {
        let next = Address::generate(&env);
        client.vote_add_admin(&first, &next);
        client.add_admin(&first, &next);
        admins.push(next);
    }
    client.vote_set_admin_min(&first, &quorum);
    client.set_admin_min(&first, &quorum);

    (client, admins)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_quorum_gates_execution(
        (admin_count, quorum) in (1usize..=5).prop_flat_map(|n| (Just(n), 1u32..=n as u32)),
        voters in prop::collection::vec(0usize..5, 0..10),
    ) {
        let (client, admins) = setup(admin_count, quorum);
        let target = Address::generate(&client.env);
        let action = Action::AddAdmin(target.clone());

        let mut distinct: Vec<usize> = Vec::new();
        for v in voters {
            let idx = v % admin_count;
            let result = client.try_vote_add_admin(&admins[idx], &target);
            if distinct.contains(&idx) {
                prop_assert!(matches!(result, Err(Ok(ContractError::AlreadyVoted))));
            } else {
                prop_assert!(result.is_ok());
                distinct.push(idx);
            }
        }
        prop_assert_eq!(client.get_votes(&action).len() as usize, distinct.len());

        let executed = client.try_add_admin(&admins[0], &target);
        if distinct.len() as u32 >= quorum {
            prop_assert!(executed.is_ok());
            prop_assert!(client.is_admin(&target));
            prop_assert!(client.get_votes(&action).is_empty());
        } else {
            prop_assert!(matches!(executed, Err(Ok(ContractError::NotEnoughVotes))));
            prop_assert!(!client.is_admin(&target));
        }
    }
}
