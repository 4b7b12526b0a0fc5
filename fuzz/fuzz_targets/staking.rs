#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking::{catalog::PackTerms, StakingContract, StakingContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { pack: u8, amount: u64 },
    IncreaseFlex { amount: u64 },
    UnstakeFlex { amount: u64 },
    ClaimFlex,
    ClaimLock { index: u8 },
    UnstakeLock { index: u8 },
    Rebase { rate: u8, to: u8 },
    Advance { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    let _ = client.try_initialize(&owner, &token);

    let terms = |lock_period: u64, rate: i128| PackTerms {
        lock_period,
        rate,
        max_stake_total: 0,
        min_stake: 1,
        max_stake: i128::from(u64::MAX),
        is_usable: true,
        max_users: 16,
    };
    let _ = client.try_set_staking_pack(&owner, &0, &terms(0, 10));
    let _ = client.try_add_staking_pack(&owner, &terms(3_600, 13));

    let sac = StellarAssetClient::new(&env, &token);
    sac.mint(&contract_id, &i128::from(u64::MAX));

    let expiry = env.ledger().sequence() + 10_000;
    let mut users = Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        sac.mint(&user, &i128::from(u64::MAX));
        TokenClient::new(&env, &token).approve(&user, &contract_id, &i128::from(u64::MAX), &expiry);
        users.push(user);
    }

    // Operations may fail; only panics and broken books are findings.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { pack, amount } => {
                let _ = client.try_stake(caller, &u64::from(pack % 3), &i128::from(amount));
            }
            FuzzAction::IncreaseFlex { amount } => {
                let _ = client.try_increase_stake_flex(caller, &i128::from(amount));
            }
            FuzzAction::UnstakeFlex { amount } => {
                let _ = client.try_unstake_flex(caller, &i128::from(amount));
            }
            FuzzAction::ClaimFlex => {
                let _ = client.try_claim_reward_flex(caller);
            }
            FuzzAction::ClaimLock { index } => {
                let _ = client.try_claim_reward_lock(caller, &u32::from(index % 4));
            }
            FuzzAction::UnstakeLock { index } => {
                let _ = client.try_unstake_lock(caller, &u32::from(index % 4));
            }
            FuzzAction::Rebase { rate, to } => {
                let _ = client.try_set_staking_pack(&owner, &0, &terms(0, i128::from(rate)));
                let _ = client.try_update_stake_flex_rate(&owner, &0, &u32::from(to % 6));
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(seconds));
            }
        }

        let total = client.get_total_stake();
        let sum: i128 = users.iter().map(|u| client.get_balance_staked(u)).sum();
        assert_eq!(total, sum);
    }
});
