#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, String,
};
use vesting::{schedule::VestingType, VestingContract, VestingContractClient};

#[derive(Arbitrary, Debug)]
pub struct Schedule {
    initial_bps: u16,
    monthly_bps: u16,
    claims: u8,
    period: u16,
    cliff: u16,
    total: u64,
}

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Claim,
    ClaimFirst,
    Advance { seconds: u32 },
}

fuzz_target!(|input: (Schedule, Vec<FuzzAction>)| {
    let (s, actions) = input;
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let reserve = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(VestingContract, ());
    let client = VestingContractClient::new(&env, &contract_id);
    let _ = client.try_initialize(&admin, &token, &reserve);

    let total = i128::from(s.total);
    StellarAssetClient::new(&env, &token).mint(&reserve, &total);
    let expiry = env.ledger().sequence() + 10_000;
    TokenClient::new(&env, &token).approve(&reserve, &contract_id, &total, &expiry);

    let name = String::from_str(&env, "F");
    let vt = VestingType {
        name: name.clone(),
        initial_release_bps: u32::from(s.initial_bps),
        monthly_release_bps: u32::from(s.monthly_bps),
        total_lock_seconds: 0,
        claim_period_seconds: u64::from(s.period),
        number_of_claims: u32::from(s.claims),
        cliff_seconds: u64::from(s.cliff),
    };
    if client.try_add_vesting_type(&admin, &vt).is_err() {
        return;
    }
    let vester = Address::generate(&env);
    if client.try_add_vester(&admin, &vester, &name, &total).is_err() {
        return;
    }

    for action in actions {
        match action {
            FuzzAction::Claim => {
                let _ = client.try_claim(&vester);
            }
            FuzzAction::ClaimFirst => {
                let _ = client.try_claim_first(&vester);
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(seconds));
            }
        }
        let paid = TokenClient::new(&env, &token).balance(&vester);
        assert!(paid <= total);
    }
});
