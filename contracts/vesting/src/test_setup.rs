extern crate std;

use common::SECONDS_PER_MONTH;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, String,
};

use crate::{schedule::VestingType, VestingContract, VestingContractClient};

/// One whole token at seven decimals.
pub const UNIT: i128 = 10_000_000;

pub const DAY: u64 = 86_400;
pub const MONTH: u64 = SECONDS_PER_MONTH;

/// Deployed contract, the SAC it vests and a funded reserve.
pub struct Harness {
    pub env: Env,
    pub client: VestingContractClient<'static>,
    pub admin: Address,
    pub token: Address,
    pub reserve: Address,
    pub contract: Address,
}

impl Harness {
    /// Initialised contract with a reserve holding and approving `funding`.
    pub fn new(funding: i128) -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let contract = env.register(VestingContract, ());
        let client = VestingContractClient::new(&env, &contract);

        let admin = Address::generate(&env);
        let reserve = Address::generate(&env);
        client.initialize(&admin, &token, &reserve);

        let h = Self {
            env,
            client,
            admin,
            token,
            reserve,
            contract,
        };
        h.fund_reserve(funding);
        h
    }

    /// Contract with every standard schedule registered and ten million
    /// tokens in the reserve.
    pub fn with_types() -> Self {
        let h = Self::new(10_000_000 * UNIT);
        for vt in standard_types(&h.env) {
            h.client.add_vesting_type(&h.admin, &vt);
        }
        h
    }

    pub fn token_client(&self) -> TokenClient<'_> {
        TokenClient::new(&self.env, &self.token)
    }

    /// Mint `amount` to the reserve and approve the contract for its balance.
    pub fn fund_reserve(&self, amount: i128) {
        StellarAssetClient::new(&self.env, &self.token).mint(&self.reserve, &amount);
        let balance = self.balance(&self.reserve);
        let expiry = self.env.ledger().sequence() + 10_000;
        self.token_client()
            .approve(&self.reserve, &self.contract, &balance, &expiry);
    }

    pub fn balance(&self, who: &Address) -> i128 {
        self.token_client().balance(who)
    }

    pub fn user(&self) -> Address {
        Address::generate(&self.env)
    }

    pub fn name(&self, s: &str) -> String {
        String::from_str(&self.env, s)
    }

    /// Enroll a fresh address on `vesting_type` and return it.
    pub fn enroll(&self, vesting_type: &str, amount: i128) -> Address {
        let vester = self.user();
        self.client
            .add_vester(&self.admin, &vester, &self.name(vesting_type), &amount);
        vester
    }

    pub fn advance(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(now + seconds);
    }

    pub fn set_time(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    pub fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }
}

pub fn monthly_type(
    env: &Env,
    name: &str,
    initial_bps: u32,
    monthly_bps: u32,
    claims: u32,
    cliff: u64,
) -> VestingType {
    VestingType {
        name: String::from_str(env, name),
        initial_release_bps: initial_bps,
        monthly_release_bps: monthly_bps,
        total_lock_seconds: u64::from(claims) * MONTH,
        claim_period_seconds: MONTH,
        number_of_claims: claims,
        cliff_seconds: cliff,
    }
}

/// The allocation schedules used across the vesting tests.
pub fn standard_types(env: &Env) -> std::vec::Vec<VestingType> {
    std::vec![
        monthly_type(env, "VC", 1_000, 375, 24, MONTH - DAY),
        monthly_type(env, "Team", 0, 555, 18, 0),
        monthly_type(env, "Advisor", 0, 833, 12, 0),
        monthly_type(env, "VC2", 800, 1_022, 9, 0),
        monthly_type(env, "Marketing", 200, 816, 12, 0),
        VestingType {
            name: String::from_str(env, "IDO"),
            initial_release_bps: 5_000,
            monthly_release_bps: 10_000,
            total_lock_seconds: 1_800,
            claim_period_seconds: 1_800,
            number_of_claims: 1,
            cliff_seconds: 1_800,
        },
    ]
}
