#![no_std]

pub mod events;
pub mod governance;
pub mod registry;
pub mod schedule;

use common::{ErrorCategory, TokenAdapter, TransferError};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec};

use governance::{Action, GovernanceError};
use schedule::{ScheduleError, Vester, VestingType};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const RESERVE: Symbol = symbol_short!("RESERVE");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAdmin = 3,
    AlreadyVoted = 4,
    NotEnoughVotes = 5,
    AlreadyAdmin = 6,
    TypeNotFound = 7,
    TypeAlreadyExists = 8,
    NoSuchVester = 9,
    VesterExists = 10,
    InvalidInput = 11,
    TooEarly = 12,
    VestingFinished = 13,
    AlreadyClaimed = 14,
    InsufficientBalance = 15,
    InsufficientAllowance = 16,
    ArithmeticOverflow = 17,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            ContractError::NotAdmin => ErrorCategory::Authorization,
            ContractError::NotEnoughVotes => ErrorCategory::Governance,
            ContractError::TypeNotFound | ContractError::NoSuchVester => ErrorCategory::NotFound,
            ContractError::InvalidInput => ErrorCategory::Validation,
            ContractError::AlreadyVoted
            | ContractError::AlreadyAdmin
            | ContractError::TypeAlreadyExists
            | ContractError::VesterExists
            | ContractError::TooEarly
            | ContractError::VestingFinished
            | ContractError::AlreadyClaimed => ErrorCategory::State,
            ContractError::InsufficientBalance | ContractError::InsufficientAllowance => {
                ErrorCategory::Solvency
            }
            ContractError::ArithmeticOverflow => ErrorCategory::Arithmetic,
        }
    }
}

impl From<GovernanceError> for ContractError {
    fn from(err: GovernanceError) -> Self {
        match err {
            GovernanceError::NotAdmin => ContractError::NotAdmin,
            GovernanceError::AlreadyVoted => ContractError::AlreadyVoted,
            GovernanceError::NotEnoughVotes => ContractError::NotEnoughVotes,
        }
    }
}

impl From<ScheduleError> for ContractError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::TooEarly => ContractError::TooEarly,
            ScheduleError::VestingFinished => ContractError::VestingFinished,
            ScheduleError::AlreadyClaimed => ContractError::AlreadyClaimed,
            ScheduleError::Overflow => ContractError::ArithmeticOverflow,
        }
    }
}

impl From<TransferError> for ContractError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::InsufficientBalance => ContractError::InsufficientBalance,
            TransferError::InsufficientAllowance => ContractError::InsufficientAllowance,
            TransferError::InvalidAmount => ContractError::InvalidInput,
        }
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct VestingContract;

#[contractimpl]
impl VestingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `admin`   – first member of the admin set; quorum starts at one vote.
    /// * `token`   – SAC address of the vested token.
    /// * `reserve` – account claims are paid from. It must approve this
    ///   contract to spend on its behalf.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        reserve: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        governance::bootstrap(&env, &admin);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&RESERVE, &reserve);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, admin, token, reserve);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Vesting types ───────────────────────────────────────────────────────

    pub fn add_vesting_type(
        env: Env,
        caller: Address,
        vesting_type: VestingType,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        governance::require_admin(&env, &caller)?;

        if !vesting_type.is_valid() {
            return Err(ContractError::InvalidInput);
        }
        if registry::has_type(&env, &vesting_type.name) {
            return Err(ContractError::TypeAlreadyExists);
        }

        registry::insert_type(&env, &vesting_type);

        events::publish_type_added(&env, vesting_type);

        Ok(())
    }

    /// Unregister a type. Vesters already enrolled keep their snapshot.
    pub fn remove_vesting_type(
        env: Env,
        caller: Address,
        name: String,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        governance::require_admin(&env, &caller)?;

        if !registry::remove_type(&env, &name) {
            return Err(ContractError::TypeNotFound);
        }

        events::publish_type_removed(&env, name);

        Ok(())
    }

    pub fn get_vesting_type(env: Env, name: String) -> Option<VestingType> {
        registry::get_type(&env, &name)
    }

    pub fn get_vesting_type_names(env: Env) -> Vec<String> {
        registry::type_names(&env)
    }

    // ── Vesters ─────────────────────────────────────────────────────────────

    /// Enroll `vester` on the named schedule with `amount` tokens. The
    /// schedule clock starts now.
    pub fn add_vester(
        env: Env,
        caller: Address,
        vester: Address,
        vesting_type: String,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        governance::require_admin(&env, &caller)?;

        let schedule =
            registry::get_type(&env, &vesting_type).ok_or(ContractError::TypeNotFound)?;
        if registry::has_vester(&env, &vester) {
            return Err(ContractError::VesterExists);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let record = Vester::enroll(schedule, amount, env.ledger().timestamp());
        registry::save_vester(&env, &vester, &record);

        events::publish_vester_added(&env, vester, vesting_type, amount);

        Ok(())
    }

    pub fn get_vester(env: Env, vester: Address) -> Option<Vester> {
        registry::get_vester(&env, &vester)
    }

    /// Periodic amount `claim` would pay right now, zero when nothing is due.
    pub fn get_claimable(env: Env, vester: Address) -> Result<i128, ContractError> {
        let record = registry::get_vester(&env, &vester).ok_or(ContractError::NoSuchVester)?;
        match record.next_instalment(env.ledger().timestamp()) {
            Ok(instalment) => Ok(instalment.amount),
            Err(ScheduleError::Overflow) => Err(ContractError::ArithmeticOverflow),
            Err(_) => Ok(0),
        }
    }

    /// When the next periodic instalment unlocks, `None` once the schedule is
    /// fully paid.
    pub fn get_next_claim_at(env: Env, vester: Address) -> Result<Option<u64>, ContractError> {
        let record = registry::get_vester(&env, &vester).ok_or(ContractError::NoSuchVester)?;
        Ok(record.next_claim_at()?)
    }

    // ── Claims ──────────────────────────────────────────────────────────────

    /// Pay every periodic instalment unlocked since the last claim.
    pub fn claim(env: Env, vester: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        vester.require_auth();

        let mut record =
            registry::get_vester(&env, &vester).ok_or(ContractError::NoSuchVester)?;
        let instalment = record.next_instalment(env.ledger().timestamp())?;

        Self::pay_from_reserve(&env, &vester, instalment.amount)?;

        record.apply_instalment(&instalment);
        registry::save_vester(&env, &vester, &record);

        events::publish_claimed(&env, vester, instalment.amount, false);

        Ok(instalment.amount)
    }

    /// Pay the one-off initial release.
    pub fn claim_first(env: Env, vester: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        vester.require_auth();

        let mut record =
            registry::get_vester(&env, &vester).ok_or(ContractError::NoSuchVester)?;
        let amount = record.first_release(env.ledger().timestamp())?;

        Self::pay_from_reserve(&env, &vester, amount)?;

        record.apply_first_release(amount);
        registry::save_vester(&env, &vester, &record);

        events::publish_claimed(&env, vester, amount, true);

        Ok(amount)
    }

    // ── Reserve ─────────────────────────────────────────────────────────────

    pub fn set_reserve(env: Env, caller: Address, reserve: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        governance::require_admin(&env, &caller)?;

        env.storage().instance().set(&RESERVE, &reserve);

        events::publish_reserve_changed(&env, reserve);

        Ok(())
    }

    pub fn get_reserve(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&RESERVE)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Governance ──────────────────────────────────────────────────────────

    pub fn vote_add_admin(env: Env, voter: Address, admin: Address) -> Result<u32, ContractError> {
        Self::cast_vote(&env, voter, Action::AddAdmin(admin))
    }

    pub fn add_admin(env: Env, caller: Address, admin: Address) -> Result<(), ContractError> {
        let action = Action::AddAdmin(admin.clone());
        Self::authorize_execution(&env, &caller, &action)?;

        if !governance::add_admin(&env, &admin) {
            return Err(ContractError::AlreadyAdmin);
        }
        governance::clear(&env, &action);

        events::publish_admin_added(&env, admin);

        Ok(())
    }

    pub fn vote_remove_vester(
        env: Env,
        voter: Address,
        vester: Address,
    ) -> Result<u32, ContractError> {
        Self::cast_vote(&env, voter, Action::RemoveVester(vester))
    }

    /// Drop a vester. Anything not yet claimed stays with the reserve.
    pub fn remove_vester(env: Env, caller: Address, vester: Address) -> Result<(), ContractError> {
        let action = Action::RemoveVester(vester.clone());
        Self::authorize_execution(&env, &caller, &action)?;

        if !registry::has_vester(&env, &vester) {
            return Err(ContractError::NoSuchVester);
        }
        registry::remove_vester(&env, &vester);
        governance::clear(&env, &action);

        events::publish_vester_removed(&env, vester);

        Ok(())
    }

    pub fn vote_set_admin_min(
        env: Env,
        voter: Address,
        min_votes: u32,
    ) -> Result<u32, ContractError> {
        Self::cast_vote(&env, voter, Action::SetAdminMin(min_votes))
    }

    /// Change the quorum. Must stay between one and the number of admins.
    pub fn set_admin_min(env: Env, caller: Address, min_votes: u32) -> Result<(), ContractError> {
        let action = Action::SetAdminMin(min_votes);
        Self::authorize_execution(&env, &caller, &action)?;

        if min_votes == 0 || min_votes > governance::admins(&env).len() {
            return Err(ContractError::InvalidInput);
        }
        governance::set_min_votes(&env, min_votes);
        governance::clear(&env, &action);

        events::publish_admin_min_changed(&env, min_votes);

        Ok(())
    }

    pub fn get_votes(env: Env, action: Action) -> Vec<Address> {
        governance::votes(&env, &action)
    }

    pub fn get_admins(env: Env) -> Vec<Address> {
        governance::admins(&env)
    }

    pub fn is_admin(env: Env, addr: Address) -> bool {
        governance::is_admin(&env, &addr)
    }

    pub fn get_admin_min_votes(env: Env) -> u32 {
        governance::min_votes(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn cast_vote(env: &Env, voter: Address, action: Action) -> Result<u32, ContractError> {
        Self::require_initialized(env)?;
        voter.require_auth();

        let count = governance::vote(env, &voter, &action)?;

        events::publish_voted(env, voter, action, count);

        Ok(count)
    }

    fn authorize_execution(
        env: &Env,
        caller: &Address,
        action: &Action,
    ) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        governance::ensure_approved(env, caller, action)?;
        Ok(())
    }

    fn pay_from_reserve(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
        let token: Address = env
            .storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        let reserve: Address = env
            .storage()
            .instance()
            .get(&RESERVE)
            .ok_or(ContractError::NotInitialized)?;
        TokenAdapter::new(env, &token).relay(&reserve, to, amount)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test_setup;


#[cfg(test)]
mod test_governance;
