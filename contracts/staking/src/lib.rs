#![no_std]

pub mod catalog;
pub mod events;
pub mod positions;
pub mod rewards;

use common::{swap_remove, ErrorCategory, TokenAdapter, TransferError};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

use catalog::{PackTerms, StakingPack, FLEX_PACK_ID};
use positions::{FlexStake, LockedStake};

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    PackNotFound = 4,
    PositionNotFound = 5,
    NoFlexPosition = 6,
    InvalidInput = 7,
    MinStakeAboveMax = 8,
    AmountTooLow = 9,
    AmountTooHigh = 10,
    ZeroAmount = 11,
    AmountExceedsStaked = 12,
    InvalidRange = 13,
    PackUnavailable = 14,
    PackCapacityReached = 15,
    PackInUse = 16,
    CannotDeleteFlexPack = 17,
    AlreadyStakedFlex = 18,
    NoAmountStaked = 19,
    NotYetUnlockable = 20,
    RewardAlreadyClaimed = 21,
    StakingContractCannotPayRewards = 22,
    InsufficientBalance = 23,
    InsufficientAllowance = 24,
    ArithmeticOverflow = 25,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::PackNotFound
            | ContractError::PositionNotFound
            | ContractError::NoFlexPosition => ErrorCategory::NotFound,
            ContractError::InvalidInput
            | ContractError::MinStakeAboveMax
            | ContractError::AmountTooLow
            | ContractError::AmountTooHigh
            | ContractError::ZeroAmount
            | ContractError::AmountExceedsStaked
            | ContractError::InvalidRange => ErrorCategory::Validation,
            ContractError::PackUnavailable
            | ContractError::PackCapacityReached
            | ContractError::PackInUse
            | ContractError::CannotDeleteFlexPack
            | ContractError::AlreadyStakedFlex
            | ContractError::NoAmountStaked
            | ContractError::NotYetUnlockable
            | ContractError::RewardAlreadyClaimed => ErrorCategory::State,
            ContractError::StakingContractCannotPayRewards
            | ContractError::InsufficientBalance
            | ContractError::InsufficientAllowance => ErrorCategory::Solvency,
            ContractError::ArithmeticOverflow => ErrorCategory::Arithmetic,
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
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `owner` – address allowed to manage the pack catalog and rebase flex rates.
    /// * `token` – SAC address of the token that is staked and paid as reward.
    ///
    /// Pack 0 is created as the flex pack, unusable and with zeroed limits,
    /// until the owner configures it with `set_staking_pack`.
    pub fn initialize(env: Env, owner: Address, token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&INITIALIZED, &true);

        let flex = catalog::insert(
            &env,
            true,
            &PackTerms {
                lock_period: 0,
                rate: 0,
                max_stake_total: 0,
                min_stake: 0,
                max_stake: 0,
                is_usable: false,
                max_users: 0,
            },
        );

        events::publish_initialized(&env, owner, token);
        events::publish_pack_added(&env, flex);

        Ok(())
    }

    // ── Pack catalog ────────────────────────────────────────────────────────

    /// Append a lock pack to the catalog and return its id.
    pub fn add_staking_pack(
        env: Env,
        caller: Address,
        terms: PackTerms,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;
        Self::validate_terms(&terms)?;

        let pack = catalog::insert(&env, false, &terms);
        let id = pack.id;

        events::publish_pack_added(&env, pack);

        Ok(id)
    }

    /// Replace the terms of an existing pack. Usage counters are kept.
    pub fn set_staking_pack(
        env: Env,
        caller: Address,
        pack_id: u64,
        terms: PackTerms,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let mut pack = catalog::get(&env, pack_id).ok_or(ContractError::PackNotFound)?;
        Self::validate_terms(&terms)?;
        if pack.is_flex && terms.lock_period != 0 {
            return Err(ContractError::InvalidInput);
        }

        pack.apply_terms(&terms);
        catalog::save(&env, &pack);

        events::publish_pack_updated(&env, pack);

        Ok(())
    }

    /// Remove a lock pack that no position references any more.
    pub fn delete_staking_pack(
        env: Env,
        caller: Address,
        pack_id: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let pack = catalog::get(&env, pack_id).ok_or(ContractError::PackNotFound)?;
        if pack.is_flex {
            return Err(ContractError::CannotDeleteFlexPack);
        }
        if pack.current_users > 0 {
            return Err(ContractError::PackInUse);
        }

        if !catalog::remove(&env, pack_id) {
            return Err(ContractError::PackNotFound);
        }

        events::publish_pack_deleted(&env, pack_id);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Open a position in `pack_id` with `amount` tokens pulled from `staker`.
    ///
    /// For the flex pack this opens the staker's single flex position. For a
    /// lock pack the reward is fixed now and the contract must already hold
    /// enough to cover every outstanding principal plus that reward.
    pub fn stake(
        env: Env,
        staker: Address,
        pack_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut pack = catalog::get(&env, pack_id).ok_or(ContractError::PackNotFound)?;
        if !pack.is_usable || !pack.has_capacity_for_user() {
            return Err(ContractError::PackUnavailable);
        }
        if amount < pack.min_stake {
            return Err(ContractError::AmountTooLow);
        }
        if amount > pack.max_stake {
            return Err(ContractError::AmountTooHigh);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }
        if !pack.has_room_for(amount) {
            return Err(ContractError::PackCapacityReached);
        }

        let token = Self::token(&env)?;
        let now = env.ledger().timestamp();

        if pack.is_flex {
            if let Some(existing) = positions::flex(&env, &staker) {
                if existing.amount > 0 {
                    return Err(ContractError::AlreadyStakedFlex);
                }
            }

            token.pull(&staker, amount)?;

            positions::set_flex(
                &env,
                &staker,
                &FlexStake {
                    pack_id,
                    amount,
                    rate: pack.rate,
                    timestamp: now,
                    reward: 0,
                },
            );
            positions::track_flex_holder(&env, &staker);
        } else {
            let reward = rewards::lock_reward(amount, pack.rate, pack.lock_period)
                .ok_or(ContractError::ArithmeticOverflow)?;
            let obligation = positions::total_stake(&env)
                .checked_add(amount)
                .and_then(|v| v.checked_add(reward))
                .ok_or(ContractError::ArithmeticOverflow)?;
            Self::require_solvent(&token, obligation)?;

            token.pull(&staker, amount)?;

            let unlock_at = now
                .checked_add(pack.lock_period)
                .ok_or(ContractError::ArithmeticOverflow)?;
            let mut stakes = positions::locks(&env, &staker);
            stakes.push_back(LockedStake {
                pack_id,
                amount,
                rate: pack.rate,
                period: pack.lock_period,
                reward,
                claimed: 0,
                staked_at: now,
                unlock_at,
                unlockable: false,
            });
            positions::set_locks(&env, &staker, &stakes);
        }

        pack.current_users = pack.current_users.saturating_add(1);
        pack.total_staked = pack
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        catalog::save(&env, &pack);

        Self::credit_ledger(&env, &staker, amount)?;

        events::publish_stake(&env, staker, pack_id, amount, pack.lock_period, pack.rate);

        Ok(())
    }

    // ── Flex positions ──────────────────────────────────────────────────────

    /// Top up an existing flex position. Pending accrual is settled first so
    /// the new principal only earns from now on.
    pub fn increase_stake_flex(
        env: Env,
        staker: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let stake = positions::flex(&env, &staker)
            .filter(|s| s.amount > 0)
            .ok_or(ContractError::NoFlexPosition)?;
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let now = env.ledger().timestamp();
        let (mut settled, _) = stake
            .settle(now)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let token = Self::token(&env)?;
        token.pull(&staker, amount)?;

        let mut pack = catalog::get(&env, FLEX_PACK_ID).ok_or(ContractError::PackNotFound)?;
        let new_amount = stake
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if new_amount > pack.max_stake {
            return Err(ContractError::AmountTooHigh);
        }
        if !pack.has_room_for(amount) {
            return Err(ContractError::PackCapacityReached);
        }

        // Holdings now include the top-up, so it must be counted as owed too.
        let obligation = positions::total_stake(&env)
            .checked_add(amount)
            .and_then(|v| v.checked_add(settled.reward))
            .ok_or(ContractError::ArithmeticOverflow)?;
        Self::require_solvent(&token, obligation)?;

        settled.amount = new_amount;
        positions::set_flex(&env, &staker, &settled);

        pack.total_staked = pack
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        catalog::save(&env, &pack);

        Self::credit_ledger(&env, &staker, amount)?;

        events::publish_stake(&env, staker, FLEX_PACK_ID, amount, 0, settled.rate);

        Ok(())
    }

    /// Withdraw `amount` of flex principal together with every unpaid reward.
    ///
    /// Returns the total paid out. A position that reaches zero is closed.
    pub fn unstake_flex(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let stake = positions::flex(&env, &staker).unwrap_or(FlexStake::empty());
        if amount > stake.amount {
            return Err(ContractError::AmountExceedsStaked);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let now = env.ledger().timestamp();
        let (mut settled, _) = stake
            .settle(now)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let reward = settled.reward;

        let token = Self::token(&env)?;
        let obligation = positions::total_stake(&env)
            .checked_add(reward)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Self::require_solvent(&token, obligation)?;

        let payout = amount
            .checked_add(reward)
            .ok_or(ContractError::ArithmeticOverflow)?;

        settled.amount -= amount;
        settled.reward = 0;

        let mut pack = catalog::get(&env, FLEX_PACK_ID).ok_or(ContractError::PackNotFound)?;
        pack.total_staked = pack.total_staked.saturating_sub(amount);
        if settled.amount == 0 {
            positions::remove_flex(&env, &staker);
            if !positions::untrack_flex_holder(&env, &staker) {
                return Err(ContractError::NoFlexPosition);
            }
            pack.current_users = pack.current_users.saturating_sub(1);
        } else {
            positions::set_flex(&env, &staker, &settled);
        }
        catalog::save(&env, &pack);

        Self::debit_ledger(&env, &staker, amount)?;

        token.push(&staker, payout)?;

        events::publish_unstake(&env, staker.clone(), FLEX_PACK_ID, amount);
        if reward > 0 {
            events::publish_reward_claimed(&env, staker, FLEX_PACK_ID, reward);
        }

        Ok(payout)
    }

    /// Pay out the flex reward accrued so far and restart accrual from now.
    pub fn claim_reward_flex(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let stake = positions::flex(&env, &staker)
            .filter(|s| s.amount > 0)
            .ok_or(ContractError::NoAmountStaked)?;

        let now = env.ledger().timestamp();
        let (mut settled, _) = stake
            .settle(now)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let reward = settled.reward;

        let token = Self::token(&env)?;
        let obligation = positions::total_stake(&env)
            .checked_add(reward)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Self::require_solvent(&token, obligation)?;

        settled.reward = 0;
        positions::set_flex(&env, &staker, &settled);

        token.push(&staker, reward)?;

        events::publish_reward_claimed(&env, staker, FLEX_PACK_ID, reward);

        Ok(reward)
    }

    /// Rebase flex holders `[from_index, to_index)` onto the flex pack's
    /// current rate.
    ///
    /// Each holder's accrual is settled at their old rate and compounded into
    /// principal before the new rate applies. The window bounds the work done
    /// per call; the owner pages through `get_stake_flex_keys()` holders.
    pub fn update_stake_flex_rate(
        env: Env,
        caller: Address,
        from_index: u32,
        to_index: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if to_index <= from_index || to_index > positions::flex_holder_count(&env) {
            return Err(ContractError::InvalidRange);
        }

        let mut pack = catalog::get(&env, FLEX_PACK_ID).ok_or(ContractError::PackNotFound)?;
        let now = env.ledger().timestamp();
        let mut compounded: i128 = 0;

        for index in from_index..to_index {
            let holder =
                positions::flex_holder_at(&env, index).ok_or(ContractError::InvalidRange)?;
            let Some(stake) = positions::flex(&env, &holder) else {
                continue;
            };
            let (rebased, folded) = stake
                .compound(now, pack.rate)
                .ok_or(ContractError::ArithmeticOverflow)?;
            positions::set_flex(&env, &holder, &rebased);

            if folded > 0 {
                let balance = positions::balance_staked(&env, &holder)
                    .checked_add(folded)
                    .ok_or(ContractError::ArithmeticOverflow)?;
                positions::set_balance_staked(&env, &holder, balance);
                compounded = compounded
                    .checked_add(folded)
                    .ok_or(ContractError::ArithmeticOverflow)?;
            }
        }

        if compounded > 0 {
            let total = positions::total_stake(&env)
                .checked_add(compounded)
                .ok_or(ContractError::ArithmeticOverflow)?;
            positions::set_total_stake(&env, total);
            pack.total_staked = pack
                .total_staked
                .checked_add(compounded)
                .ok_or(ContractError::ArithmeticOverflow)?;
            catalog::save(&env, &pack);
        }

        events::publish_flex_rate_updated(&env, from_index, to_index, pack.rate, compounded);

        Ok(())
    }

    // ── Lock positions ──────────────────────────────────────────────────────

    /// Pay the fixed reward of a matured lock position. One-shot.
    pub fn claim_reward_lock(env: Env, staker: Address, index: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut stakes = positions::locks(&env, &staker);
        let mut stake = stakes.get(index).ok_or(ContractError::PositionNotFound)?;
        if !stake.is_mature(env.ledger().timestamp()) {
            return Err(ContractError::NotYetUnlockable);
        }
        if stake.unlockable {
            return Err(ContractError::RewardAlreadyClaimed);
        }

        let outstanding = stake.outstanding_reward();
        let token = Self::token(&env)?;
        let obligation = positions::total_stake(&env)
            .checked_add(outstanding)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Self::require_solvent(&token, obligation)?;

        stake.claimed = stake.reward;
        stake.unlockable = true;
        let pack_id = stake.pack_id;
        stakes.set(index, stake);
        positions::set_locks(&env, &staker, &stakes);

        token.push(&staker, outstanding)?;

        events::publish_reward_claimed(&env, staker, pack_id, outstanding);

        Ok(outstanding)
    }

    /// Return the principal of a matured lock position and close it.
    ///
    /// The position at `index` is replaced by the caller's last position.
    /// A reward that was not claimed beforehand is forfeited.
    pub fn unstake_lock(env: Env, staker: Address, index: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut stakes = positions::locks(&env, &staker);
        let stake = stakes.get(index).ok_or(ContractError::PositionNotFound)?;
        if !stake.is_mature(env.ledger().timestamp()) {
            return Err(ContractError::NotYetUnlockable);
        }

        let token = Self::token(&env)?;
        Self::require_solvent(&token, stake.amount)?;

        swap_remove(&mut stakes, index).ok_or(ContractError::PositionNotFound)?;
        positions::set_locks(&env, &staker, &stakes);

        if let Some(mut pack) = catalog::get(&env, stake.pack_id) {
            pack.current_users = pack.current_users.saturating_sub(1);
            pack.total_staked = pack.total_staked.saturating_sub(stake.amount);
            catalog::save(&env, &pack);
        }

        Self::debit_ledger(&env, &staker, stake.amount)?;

        token.push(&staker, stake.amount)?;

        events::publish_unstake(&env, staker, stake.pack_id, stake.amount);

        Ok(stake.amount)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_staking_pack(env: Env, pack_id: u64) -> Result<StakingPack, ContractError> {
        catalog::get(&env, pack_id).ok_or(ContractError::PackNotFound)
    }

    /// All packs in catalog order.
    pub fn get_staking_packs(env: Env) -> Vec<StakingPack> {
        catalog::all(&env)
    }

    pub fn get_staking_pack_ids(env: Env) -> Vec<u64> {
        catalog::pack_ids(&env)
    }

    pub fn get_staking_pack_count(env: Env) -> u32 {
        catalog::len(&env)
    }

    /// The caller's flex position, zeroed when none is open.
    pub fn get_flex_stake(env: Env, user: Address) -> FlexStake {
        positions::flex(&env, &user).unwrap_or(FlexStake::empty())
    }

    /// Unpaid flex reward, including accrual not yet settled into storage.
    pub fn get_pending_flex_reward(env: Env, user: Address) -> Result<i128, ContractError> {
        let Some(stake) = positions::flex(&env, &user) else {
            return Ok(0);
        };
        let (settled, _) = stake
            .settle(env.ledger().timestamp())
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(settled.reward)
    }

    pub fn get_stake(env: Env, user: Address, index: u32) -> Result<LockedStake, ContractError> {
        positions::locks(&env, &user)
            .get(index)
            .ok_or(ContractError::PositionNotFound)
    }

    pub fn get_stakes(env: Env, user: Address) -> Vec<LockedStake> {
        positions::locks(&env, &user)
    }

    /// Number of lock positions held by `user`.
    pub fn get_my_number_of_stake(env: Env, user: Address) -> u32 {
        positions::locks(&env, &user).len()
    }

    pub fn get_total_stake(env: Env) -> i128 {
        positions::total_stake(&env)
    }

    pub fn get_balance_staked(env: Env, user: Address) -> i128 {
        positions::balance_staked(&env, &user)
    }

    /// Number of open flex positions.
    pub fn get_stake_flex_keys(env: Env) -> u32 {
        positions::flex_holder_count(&env)
    }

    /// Flex holders in index slots `[from_index, to_index)`, clamped to
    /// `get_stake_flex_keys()`.
    pub fn get_flex_holders(env: Env, from_index: u32, to_index: u32) -> Vec<Address> {
        positions::flex_holders(&env, from_index, to_index)
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Ownership (two-step) ────────────────────────────────────────────────

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }

    /// Propose a new owner. Takes effect once the proposed address accepts.
    pub fn propose_owner(
        env: Env,
        current_owner: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();
        Self::require_owner(&env, &current_owner)?;

        env.storage().instance().set(&PENDING_OWNER, &new_owner);

        events::publish_owner_transfer_proposed(&env, current_owner, new_owner);

        Ok(())
    }

    /// Accept a pending ownership transfer. Must be called by the proposed owner.
    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_OWNER)
            .ok_or(ContractError::InvalidInput)?;
        if new_owner != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;

        env.storage().instance().set(&OWNER, &new_owner);
        env.storage().instance().remove(&PENDING_OWNER);

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    pub fn cancel_owner_transfer(env: Env, current_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();
        Self::require_owner(&env, &current_owner)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_OWNER)
            .ok_or(ContractError::InvalidInput)?;

        env.storage().instance().remove(&PENDING_OWNER);

        events::publish_owner_transfer_cancelled(&env, current_owner, pending);

        Ok(())
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_OWNER)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != owner {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn validate_terms(terms: &PackTerms) -> Result<(), ContractError> {
        if terms.min_stake > terms.max_stake {
            return Err(ContractError::MinStakeAboveMax);
        }
        if terms.rate < 0 || terms.min_stake < 0 || terms.max_stake_total < 0 {
            return Err(ContractError::InvalidInput);
        }
        Ok(())
    }

    fn token(env: &Env) -> Result<TokenAdapter<'_>, ContractError> {
        let token: Address = env
            .storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        Ok(TokenAdapter::new(env, &token))
    }

    /// Guard: the contract's holdings must cover `obligation`.
    fn require_solvent(token: &TokenAdapter, obligation: i128) -> Result<(), ContractError> {
        if !token.covers(obligation) {
            return Err(ContractError::StakingContractCannotPayRewards);
        }
        Ok(())
    }

    /// Add principal to the global and per-user totals.
    fn credit_ledger(env: &Env, user: &Address, amount: i128) -> Result<(), ContractError> {
        let total = positions::total_stake(env)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let balance = positions::balance_staked(env, user)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        positions::set_total_stake(env, total);
        positions::set_balance_staked(env, user, balance);
        Ok(())
    }

    /// Remove principal from the global and per-user totals.
    fn debit_ledger(env: &Env, user: &Address, amount: i128) -> Result<(), ContractError> {
        let total = positions::total_stake(env)
            .checked_sub(amount)
            .filter(|v| *v >= 0)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let balance = positions::balance_staked(env, user)
            .checked_sub(amount)
            .filter(|v| *v >= 0)
            .ok_or(ContractError::ArithmeticOverflow)?;
        positions::set_total_stake(env, total);
        positions::set_balance_staked(env, user, balance);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────




#[cfg(test)]
mod test_lock;
