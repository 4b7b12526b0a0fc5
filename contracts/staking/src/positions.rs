//! Position ledger: flex positions, lock positions and the global totals.
//!
//! Per-user records use tuple keys `(prefix, user)` in persistent storage;
//! the global counters sit in instance storage next to the contract config.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::catalog::FLEX_PACK_ID;

// ── Storage keys ─────────────────────────────────────────────────────────────

const TOTAL_STAKE: Symbol = symbol_short!("TOT_STK");
const FLEX_COUNT: Symbol = symbol_short!("FLEX_CNT");

const USER_FLEX: Symbol = symbol_short!("FLEX");
const USER_LOCKS: Symbol = symbol_short!("LOCKS");
const USER_BALANCE: Symbol = symbol_short!("BAL");
const FLEX_IDX: Symbol = symbol_short!("FLEX_IDX");
const FLEX_POS: Symbol = symbol_short!("FLEX_POS");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Types ────────────────────────────────────────────────────────────────────

/// The single flexible position a user may hold.
///
/// Accrual between `timestamp` and now is settled lazily by every call that
/// touches the position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlexStake {
    pub pack_id: u64,
    pub amount: i128,
    /// Annual rate in percent, copied from the flex pack.
    pub rate: i128,
    /// Last accrual checkpoint.
    pub timestamp: u64,
    /// Settled but unpaid reward.
    pub reward: i128,
}

impl FlexStake {
    pub fn empty() -> Self {
        Self {
            pack_id: FLEX_PACK_ID,
            amount: 0,
            rate: 0,
            timestamp: 0,
            reward: 0,
        }
    }
}

/// A fixed-term position. `reward` is fixed when the position is opened.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockedStake {
    pub pack_id: u64,
    pub amount: i128,
    pub rate: i128,
    pub period: u64,
    pub reward: i128,
    /// Reward already paid out.
    pub claimed: i128,
    pub staked_at: u64,
    pub unlock_at: u64,
    /// Set once a reward claim has observed the position as matured.
    pub unlockable: bool,
}

impl LockedStake {
    pub fn is_mature(&self, now: u64) -> bool {
        now >= self.unlock_at
    }

    pub fn outstanding_reward(&self) -> i128 {
        self.reward.saturating_sub(self.claimed)
    }
}

// ── Key helpers ──────────────────────────────────────────────────────────────

fn user_key(prefix: Symbol, user: &Address) -> (Symbol, Address) {
    (prefix, user.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Global totals ────────────────────────────────────────────────────────────

pub fn total_stake(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKE).unwrap_or(0)
}

pub fn set_total_stake(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_STAKE, &total);
}

pub fn balance_staked(env: &Env, user: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&user_key(USER_BALANCE, user))
        .unwrap_or(0)
}

pub fn set_balance_staked(env: &Env, user: &Address, balance: i128) {
    let key = user_key(USER_BALANCE, user);
    if balance == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &balance);
    extend_ttl(env, &key);
}

// ── Flex positions ───────────────────────────────────────────────────────────

pub fn flex(env: &Env, user: &Address) -> Option<FlexStake> {
    let key = user_key(USER_FLEX, user);
    let stake: Option<FlexStake> = env.storage().persistent().get(&key);
    if stake.is_some() {
        extend_ttl(env, &key);
    }
    stake
}

pub fn set_flex(env: &Env, user: &Address, stake: &FlexStake) {
    let key = user_key(USER_FLEX, user);
    env.storage().persistent().set(&key, stake);
    extend_ttl(env, &key);
}

pub fn remove_flex(env: &Env, user: &Address) {
    env.storage()
        .persistent()
        .remove(&user_key(USER_FLEX, user));
}

// ── Flex holder index ────────────────────────────────────────────────────────
//
// Holders are numbered densely from zero so `update_stake_flex_rate` can page
// through them. `(FLEX_IDX, n)` maps a slot to its holder and `(FLEX_POS, user)`
// maps back, so joining and leaving touch a constant number of entries.

fn slot_key(index: u32) -> (Symbol, u32) {
    (FLEX_IDX, index)
}

pub fn flex_holder_count(env: &Env) -> u32 {
    env.storage().instance().get(&FLEX_COUNT).unwrap_or(0)
}

pub fn flex_holder_at(env: &Env, index: u32) -> Option<Address> {
    let key = slot_key(index);
    let holder: Option<Address> = env.storage().persistent().get(&key);
    if holder.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    holder
}

fn set_slot(env: &Env, index: u32, user: &Address) {
    let key = slot_key(index);
    env.storage().persistent().set(&key, user);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let pos_key = user_key(FLEX_POS, user);
    env.storage().persistent().set(&pos_key, &index);
    extend_ttl(env, &pos_key);
}

pub fn track_flex_holder(env: &Env, user: &Address) {
    if env.storage().persistent().has(&user_key(FLEX_POS, user)) {
        return;
    }
    let count = flex_holder_count(env);
    set_slot(env, count, user);
    env.storage()
        .instance()
        .set(&FLEX_COUNT, &count.saturating_add(1));
}

/// Drop `user` from the index by moving the last holder into its slot.
/// Returns `false` if `user` was not indexed.
pub fn untrack_flex_holder(env: &Env, user: &Address) -> bool {
    let pos_key = user_key(FLEX_POS, user);
    let Some(index) = env.storage().persistent().get::<_, u32>(&pos_key) else {
        return false;
    };
    let count = flex_holder_count(env);
    let Some(last) = count.checked_sub(1) else {
        return false;
    };

    if index != last {
        if let Some(moved) = flex_holder_at(env, last) {
            set_slot(env, index, &moved);
        }
    }
    env.storage().persistent().remove(&slot_key(last));
    env.storage().persistent().remove(&pos_key);
    env.storage().instance().set(&FLEX_COUNT, &last);
    true
}

/// Holders in slots `[from_index, to_index)`, clamped to the holder count.
pub fn flex_holders(env: &Env, from_index: u32, to_index: u32) -> Vec<Address> {
    let end = to_index.min(flex_holder_count(env));
    let mut holders = Vec::new(env);
    for index in from_index..end {
        if let Some(holder) = flex_holder_at(env, index) {
            holders.push_back(holder);
        }
    }
    holders
}

// ── Lock positions ───────────────────────────────────────────────────────────

pub fn locks(env: &Env, user: &Address) -> Vec<LockedStake> {
    let key = user_key(USER_LOCKS, user);
    let stakes: Option<Vec<LockedStake>> = env.storage().persistent().get(&key);
    match stakes {
        Some(stakes) => {
            extend_ttl(env, &key);
            stakes
        }
        None => Vec::new(env),
    }
}

pub fn set_locks(env: &Env, user: &Address, stakes: &Vec<LockedStake>) {
    let key = user_key(USER_LOCKS, user);
    if stakes.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, stakes);
    extend_ttl(env, &key);
}
