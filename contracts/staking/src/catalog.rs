//! Staking pack catalog.
//!
//! Packs live in persistent storage under their own id, while a dense
//! `PACK_IDS` vector in instance storage records catalog order. Ids are
//! handed out sequentially and never reused, so positions can keep referring
//! to a pack by id even after other packs are deleted and the catalog order
//! is reshuffled by swap-removal.

use common::swap_remove;
use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

// ── Storage keys ─────────────────────────────────────────────────────────────

const PACK: Symbol = symbol_short!("PACK");
const PACK_IDS: Symbol = symbol_short!("PACK_IDS");
const NEXT_PACK: Symbol = symbol_short!("NEXT_PACK");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// Id of the single flexible pack, created at initialisation.
pub const FLEX_PACK_ID: u64 = 0;

// ── Types ────────────────────────────────────────────────────────────────────

/// A staking offer with fixed terms.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingPack {
    pub id: u64,
    /// Seconds principal stays locked. Always zero for the flex pack.
    pub lock_period: u64,
    /// Annual reward rate in whole percent.
    pub rate: i128,
    /// Cap on aggregate principal in this pack; zero means uncapped.
    pub max_stake_total: i128,
    pub min_stake: i128,
    pub max_stake: i128,
    pub is_usable: bool,
    pub is_flex: bool,
    /// Flex holders for the flex pack, live lock positions otherwise.
    pub current_users: u32,
    /// Ignored by the flex pack.
    pub max_users: u32,
    pub total_staked: i128,
}

/// Mutable terms accepted by `add_staking_pack` / `set_staking_pack`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackTerms {
    pub lock_period: u64,
    pub rate: i128,
    pub max_stake_total: i128,
    pub min_stake: i128,
    pub max_stake: i128,
    pub is_usable: bool,
    pub max_users: u32,
}

impl StakingPack {
    pub fn from_terms(id: u64, is_flex: bool, terms: &PackTerms) -> Self {
        Self {
            id,
            lock_period: terms.lock_period,
            rate: terms.rate,
            max_stake_total: terms.max_stake_total,
            min_stake: terms.min_stake,
            max_stake: terms.max_stake,
            is_usable: terms.is_usable,
            is_flex,
            current_users: 0,
            max_users: terms.max_users,
            total_staked: 0,
        }
    }

    /// Overwrite the configurable terms, keeping id, flex flag and usage.
    pub fn apply_terms(&mut self, terms: &PackTerms) {
        self.lock_period = terms.lock_period;
        self.rate = terms.rate;
        self.max_stake_total = terms.max_stake_total;
        self.min_stake = terms.min_stake;
        self.max_stake = terms.max_stake;
        self.is_usable = terms.is_usable;
        self.max_users = terms.max_users;
    }

    /// Whether one more position may be admitted.
    pub fn has_capacity_for_user(&self) -> bool {
        self.is_flex || self.current_users < self.max_users
    }

    /// Whether `amount` more principal fits under `max_stake_total`.
    pub fn has_room_for(&self, amount: i128) -> bool {
        if self.max_stake_total == 0 {
            return true;
        }
        match self.total_staked.checked_add(amount) {
            Some(total) => total <= self.max_stake_total,
            None => false,
        }
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn pack_key(id: u64) -> (Symbol, u64) {
    (PACK, id)
}

fn extend_pack_ttl(env: &Env, key: &(Symbol, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn pack_ids(env: &Env) -> Vec<u64> {
    env.storage()
        .instance()
        .get(&PACK_IDS)
        .unwrap_or(Vec::new(env))
}

pub fn len(env: &Env) -> u32 {
    pack_ids(env).len()
}

pub fn get(env: &Env, id: u64) -> Option<StakingPack> {
    let key = pack_key(id);
    let pack: Option<StakingPack> = env.storage().persistent().get(&key);
    if pack.is_some() {
        extend_pack_ttl(env, &key);
    }
    pack
}

pub fn save(env: &Env, pack: &StakingPack) {
    let key = pack_key(pack.id);
    env.storage().persistent().set(&key, pack);
    extend_pack_ttl(env, &key);
}

/// Append a new pack and return it with its freshly assigned id.
pub fn insert(env: &Env, is_flex: bool, terms: &PackTerms) -> StakingPack {
    let id: u64 = env.storage().instance().get(&NEXT_PACK).unwrap_or(0);
    env.storage()
        .instance()
        .set(&NEXT_PACK, &id.saturating_add(1));

    let pack = StakingPack::from_terms(id, is_flex, terms);
    save(env, &pack);

    let mut ids = pack_ids(env);
    ids.push_back(id);
    env.storage().instance().set(&PACK_IDS, &ids);

    pack
}

/// Drop a pack from the catalog by swapping the last entry into its slot.
/// Returns `false` if the id was not catalogued.
pub fn remove(env: &Env, id: u64) -> bool {
    let mut ids = pack_ids(env);
    let Some(index) = ids.first_index_of(id) else {
        return false;
    };
    swap_remove(&mut ids, index);
    env.storage().instance().set(&PACK_IDS, &ids);
    env.storage().persistent().remove(&pack_key(id));
    true
}

/// All packs in current catalog order.
pub fn all(env: &Env) -> Vec<StakingPack> {
    let mut packs = Vec::new(env);
    for id in pack_ids(env).iter() {
        if let Some(pack) = get(env, id) {
            packs.push_back(pack);
        }
    }
    packs
}
