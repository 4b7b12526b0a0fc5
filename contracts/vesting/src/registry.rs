//! Persistent storage for vesting types and vesters.
//!
//! Types are keyed by name, with a `TYPE_NAMES` list in instance storage
//! recording every registered name. Vesters are keyed by beneficiary address.

use soroban_sdk::{symbol_short, Address, Env, String, Symbol, Vec};

use crate::schedule::{Vester, VestingType};

// ── Storage keys ─────────────────────────────────────────────────────────────

const VTYPE: Symbol = symbol_short!("VTYPE");
const TYPE_NAMES: Symbol = symbol_short!("VT_NAMES");
const VESTER: Symbol = symbol_short!("VESTER");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

fn type_key(name: &String) -> (Symbol, String) {
    (VTYPE, name.clone())
}

fn vester_key(addr: &Address) -> (Symbol, Address) {
    (VESTER, addr.clone())
}

// ── Vesting types ────────────────────────────────────────────────────────────

pub fn type_names(env: &Env) -> Vec<String> {
    env.storage()
        .instance()
        .get(&TYPE_NAMES)
        .unwrap_or(Vec::new(env))
}

pub fn get_type(env: &Env, name: &String) -> Option<VestingType> {
    let key = type_key(name);
    let vt: Option<VestingType> = env.storage().persistent().get(&key);
    if vt.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    vt
}

pub fn has_type(env: &Env, name: &String) -> bool {
    env.storage().persistent().has(&type_key(name))
}

pub fn insert_type(env: &Env, vt: &VestingType) {
    let key = type_key(&vt.name);
    env.storage().persistent().set(&key, vt);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let mut names = type_names(env);
    names.push_back(vt.name.clone());
    env.storage().instance().set(&TYPE_NAMES, &names);
}

/// Returns `false` if no type was registered under `name`.
pub fn remove_type(env: &Env, name: &String) -> bool {
    if !has_type(env, name) {
        return false;
    }
    env.storage().persistent().remove(&type_key(name));

    let mut names = type_names(env);
    if let Some(index) = names.first_index_of(name.clone()) {
        names.remove(index);
    }
    env.storage().instance().set(&TYPE_NAMES, &names);
    true
}

// ── Vesters ──────────────────────────────────────────────────────────────────

pub fn get_vester(env: &Env, addr: &Address) -> Option<Vester> {
    let key = vester_key(addr);
    let vester: Option<Vester> = env.storage().persistent().get(&key);
    if vester.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    vester
}

pub fn has_vester(env: &Env, addr: &Address) -> bool {
    env.storage().persistent().has(&vester_key(addr))
}

pub fn save_vester(env: &Env, addr: &Address, vester: &Vester) {
    let key = vester_key(addr);
    env.storage().persistent().set(&key, vester);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn remove_vester(env: &Env, addr: &Address) {
    env.storage().persistent().remove(&vester_key(addr));
}
