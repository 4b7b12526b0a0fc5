//! Admin set and vote ledger.
//!
//! Every privileged vesting action is keyed by an [`Action`]. Admins vote on
//! an action, and once at least `admin_min_votes` distinct admins have voted
//! any admin may execute it. Executing clears the action's votes, so the same
//! action proposed again starts from zero.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ADMINS: Symbol = symbol_short!("ADMINS");
const MIN_VOTES: Symbol = symbol_short!("MIN_VOTES");
const VOTES: Symbol = symbol_short!("VOTES");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Types ────────────────────────────────────────────────────────────────────

/// A governed action together with its target.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    AddAdmin(Address),
    RemoveVester(Address),
    SetAdminMin(u32),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GovernanceError {
    /// The caller is not in the admin set.
    NotAdmin,
    /// The caller already voted for this action.
    AlreadyVoted,
    /// Fewer than `admin_min_votes` admins voted for this action.
    NotEnoughVotes,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn votes_key(action: &Action) -> (Symbol, Action) {
    (VOTES, action.clone())
}

fn extend_votes_ttl(env: &Env, key: &(Symbol, Action)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Admin set ────────────────────────────────────────────────────────────────

/// Seed the admin set with a single admin and a quorum of one.
pub fn bootstrap(env: &Env, admin: &Address) {
    let mut admins = Vec::new(env);
    admins.push_back(admin.clone());
    env.storage().instance().set(&ADMINS, &admins);
    env.storage().instance().set(&MIN_VOTES, &1u32);
}

pub fn admins(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&ADMINS)
        .unwrap_or(Vec::new(env))
}

pub fn is_admin(env: &Env, addr: &Address) -> bool {
    admins(env).contains(addr)
}

pub fn require_admin(env: &Env, addr: &Address) -> Result<(), GovernanceError> {
    if !is_admin(env, addr) {
        return Err(GovernanceError::NotAdmin);
    }
    Ok(())
}

/// Append `addr` to the admin set. Returns `false` if it was already there.
pub fn add_admin(env: &Env, addr: &Address) -> bool {
    let mut list = admins(env);
    if list.contains(addr) {
        return false;
    }
    list.push_back(addr.clone());
    env.storage().instance().set(&ADMINS, &list);
    true
}

pub fn min_votes(env: &Env) -> u32 {
    env.storage().instance().get(&MIN_VOTES).unwrap_or(1)
}

pub fn set_min_votes(env: &Env, n: u32) {
    env.storage().instance().set(&MIN_VOTES, &n);
}

// ── Vote ledger ──────────────────────────────────────────────────────────────

pub fn votes(env: &Env, action: &Action) -> Vec<Address> {
    let key = votes_key(action);
    let voters: Option<Vec<Address>> = env.storage().persistent().get(&key);
    match voters {
        Some(v) => {
            extend_votes_ttl(env, &key);
            v
        }
        None => Vec::new(env),
    }
}

/// Record `voter`'s vote for `action` and return the new tally.
///
/// # Errors
/// - `NotAdmin` if `voter` is not an admin.
/// - `AlreadyVoted` if `voter` already voted for this action.
pub fn vote(env: &Env, voter: &Address, action: &Action) -> Result<u32, GovernanceError> {
    require_admin(env, voter)?;

    let mut voters = votes(env, action);
    if voters.contains(voter) {
        return Err(GovernanceError::AlreadyVoted);
    }
    voters.push_back(voter.clone());

    let key = votes_key(action);
    env.storage().persistent().set(&key, &voters);
    extend_votes_ttl(env, &key);

    Ok(voters.len())
}

/// Gate execution of `action` on `executor` being an admin and the quorum
/// having been met.
pub fn ensure_approved(
    env: &Env,
    executor: &Address,
    action: &Action,
) -> Result<(), GovernanceError> {
    require_admin(env, executor)?;
    if votes(env, action).len() < min_votes(env) {
        return Err(GovernanceError::NotEnoughVotes);
    }
    Ok(())
}

/// Forget every vote cast for `action`.
pub fn clear(env: &Env, action: &Action) {
    env.storage().persistent().remove(&votes_key(action));
}
