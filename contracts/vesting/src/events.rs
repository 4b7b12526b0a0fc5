#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, String};

use crate::governance::Action;
use crate::schedule::VestingType;

// ── Event payloads ──────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub reserve: Address,
    pub timestamp: u64,
}

/// Fired when an admin votes for an action.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VotedEvent {
    pub voter: Address,
    pub action: Action,
    pub votes: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminAddedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminMinChangedEvent {
    pub min_votes: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveChangedEvent {
    pub reserve: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingTypeAddedEvent {
    pub vesting_type: VestingType,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingTypeRemovedEvent {
    pub name: String,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VesterAddedEvent {
    pub vester: Address,
    pub vesting_type: String,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VesterRemovedEvent {
    pub vester: Address,
    pub timestamp: u64,
}

/// Fired for both the initial release and periodic instalments.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEvent {
    pub vester: Address,
    pub amount: i128,
    pub initial: bool,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, token: Address, reserve: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        token,
        reserve,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Quorum votes go out under `VOTED_NUM`, every other vote under `VOTED`.
pub fn publish_voted(env: &Env, voter: Address, action: Action, votes: u32) {
    let topic = match action {
        Action::SetAdminMin(_) => symbol_short!("VOTED_NUM"),
        Action::AddAdmin(_) | Action::RemoveVester(_) => symbol_short!("VOTED"),
    };
    let topics = (topic, voter.clone());
    let data = VotedEvent {
        voter,
        action,
        votes,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_admin_added(env: &Env, admin: Address) {
    let topics = (symbol_short!("ADDED"), admin.clone());
    let data = AdminAddedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_admin_min_changed(env: &Env, min_votes: u32) {
    let topics = (symbol_short!("CHANGED"),);
    let data = AdminMinChangedEvent {
        min_votes,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_reserve_changed(env: &Env, reserve: Address) {
    let topics = (symbol_short!("RESERVE"),);
    let data = ReserveChangedEvent {
        reserve,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_type_added(env: &Env, vesting_type: VestingType) {
    let topics = (symbol_short!("VT_ADD"),);
    let data = VestingTypeAddedEvent {
        vesting_type,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_type_removed(env: &Env, name: String) {
    let topics = (symbol_short!("VT_DEL"),);
    let data = VestingTypeRemovedEvent {
        name,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_vester_added(env: &Env, vester: Address, vesting_type: String, amount: i128) {
    let topics = (symbol_short!("VEST_ADD"), vester.clone());
    let data = VesterAddedEvent {
        vester,
        vesting_type,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_vester_removed(env: &Env, vester: Address) {
    let topics = (symbol_short!("VEST_DEL"), vester.clone());
    let data = VesterRemovedEvent {
        vester,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_claimed(env: &Env, vester: Address, amount: i128, initial: bool) {
    let topics = (symbol_short!("CLAIMED"), vester.clone());
    let data = ClaimedEvent {
        vester,
        amount,
        initial,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
