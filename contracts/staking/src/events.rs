#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::catalog::StakingPack;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub timestamp: u64,
}

/// Fired when a pack is added to or updated in the catalog.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingPackEvent {
    pub pack: StakingPack,
    pub timestamp: u64,
}

/// Fired when a pack is removed from the catalog.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingPackDeletedEvent {
    pub pack_id: u64,
    pub timestamp: u64,
}

/// Fired when principal enters a pack, including flex top-ups.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeEvent {
    pub staker: Address,
    pub pack_id: u64,
    pub amount: i128,
    pub period: u64,
    pub rate: i128,
    pub timestamp: u64,
}

/// Fired when principal leaves a pack.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeEvent {
    pub staker: Address,
    pub pack_id: u64,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a reward is paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub pack_id: u64,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired after a paged flex rate rebase.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlexRateUpdatedEvent {
    pub from_index: u32,
    pub to_index: u32,
    pub rate: i128,
    pub compounded: i128,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when a pending ownership transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pack_added(env: &Env, pack: StakingPack) {
    env.events().publish(
        (symbol_short!("PACK_ADD"), pack.id),
        StakingPackEvent {
            pack,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pack_updated(env: &Env, pack: StakingPack) {
    env.events().publish(
        (symbol_short!("PACK_UPD"), pack.id),
        StakingPackEvent {
            pack,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pack_deleted(env: &Env, pack_id: u64) {
    env.events().publish(
        (symbol_short!("PACK_DEL"), pack_id),
        StakingPackDeletedEvent {
            pack_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake(
    env: &Env,
    staker: Address,
    pack_id: u64,
    amount: i128,
    period: u64,
    rate: i128,
) {
    env.events().publish(
        (symbol_short!("STAKE"), staker.clone()),
        StakeEvent {
            staker,
            pack_id,
            amount,
            period,
            rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstake(env: &Env, staker: Address, pack_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKE"), staker.clone()),
        UnstakeEvent {
            staker,
            pack_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, staker: Address, pack_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardClaimedEvent {
            staker,
            pack_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_flex_rate_updated(
    env: &Env,
    from_index: u32,
    to_index: u32,
    rate: i128,
    compounded: i128,
) {
    env.events().publish(
        (symbol_short!("FLEX_RATE"),),
        FlexRateUpdatedEvent {
            from_index,
            to_index,
            rate,
            compounded,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
