extern crate std;

use crate::{
    test_setup::{lock_terms, Harness, HALF_YEAR, UNIT},
    ContractError,
};

/// Reserve that exactly covers one 150-token half-year stake at 13 %.
const EXACT_RESERVE: i128 = 150 * UNIT + 97_500;

fn staked_once() -> (Harness, soroban_sdk::Address) {
    let h = Harness::with_packs();
    let staker = h.user();
    h.fund(&staker, 150 * UNIT);
    h.reserve(EXACT_RESERVE);
    h.client.stake(&staker, &1, &(150 * UNIT));
    (h, staker)
}

// ── Opening ───────────────────────────────────────────────────────────────────

#[test]
fn test_lock_stake_fixes_reward() {
    let (h, staker) = staked_once();

    let position = h.client.get_stake(&staker, &0);
    assert_eq!(position.pack_id, 1);
    assert_eq!(position.amount, 150 * UNIT);
    assert_eq!(position.rate, 13);
    assert_eq!(position.period, HALF_YEAR);
    assert_eq!(position.reward, 97_500);
    assert_eq!(position.claimed, 0);
    assert_eq!(position.unlock_at, position.staked_at + HALF_YEAR);
    assert!(!position.unlockable);

    assert_eq!(h.client.get_my_number_of_stake(&staker), 1);
    assert_eq!(h.client.get_staking_pack(&1).current_users, 1);
    assert_eq!(h.client.get_total_stake(), 150 * UNIT);
}

#[test]
fn test_lock_stake_requires_reserve_for_reward() {
    let h = Harness::with_packs();
    let staker = h.user();
    h.fund(&staker, 150 * UNIT);
    h.reserve(EXACT_RESERVE - 1);

    match h.client.try_stake(&staker, &1, &(150 * UNIT)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::StakingContractCannotPayRewards),
        _ => unreachable!("Expected StakingContractCannotPayRewards error"),
    }

    h.reserve(1);
    h.client.stake(&staker, &1, &(150 * UNIT));
}

// ── claim_reward_lock ─────────────────────────────────────────────────────────

#[test]
fn test_claim_reward_lock_unknown_index_fails() {
    let (h, staker) = staked_once();

    match h.client.try_claim_reward_lock(&staker, &5) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PositionNotFound),
        _ => unreachable!("Expected PositionNotFound error"),
    }
}

#[test]
fn test_claim_reward_lock_before_maturity_fails() {
    let (h, staker) = staked_once();
    h.advance(HALF_YEAR - 1);

    match h.client.try_claim_reward_lock(&staker, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotYetUnlockable),
        _ => unreachable!("Expected NotYetUnlockable error"),
    }
}

#[test]
fn test_claim_reward_lock_is_one_shot() {
    let (h, staker) = staked_once();
    h.advance(HALF_YEAR);

    assert_eq!(h.client.claim_reward_lock(&staker, &0), 97_500);
    assert_eq!(h.balance(&staker), 97_500);

    let position = h.client.get_stake(&staker, &0);
    assert_eq!(position.claimed, position.reward);
    assert!(position.unlockable);

    match h.client.try_claim_reward_lock(&staker, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::RewardAlreadyClaimed),
        _ => unreachable!("Expected RewardAlreadyClaimed error"),
    }
}

#[test]
fn test_claim_reward_lock_requires_solvency() {
    let (h, staker) = staked_once();
    h.advance(HALF_YEAR);
    h.drain(150 * UNIT + 1);

    match h.client.try_claim_reward_lock(&staker, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::StakingContractCannotPayRewards),
        _ => unreachable!("Expected StakingContractCannotPayRewards error"),
    }
}

#[test]
fn test_short_lock_floors_reward() {
    let h = Harness::bare();
    let pack_id = h.client.add_staking_pack(&h.owner, &lock_terms(600, 13));
    let staker = h.user();
    h.fund(&staker, 150 * UNIT);
    h.reserve(1_000 * UNIT);

    h.client.stake(&staker, &pack_id, &(150 * UNIT));
    h.advance(3_600);

    assert_eq!(h.client.claim_reward_lock(&staker, &0), 3);
    assert_eq!(h.client.get_stake(&staker, &0).claimed, 3);
}

// ── unstake_lock ──────────────────────────────────────────────────────────────

#[test]
fn test_unstake_lock_before_maturity_fails() {
    let (h, staker) = staked_once();

    match h.client.try_unstake_lock(&staker, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotYetUnlockable),
        _ => unreachable!("Expected NotYetUnlockable error"),
    }
    match h.client.try_unstake_lock(&staker, &5) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PositionNotFound),
        _ => unreachable!("Expected PositionNotFound error"),
    }
}

#[test]
fn test_unstake_lock_requires_principal_on_hand() {
    let (h, staker) = staked_once();
    h.advance(HALF_YEAR);
    h.drain(h.holdings() - 150 * UNIT + 1);

    match h.client.try_unstake_lock(&staker, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::StakingContractCannotPayRewards),
        _ => unreachable!("Expected StakingContractCannotPayRewards error"),
    }
}

#[test]
fn test_claim_then_unstake_returns_everything() {
    let (h, staker) = staked_once();
    h.advance(HALF_YEAR);

    h.client.claim_reward_lock(&staker, &0);
    assert_eq!(h.client.unstake_lock(&staker, &0), 150 * UNIT);

    assert_eq!(h.balance(&staker), 150 * UNIT + 97_500);
    assert_eq!(h.client.get_my_number_of_stake(&staker), 0);
    assert_eq!(h.client.get_total_stake(), 0);
    assert_eq!(h.client.get_balance_staked(&staker), 0);

    let pack = h.client.get_staking_pack(&1);
    assert_eq!(pack.current_users, 0);
    assert_eq!(pack.total_staked, 0);

    // With no users left the pack can be deleted.
    h.client.delete_staking_pack(&h.owner, &1);
}

#[test]
fn test_unstake_without_claim_forfeits_reward() {
    let (h, staker) = staked_once();
    h.advance(HALF_YEAR);

    assert_eq!(h.client.unstake_lock(&staker, &0), 150 * UNIT);
    assert_eq!(h.balance(&staker), 150 * UNIT);
}

#[test]
fn test_unstake_lock_swaps_last_position_in() {
    let h = Harness::with_packs();
    let staker = h.user();
    h.fund(&staker, 60 * UNIT);
    h.reserve(1_000 * UNIT);

    h.client.stake(&staker, &1, &(10 * UNIT));
    h.client.stake(&staker, &1, &(20 * UNIT));
    h.client.stake(&staker, &1, &(30 * UNIT));
    h.advance(HALF_YEAR);

    h.client.unstake_lock(&staker, &0);

    let stakes = h.client.get_stakes(&staker);
    assert_eq!(stakes.len(), 2);
    assert_eq!(stakes.get(0).map(|s| s.amount), Some(30 * UNIT));
    assert_eq!(stakes.get(1).map(|s| s.amount), Some(20 * UNIT));
    assert_eq!(h.client.get_staking_pack(&1).current_users, 2);
    assert_eq!(h.client.get_balance_staked(&staker), 50 * UNIT);
}
