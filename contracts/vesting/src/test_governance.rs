extern crate std;

use soroban_sdk::testutils::Events;
use soroban_sdk::{symbol_short, xdr, Address, Env, IntoVal, TryFromVal, TryIntoVal, Val, Vec};

use crate::{
    events::VotedEvent,
    governance::Action,
    test_setup::{Harness, UNIT},
    ContractError,
};

/// Last published contract event as an `(contract, topics, data)` tuple.
fn last_event(env: &Env) -> (Address, Vec<Val>, Val) {
    let all = env.events().all();
    let event = all.events().last().unwrap().clone();
    let contract = xdr::ScAddress::Contract(event.contract_id.unwrap());
    let xdr::ContractEventBody::V0(body) = event.body;
    let mut topics = Vec::new(env);
    for topic in body.topics.iter() {
        topics.push_back(Val::try_from_val(env, topic).unwrap());
    }
    (
        Address::try_from_val(env, &contract).unwrap(),
        topics,
        Val::try_from_val(env, &body.data).unwrap(),
    )
}

/// Bring `extra` more admins in under the single-admin quorum.
fn with_admins(extra: usize) -> (Harness, std::vec::Vec<Address>) {
    let h = Harness::with_types();
    let mut admins = std::vec![h.admin.clone()];
    for _ in 0..extra {
        let next = h.user();
        h.client.vote_add_admin(&h.admin, &next);
        h.client.add_admin(&h.admin, &next);
        admins.push(next);
    }
    (h, admins)
}

#[test]
fn test_single_admin_acts_alone() {
    let h = Harness::with_types();
    let newcomer = h.user();

    assert_eq!(h.client.vote_add_admin(&h.admin, &newcomer), 1);
    h.client.add_admin(&h.admin, &newcomer);

    assert!(h.client.is_admin(&newcomer));
    assert_eq!(h.client.get_admins().len(), 2);
    // Executing cleared the tally.
    assert!(h.client.get_votes(&Action::AddAdmin(newcomer)).is_empty());
}

#[test]
fn test_execution_without_votes_fails() {
    let h = Harness::with_types();
    let newcomer = h.user();

    match h.client.try_add_admin(&h.admin, &newcomer) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotEnoughVotes),
        _ => unreachable!("Expected NotEnoughVotes error"),
    }
}

#[test]
fn test_non_admin_cannot_vote_or_execute() {
    let h = Harness::with_types();
    let outsider = h.user();

    match h.client.try_vote_add_admin(&outsider, &outsider) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAdmin),
        _ => unreachable!("Expected NotAdmin error"),
    }

    h.client.vote_add_admin(&h.admin, &outsider);
    match h.client.try_add_admin(&outsider, &outsider) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAdmin),
        _ => unreachable!("Expected NotAdmin error"),
    }
}

#[test]
fn test_double_vote_rejected() {
    let h = Harness::with_types();
    let vester = h.enroll("Team", 200_000 * UNIT);

    h.client.vote_remove_vester(&h.admin, &vester);
    match h.client.try_vote_remove_vester(&h.admin, &vester) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyVoted),
        _ => unreachable!("Expected AlreadyVoted error"),
    }
}

#[test]
fn test_add_existing_admin_fails() {
    let h = Harness::with_types();

    h.client.vote_add_admin(&h.admin, &h.admin);
    match h.client.try_add_admin(&h.admin, &h.admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyAdmin),
        _ => unreachable!("Expected AlreadyAdmin error"),
    }
}

#[test]
fn test_raised_quorum_needs_more_votes() {
    let (h, admins) = with_admins(2);

    h.client.vote_set_admin_min(&admins[0], &2);
    h.client.set_admin_min(&admins[0], &2);
    assert_eq!(h.client.get_admin_min_votes(), 2);

    let vester = h.enroll("Advisor", 50_000 * UNIT);
    assert_eq!(h.client.vote_remove_vester(&admins[1], &vester), 1);
    match h.client.try_remove_vester(&admins[1], &vester) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotEnoughVotes),
        _ => unreachable!("Expected NotEnoughVotes error"),
    }

    assert_eq!(h.client.vote_remove_vester(&admins[2], &vester), 2);
    // Any admin may execute once the quorum is met, voter or not.
    h.client.remove_vester(&admins[0], &vester);

    assert_eq!(h.client.get_vester(&vester), None);
    match h.client.try_claim(&vester) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoSuchVester),
        _ => unreachable!("Expected NoSuchVester error"),
    }
}

#[test]
fn test_votes_are_per_target() {
    let (h, admins) = with_admins(1);
    h.client.vote_set_admin_min(&admins[0], &2);
    h.client.set_admin_min(&admins[0], &2);

    let a = h.enroll("Team", UNIT);
    let b = h.enroll("Team", UNIT);
    h.client.vote_remove_vester(&admins[0], &a);
    h.client.vote_remove_vester(&admins[1], &b);

    assert_eq!(h.client.get_votes(&Action::RemoveVester(a.clone())).len(), 1);
    match h.client.try_remove_vester(&admins[0], &a) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotEnoughVotes),
        _ => unreachable!("Expected NotEnoughVotes error"),
    }
}

#[test]
fn test_re_proposal_starts_from_zero() {
    let (h, admins) = with_admins(1);
    h.client.vote_set_admin_min(&admins[0], &2);
    h.client.set_admin_min(&admins[0], &2);

    h.client.vote_set_admin_min(&admins[0], &1);
    h.client.vote_set_admin_min(&admins[1], &1);
    h.client.set_admin_min(&admins[1], &1);
    assert_eq!(h.client.get_admin_min_votes(), 1);

    // The earlier tally for 2 was cleared when it executed.
    assert_eq!(h.client.get_votes(&Action::SetAdminMin(2)).len(), 0);
    match h.client.try_set_admin_min(&admins[0], &2) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotEnoughVotes),
        _ => unreachable!("Expected NotEnoughVotes error"),
    }
}

#[test]
fn test_admin_min_bounds() {
    let (h, admins) = with_admins(1);

    h.client.vote_set_admin_min(&admins[0], &3);
    match h.client.try_set_admin_min(&admins[0], &3) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    h.client.vote_set_admin_min(&admins[0], &0);
    match h.client.try_set_admin_min(&admins[0], &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_remove_unknown_vester_fails() {
    let h = Harness::with_types();
    let ghost = h.user();

    h.client.vote_remove_vester(&h.admin, &ghost);
    match h.client.try_remove_vester(&h.admin, &ghost) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoSuchVester),
        _ => unreachable!("Expected NoSuchVester error"),
    }
}

#[test]
fn test_quorum_votes_use_their_own_topic() {
    let h = Harness::with_types();
    let newcomer = h.user();

    h.client.vote_add_admin(&h.admin, &newcomer);
    let event = last_event(&h.env);
    assert_eq!(
        event.1,
        (symbol_short!("VOTED"), h.admin.clone()).into_val(&h.env)
    );

    h.client.vote_set_admin_min(&h.admin, &1);
    let event = last_event(&h.env);
    assert_eq!(
        event.1,
        (symbol_short!("VOTED_NUM"), h.admin.clone()).into_val(&h.env)
    );
    let payload: VotedEvent = event.2.try_into_val(&h.env).unwrap();
    assert_eq!(payload.action, Action::SetAdminMin(1));
    assert_eq!(payload.votes, 1);
}
