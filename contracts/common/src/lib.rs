//! Shared building blocks for the TRK staking and vesting contracts.
//!
//! This crate provides:
//! - [`math`]: floor-rounding fixed-point helpers and calendar constants.
//! - [`token`]: a checked adapter over the SEP-41 token client.
//! - [`ErrorCategory`]: the error taxonomy every contract error maps onto.
//! - [`swap_remove`]: swap-with-last removal for `soroban_sdk::Vec`.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

use soroban_sdk::{contracttype, Env, IntoVal, TryFromVal, Val, Vec};

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod math;
pub mod token;

pub use math::*;
pub use token::{TokenAdapter, TransferError};

// ── Error taxonomy ───────────────────────────────────────────────────────────

/// Coarse classification shared by every contract error enum.
///
/// Each contract exposes `ContractError::category()` so off-chain tooling can
/// route failures without knowing the per-contract discriminants.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Contract not initialised, or initialised twice.
    Lifecycle = 1,
    /// Caller lacks owner or admin privilege.
    Authorization = 2,
    /// Referenced pack, position, type or vester is absent.
    NotFound = 3,
    /// A parameter is outside its allowed range.
    Validation = 4,
    /// The operation is invalid for the current lifecycle state.
    State = 5,
    /// Token balances cannot cover the operation.
    Solvency = 6,
    /// A governed action lacks the required votes.
    Governance = 7,
    /// Fixed-point computation overflowed.
    Arithmetic = 8,
}

// ── Vec helpers ──────────────────────────────────────────────────────────────

/// Remove the element at `index` by moving the last element into its slot.
///
/// Order is not preserved. Returns the removed element, or `None` when
/// `index` is out of bounds.
pub fn swap_remove<T>(vec: &mut Vec<T>, index: u32) -> Option<T>
where
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    if index >= vec.len() {
        return None;
    }
    let removed = vec.get(index)?;
    let last = vec.pop_back()?;
    if index < vec.len() {
        vec.set(index, last);
    }
    Some(removed)
}
