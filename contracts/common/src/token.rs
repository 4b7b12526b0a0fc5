//! Checked adapter over the SEP-41 token client.
//!
//! The raw client traps the whole invocation when a transfer cannot be
//! covered. The adapter checks balance and allowance first so callers get a
//! typed [`TransferError`] they can map into their own error enum.

use soroban_sdk::{token, Address, Env};

/// Reasons an external token movement was refused.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransferError {
    /// The source account holds less than the requested amount.
    InsufficientBalance,
    /// The contract is not approved to move that much from the source.
    InsufficientAllowance,
    /// Negative transfer amount.
    InvalidAmount,
}

pub struct TokenAdapter<'a> {
    env: &'a Env,
    client: token::Client<'a>,
}

impl<'a> TokenAdapter<'a> {
    pub fn new(env: &'a Env, token: &Address) -> Self {
        Self {
            env,
            client: token::Client::new(env, token),
        }
    }

    pub fn balance_of(&self, owner: &Address) -> i128 {
        self.client.balance(owner)
    }

    /// Tokens currently held by the calling contract.
    pub fn holdings(&self) -> i128 {
        self.client.balance(&self.env.current_contract_address())
    }

    /// Solvency guard: the contract must hold at least `obligation`.
    pub fn covers(&self, obligation: i128) -> bool {
        self.holdings() >= obligation
    }

    /// Pull `amount` from `from` into the contract using its allowance.
    pub fn pull(&self, from: &Address, amount: i128) -> Result<(), TransferError> {
        let contract = self.env.current_contract_address();
        self.relay(from, &contract, amount)
    }

    /// Pay `amount` out of the contract's own holdings.
    pub fn push(&self, to: &Address, amount: i128) -> Result<(), TransferError> {
        if amount < 0 {
            return Err(TransferError::InvalidAmount);
        }
        if amount == 0 {
            return Ok(());
        }
        let contract = self.env.current_contract_address();
        if self.client.balance(&contract) < amount {
            return Err(TransferError::InsufficientBalance);
        }
        self.client.transfer(&contract, to, &amount);
        Ok(())
    }

    /// Move `amount` from `from` to `to`, spending the contract's allowance
    /// on `from`.
    pub fn relay(&self, from: &Address, to: &Address, amount: i128) -> Result<(), TransferError> {
        if amount < 0 {
            return Err(TransferError::InvalidAmount);
        }
        if amount == 0 {
            return Ok(());
        }
        let spender = self.env.current_contract_address();
        if self.client.balance(from) < amount {
            return Err(TransferError::InsufficientBalance);
        }
        if self.client.allowance(from, &spender) < amount {
            return Err(TransferError::InsufficientAllowance);
        }
        self.client.transfer_from(&spender, from, to, &amount);
        Ok(())
    }
}
