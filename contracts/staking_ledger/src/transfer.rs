//! Asset movement through the token contracts.
//!
//! Calls go through the `try_` client so a declined transfer comes back as
//! `ContractError::TransferFailed` instead of trapping the invocation.

use soroban_sdk::{token::TokenClient, Address, Env};

use crate::ContractError;

fn send(
    env: &Env,
    asset: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    match TokenClient::new(env, asset).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Move `amount` of `asset` from `from` into the pool.
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    send(env, asset, from, &env.current_contract_address(), amount)
}

/// Move `amount` of `asset` out of the pool to `to`.
pub fn push(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    send(env, asset, &env.current_contract_address(), to, amount)
}

/// The pool's on-ledger balance of `asset`.
pub fn pool_balance(env: &Env, asset: &Address) -> Result<i128, ContractError> {
    match TokenClient::new(env, asset).try_balance(&env.current_contract_address()) {
        Ok(Ok(balance)) => Ok(balance),
        _ => Err(ContractError::TransferFailed),
    }
}
