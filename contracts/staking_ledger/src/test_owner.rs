extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::test::{assert_error, default_pool, PRINCIPAL, START};
use crate::{ContractError, StakerRecord, UnstakePolicy, WithdrawPolicy};

// ── Rate and period ──────────────────────────────────────────────────────────

#[test]
fn test_owner_sets_percent_per_period() {
    let pool = default_pool();

    pool.client.set_percent_per_period(&pool.owner, &25);
    assert_eq!(pool.client.percent_per_period(), 25);
}

#[test]
fn test_non_owner_cannot_set_percent_per_period() {
    let pool = default_pool();
    let intruder = Address::generate(&pool.env);

    let result = pool.client.try_set_percent_per_period(&intruder, &999);
    assert_error(result, ContractError::Unauthorized);
    assert_eq!(pool.client.percent_per_period(), 10);
}

#[test]
fn test_owner_sets_reward_period() {
    let pool = default_pool();

    pool.client.set_reward_period(&pool.owner, &3_600);
    assert_eq!(pool.client.reward_period(), 3_600);
}

#[test]
fn test_zero_reward_period_rejected() {
    let pool = default_pool();

    let result = pool.client.try_set_reward_period(&pool.owner, &0);
    assert_error(result, ContractError::InvalidConfiguration);
    assert_eq!(pool.client.reward_period(), 60);
}

#[test]
fn test_non_owner_cannot_set_reward_period() {
    let pool = default_pool();
    let intruder = Address::generate(&pool.env);

    let result = pool.client.try_set_reward_period(&intruder, &1);
    assert_error(result, ContractError::Unauthorized);
    assert_eq!(pool.client.reward_period(), 60);
}

#[test]
fn test_rate_change_applies_to_open_interval() {
    let pool = default_pool();
    pool.fund(1_000_000);
    let staker = pool.staker_with(PRINCIPAL);

    pool.client.stake_tokens(&staker, &PRINCIPAL);

    // Doubling the rate mid-interval re-prices the whole open interval.
    pool.at(START + 120);
    pool.client.set_percent_per_period(&pool.owner, &20);
    assert_eq!(pool.client.claim_reward(&staker).amount, 40_000);
}

#[test]
fn test_non_owner_cannot_set_policies() {
    let pool = default_pool();
    let intruder = Address::generate(&pool.env);

    let result = pool
        .client
        .try_set_withdraw_policy(&intruder, &WithdrawPolicy::Unrestricted);
    assert_error(result, ContractError::Unauthorized);

    let result = pool
        .client
        .try_set_unstake_policy(&intruder, &UnstakePolicy::AllOrNothing);
    assert_error(result, ContractError::Unauthorized);

    let config = pool.client.get_config();
    assert_eq!(config.withdraw_policy, WithdrawPolicy::ProtectPrincipal);
    assert_eq!(config.unstake_policy, UnstakePolicy::ReturnPrincipal);
}

// ── Withdraw ─────────────────────────────────────────────────────────────────

#[test]
fn test_withdraw_reward_reserve() {
    let pool = default_pool();
    pool.fund(100_000);

    pool.client.withdraw(&pool.owner, &40_000, &pool.reward_asset);
    assert_eq!(pool.balance(&pool.reward_asset, &pool.owner), 40_000);
    assert_eq!(pool.client.get_reserve(), 60_000);

    let result = pool
        .client
        .try_withdraw(&pool.owner, &60_001, &pool.reward_asset);
    assert_error(result, ContractError::InsufficientReserve);

    pool.client.withdraw(&pool.owner, &60_000, &pool.reward_asset);
    assert_eq!(pool.client.get_reserve(), 0);
    assert_eq!(pool.balance(&pool.reward_asset, &pool.owner), 100_000);
}

#[test]
fn test_withdraw_protects_staked_principal() {
    let pool = default_pool();
    let staker = pool.staker_with(PRINCIPAL);
    pool.client.stake_tokens(&staker, &PRINCIPAL);

    // A stray transfer straight to the pool is surplus.
    pool.mint(&pool.staking_asset, &pool.contract_id, 500);
    assert_eq!(pool.client.withdrawable(&pool.staking_asset), 500);

    let result = pool
        .client
        .try_withdraw(&pool.owner, &501, &pool.staking_asset);
    assert_error(result, ContractError::InsufficientReserve);

    pool.client.withdraw(&pool.owner, &500, &pool.staking_asset);
    assert_eq!(pool.balance(&pool.staking_asset, &pool.contract_id), PRINCIPAL);

    // Principal is still whole.
    let receipt = pool.client.unstake_tokens(&staker);
    assert_eq!(receipt.principal, PRINCIPAL);
}

#[test]
fn test_unrestricted_withdraw_can_drain_principal() {
    let pool = default_pool();
    let staker = pool.staker_with(PRINCIPAL);
    pool.client.stake_tokens(&staker, &PRINCIPAL);

    pool.client
        .set_withdraw_policy(&pool.owner, &WithdrawPolicy::Unrestricted);
    assert_eq!(pool.client.withdrawable(&pool.staking_asset), PRINCIPAL);

    pool.client.withdraw(&pool.owner, &PRINCIPAL, &pool.staking_asset);
    assert_eq!(pool.balance(&pool.staking_asset, &pool.owner), PRINCIPAL);

    // The staker's record is intact but the pool can no longer honour it.
    let result = pool.client.try_unstake_tokens(&staker);
    assert_error(result, ContractError::TransferFailed);
    assert_eq!(
        pool.client.stakers(&staker),
        StakerRecord {
            amount: PRINCIPAL,
            time_stamp: START,
            reward: 0,
        }
    );
}

#[test]
fn test_withdraw_other_asset() {
    let pool = default_pool();
    let stray = pool
        .env
        .register_stellar_asset_contract_v2(Address::generate(&pool.env))
        .address();
    pool.mint(&stray, &pool.contract_id, 700);

    assert_eq!(pool.client.withdrawable(&stray), 700);
    pool.client.withdraw(&pool.owner, &700, &stray);
    assert_eq!(pool.balance(&stray, &pool.owner), 700);
}

#[test]
fn test_withdraw_reward_asset_sent_by_plain_transfer() {
    let pool = default_pool();
    pool.mint(&pool.reward_asset, &pool.contract_id, 500);

    assert_eq!(pool.client.get_reserve(), 0);
    assert_eq!(pool.client.withdrawable(&pool.reward_asset), 500);

    pool.client.withdraw(&pool.owner, &500, &pool.reward_asset);
    assert_eq!(pool.balance(&pool.reward_asset, &pool.owner), 500);
    assert_eq!(pool.balance(&pool.reward_asset, &pool.contract_id), 0);
}

#[test]
fn test_reward_withdraw_takes_unreserved_balance_first() {
    let pool = default_pool();
    pool.fund(1_000);
    pool.mint(&pool.reward_asset, &pool.contract_id, 500);
    assert_eq!(pool.client.withdrawable(&pool.reward_asset), 1_500);

    pool.client.withdraw(&pool.owner, &700, &pool.reward_asset);
    assert_eq!(pool.client.get_reserve(), 800);
    assert_eq!(pool.client.withdrawable(&pool.reward_asset), 800);

    let result = pool
        .client
        .try_withdraw(&pool.owner, &801, &pool.reward_asset);
    assert_error(result, ContractError::InsufficientReserve);
}

#[test]
fn test_sync_reserve_credits_plain_transfers() {
    let pool = default_pool();
    let staker = pool.staker_with(PRINCIPAL);
    let intruder = Address::generate(&pool.env);
    pool.mint(&pool.reward_asset, &pool.contract_id, 10_000);

    pool.client.stake_tokens(&staker, &PRINCIPAL);
    pool.at(START + 60);
    assert_error(pool.client.try_claim_reward(&staker), ContractError::InsufficientReserve);

    assert_error(pool.client.try_sync_reserve(&intruder), ContractError::Unauthorized);
    assert_eq!(pool.client.sync_reserve(&pool.owner), 10_000);
    assert_eq!(pool.client.get_reserve(), 10_000);

    // Nothing left to credit.
    assert_eq!(pool.client.sync_reserve(&pool.owner), 10_000);

    assert_eq!(pool.client.claim_reward(&staker).amount, 10_000);
    assert_eq!(pool.client.get_reserve(), 0);
}

#[test]
fn test_withdraw_rejects_bad_calls() {
    let pool = default_pool();
    pool.fund(100_000);
    let intruder = Address::generate(&pool.env);

    let result = pool
        .client
        .try_withdraw(&intruder, &1_000, &pool.reward_asset);
    assert_error(result, ContractError::Unauthorized);

    let result = pool.client.try_withdraw(&pool.owner, &0, &pool.reward_asset);
    assert_error(result, ContractError::InvalidAmount);

    assert_eq!(pool.client.get_reserve(), 100_000);
}

// ── Ownership transfer ───────────────────────────────────────────────────────

#[test]
fn test_two_step_ownership_transfer() {
    let pool = default_pool();
    let successor = Address::generate(&pool.env);
    let intruder = Address::generate(&pool.env);

    pool.client.propose_owner(&pool.owner, &successor);
    assert_eq!(pool.client.get_pending_owner(), Some(successor.clone()));

    assert_error(pool.client.try_accept_owner(&intruder), ContractError::Unauthorized);

    pool.client.accept_owner(&successor);
    assert_eq!(pool.client.get_owner(), successor);
    assert_eq!(pool.client.get_pending_owner(), None);

    // Authority moved with it.
    let result = pool.client.try_set_percent_per_period(&pool.owner, &1);
    assert_error(result, ContractError::Unauthorized);
    pool.client.set_percent_per_period(&successor, &1);
    assert_eq!(pool.client.percent_per_period(), 1);
}

#[test]
fn test_cancel_ownership_transfer() {
    let pool = default_pool();
    let successor = Address::generate(&pool.env);

    assert_error(
        pool.client.try_cancel_owner_transfer(&pool.owner),
        ContractError::NoPendingOwner,
    );

    pool.client.propose_owner(&pool.owner, &successor);
    pool.client.cancel_owner_transfer(&pool.owner);
    assert_eq!(pool.client.get_pending_owner(), None);

    assert_error(pool.client.try_accept_owner(&successor), ContractError::NoPendingOwner);
    assert_eq!(pool.client.get_owner(), pool.owner);
}

#[test]
fn test_non_owner_cannot_propose() {
    let pool = default_pool();
    let intruder = Address::generate(&pool.env);

    let result = pool.client.try_propose_owner(&intruder, &intruder);
    assert_error(result, ContractError::Unauthorized);
    assert_eq!(pool.client.get_pending_owner(), None);
}

#[test]
fn test_owner_cannot_nominate_itself() {
    let pool = default_pool();

    let result = pool.client.try_propose_owner(&pool.owner, &pool.owner);
    assert_error(result, ContractError::InvalidConfiguration);
    assert_eq!(pool.client.get_pending_owner(), None);
}

#[test]
fn test_new_nomination_replaces_open_one() {
    let pool = default_pool();
    let first = Address::generate(&pool.env);
    let second = Address::generate(&pool.env);

    pool.client.propose_owner(&pool.owner, &first);
    pool.client.propose_owner(&pool.owner, &second);
    assert_eq!(pool.client.get_pending_owner(), Some(second.clone()));

    assert_error(pool.client.try_accept_owner(&first), ContractError::Unauthorized);
    pool.client.accept_owner(&second);
    assert_eq!(pool.client.get_owner(), second);
}
