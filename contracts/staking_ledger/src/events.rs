#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::config::PoolConfig;

// ── Owner action kinds ──────────────────────────────────────────────────────

pub const ACTION_SET_PERCENT: u32 = 0;
pub const ACTION_SET_PERIOD: u32 = 1;
pub const ACTION_SET_WITHDRAW_POLICY: u32 = 2;
pub const ACTION_SET_UNSTAKE_POLICY: u32 = 3;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is configured.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub config: PoolConfig,
    pub timestamp: u64,
}

/// Fired when the owner changes a pool parameter. `action_kind` is one of the
/// `ACTION_*` constants.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerActionEvent {
    pub action_kind: u32,
    pub new_value: u64,
    pub timestamp: u64,
}

/// Fired when the owner pulls funds out of the pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub owner: Address,
    pub asset: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when reward asset is added to the reserve.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub new_reserve: i128,
    pub timestamp: u64,
}

/// Fired when a user deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_principal: i128,
    pub carried_reward: i128,
    pub timestamp: u64,
}

/// Fired when a user leaves the pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub principal: i128,
    pub reward_paid: i128,
    pub reward_owed: i128,
    pub timestamp: u64,
}

/// A reward payment. Published on every claim and on unstakes that pay a
/// reward; `claim_reward` also returns it. `timestamp` is the stop mark the
/// amount was computed against.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub staker: Address,
    pub timestamp: u64,
    pub amount: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, config: PoolConfig) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            config,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_action(env: &Env, action_kind: u32, new_value: u64) {
    env.events().publish(
        (symbol_short!("OWNER_ACT"),),
        OwnerActionEvent {
            action_kind,
            new_value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, owner: Address, asset: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), owner.clone()),
        WithdrawnEvent {
            owner,
            asset,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reserve_funded(env: &Env, funder: Address, amount: i128, new_reserve: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        ReserveFundedEvent {
            funder,
            amount,
            new_reserve,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    amount: i128,
    new_principal: i128,
    carried_reward: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_principal,
            carried_reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    staker: Address,
    principal: i128,
    reward_paid: i128,
    reward_owed: i128,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            principal,
            reward_paid,
            reward_owed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_payout(env: &Env, payout: &Payout) {
    env.events().publish(
        (symbol_short!("PAYOUT"), payout.staker.clone()),
        payout.clone(),
    );
}

pub fn publish_owner_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
