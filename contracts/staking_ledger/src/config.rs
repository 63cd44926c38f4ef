use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

const CONFIG: Symbol = symbol_short!("CONFIG");

/// `percent_per_period` is expressed in thousandths: a rate of `10` pays 1 %
/// of the principal per elapsed period.
pub const RATE_DENOMINATOR: i128 = 1_000;

// ── Policies ─────────────────────────────────────────────────────────────────

/// How far `withdraw` may reach into the pool's holdings.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum WithdrawPolicy {
    /// Staked principal is locked; only surplus staking asset can leave.
    ProtectPrincipal = 0,
    /// Anything the pool holds can be withdrawn, including user principal.
    Unrestricted = 1,
}

/// What `unstake_tokens` does when the reserve cannot cover the reward.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum UnstakePolicy {
    /// Return the principal anyway and keep the reward owed on the record.
    ReturnPrincipal = 0,
    /// Fail the whole unstake with `InsufficientReserve`.
    AllOrNothing = 1,
}

// ── Pool configuration ───────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Token contract of the asset users deposit.
    pub staking_asset: Address,
    /// Token contract of the asset rewards are paid in.
    pub reward_asset: Address,
    /// Length of one accrual unit, in seconds.
    pub reward_period: u64,
    pub start_timestamp: u64,
    pub end_timestamp: u64,
    /// Reward per elapsed period, in thousandths of the principal.
    pub percent_per_period: u32,
    pub withdraw_policy: WithdrawPolicy,
    pub unstake_policy: UnstakePolicy,
}

impl PoolConfig {
    /// Reject configurations the ledger cannot operate under.
    ///
    /// The contract's own address stands in for the empty asset identifier:
    /// the pool can never hold a balance of itself.
    pub fn validate(&self, env: &Env) -> Result<(), ContractError> {
        let this = env.current_contract_address();

        if self.reward_period == 0 {
            return Err(ContractError::InvalidConfiguration);
        }
        if self.start_timestamp >= self.end_timestamp {
            return Err(ContractError::InvalidConfiguration);
        }
        if self.staking_asset == self.reward_asset {
            return Err(ContractError::InvalidConfiguration);
        }
        if self.staking_asset == this || self.reward_asset == this {
            return Err(ContractError::InvalidConfiguration);
        }
        Ok(())
    }

    /// `true` while deposits are accepted (both bounds inclusive).
    pub fn is_open(&self, now: u64) -> bool {
        now >= self.start_timestamp && now <= self.end_timestamp
    }

    /// Rewards stop accruing once the operating window closes.
    pub fn accrual_stop(&self, now: u64) -> u64 {
        now.min(self.end_timestamp)
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub fn load(env: &Env) -> Result<PoolConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

/// Validate and persist `config`.
pub fn store(env: &Env, config: &PoolConfig) -> Result<(), ContractError> {
    config.validate(env)?;
    env.storage().instance().set(&CONFIG, config);
    Ok(())
}
