#![no_std]

pub mod config;
pub mod events;
pub mod records;
pub mod rewards;
mod transfer;

use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol};

pub use config::{PoolConfig, UnstakePolicy, WithdrawPolicy};
pub use events::Payout;
pub use records::StakerRecord;

use rewards::{checked_add, checked_sub};

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const RESERVE: Symbol = symbol_short!("RESERVE");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

// Entry lifetimes, in ledgers.
pub(crate) const TTL_THRESHOLD: u32 = 5184000;
pub(crate) const TTL_EXTEND_TO: u32 = 10368000;

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidConfiguration = 3,
    Unauthorized = 4,
    OutsideOperatingWindow = 5,
    NoActiveStake = 6,
    InsufficientReserve = 7,
    TransferFailed = 8,
    InvalidAmount = 9,
    ArithmeticOverflow = 10,
    NoPendingOwner = 11,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Outcome of `unstake_tokens`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeReceipt {
    /// Principal returned to the staker.
    pub principal: i128,
    /// Reward paid from the reserve.
    pub reward_paid: i128,
    /// Reward the reserve could not cover, left on the staker's record.
    pub reward_owed: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingLedger;

#[contractimpl]
impl StakingLedger {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Configure the pool and make `owner` its owner.
    ///
    /// * `reward_period`      – seconds per accrual unit, must be positive.
    /// * `start_timestamp`    – first second deposits are accepted.
    /// * `end_timestamp`      – last second deposits are accepted; rewards
    ///                          stop accruing here.
    /// * `percent_per_period` – reward per period in thousandths of principal.
    ///
    /// The reserve starts empty and must be funded through `fund_reserve`
    /// before claims can pay out.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        staking_asset: Address,
        reward_asset: Address,
        reward_period: u64,
        start_timestamp: u64,
        end_timestamp: u64,
        percent_per_period: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        let config = PoolConfig {
            staking_asset,
            reward_asset,
            reward_period,
            start_timestamp,
            end_timestamp,
            percent_per_period,
            withdraw_policy: WithdrawPolicy::ProtectPrincipal,
            unstake_policy: UnstakePolicy::ReturnPrincipal,
        };
        config::store(&env, &config)?;

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        extend_instance_ttl(&env);
        // RESERVE and TOTAL_STAKED start at zero; unwrap_or(0) covers the
        // absent keys.

        events::publish_initialized(&env, owner, config);

        Ok(())
    }

    // ── Owner operations ────────────────────────────────────────────────────

    /// Replace the reward rate. Applies to every open accrual interval the
    /// next time it is settled.
    pub fn set_percent_per_period(
        env: Env,
        caller: Address,
        new_value: u32,
    ) -> Result<(), ContractError> {
        let mut config = config::load(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        config.percent_per_period = new_value;
        config::store(&env, &config)?;
        extend_instance_ttl(&env);

        events::publish_owner_action(&env, events::ACTION_SET_PERCENT, u64::from(new_value));

        Ok(())
    }

    /// Replace the reward period length. Zero is rejected.
    pub fn set_reward_period(
        env: Env,
        caller: Address,
        new_value: u64,
    ) -> Result<(), ContractError> {
        let mut config = config::load(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        config.reward_period = new_value;
        config::store(&env, &config)?;
        extend_instance_ttl(&env);

        events::publish_owner_action(&env, events::ACTION_SET_PERIOD, new_value);

        Ok(())
    }

    pub fn set_withdraw_policy(
        env: Env,
        caller: Address,
        policy: WithdrawPolicy,
    ) -> Result<(), ContractError> {
        let mut config = config::load(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        config.withdraw_policy = policy;
        config::store(&env, &config)?;
        extend_instance_ttl(&env);

        events::publish_owner_action(
            &env,
            events::ACTION_SET_WITHDRAW_POLICY,
            u64::from(policy as u32),
        );

        Ok(())
    }

    pub fn set_unstake_policy(
        env: Env,
        caller: Address,
        policy: UnstakePolicy,
    ) -> Result<(), ContractError> {
        let mut config = config::load(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        config.unstake_policy = policy;
        config::store(&env, &config)?;
        extend_instance_ttl(&env);

        events::publish_owner_action(
            &env,
            events::ACTION_SET_UNSTAKE_POLICY,
            u64::from(policy as u32),
        );

        Ok(())
    }

    /// Send `amount` of `asset` from the pool to the owner.
    ///
    /// How much is available depends on the withdraw policy; see
    /// [`StakingLedger::withdrawable`]. A reward-asset withdrawal is taken
    /// from unreserved balance first and draws the reserve down only for the
    /// remainder.
    pub fn withdraw(
        env: Env,
        caller: Address,
        amount: i128,
        asset: Address,
    ) -> Result<(), ContractError> {
        let config = config::load(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if amount > Self::available(&env, &config, &asset)? {
            return Err(ContractError::InsufficientReserve);
        }

        let from_reserve = if asset == config.reward_asset {
            amount.saturating_sub(Self::unreserved(&env, &config)?).max(0)
        } else {
            0
        };

        transfer::push(&env, &asset, &caller, amount)?;

        if from_reserve > 0 {
            let reserve = checked_sub(Self::reserve(&env), from_reserve)?;
            env.storage().instance().set(&RESERVE, &reserve);
        }
        extend_instance_ttl(&env);

        events::publish_withdrawn(&env, caller, asset, amount);

        Ok(())
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    /// Nominate `new_owner` as the next owner. Only the current owner can call
    /// this, and nominating the current owner is rejected.
    ///
    /// Ownership does not move until the nominee calls `accept_owner`. A later
    /// nomination replaces an earlier one that was never accepted.
    pub fn propose_owner(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if new_owner == caller {
            return Err(ContractError::InvalidConfiguration);
        }

        env.storage().instance().set(&PENDING_OWNER, &new_owner);
        extend_instance_ttl(&env);

        events::publish_owner_proposed(&env, caller, new_owner);

        Ok(())
    }

    /// Take over ownership. Only the nominee recorded by `propose_owner` can
    /// call this; it fails with `NoPendingOwner` when no nomination is open.
    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        if new_owner != Self::pending_owner(&env)? {
            return Err(ContractError::Unauthorized);
        }
        let old_owner = Self::get_owner(env.clone())?;

        env.storage().instance().set(&OWNER, &new_owner);
        env.storage().instance().remove(&PENDING_OWNER);
        extend_instance_ttl(&env);

        events::publish_owner_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    /// Withdraw an open nomination. The current owner keeps control.
    pub fn cancel_owner_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let nominee = Self::pending_owner(&env)?;
        env.storage().instance().remove(&PENDING_OWNER);
        extend_instance_ttl(&env);

        events::publish_owner_cancelled(&env, caller, nominee);

        Ok(())
    }

    // ── Reserve ─────────────────────────────────────────────────────────────

    /// Add `amount` of the reward asset to the payout reserve. Anyone may fund.
    pub fn fund_reserve(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        let config = config::load(&env)?;
        funder.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let new_reserve = checked_add(Self::reserve(&env), amount)?;

        transfer::pull(&env, &config.reward_asset, &funder, amount)?;
        env.storage().instance().set(&RESERVE, &new_reserve);
        extend_instance_ttl(&env);

        events::publish_reserve_funded(&env, funder, amount, new_reserve);

        Ok(())
    }

    /// Credit reward asset that reached the pool by a plain token transfer
    /// to the reserve, so payouts can draw on it. Owner only.
    ///
    /// Returns the new reserve. Nothing changes, and no event is published,
    /// when the pool holds no unreserved reward asset.
    pub fn sync_reserve(env: Env, caller: Address) -> Result<i128, ContractError> {
        let config = config::load(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let surplus = Self::unreserved(&env, &config)?;
        if surplus == 0 {
            return Ok(Self::reserve(&env));
        }
        let new_reserve = checked_add(Self::reserve(&env), surplus)?;
        env.storage().instance().set(&RESERVE, &new_reserve);
        extend_instance_ttl(&env);

        events::publish_reserve_funded(&env, caller, surplus, new_reserve);

        Ok(new_reserve)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the staking asset.
    ///
    /// With an active stake, the reward accrued so far is moved into the
    /// record's carried reward (not paid) and a new accrual interval starts
    /// for the combined principal.
    pub fn stake_tokens(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = config::load(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let now = env.ledger().timestamp();
        if !config.is_open(now) {
            return Err(ContractError::OutsideOperatingWindow);
        }

        let mut record = records::load(&env, &staker);
        if record.is_active() {
            let pending = rewards::accrued(&record, &config, now)?;
            record.reward = checked_add(record.reward, pending)?;
        }
        record.amount = checked_add(record.amount, amount)?;
        record.time_stamp = now;
        let total = checked_add(Self::total_staked(&env), amount)?;

        transfer::pull(&env, &config.staking_asset, &staker, amount)?;

        records::store(&env, &staker, &record);
        env.storage().instance().set(&TOTAL_STAKED, &total);
        extend_instance_ttl(&env);

        events::publish_staked(&env, staker, amount, record.amount, record.reward);

        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Return the full principal and pay the accrued plus carried reward.
    ///
    /// When the reward cannot be paid the unstake policy decides.
    /// `ReturnPrincipal` still returns the principal and leaves the whole
    /// reward owed on the record. This covers a reserve shortfall, a declined
    /// reward transfer and a reward too large to represent, which is recorded
    /// as `i128::MAX`. `AllOrNothing` fails the call with the underlying error.
    pub fn unstake_tokens(env: Env, staker: Address) -> Result<UnstakeReceipt, ContractError> {
        let config = config::load(&env)?;
        staker.require_auth();

        let record = records::load(&env, &staker);
        if !record.is_active() {
            return Err(ContractError::NoActiveStake);
        }

        let now = env.ledger().timestamp();
        let return_principal = config.unstake_policy == UnstakePolicy::ReturnPrincipal;
        let owed = match rewards::accrued(&record, &config, now)
            .and_then(|accrued| checked_add(record.reward, accrued))
        {
            Ok(owed) => owed,
            Err(ContractError::ArithmeticOverflow) if return_principal => i128::MAX,
            Err(e) => return Err(e),
        };
        let principal = record.amount;
        let total = checked_sub(Self::total_staked(&env), principal)?;

        transfer::push(&env, &config.staking_asset, &staker, principal)?;

        let reward_paid = match Self::pay_reward(&env, &config, &staker, owed) {
            Ok(()) => owed,
            Err(ContractError::InsufficientReserve | ContractError::TransferFailed)
                if return_principal =>
            {
                0
            }
            Err(e) => return Err(e),
        };
        let reward_owed = owed - reward_paid;

        let settled = StakerRecord {
            amount: 0,
            time_stamp: 0,
            reward: reward_owed,
        };
        records::store(&env, &staker, &settled);
        env.storage().instance().set(&TOTAL_STAKED, &total);
        extend_instance_ttl(&env);

        events::publish_unstaked(&env, staker.clone(), principal, reward_paid, reward_owed);
        if reward_paid > 0 {
            events::publish_payout(
                &env,
                &Payout {
                    staker,
                    timestamp: now,
                    amount: reward_paid,
                },
            );
        }

        Ok(UnstakeReceipt {
            principal,
            reward_paid,
            reward_owed,
        })
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay the accrued plus carried reward and restart the accrual interval.
    ///
    /// The principal stays staked. A caller with no principal but a reward
    /// still owed from an unstake shortfall collects that reward. Claiming
    /// before a full period elapses pays zero.
    pub fn claim_reward(env: Env, staker: Address) -> Result<Payout, ContractError> {
        let config = config::load(&env)?;
        staker.require_auth();

        let mut record = records::load(&env, &staker);
        if !record.is_active() && record.reward <= 0 {
            return Err(ContractError::NoActiveStake);
        }

        let now = env.ledger().timestamp();
        let amount = checked_add(record.reward, rewards::accrued(&record, &config, now)?)?;

        Self::pay_reward(&env, &config, &staker, amount)?;

        record.reward = 0;
        if record.is_active() {
            record.time_stamp = now;
        }
        records::store(&env, &staker, &record);
        extend_instance_ttl(&env);

        let payout = Payout {
            staker,
            timestamp: now,
            amount,
        };
        events::publish_payout(&env, &payout);

        Ok(payout)
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// The staker's record; the zero record for unknown addresses.
    pub fn stakers(env: Env, staker: Address) -> StakerRecord {
        records::load(&env, &staker)
    }

    /// Carried plus currently accrued reward, without mutating state.
    pub fn pending_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = config::load(&env)?;
        let record = records::load(&env, &staker);
        let accrued = rewards::accrued(&record, &config, env.ledger().timestamp())?;
        checked_add(record.reward, accrued)
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, ContractError> {
        config::load(&env)
    }

    pub fn percent_per_period(env: Env) -> Result<u32, ContractError> {
        Ok(config::load(&env)?.percent_per_period)
    }

    pub fn reward_period(env: Env) -> Result<u64, ContractError> {
        Ok(config::load(&env)?.reward_period)
    }

    pub fn start_timestamp(env: Env) -> Result<u64, ContractError> {
        Ok(config::load(&env)?.start_timestamp)
    }

    pub fn end_timestamp(env: Env) -> Result<u64, ContractError> {
        Ok(config::load(&env)?.end_timestamp)
    }

    pub fn get_reserve(env: Env) -> i128 {
        Self::reserve(&env)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        Self::total_staked(&env)
    }

    /// How much of `asset` the owner could withdraw right now.
    pub fn withdrawable(env: Env, asset: Address) -> Result<i128, ContractError> {
        let config = config::load(&env)?;
        Self::available(&env, &config, &asset)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_OWNER)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored owner.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != owner {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn pending_owner(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&PENDING_OWNER)
            .ok_or(ContractError::NoPendingOwner)
    }

    fn reserve(env: &Env) -> i128 {
        env.storage().instance().get(&RESERVE).unwrap_or(0)
    }

    fn total_staked(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    /// Withdrawable balance of `asset` under the current withdraw policy.
    ///
    /// * reward asset  – the pool balance (reserve plus unreserved), under
    ///                   either policy;
    /// * staking asset – the pool balance minus staked principal under
    ///                   `ProtectPrincipal`, the whole balance otherwise;
    /// * anything else – the pool balance.
    fn available(env: &Env, config: &PoolConfig, asset: &Address) -> Result<i128, ContractError> {
        let balance = transfer::pool_balance(env, asset)?;
        let locked = if *asset == config.staking_asset
            && config.withdraw_policy == WithdrawPolicy::ProtectPrincipal
        {
            Self::total_staked(env)
        } else {
            0
        };
        Ok(balance.saturating_sub(locked).max(0))
    }

    /// Reward asset the pool holds beyond the reserve.
    fn unreserved(env: &Env, config: &PoolConfig) -> Result<i128, ContractError> {
        let balance = transfer::pool_balance(env, &config.reward_asset)?;
        Ok(balance.saturating_sub(Self::reserve(env)).max(0))
    }

    /// Pay `amount` of the reward asset from the reserve.
    ///
    /// Sufficiency is checked here, immediately before the transfer. A zero
    /// amount issues no transfer.
    fn pay_reward(
        env: &Env,
        config: &PoolConfig,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        if amount <= 0 {
            return Ok(());
        }
        let reserve = Self::reserve(env);
        if amount > reserve {
            return Err(ContractError::InsufficientReserve);
        }

        transfer::push(env, &config.reward_asset, to, amount)?;
        env.storage().instance().set(&RESERVE, &(reserve - amount));

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_owner;
