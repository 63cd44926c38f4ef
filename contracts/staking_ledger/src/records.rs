use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{TTL_EXTEND_TO, TTL_THRESHOLD};

// Persistent storage uses tuple keys: (prefix, staker_address)
const STAKER: Symbol = symbol_short!("STAKER");

/// A participant's position. An address that never staked reads as the zero
/// record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerRecord {
    /// Principal currently staked.
    pub amount: i128,
    /// Start of the current accrual interval; `0` with no active stake.
    pub time_stamp: u64,
    /// Reward computed but not yet paid out.
    pub reward: i128,
}

impl StakerRecord {
    pub fn empty() -> Self {
        Self {
            amount: 0,
            time_stamp: 0,
            reward: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.amount > 0
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0 && self.reward == 0
    }
}

pub(crate) fn key(staker: &Address) -> (Symbol, Address) {
    (STAKER, staker.clone())
}

pub fn load(env: &Env, staker: &Address) -> StakerRecord {
    env.storage()
        .persistent()
        .get(&key(staker))
        .unwrap_or(StakerRecord::empty())
}

/// Persist `record`, dropping the entry once it is back to the zero state.
/// A live entry has its TTL extended so staked principal does not archive
/// during a long operating window.
pub fn store(env: &Env, staker: &Address, record: &StakerRecord) {
    let key = key(staker);
    if record.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, record);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
