#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking_ledger::{StakingLedger, StakingLedgerClient, UnstakePolicy, WithdrawPolicy};

const START: u64 = 1_000;
const END: u64 = 100_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64 },
    Unstake,
    ClaimReward,
    FundReserve { amount: u32 },
    SendRewardDirectly { amount: u32 },
    SyncReserve,
    Withdraw { amount: u64, staking_asset: bool },
    SetPercent { value: u16 },
    SetPeriod { value: u16 },
    ToggleUnstakePolicy,
    Advance { seconds: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let staking_asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingLedger, ());
    let client = StakingLedgerClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &staking_asset, &reward_asset, &60, &START, &END, &10);

    let mut users = vec![owner.clone()];
    for _ in 0..4 {
        users.push(Address::generate(&env));
    }
    for user in &users {
        StellarAssetClient::new(&env, &staking_asset).mint(user, &(u64::MAX as i128));
        StellarAssetClient::new(&env, &reward_asset).mint(user, &(u32::MAX as i128));
    }

    let staking = TokenClient::new(&env, &staking_asset);
    let reward = TokenClient::new(&env, &reward_asset);
    let mut now = START;
    let mut all_or_nothing = false;

    // Errors are expected; panics and broken invariants are not.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount } => {
                let _ = client.try_stake_tokens(caller, &(amount as i128));
            }
            FuzzAction::Unstake => {
                let _ = client.try_unstake_tokens(caller);
            }
            FuzzAction::ClaimReward => {
                let _ = client.try_claim_reward(caller);
            }
            FuzzAction::FundReserve { amount } => {
                let _ = client.try_fund_reserve(caller, &(amount as i128));
            }
            FuzzAction::SendRewardDirectly { amount } => {
                let _ = reward.try_transfer(caller, &contract_id, &i128::from(amount));
            }
            FuzzAction::SyncReserve => {
                let _ = client.try_sync_reserve(caller);
            }
            FuzzAction::Withdraw {
                amount,
                staking_asset: true,
            } => {
                let _ = client.try_withdraw(caller, &(amount as i128), &staking_asset);
            }
            FuzzAction::Withdraw { amount, .. } => {
                let _ = client.try_withdraw(caller, &(amount as i128), &reward_asset);
            }
            FuzzAction::SetPercent { value } => {
                let _ = client.try_set_percent_per_period(caller, &u32::from(value));
            }
            FuzzAction::SetPeriod { value } => {
                let _ = client.try_set_reward_period(caller, &u64::from(value));
            }
            FuzzAction::ToggleUnstakePolicy => {
                let policy = if all_or_nothing {
                    UnstakePolicy::ReturnPrincipal
                } else {
                    UnstakePolicy::AllOrNothing
                };
                if let Ok(Ok(())) = client.try_set_unstake_policy(caller, &policy) {
                    all_or_nothing = !all_or_nothing;
                }
            }
            FuzzAction::Advance { seconds } => {
                now += u64::from(seconds);
                env.ledger().set_timestamp(now);
            }
        }

        // Principal is locked under the default withdraw policy.
        let total: i128 = users.iter().map(|u| client.stakers(u).amount).sum();
        assert_eq!(total, client.get_total_staked());
        assert!(staking.balance(&contract_id) >= total);
        assert_eq!(client.get_config().withdraw_policy, WithdrawPolicy::ProtectPrincipal);
        assert!(client.get_reserve() >= 0);
        assert!(reward.balance(&contract_id) >= client.get_reserve());
    }
});
