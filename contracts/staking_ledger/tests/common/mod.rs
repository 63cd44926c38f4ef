#![allow(dead_code)]

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking_ledger::{StakingLedger, StakingLedgerClient};

pub const START: u64 = 10_000;
pub const END: u64 = 20_000;

pub struct TestContext {
    pub env: Env,
    pub client: StakingLedgerClient<'static>,
    pub contract_id: Address,
    pub owner: Address,
    pub staking_asset: Address,
    pub reward_asset: Address,
}

/// Creates a mocked Soroban environment with two SAC tokens and an
/// initialised ledger whose operating window is `[START, END]`. The clock
/// starts at `START`.
pub fn setup_test_env(reward_period: u64, percent_per_period: u32) -> TestContext {
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
    client.initialize(
        &owner,
        &staking_asset,
        &reward_asset,
        &reward_period,
        &START,
        &END,
        &percent_per_period,
    );

    TestContext {
        env,
        client,
        contract_id,
        owner,
        staking_asset,
        reward_asset,
    }
}

impl TestContext {
    pub fn mint(&self, asset: &Address, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, asset).mint(to, &amount);
    }

    pub fn balance(&self, asset: &Address, who: &Address) -> i128 {
        TokenClient::new(&self.env, asset).balance(who)
    }

    /// Mint reward asset to the owner and move it into the reserve.
    pub fn fund(&self, amount: i128) {
        self.mint(&self.reward_asset, &self.owner, amount);
        self.client.fund_reserve(&self.owner, &amount);
    }

    /// Creates a user holding `amount` of the staking asset.
    pub fn staker_with(&self, amount: i128) -> Address {
        let staker = Address::generate(&self.env);
        self.mint(&self.staking_asset, &staker, amount);
        staker
    }

    pub fn at(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }
}
