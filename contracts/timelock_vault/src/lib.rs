#![no_std]

use sale_token::SaleTokenClient;
use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address, Env,
};


contractmeta!(
    key = "Description",
    val = "Holds a token allocation for one beneficiary until maturity"
);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    InvalidConfig = 2,
    NotMatured = 3,
    AlreadyReleased = 4,
}

#[contracttype]
pub enum DataKey {
    Token,
    Beneficiary,
    ReleaseTime,
    Released,
}

fn get_token(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Token).unwrap()
}

fn get_beneficiary(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Beneficiary).unwrap()
}

fn get_release_time(env: &Env) -> u64 {
    env.storage().instance().get(&DataKey::ReleaseTime).unwrap()
}

fn get_released(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Released)
        .unwrap_or(false)
}

#[contract]
pub struct TimelockVault;

#[contractimpl]
impl TimelockVault {
    pub fn initialize(
        env: Env,
        token: Address,
        beneficiary: Address,
        release_time: u64,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Token) {
            return Err(Error::AlreadyInitialized);
        }
        if release_time <= env.ledger().timestamp() {
            return Err(Error::InvalidConfig);
        }

        env.storage().instance().set(&DataKey::Token, &token);
        env.storage()
            .instance()
            .set(&DataKey::Beneficiary, &beneficiary);
        env.storage()
            .instance()
            .set(&DataKey::ReleaseTime, &release_time);
        env.storage().instance().set(&DataKey::Released, &false);

        env.events()
            .publish((symbol_short!("init"),), (token, beneficiary, release_time));
        Ok(())
    }

    /// Permissionless: anyone may trigger the release, the tokens always go
    /// to the fixed beneficiary. Latches after the first successful call.
    pub fn release(env: Env) -> Result<i128, Error> {
        if env.ledger().timestamp() < get_release_time(&env) {
            return Err(Error::NotMatured);
        }
        if get_released(&env) {
            return Err(Error::AlreadyReleased);
        }

        env.storage().instance().set(&DataKey::Released, &true);

        let beneficiary = get_beneficiary(&env);
        let client = SaleTokenClient::new(&env, &get_token(&env));
        let amount = client.balance(&env.current_contract_address());
        client.transfer(&env.current_contract_address(), &beneficiary, &amount);

        env.events()
            .publish((symbol_short!("released"),), (beneficiary, amount));
        Ok(amount)
    }

    pub fn token(env: Env) -> Address {
        get_token(&env)
    }

    pub fn beneficiary(env: Env) -> Address {
        get_beneficiary(&env)
    }

    pub fn release_time(env: Env) -> u64 {
        get_release_time(&env)
    }

    pub fn is_released(env: Env) -> bool {
        get_released(&env)
    }
}
