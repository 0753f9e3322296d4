use crate::types::*;
use soroban_sdk::{Address, Env};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> SaleConfig {
    env.storage().instance().get(&DataKey::Config).unwrap()
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_rates(env: &Env) -> SaleRates {
    env.storage().instance().get(&DataKey::Rates).unwrap()
}

pub fn set_rates(env: &Env, rates: &SaleRates) {
    env.storage().instance().set(&DataKey::Rates, rates);
}

pub fn get_owner(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Owner).unwrap()
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn is_finalized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Finalized)
        .unwrap_or(false)
}

pub fn set_finalized(env: &Env) {
    env.storage().instance().set(&DataKey::Finalized, &true);
}

pub fn get_total_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn set_total_raised(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &amount);
}

pub fn is_operator(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Operator(account.clone()))
        .unwrap_or(false)
}

pub fn add_operator(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Operator(account.clone()), &true);
}

pub fn remove_operator(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Operator(account.clone()));
}

pub fn is_whitelisted(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Whitelisted(account.clone()))
        .unwrap_or(false)
}

pub fn add_whitelisted(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Whitelisted(account.clone()), &true);
}

pub fn remove_whitelisted(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Whitelisted(account.clone()));
}

pub fn has_contributed(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Contributed(account.clone()))
        .unwrap_or(false)
}

pub fn set_contributed(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Contributed(account.clone()), &true);
}
