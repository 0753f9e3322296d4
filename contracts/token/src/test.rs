#![allow(clippy::unwrap_used)]

use crate::types::Error;
use crate::{SaleToken, SaleTokenClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env, String};

const CAP: i128 = 1_000_000_0000000;
const START_TRANSFERS: u64 = 10_000;

fn setup(env: &Env) -> (SaleTokenClient<'_>, Address) {
    env.mock_all_auths();
    let contract_id = env.register_contract(None, SaleToken);
    let client = SaleTokenClient::new(env, &contract_id);

    let owner = Address::generate(env);
    client.initialize(
        &owner,
        &CAP,
        &7,
        &String::from_str(env, "Sale Token"),
        &String::from_str(env, "SALE"),
        &START_TRANSFERS,
    );
    (client, owner)
}

fn unlock_transfers(env: &Env) {
    env.ledger().with_mut(|l| l.timestamp = START_TRANSFERS);
}

// ==================== Initialization ====================

#[test]
fn test_initialize() {
    let env = Env::default();
    let (client, owner) = setup(&env);

    assert_eq!(client.owner(), owner);
    assert_eq!(client.cap(), CAP);
    assert_eq!(client.decimals(), 7);
    assert_eq!(client.total_supply(), 0);
    assert_eq!(client.start_transfers_time(), START_TRANSFERS);
    assert_eq!(client.new_token(), None);
    assert!(!client.paused());
    assert!(!client.minting_finished());
}

#[test]
fn test_initialize_twice_fails() {
    let env = Env::default();
    let (client, owner) = setup(&env);

    let result = client.try_initialize(
        &owner,
        &CAP,
        &7,
        &String::from_str(&env, "Sale Token"),
        &String::from_str(&env, "SALE"),
        &START_TRANSFERS,
    );
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_initialize_zero_cap_fails() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register_contract(None, SaleToken);
    let client = SaleTokenClient::new(&env, &contract_id);

    let result = client.try_initialize(
        &Address::generate(&env),
        &0,
        &7,
        &String::from_str(&env, "Sale Token"),
        &String::from_str(&env, "SALE"),
        &START_TRANSFERS,
    );
    assert_eq!(result, Err(Ok(Error::InvalidConfig)));
}

// ==================== Minting ====================

#[test]
fn test_mint_credits_balance_and_supply() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let holder = Address::generate(&env);

    client.mint(&owner, &holder, &500);
    assert_eq!(client.balance(&holder), 500);
    assert_eq!(client.total_supply(), 500);

    client.mint(&owner, &holder, &250);
    assert_eq!(client.balance(&holder), 750);
    assert_eq!(client.total_supply(), 750);
}

#[test]
fn test_non_owner_cannot_mint() {
    let env = Env::default();
    let (client, _owner) = setup(&env);
    let rogue = Address::generate(&env);

    let result = client.try_mint(&rogue, &rogue, &500);
    assert_eq!(result, Err(Ok(Error::AccessDenied)));
    assert_eq!(client.total_supply(), 0);
}

#[test]
fn test_mint_above_cap_fails() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let holder = Address::generate(&env);

    client.mint(&owner, &holder, &(CAP - 1));
    let result = client.try_mint(&owner, &holder, &2);
    assert_eq!(result, Err(Ok(Error::CapExceeded)));
    assert_eq!(client.total_supply(), CAP - 1);

    // filling the cap exactly is fine
    client.mint(&owner, &holder, &1);
    assert_eq!(client.total_supply(), CAP);
}

#[test]
fn test_finish_minting_latches() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let holder = Address::generate(&env);

    client.finish_minting(&owner);
    assert!(client.minting_finished());

    let result = client.try_finish_minting(&owner);
    assert_eq!(result, Err(Ok(Error::MintingFinished)));

    let result = client.try_mint(&owner, &holder, &1);
    assert_eq!(result, Err(Ok(Error::MintingFinished)));
}

// ==================== Transfer lock ====================

#[test]
fn test_transfers_locked_before_start_time() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let a = Address::generate(&env);
    let b = Address::generate(&env);
    client.mint(&owner, &a, &100);

    assert_eq!(
        client.try_transfer(&a, &b, &10),
        Err(Ok(Error::TransfersLocked))
    );
    assert_eq!(
        client.try_approve(&a, &b, &10),
        Err(Ok(Error::TransfersLocked))
    );
    assert_eq!(
        client.try_increase_allowance(&a, &b, &10),
        Err(Ok(Error::TransfersLocked))
    );
    assert_eq!(
        client.try_decrease_allowance(&a, &b, &10),
        Err(Ok(Error::TransfersLocked))
    );
    assert_eq!(
        client.try_transfer_from(&b, &a, &b, &10),
        Err(Ok(Error::TransfersLocked))
    );
    assert_eq!(client.balance(&a), 100);
}

#[test]
fn test_transfers_allowed_at_start_time() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let a = Address::generate(&env);
    let b = Address::generate(&env);
    client.mint(&owner, &a, &100);

    unlock_transfers(&env);

    client.transfer(&a, &b, &10);
    assert_eq!(client.balance(&a), 90);
    assert_eq!(client.balance(&b), 10);

    client.approve(&a, &b, &20);
    assert_eq!(client.allowance(&a, &b), 20);

    client.increase_allowance(&a, &b, &5);
    assert_eq!(client.allowance(&a, &b), 25);

    client.decrease_allowance(&a, &b, &10);
    assert_eq!(client.allowance(&a, &b), 15);

    client.transfer_from(&b, &a, &b, &15);
    assert_eq!(client.balance(&a), 75);
    assert_eq!(client.balance(&b), 25);
    assert_eq!(client.allowance(&a, &b), 0);
}

#[test]
fn test_decrease_allowance_clamps_at_zero() {
    let env = Env::default();
    let (client, _owner) = setup(&env);
    let a = Address::generate(&env);
    let b = Address::generate(&env);

    unlock_transfers(&env);
    client.approve(&a, &b, &10);
    client.decrease_allowance(&a, &b, &100);
    assert_eq!(client.allowance(&a, &b), 0);
}

#[test]
fn test_transfer_insufficient_balance() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let a = Address::generate(&env);
    let b = Address::generate(&env);
    client.mint(&owner, &a, &100);

    unlock_transfers(&env);
    let result = client.try_transfer(&a, &b, &101);
    assert_eq!(result, Err(Ok(Error::InsufficientBalance)));
}

#[test]
fn test_transfer_from_insufficient_allowance() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let a = Address::generate(&env);
    let b = Address::generate(&env);
    client.mint(&owner, &a, &100);

    unlock_transfers(&env);
    client.approve(&a, &b, &10);
    let result = client.try_transfer_from(&b, &a, &b, &11);
    assert_eq!(result, Err(Ok(Error::InsufficientAllowance)));
}

// ==================== Pause ====================

#[test]
fn test_paused_blocks_transfers() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let a = Address::generate(&env);
    let b = Address::generate(&env);
    client.mint(&owner, &a, &100);

    unlock_transfers(&env);
    client.pause(&owner);
    assert!(client.paused());

    assert_eq!(
        client.try_transfer(&a, &b, &10),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        client.try_approve(&a, &b, &10),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        client.try_increase_allowance(&a, &b, &10),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        client.try_decrease_allowance(&a, &b, &10),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        client.try_transfer_from(&b, &a, &b, &10),
        Err(Ok(Error::ContractPaused))
    );

    client.unpause(&owner);
    client.transfer(&a, &b, &10);
    assert_eq!(client.balance(&b), 10);
}

#[test]
fn test_non_owner_cannot_pause() {
    let env = Env::default();
    let (client, _owner) = setup(&env);
    let rogue = Address::generate(&env);

    let result = client.try_pause(&rogue);
    assert_eq!(result, Err(Ok(Error::AccessDenied)));
}

// ==================== Burn ====================

#[test]
fn test_burn_is_owner_only() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let holder = Address::generate(&env);
    client.mint(&owner, &holder, &100);

    let result = client.try_burn(&holder, &50);
    assert_eq!(result, Err(Ok(Error::AccessDenied)));
    assert_eq!(client.balance(&holder), 100);

    client.mint(&owner, &owner, &40);
    client.burn(&owner, &30);
    assert_eq!(client.balance(&owner), 10);
    assert_eq!(client.total_supply(), 110);
}

// ==================== Upgrade / redeem ====================

fn setup_successor<'a>(env: &Env, old: &SaleTokenClient) -> (Address, SaleTokenClient<'a>) {
    // The successor must have the old ledger as its mint authority.
    let contract_id = env.register_contract(None, SaleToken);
    let client = SaleTokenClient::new(env, &contract_id);
    client.initialize(
        &old.address,
        &CAP,
        &7,
        &String::from_str(env, "Sale Token v2"),
        &String::from_str(env, "SALE2"),
        &START_TRANSFERS,
    );
    (contract_id, client)
}

#[test]
fn test_redeem_before_upgrade_fails() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let holder = Address::generate(&env);
    client.mint(&owner, &holder, &100);

    let result = client.try_redeem(&holder);
    assert_eq!(result, Err(Ok(Error::NotUpgraded)));
}

#[test]
fn test_upgrade_only_once() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let (successor_id, _successor) = setup_successor(&env, &client);

    client.upgrade(&owner, &successor_id);
    assert_eq!(client.new_token(), Some(successor_id.clone()));

    let result = client.try_upgrade(&owner, &successor_id);
    assert_eq!(result, Err(Ok(Error::AlreadyUpgraded)));
}

#[test]
fn test_redeem_moves_full_balance() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let (successor_id, successor) = setup_successor(&env, &client);
    let holder = Address::generate(&env);
    client.mint(&owner, &holder, &1200);
    client.upgrade(&owner, &successor_id);

    let moved = client.redeem(&holder);
    assert_eq!(moved, 1200);
    assert_eq!(client.balance(&holder), 0);
    assert_eq!(client.total_supply(), 0);
    assert_eq!(successor.balance(&holder), 1200);
    assert_eq!(successor.total_supply(), 1200);

    // second redeem is a successful no-op
    let moved = client.redeem(&holder);
    assert_eq!(moved, 0);
    assert_eq!(successor.balance(&holder), 1200);
}

#[test]
fn test_redeem_with_zero_balance_succeeds() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let (successor_id, _successor) = setup_successor(&env, &client);
    client.upgrade(&owner, &successor_id);

    let stranger = Address::generate(&env);
    assert_eq!(client.redeem(&stranger), 0);
}

#[test]
fn test_redeem_available_while_paused_and_locked() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let (successor_id, successor) = setup_successor(&env, &client);
    let holder = Address::generate(&env);
    client.mint(&owner, &holder, &700);
    client.upgrade(&owner, &successor_id);

    // transfers are still time-locked and the ledger is paused
    client.pause(&owner);
    assert_eq!(client.redeem(&holder), 700);
    assert_eq!(successor.balance(&holder), 700);
}

#[test]
fn test_redeem_all_holders_drains_supply() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let (successor_id, successor) = setup_successor(&env, &client);

    let holders = [
        Address::generate(&env),
        Address::generate(&env),
        Address::generate(&env),
    ];
    for (i, holder) in holders.iter().enumerate() {
        client.mint(&owner, holder, &((i as i128 + 1) * 100));
    }
    client.upgrade(&owner, &successor_id);

    for holder in holders.iter() {
        client.redeem(holder);
    }
    assert_eq!(client.total_supply(), 0);
    assert_eq!(successor.total_supply(), 600);
}

// ==================== Ownership ====================

#[test]
fn test_transfer_ownership() {
    let env = Env::default();
    let (client, owner) = setup(&env);
    let new_owner = Address::generate(&env);

    let result = client.try_transfer_ownership(&new_owner, &new_owner);
    assert_eq!(result, Err(Ok(Error::AccessDenied)));

    client.transfer_ownership(&owner, &new_owner);
    assert_eq!(client.owner(), new_owner);

    // old owner lost the mint authority
    let result = client.try_mint(&owner, &owner, &1);
    assert_eq!(result, Err(Ok(Error::AccessDenied)));

    client.mint(&new_owner, &new_owner, &1);
    assert_eq!(client.total_supply(), 1);
}
