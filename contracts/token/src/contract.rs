use crate::storage::*;
use crate::types::*;
use soroban_sdk::{contract, contractimpl, contractmeta, symbol_short, Address, Env, String};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Capped mintable token with transfer lock and upgrade path"
);

/// Both gates are independent: the transfer lock applies regardless of the
/// pause flag and vice versa.
fn require_transferable(env: &Env) -> Result<(), Error> {
    if env.ledger().timestamp() < get_start_transfers_time(env) {
        return Err(Error::TransfersLocked);
    }
    if is_paused(env) {
        return Err(Error::ContractPaused);
    }
    Ok(())
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != get_owner(env) {
        return Err(Error::AccessDenied);
    }
    Ok(())
}

fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    let from_balance = get_balance(env, from);
    if from_balance < amount {
        return Err(Error::InsufficientBalance);
    }
    set_balance(env, from, from_balance - amount);
    set_balance(env, to, get_balance(env, to) + amount);
    Ok(())
}

#[contract]
pub struct SaleToken;

#[contractimpl]
impl SaleToken {
    /// Set up the token. `owner` holds the mint authority; transfers stay
    /// locked until `start_transfers_time`.
    pub fn initialize(
        env: Env,
        owner: Address,
        cap: i128,
        decimal: u32,
        name: String,
        symbol: String,
        start_transfers_time: u64,
    ) -> Result<(), Error> {
        if has_owner(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if cap <= 0 {
            return Err(Error::InvalidConfig);
        }

        set_owner(&env, &owner);
        set_cap(&env, cap);
        set_metadata(
            &env,
            &TokenMetadata {
                decimal,
                name,
                symbol,
            },
        );
        set_start_transfers_time(&env, start_transfers_time);
        set_total_supply(&env, 0);
        set_paused(&env, false);

        env.events()
            .publish((symbol_short!("init"),), (owner, cap, start_transfers_time));
        Ok(())
    }

    /// Owner-only. Fails once minting has been finished or the cap would be
    /// exceeded.
    pub fn mint(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        if is_minting_finished(&env) {
            return Err(Error::MintingFinished);
        }
        let supply = get_total_supply(&env);
        if supply + amount > get_cap(&env) {
            return Err(Error::CapExceeded);
        }

        set_total_supply(&env, supply + amount);
        set_balance(&env, &to, get_balance(&env, &to) + amount);

        env.events().publish((symbol_short!("mint"), to), amount);
        Ok(())
    }

    /// One-way latch; no further minting afterwards.
    pub fn finish_minting(env: Env, caller: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if is_minting_finished(&env) {
            return Err(Error::MintingFinished);
        }
        set_minting_finished(&env);
        env.events().publish((symbol_short!("mint_end"),), ());
        Ok(())
    }

    /// Owner-only supply reduction, burning from the owner's own balance.
    /// Never callable by an arbitrary holder.
    pub fn burn(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        let balance = get_balance(&env, &caller);
        if balance < amount {
            return Err(Error::InsufficientBalance);
        }
        set_balance(&env, &caller, balance - amount);
        set_total_supply(&env, get_total_supply(&env) - amount);

        env.events().publish((symbol_short!("burn"), caller), amount);
        Ok(())
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        require_transferable(&env)?;
        move_balance(&env, &from, &to, amount)?;

        env.events()
            .publish((symbol_short!("transfer"), from, to), amount);
        Ok(())
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        spender.require_auth();
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        require_transferable(&env)?;

        let allowance = get_allowance(&env, &from, &spender);
        if allowance < amount {
            return Err(Error::InsufficientAllowance);
        }
        set_allowance(&env, &from, &spender, allowance - amount);
        move_balance(&env, &from, &to, amount)?;

        env.events()
            .publish((symbol_short!("transfer"), from, to), amount);
        Ok(())
    }

    pub fn approve(env: Env, from: Address, spender: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        require_transferable(&env)?;
        set_allowance(&env, &from, &spender, amount);

        env.events()
            .publish((symbol_short!("approve"), from, spender), amount);
        Ok(())
    }

    pub fn increase_allowance(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), Error> {
        from.require_auth();
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        require_transferable(&env)?;
        let allowance = get_allowance(&env, &from, &spender) + amount;
        set_allowance(&env, &from, &spender, allowance);

        env.events()
            .publish((symbol_short!("approve"), from, spender), allowance);
        Ok(())
    }

    /// Clamps at zero when decreasing past the current allowance.
    pub fn decrease_allowance(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), Error> {
        from.require_auth();
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        require_transferable(&env)?;
        let current = get_allowance(&env, &from, &spender);
        let allowance = if amount > current { 0 } else { current - amount };
        set_allowance(&env, &from, &spender, allowance);

        env.events()
            .publish((symbol_short!("approve"), from, spender), allowance);
        Ok(())
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_paused(&env, true);
        env.events().publish((symbol_short!("paused"),), ());
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_paused(&env, false);
        env.events().publish((symbol_short!("unpaused"),), ());
        Ok(())
    }

    /// Designate the successor ledger. Allowed in any pause state, but only
    /// once.
    pub fn upgrade(env: Env, caller: Address, new_token: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if get_new_token(&env).is_some() {
            return Err(Error::AlreadyUpgraded);
        }
        set_new_token(&env, &new_token);
        env.events().publish((symbol_short!("upgrade"),), new_token);
        Ok(())
    }

    /// Self-service migration to the successor ledger, available regardless
    /// of pause or transfer lock. The successor must have this contract as
    /// its owner. A zero balance redeems as a no-op.
    pub fn redeem(env: Env, holder: Address) -> Result<i128, Error> {
        holder.require_auth();
        let new_token = match get_new_token(&env) {
            Some(token) => token,
            None => return Err(Error::NotUpgraded),
        };

        let balance = get_balance(&env, &holder);
        if balance > 0 {
            set_balance(&env, &holder, 0);
            set_total_supply(&env, get_total_supply(&env) - balance);
            SaleTokenClient::new(&env, &new_token).mint(
                &env.current_contract_address(),
                &holder,
                &balance,
            );
        }

        env.events().publish((symbol_short!("redeem"), holder), balance);
        Ok(balance)
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_owner(&env, &new_owner);
        env.events().publish((symbol_short!("own_xfer"),), new_owner);
        Ok(())
    }

    // View functions
    pub fn balance(env: Env, account: Address) -> i128 {
        get_balance(&env, &account)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        get_allowance(&env, &from, &spender)
    }

    pub fn total_supply(env: Env) -> i128 {
        get_total_supply(&env)
    }

    pub fn cap(env: Env) -> i128 {
        get_cap(&env)
    }

    pub fn decimals(env: Env) -> u32 {
        get_metadata(&env).decimal
    }

    pub fn name(env: Env) -> String {
        get_metadata(&env).name
    }

    pub fn symbol(env: Env) -> String {
        get_metadata(&env).symbol
    }

    pub fn paused(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn minting_finished(env: Env) -> bool {
        is_minting_finished(&env)
    }

    pub fn start_transfers_time(env: Env) -> u64 {
        get_start_transfers_time(&env)
    }

    pub fn new_token(env: Env) -> Option<Address> {
        get_new_token(&env)
    }

    pub fn owner(env: Env) -> Address {
        get_owner(&env)
    }
}
