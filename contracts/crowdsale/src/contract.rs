use crate::access;
use crate::storage::*;
use crate::types::*;
use sale_token::SaleTokenClient;
use soroban_sdk::{contract, contractimpl, contractmeta, symbol_short, token, Address, Env, Vec};
use timelock_vault::TimelockVaultClient;

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "One-shot whitelisted token sale with price-based buyer caps"
);

fn sale_has_ended(env: &Env, config: &SaleConfig) -> bool {
    is_finalized(env)
        || get_ledger_timestamp(env) >= config.end_time
        || get_total_raised(env) >= get_rates(env).sale_cap_native
}

/// One-way transition out of the active sale. When the sale ends short of
/// the token cap and the top-up is configured, the shortfall is minted to
/// the reward pool so total supply lands exactly on the cap. Contributor
/// balances are never touched.
fn finalize(env: &Env, config: &SaleConfig) {
    if is_finalized(env) {
        return;
    }
    set_finalized(env);

    if config.top_up_reward_pool {
        let ledger = SaleTokenClient::new(env, &config.token);
        let shortfall = ledger.cap() - ledger.total_supply();
        if shortfall > 0 {
            ledger.mint(
                &env.current_contract_address(),
                &config.accounts.reward_pool,
                &shortfall,
            );
        }
    }

    env.events()
        .publish((symbol_short!("finalized"),), get_total_raised(env));
}

/// The whole purchase: admissibility checks in a fixed order, then internal
/// bookkeeping, then the two external token movements. A failure anywhere
/// reverts the invocation as a unit.
fn execute_purchase(
    env: &Env,
    funder: &Address,
    beneficiary: &Address,
    amount: i128,
) -> Result<i128, Error> {
    let config = get_config(env);
    let rates = get_rates(env);
    let raised = get_total_raised(env);
    let now = get_ledger_timestamp(env);

    if is_finalized(env)
        || now < config.start_time
        || now >= config.end_time
        || raised >= rates.sale_cap_native
    {
        return Err(Error::WindowClosed);
    }
    if is_paused(env) {
        return Err(Error::SalePaused);
    }
    if !is_whitelisted(env, beneficiary) {
        return Err(Error::NotWhitelisted);
    }
    if has_contributed(env, beneficiary) {
        return Err(Error::AlreadyContributed);
    }
    if amount < rates.buyer_cap_low_native || amount > rates.buyer_cap_high_native {
        return Err(Error::AmountOutOfRange);
    }
    if raised + amount > rates.sale_cap_native {
        return Err(Error::CapExceeded);
    }

    // effects
    set_contributed(env, beneficiary);
    set_total_raised(env, raised + amount);

    // interactions: forward the funds, then mint against the ledger cap
    token::Client::new(env, &config.payment_token).transfer(
        funder,
        &config.accounts.treasury,
        &amount,
    );
    let tokens = amount * rates.mint_rate;
    SaleTokenClient::new(env, &config.token).mint(
        &env.current_contract_address(),
        beneficiary,
        &tokens,
    );

    env.events().publish(
        (symbol_short!("buy"), beneficiary.clone()),
        (funder.clone(), amount, tokens),
    );

    // a purchase that lands exactly on the cap ends the sale on the spot
    if raised + amount == rates.sale_cap_native {
        finalize(env, &config);
    }
    Ok(tokens)
}

#[contract]
pub struct Crowdsale;

#[contractimpl]
impl Crowdsale {
    /// Wires the sale to an already-deployed ledger and the two vaults, and
    /// pre-mints the fixed allocations. The ledger must be fresh, owned by
    /// this contract, and unlock transfers at `end_time`; each vault must
    /// mature at the configured offset for its beneficiary. Any mismatch
    /// keeps the sale from coming into existence.
    pub fn initialize(
        env: Env,
        owner: Address,
        operator: Address,
        sale_token: Address,
        payment_token: Address,
        company_vault: Address,
        shareholders_vault: Address,
        accounts: SaleAccounts,
        params: SaleParams,
    ) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        if params.start_time >= params.end_time || params.price_cents <= 0 {
            return Err(Error::InvalidConfig);
        }
        if params.sale_cap_usd <= 0 {
            return Err(Error::InvalidConfig);
        }
        match &params.buyer_caps {
            BuyerCaps::Single(cap) => {
                if *cap <= 0 {
                    return Err(Error::InvalidConfig);
                }
            }
            BuyerCaps::Dual(low, high) => {
                if *low <= 0 || *high < *low {
                    return Err(Error::InvalidConfig);
                }
            }
        }

        let company = TimelockVaultClient::new(&env, &company_vault);
        if company.beneficiary() != accounts.company
            || company.release_time() != params.start_time + 2 * SECONDS_PER_YEAR
        {
            return Err(Error::InvalidConfig);
        }
        let shareholders = TimelockVaultClient::new(&env, &shareholders_vault);
        if shareholders.beneficiary() != accounts.shareholders
            || shareholders.release_time() != params.start_time + SECONDS_PER_YEAR
        {
            return Err(Error::InvalidConfig);
        }

        let ledger = SaleTokenClient::new(&env, &sale_token);
        if ledger.owner() != env.current_contract_address()
            || ledger.total_supply() != 0
            || ledger.start_transfers_time() != params.end_time
        {
            return Err(Error::InvalidConfig);
        }

        let config = SaleConfig {
            token: sale_token.clone(),
            payment_token,
            company_vault: company_vault.clone(),
            shareholders_vault: shareholders_vault.clone(),
            accounts: accounts.clone(),
            start_time: params.start_time,
            end_time: params.end_time,
            price_cents: params.price_cents,
            sale_cap_usd: params.sale_cap_usd,
            buyer_caps: params.buyer_caps.clone(),
            top_up_reward_pool: params.top_up_reward_pool,
        };
        set_config(&env, &config);
        set_rates(
            &env,
            &compute_rates(params.price_cents, params.sale_cap_usd, &params.buyer_caps),
        );
        set_owner(&env, &owner);
        add_operator(&env, &operator);
        set_paused(&env, false);
        set_total_raised(&env, 0);

        // pre-mint the fixed allocations; the locked ones go to the vaults,
        // leaving the named beneficiaries at direct balance zero
        let me = env.current_contract_address();
        let cap = ledger.cap();
        ledger.mint(&me, &accounts.platform, &(cap * PLATFORM_PCT / 100));
        ledger.mint(&me, &company_vault, &(cap * COMPANY_PCT / 100));
        ledger.mint(&me, &accounts.reward_pool, &(cap * REWARD_POOL_PCT / 100));
        ledger.mint(&me, &shareholders_vault, &(cap * SHAREHOLDERS_PCT / 100));
        ledger.mint(&me, &accounts.sale_costs, &(cap * SALE_COSTS_PCT / 100));

        env.events().publish(
            (symbol_short!("init"),),
            (sale_token, params.start_time, params.end_time),
        );
        Ok(())
    }

    /// Re-quote the payment token. Only admissible while the sale is still
    /// pending; once contributors can commit funds the price is frozen.
    pub fn update_price(env: Env, caller: Address, price_cents: i128) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        if price_cents <= 0 {
            return Err(Error::InvalidConfig);
        }

        let mut config = get_config(&env);
        if get_ledger_timestamp(&env) >= config.start_time {
            return Err(Error::WindowClosed);
        }

        config.price_cents = price_cents;
        set_config(&env, &config);
        set_rates(
            &env,
            &compute_rates(price_cents, config.sale_cap_usd, &config.buyer_caps),
        );

        env.events()
            .publish((symbol_short!("price_upd"),), price_cents);
        Ok(())
    }

    pub fn add_operator(env: Env, caller: Address, account: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        add_operator(&env, &account);
        env.events().publish((symbol_short!("op_add"),), account);
        Ok(())
    }

    pub fn remove_operator(env: Env, caller: Address, account: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        remove_operator(&env, &account);
        env.events().publish((symbol_short!("op_rem"),), account);
        Ok(())
    }

    /// Batch whitelist additions. Independent of the pause flag; duplicate
    /// entries are no-ops.
    pub fn add_whitelist(env: Env, caller: Address, accounts: Vec<Address>) -> Result<(), Error> {
        access::require_operator_or_owner(&env, &caller)?;
        for account in accounts.iter() {
            add_whitelisted(&env, &account);
        }
        env.events().publish((symbol_short!("wl_add"),), accounts);
        Ok(())
    }

    pub fn remove_whitelist(
        env: Env,
        caller: Address,
        accounts: Vec<Address>,
    ) -> Result<(), Error> {
        access::require_operator_or_owner(&env, &caller)?;
        for account in accounts.iter() {
            remove_whitelisted(&env, &account);
        }
        env.events().publish((symbol_short!("wl_rem"),), accounts);
        Ok(())
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        set_paused(&env, true);
        env.events().publish((symbol_short!("paused"),), ());
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        set_paused(&env, false);
        env.events().publish((symbol_short!("unpaused"),), ());
        Ok(())
    }

    /// Purchase on behalf of `beneficiary`. The funder needs no whitelist
    /// entry of its own; only the recipient of the minted tokens does.
    pub fn buy_tokens(
        env: Env,
        funder: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<i128, Error> {
        funder.require_auth();
        execute_purchase(&env, &funder, &beneficiary, amount)
    }

    /// Bare-deposit entry point: a plain value transfer buys for the funder
    /// itself.
    pub fn deposit(env: Env, funder: Address, amount: i128) -> Result<i128, Error> {
        funder.require_auth();
        execute_purchase(&env, &funder, &funder, amount)
    }

    /// Owner-triggered finalization for a sale that ended by time rather
    /// than by filling the cap. Idempotent through the one-way latch.
    pub fn finalize_sale(env: Env, caller: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        let config = get_config(&env);
        if !sale_has_ended(&env, &config) {
            return Err(Error::WindowOpen);
        }
        finalize(&env, &config);
        Ok(())
    }

    /// Hands the ledger to its post-sale admin. Never admissible while the
    /// sale is running: the mint authority stays locked to the sale until
    /// its outcome is fixed. Latches `minting_finished` on the way out.
    pub fn transfer_token_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        let config = get_config(&env);
        if !sale_has_ended(&env, &config) {
            return Err(Error::WindowOpen);
        }
        finalize(&env, &config);

        let ledger = SaleTokenClient::new(&env, &config.token);
        let me = env.current_contract_address();
        if !ledger.minting_finished() {
            ledger.finish_minting(&me);
        }
        ledger.transfer_ownership(&me, &new_owner);

        env.events().publish((symbol_short!("tok_own"),), new_owner);
        Ok(())
    }

    // View functions
    pub fn get_config(env: Env) -> SaleConfig {
        get_config(&env)
    }

    pub fn price_cents(env: Env) -> i128 {
        get_config(&env).price_cents
    }

    pub fn mint_rate(env: Env) -> i128 {
        get_rates(&env).mint_rate
    }

    pub fn buyer_cap_low_native(env: Env) -> i128 {
        get_rates(&env).buyer_cap_low_native
    }

    pub fn buyer_cap_high_native(env: Env) -> i128 {
        get_rates(&env).buyer_cap_high_native
    }

    pub fn sale_cap_native(env: Env) -> i128 {
        get_rates(&env).sale_cap_native
    }

    pub fn total_raised(env: Env) -> i128 {
        get_total_raised(&env)
    }

    pub fn has_ended(env: Env) -> bool {
        sale_has_ended(&env, &get_config(&env))
    }

    pub fn is_finalized(env: Env) -> bool {
        is_finalized(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn owner(env: Env) -> Address {
        get_owner(&env)
    }

    pub fn is_owner(env: Env, account: Address) -> bool {
        account == get_owner(&env)
    }

    pub fn is_operator(env: Env, account: Address) -> bool {
        is_operator(&env, &account)
    }

    pub fn is_whitelisted(env: Env, account: Address) -> bool {
        is_whitelisted(&env, &account)
    }

    pub fn has_contributed(env: Env, account: Address) -> bool {
        has_contributed(&env, &account)
    }
}
