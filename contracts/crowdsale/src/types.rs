use soroban_sdk::{contracterror, contracttype, Address, Env};

/// Price quotes are in hundredths of a fiat unit.
pub const PRICE_MULTIPLIER: i128 = 100;
/// Fixed sale price of the token itself.
pub const TOKENS_PER_USD: i128 = 10;
/// Stroops in one whole unit of the payment token.
pub const NATIVE_UNIT: i128 = 10_000_000;

/// Single-cap configuration accepts amounts down to 95% of the cap.
pub const LOW_BAND_BPS: i128 = 9_500;
pub const BPS: i128 = 10_000;

pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 3600;

/// Allocation percentages of the token cap, pre-minted at initialization.
/// The remaining 3% is headroom for the sale itself.
pub const PLATFORM_PCT: i128 = 30;
pub const COMPANY_PCT: i128 = 30;
pub const REWARD_POOL_PCT: i128 = 20;
pub const SHAREHOLDERS_PCT: i128 = 10;
pub const SALE_COSTS_PCT: i128 = 7;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    InvalidConfig = 2,
    AccessDenied = 3,
    NotWhitelisted = 4,
    AlreadyContributed = 5,
    WindowClosed = 6,
    WindowOpen = 7,
    SalePaused = 8,
    AmountOutOfRange = 9,
    CapExceeded = 10,
}

/// Per-contribution band, in USD. `Dual` is the canonical configuration;
/// `Single` derives its lower bound as 95% of the cap.
#[derive(Clone)]
#[contracttype]
pub enum BuyerCaps {
    Single(i128),
    Dual(i128, i128),
}

#[derive(Clone)]
#[contracttype]
pub struct SaleAccounts {
    pub treasury: Address,
    pub platform: Address,
    pub company: Address,
    pub reward_pool: Address,
    pub shareholders: Address,
    pub sale_costs: Address,
}

#[derive(Clone)]
#[contracttype]
pub struct SaleParams {
    pub start_time: u64,
    pub end_time: u64,
    pub price_cents: i128,
    pub sale_cap_usd: i128,
    pub buyer_caps: BuyerCaps,
    pub top_up_reward_pool: bool,
}

#[derive(Clone)]
#[contracttype]
pub struct SaleConfig {
    pub token: Address,
    pub payment_token: Address,
    pub company_vault: Address,
    pub shareholders_vault: Address,
    pub accounts: SaleAccounts,
    pub start_time: u64,
    pub end_time: u64,
    pub price_cents: i128,
    pub sale_cap_usd: i128,
    pub buyer_caps: BuyerCaps,
    pub top_up_reward_pool: bool,
}

/// Values derived from the price quote. Recomputed on every price update,
/// frozen once the sale starts.
#[derive(Clone)]
#[contracttype]
pub struct SaleRates {
    pub mint_rate: i128,
    pub sale_cap_native: i128,
    pub buyer_cap_low_native: i128,
    pub buyer_cap_high_native: i128,
}

#[contracttype]
pub enum DataKey {
    Config,
    Rates,
    Owner,
    Paused,
    Finalized,
    TotalRaised,
    Operator(Address),
    Whitelisted(Address),
    Contributed(Address),
}

/// USD amount to payment-token stroops at the given quote. Truncating
/// division only; must stay bit-reproducible.
pub fn usd_to_native(usd: i128, price_cents: i128) -> i128 {
    usd * NATIVE_UNIT * PRICE_MULTIPLIER / price_cents
}

/// Sale-token stroops minted per payment stroop.
pub fn mint_rate(price_cents: i128) -> i128 {
    TOKENS_PER_USD * price_cents / PRICE_MULTIPLIER
}

pub fn compute_rates(price_cents: i128, sale_cap_usd: i128, buyer_caps: &BuyerCaps) -> SaleRates {
    let (low, high) = match buyer_caps {
        BuyerCaps::Single(cap_usd) => {
            let cap_native = usd_to_native(*cap_usd, price_cents);
            (cap_native * LOW_BAND_BPS / BPS, cap_native)
        }
        BuyerCaps::Dual(low_usd, high_usd) => (
            usd_to_native(*low_usd, price_cents),
            usd_to_native(*high_usd, price_cents),
        ),
    };
    SaleRates {
        mint_rate: mint_rate(price_cents),
        sale_cap_native: usd_to_native(sale_cap_usd, price_cents),
        buyer_cap_low_native: low,
        buyer_cap_high_native: high,
    }
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
