use soroban_sdk::{contracterror, contracttype, Address, String};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    InvalidConfig = 2,
    AccessDenied = 3,
    ContractPaused = 4,
    TransfersLocked = 5,
    CapExceeded = 6,
    MintingFinished = 7,
    InsufficientBalance = 8,
    InsufficientAllowance = 9,
    AlreadyUpgraded = 10,
    NotUpgraded = 11,
    InvalidAmount = 12,
}

#[derive(Clone)]
#[contracttype]
pub struct TokenMetadata {
    pub decimal: u32,
    pub name: String,
    pub symbol: String,
}

#[contracttype]
pub enum DataKey {
    Owner,
    Metadata,
    Cap,
    TotalSupply,
    MintingFinished,
    Paused,
    StartTransfersTime,
    NewToken,
    Balance(Address),
    Allowance(Address, Address),
}
