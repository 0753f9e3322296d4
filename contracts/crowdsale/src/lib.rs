#![no_std]

mod access;
mod contract;
mod storage;
mod types;


pub use contract::{Crowdsale, CrowdsaleClient};
pub use types::{BuyerCaps, Error, SaleAccounts, SaleConfig, SaleParams, SaleRates};
