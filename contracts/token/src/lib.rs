#![no_std]

mod contract;
mod storage;
mod types;

#[cfg(test)]
mod test;

pub use contract::{SaleToken, SaleTokenClient};
pub use types::{Error, TokenMetadata};
