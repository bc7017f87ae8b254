pub mod config;
pub mod contracts;
pub mod error;
pub mod ledger;
pub mod session;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use near_api::{AccountId, NearGas, NearToken};
