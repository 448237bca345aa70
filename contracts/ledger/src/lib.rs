#![no_std]

#[cfg(feature = "contract")]
mod contract;
mod storage;

#[cfg(all(test, feature = "contract"))]
mod tests;

#[cfg(feature = "contract")]
pub use contract::{GroupLedger, GroupLedgerClient, LedgerError};
pub use storage::AssetClass;
