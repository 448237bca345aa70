#![no_std]

#[cfg(feature = "contract")]
mod contract;
#[cfg(feature = "contract")]
mod events;
pub mod exit_guard;
pub mod math;
pub mod operations;
#[cfg(feature = "contract")]
mod storage;


#[cfg(feature = "contract")]
pub use contract::AsaSwapPool;

#[cfg(feature = "contract")]
use soroban_sdk::contractmeta;

// Metadata that is added on to the WASM custom section
#[cfg(feature = "contract")]
contractmeta!(
    key = "Description",
    val = "Token/native liquidity pool validated over atomic transaction groups"
);
