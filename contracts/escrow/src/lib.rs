#![no_std]

#[cfg(feature = "contract")]
mod contract;
pub mod predicate;


#[cfg(feature = "contract")]
pub use contract::EscrowLogic;
pub use predicate::release_authorized;
