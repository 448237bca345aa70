//! Spending rule of the pool custodian.
//!
//! The custodian never signs. A transfer it sends is admitted only when the
//! group around it has one of two shapes:
//!
//! * a lone zero-amount asset transfer, which opts the custodian in to the asset;
//! * a pair where [0] calls the bound pool and [1] is the release itself.
//!
//! Amounts and receivers of releases are left to the pool's own checks on [0].

use asaswap_interface::Txn;
use soroban_sdk::{Address, Vec};

pub fn release_authorized(app: &Address, group: &Vec<Txn>, index: u32) -> bool {
    match (group.len(), index) {
        (1, 0) => is_asset_opt_in(group),
        (2, 1) => is_pool_release(app, group),
        _ => false,
    }
}

fn is_asset_opt_in(group: &Vec<Txn>) -> bool {
    matches!(group.get(0), Some(Txn::AssetTransfer(transfer)) if transfer.amount == 0)
}

fn is_pool_release(app: &Address, group: &Vec<Txn>) -> bool {
    let calls_pool = matches!(group.get(0), Some(Txn::AppCall(call)) if call.app == *app);
    let moves_funds = matches!(
        group.get(1),
        Some(Txn::AssetTransfer(_)) | Some(Txn::Payment(_))
    );
    calls_pool && moves_funds
}
