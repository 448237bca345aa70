use crate::storage::{self, AssetClass};
use asaswap_interface::{
    AppCall, EscrowClient, OnCompletion, PoolClient, Transfer, Txn, MAX_GROUP_SIZE,
};
use soroban_sdk::{contract, contracterror, contractevent, contractimpl, Address, Env, Vec};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    EmptyGroup = 1,
    GroupTooLarge = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientFunds = 5,
    NotOptedIn = 6,
    ApplicationDeleted = 7,
    ApplicationRejected = 8,
    Overflow = 9,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Funded {
    #[topic]
    pub account: Address,
    pub class: AssetClass,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupAdmitted {
    pub size: u32,
}

fn credit(e: &Env, class: AssetClass, account: &Address, amount: i128) -> Result<(), LedgerError> {
    let balance = storage::read_balance(e, class, account)
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;
    storage::write_balance(e, class, account, balance);
    Ok(())
}

fn debit(e: &Env, class: AssetClass, account: &Address, amount: i128) -> Result<(), LedgerError> {
    let balance = storage::read_balance(e, class, account);
    if balance < amount {
        return Err(LedgerError::InsufficientFunds);
    }
    storage::write_balance(e, class, account, balance - amount);
    Ok(())
}

/// Transfers sent by a logic account are vouched for by its predicate; every
/// other sender signs once for the whole group.
fn authorize_members(e: &Env, group: &Vec<Txn>) -> Result<(), LedgerError> {
    let mut signers: Vec<Address> = Vec::new(e);

    for (index, txn) in group.iter().enumerate() {
        let sender = match &txn {
            // The application authenticates its own callers.
            Txn::AppCall(_) => continue,
            Txn::AssetTransfer(transfer) | Txn::Payment(transfer) => transfer.sender.clone(),
        };

        if storage::is_logic_account(e, &sender) {
            let logic = EscrowClient::new(e, &sender);
            if !logic.authorize(group, &(index as u32)) {
                return Err(LedgerError::Unauthorized);
            }
        } else if !signers.contains(&sender) {
            sender.require_auth();
            signers.push_back(sender);
        }
    }

    Ok(())
}

fn apply_asset_transfer(e: &Env, transfer: &Transfer) -> Result<(), LedgerError> {
    if transfer.amount < 0 {
        return Err(LedgerError::InvalidAmount);
    }
    if transfer.amount == 0 && transfer.sender == transfer.receiver {
        storage::set_opted_in(e, &transfer.sender);
        return Ok(());
    }
    if !storage::is_opted_in(e, &transfer.receiver) {
        return Err(LedgerError::NotOptedIn);
    }
    debit(e, AssetClass::Token, &transfer.sender, transfer.amount)?;
    credit(e, AssetClass::Token, &transfer.receiver, transfer.amount)
}

fn apply_payment(e: &Env, transfer: &Transfer) -> Result<(), LedgerError> {
    if transfer.amount < 0 {
        return Err(LedgerError::InvalidAmount);
    }
    debit(e, AssetClass::Native, &transfer.sender, transfer.amount)?;
    credit(e, AssetClass::Native, &transfer.receiver, transfer.amount)
}

fn apply_app_call(
    e: &Env,
    call: &AppCall,
    group: &Vec<Txn>,
    index: u32,
) -> Result<(), LedgerError> {
    if storage::is_deleted(e, &call.app) {
        return Err(LedgerError::ApplicationDeleted);
    }

    let app = PoolClient::new(e, &call.app);
    match app.try_execute(group, &index) {
        Ok(Ok(())) => {}
        _ => return Err(LedgerError::ApplicationRejected),
    }

    if call.on_completion == OnCompletion::DeleteApplication {
        storage::set_deleted(e, &call.app);
    }
    Ok(())
}

/// Admits atomic groups of transfers and application calls.
#[contract]
pub struct GroupLedger;

#[contractimpl]
impl GroupLedger {
    pub fn __constructor(e: Env, admin: Address) {
        storage::write_admin(&e, &admin);
    }

    /// Mints `amount` of `class` to `account` outside of any group.
    ///
    /// # Errors
    /// * `InvalidAmount` - `amount` is negative
    /// * `NotOptedIn` - `class` is the token and `account` has not opted in
    pub fn fund(
        e: Env,
        account: Address,
        class: AssetClass,
        amount: i128,
    ) -> Result<(), LedgerError> {
        storage::bump_instance(&e);
        storage::read_admin(&e).require_auth();

        if amount < 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if class == AssetClass::Token && !storage::is_opted_in(&e, &account) {
            return Err(LedgerError::NotOptedIn);
        }
        credit(&e, class, &account, amount)?;

        Funded {
            account,
            class,
            amount,
        }
        .publish(&e);
        Ok(())
    }

    /// Marks `account` as a contract account whose transfers are authorized by
    /// its `authorize` predicate.
    pub fn register_logic_account(e: Env, account: Address) {
        storage::bump_instance(&e);
        storage::read_admin(&e).require_auth();
        storage::set_logic_account(&e, &account);
    }

    /// Admits `group` as a unit or rejects it. Members are authorized first,
    /// then applied in order; the first failure rejects the group and every
    /// write made on its behalf is discarded.
    pub fn submit(e: Env, group: Vec<Txn>) -> Result<(), LedgerError> {
        storage::bump_instance(&e);

        let size = group.len();
        if size == 0 {
            return Err(LedgerError::EmptyGroup);
        }
        if size > MAX_GROUP_SIZE {
            return Err(LedgerError::GroupTooLarge);
        }

        authorize_members(&e, &group)?;

        for (index, txn) in group.iter().enumerate() {
            match &txn {
                Txn::AssetTransfer(transfer) => apply_asset_transfer(&e, transfer)?,
                Txn::Payment(transfer) => apply_payment(&e, transfer)?,
                Txn::AppCall(call) => apply_app_call(&e, call, &group, index as u32)?,
            }
        }

        GroupAdmitted { size }.publish(&e);
        Ok(())
    }

    pub fn balance(e: Env, account: Address, class: AssetClass) -> i128 {
        storage::read_balance(&e, class, &account)
    }

    pub fn is_opted_in(e: Env, account: Address) -> bool {
        storage::is_opted_in(&e, &account)
    }
}
