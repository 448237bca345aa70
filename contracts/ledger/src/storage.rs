use soroban_sdk::{contracttype, Address, Env};

// Storage TTL constants
pub const DAY_IN_LEDGERS: u32 = 17280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// The two asset classes a group can move.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssetClass {
    /// The pool's fungible token
    Token,
    /// The native currency
    Native,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Holding(AssetClass, Address),
    OptedIn(Address),
    LogicAccount(Address),
    DeletedApp(Address),
}

pub fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// Admin functions
pub fn read_admin(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("Admin not set")
}

pub fn write_admin(e: &Env, admin: &Address) {
    e.storage().instance().set(&DataKey::Admin, admin);
}

// Flags kept in persistent storage; presence means set
fn has_flag(e: &Env, key: &DataKey) -> bool {
    let set = e.storage().persistent().has(key);
    if set {
        e.storage()
            .persistent()
            .extend_ttl(key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
    }
    set
}

fn set_flag(e: &Env, key: &DataKey) {
    e.storage().persistent().set(key, &true);
    e.storage()
        .persistent()
        .extend_ttl(key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

pub fn is_opted_in(e: &Env, account: &Address) -> bool {
    has_flag(e, &DataKey::OptedIn(account.clone()))
}

pub fn set_opted_in(e: &Env, account: &Address) {
    set_flag(e, &DataKey::OptedIn(account.clone()));
}

pub fn is_logic_account(e: &Env, account: &Address) -> bool {
    has_flag(e, &DataKey::LogicAccount(account.clone()))
}

pub fn set_logic_account(e: &Env, account: &Address) {
    set_flag(e, &DataKey::LogicAccount(account.clone()));
}

pub fn is_deleted(e: &Env, app: &Address) -> bool {
    has_flag(e, &DataKey::DeletedApp(app.clone()))
}

pub fn set_deleted(e: &Env, app: &Address) {
    set_flag(e, &DataKey::DeletedApp(app.clone()));
}

// Balance functions
pub fn read_balance(e: &Env, class: AssetClass, account: &Address) -> i128 {
    let key = DataKey::Holding(class, account.clone());
    if let Some(balance) = e.storage().persistent().get::<DataKey, i128>(&key) {
        e.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
        balance
    } else {
        0
    }
}

pub fn write_balance(e: &Env, class: AssetClass, account: &Address, amount: i128) {
    let key = DataKey::Holding(class, account.clone());
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}
