use asaswap_interface::{LocalState, PoolState};
use soroban_sdk::{contracttype, Address, Env};

// Storage TTL constants
pub const DAY_IN_LEDGERS: u32 = 17280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const LOCAL_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const LOCAL_LIFETIME_THRESHOLD: u32 = LOCAL_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Ledger,
    Pool,
    Local(Address),
}

pub fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn read_ledger(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::Ledger)
        .expect("Ledger not set")
}

pub fn write_ledger(e: &Env, ledger: &Address) {
    e.storage().instance().set(&DataKey::Ledger, ledger);
}

// Written by the constructor, so always present afterwards
pub fn read_pool(e: &Env) -> PoolState {
    e.storage()
        .instance()
        .get(&DataKey::Pool)
        .expect("Pool not initialized")
}

pub fn write_pool(e: &Env, pool: &PoolState) {
    e.storage().instance().set(&DataKey::Pool, pool);
}

pub fn read_local(e: &Env, account: &Address) -> Option<LocalState> {
    let key = DataKey::Local(account.clone());
    let local = e.storage().persistent().get::<DataKey, LocalState>(&key);
    if local.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, LOCAL_LIFETIME_THRESHOLD, LOCAL_BUMP_AMOUNT);
    }
    local
}

pub fn write_local(e: &Env, account: &Address, local: &LocalState) {
    let key = DataKey::Local(account.clone());
    e.storage().persistent().set(&key, local);
    e.storage()
        .persistent()
        .extend_ttl(&key, LOCAL_LIFETIME_THRESHOLD, LOCAL_BUMP_AMOUNT);
}

pub fn remove_local(e: &Env, account: &Address) {
    e.storage()
        .persistent()
        .remove(&DataKey::Local(account.clone()));
}
