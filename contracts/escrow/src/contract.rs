use crate::predicate::release_authorized;
use asaswap_interface::{EscrowInterface, Txn};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Vec};

const DAY_IN_LEDGERS: u32 = 17280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[derive(Clone)]
#[contracttype]
enum DataKey {
    App,
}

fn read_app(e: &Env) -> Address {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    e.storage()
        .instance()
        .get(&DataKey::App)
        .expect("App not set")
}

/// Custodian of one pool's reserves. Holds no keys; the ledger asks it to
/// vouch for each transfer it sends.
#[contract]
pub struct EscrowLogic;

#[contractimpl]
impl EscrowLogic {
    /// Binds the custodian to the pool instance at `app` for its whole lifetime.
    pub fn __constructor(e: Env, app: Address) {
        e.storage().instance().set(&DataKey::App, &app);
    }
}

#[contractimpl]
impl EscrowInterface for EscrowLogic {
    fn bound_app(e: Env) -> Address {
        read_app(&e)
    }

    fn authorize(e: Env, group: Vec<Txn>, index: u32) -> bool {
        release_authorized(&read_app(&e), &group, index)
    }
}
