#![no_std]

use soroban_sdk::{contractclient, contracterror, contracttype, Address, Env, Symbol, Vec};

/// Fixed-point scale of every exchange rate.
pub const SCALE: i128 = 1_000_000;
/// Largest accepted deviation between a deposit's implied price and the pool price, in SCALE units (1%).
pub const SLIPPAGE_TOLERANCE: i128 = 10_000;
/// Swaps credit `amount * 100 / 103` of the incoming side.
pub const SWAP_FEE_NUMERATOR: i128 = 100;
pub const SWAP_FEE_DENOMINATOR: i128 = 103;
/// Flat native-unit fee taken out of the pool reserves on every withdrawal.
pub const WITHDRAW_FEE: i128 = 1_000;
/// Upper bound on the number of members in one atomic group.
pub const MAX_GROUP_SIZE: u32 = 16;

// Operation names carried as the first application argument
pub const ADD_LIQUIDITY: &str = "ADD_LIQUIDITY";
pub const REMOVE_LIQUIDITY: &str = "REMOVE_LIQUIDITY";
pub const SWAP: &str = "SWAP";
pub const WITHDRAW: &str = "WITHDRAW";

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OnCompletion {
    NoOp,
    OptIn,
    CloseOut,
    ClearState,
    UpdateApplication,
    DeleteApplication,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppArg {
    Name(Symbol),
    Int(i128),
    Account(Address),
}

impl AppArg {
    pub fn name(env: &Env, name: &str) -> Self {
        AppArg::Name(Symbol::new(env, name))
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppCall {
    pub app: Address,
    pub sender: Address,
    pub on_completion: OnCompletion,
    pub args: Vec<AppArg>,
}

/// Movement of either asset class between two accounts.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transfer {
    pub sender: Address,
    pub receiver: Address,
    pub amount: i128,
}

/// One member of an atomic group.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Txn {
    AppCall(AppCall),
    AssetTransfer(Transfer),
    Payment(Transfer),
}

impl Txn {
    pub fn app_call(&self) -> Option<AppCall> {
        match self {
            Txn::AppCall(call) => Some(call.clone()),
            _ => None,
        }
    }

    pub fn asset_transfer(&self) -> Option<Transfer> {
        match self {
            Txn::AssetTransfer(transfer) => Some(transfer.clone()),
            _ => None,
        }
    }

    pub fn payment(&self) -> Option<Transfer> {
        match self {
            Txn::Payment(transfer) => Some(transfer.clone()),
            _ => None,
        }
    }
}

/// Global pool record. `exchange_rate` is scaled by [`SCALE`]; zero means no price yet.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub creator: Address,
    pub escrow: Option<Address>,
    pub tokens_balance: i128,
    pub algos_balance: i128,
    pub total_liquidity_tokens: i128,
    pub exchange_rate: i128,
}

/// Per-account participation record, present while the account is opted in.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LocalState {
    pub user_liquidity_tokens: i128,
    pub tokens_to_withdraw: i128,
    pub algos_to_withdraw: i128,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    WrongApplication = 1,
    UnexpectedTransaction = 2,
    MalformedGroup = 3,
    UnknownOperation = 4,
    InvalidArguments = 5,
    NotCreator = 6,
    EscrowNotRegistered = 7,
    EscrowAlreadyRegistered = 8,
    WrongEscrow = 9,
    AlreadyOptedIn = 10,
    NotOptedIn = 11,
    InvalidAmount = 12,
    SlippageExceeded = 13,
    InsufficientLiquidity = 14,
    InsufficientReserves = 15,
    WithdrawalMismatch = 16,
    UnsettledClaims = 17,
    Arithmetic = 18,
}

/// Pool contract as seen by the ledger and by clients.
#[contractclient(name = "PoolClient")]
pub trait PoolInterface {
    /// Runs the application call at `group[index]` against the pool.
    fn execute(env: Env, group: Vec<Txn>, index: u32) -> Result<(), PoolError>;
    fn pool_state(env: Env) -> PoolState;
    fn local_state(env: Env, account: Address) -> Option<LocalState>;
}

/// Release predicate of the account holding the pool reserves.
#[contractclient(name = "EscrowClient")]
pub trait EscrowInterface {
    fn bound_app(env: Env) -> Address;
    fn authorize(env: Env, group: Vec<Txn>, index: u32) -> bool;
}
