//! Pool state transitions.
//!
//! Every function takes the pool and account records by mutable reference,
//! checks the group shape and amounts, and mutates the records only on the way
//! to `Ok`. Callers persist the records after a successful return; an error
//! leaves nothing to write.

use crate::math::{credit, debit, mul_div, net_of_swap_fee, Rate};
use asaswap_interface::{
    AppArg, AppCall, LocalState, OnCompletion, PoolError, PoolState, Transfer, Txn,
    ADD_LIQUIDITY, REMOVE_LIQUIDITY, SLIPPAGE_TOLERANCE, SWAP, WITHDRAW, WITHDRAW_FEE,
};
use soroban_sdk::{Address, Env, Symbol, Vec};

/// What an application call asks the pool to do.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operation {
    RegisterEscrow(Address),
    OptIn,
    Exit,
    Delete,
    AddLiquidity,
    RemoveLiquidity(i128),
    Swap,
    Withdraw,
}

impl Operation {
    /// Lifecycle completions are decided first; plain calls are selected by their
    /// first argument.
    pub fn parse(env: &Env, call: &AppCall) -> Result<Self, PoolError> {
        match call.on_completion {
            OnCompletion::UpdateApplication => {
                if call.args.len() != 1 {
                    return Err(PoolError::InvalidArguments);
                }
                match call.args.get(0) {
                    Some(AppArg::Account(escrow)) => Ok(Operation::RegisterEscrow(escrow)),
                    _ => Err(PoolError::InvalidArguments),
                }
            }
            OnCompletion::DeleteApplication => Ok(Operation::Delete),
            OnCompletion::OptIn => Ok(Operation::OptIn),
            OnCompletion::CloseOut | OnCompletion::ClearState => Ok(Operation::Exit),
            OnCompletion::NoOp => Self::parse_named(env, &call.args),
        }
    }

    /// Calls that manage the application or the caller's record rather than
    /// move funds.
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Operation::RegisterEscrow(_) | Operation::OptIn | Operation::Exit | Operation::Delete
        )
    }

    fn parse_named(env: &Env, args: &Vec<AppArg>) -> Result<Self, PoolError> {
        let name = match args.get(0) {
            Some(AppArg::Name(name)) => name,
            _ => return Err(PoolError::UnknownOperation),
        };

        if name == Symbol::new(env, ADD_LIQUIDITY) {
            Ok(Operation::AddLiquidity)
        } else if name == Symbol::new(env, REMOVE_LIQUIDITY) {
            if args.len() != 2 {
                return Err(PoolError::InvalidArguments);
            }
            match args.get(1) {
                Some(AppArg::Int(burn)) if burn >= 0 => Ok(Operation::RemoveLiquidity(burn)),
                _ => Err(PoolError::InvalidArguments),
            }
        } else if name == Symbol::new(env, SWAP) {
            Ok(Operation::Swap)
        } else if name == Symbol::new(env, WITHDRAW) {
            Ok(Operation::Withdraw)
        } else {
            Err(PoolError::UnknownOperation)
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LiquidityDeposit {
    pub tokens: i128,
    pub algos: i128,
    pub minted: i128,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Redemption {
    pub tokens: i128,
    pub algos: i128,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwapFill {
    TokensForAlgos { tokens_in: i128, algos_out: i128 },
    AlgosForTokens { algos_in: i128, tokens_out: i128 },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Release {
    Tokens(i128),
    Algos(i128),
}

/// The calling application call must sit at [0] of a group of exactly `size` members.
fn require_shape(group: &Vec<Txn>, index: u32, size: u32) -> Result<(), PoolError> {
    if group.len() != size || index != 0 {
        return Err(PoolError::MalformedGroup);
    }
    Ok(())
}

/// Lifecycle calls travel alone, so nothing can be paired with them.
pub fn require_solo(group: &Vec<Txn>, index: u32) -> Result<(), PoolError> {
    require_shape(group, index, 1)
}

fn member(group: &Vec<Txn>, position: u32) -> Result<Txn, PoolError> {
    group.get(position).ok_or(PoolError::MalformedGroup)
}

fn registered_escrow(pool: &PoolState) -> Result<Address, PoolError> {
    pool.escrow.clone().ok_or(PoolError::EscrowNotRegistered)
}

fn non_negative(amount: i128) -> Result<i128, PoolError> {
    if amount < 0 {
        return Err(PoolError::InvalidAmount);
    }
    Ok(amount)
}

/// Amount of an inbound leg, which must be paid into the escrow from outside it.
fn deposited(transfer: &Transfer, escrow: &Address) -> Result<i128, PoolError> {
    if transfer.receiver != *escrow || transfer.sender == *escrow {
        return Err(PoolError::WrongEscrow);
    }
    non_negative(transfer.amount)
}

/// `exchange_rate = tokens_balance * SCALE / algos_balance`, the orientation used
/// by every operation except add-liquidity.
fn reprice_tokens_per_algo(pool: &mut PoolState) -> Result<(), PoolError> {
    pool.exchange_rate = Rate::ratio(pool.tokens_balance, pool.algos_balance)?.raw();
    Ok(())
}

pub fn register_escrow(
    pool: &mut PoolState,
    caller: &Address,
    escrow: Address,
) -> Result<(), PoolError> {
    if *caller != pool.creator {
        return Err(PoolError::NotCreator);
    }
    if pool.escrow.is_some() {
        return Err(PoolError::EscrowAlreadyRegistered);
    }
    pool.escrow = Some(escrow);
    Ok(())
}

pub fn delete(pool: &PoolState, caller: &Address) -> Result<(), PoolError> {
    if *caller != pool.creator {
        return Err(PoolError::NotCreator);
    }
    Ok(())
}

/// Group: [0] this call, [1] token transfer to escrow, [2] payment to escrow.
pub fn add_liquidity(
    pool: &mut PoolState,
    local: &mut LocalState,
    group: &Vec<Txn>,
    index: u32,
) -> Result<LiquidityDeposit, PoolError> {
    require_shape(group, index, 3)?;
    let escrow = registered_escrow(pool)?;
    let token_leg = member(group, 1)?
        .asset_transfer()
        .ok_or(PoolError::UnexpectedTransaction)?;
    let algo_leg = member(group, 2)?
        .payment()
        .ok_or(PoolError::UnexpectedTransaction)?;
    let tokens = deposited(&token_leg, &escrow)?;
    let algos = deposited(&algo_leg, &escrow)?;

    // Tokens per algo of the deposit; a zero payment fails here.
    let implied = Rate::ratio(tokens, algos)?;
    let current = Rate::from_raw(pool.exchange_rate);
    if current.is_set() && current.deviation(implied)? >= SLIPPAGE_TOLERANCE {
        return Err(PoolError::SlippageExceeded);
    }

    let minted = if pool.total_liquidity_tokens == 0 {
        algos
    } else {
        // Truncates in favour of the existing providers.
        mul_div(algos, pool.total_liquidity_tokens, pool.algos_balance)?
    };

    local.user_liquidity_tokens = credit(local.user_liquidity_tokens, minted)?;
    pool.total_liquidity_tokens = credit(pool.total_liquidity_tokens, minted)?;
    pool.tokens_balance = credit(pool.tokens_balance, tokens)?;
    pool.algos_balance = credit(pool.algos_balance, algos)?;
    // Algos per token here, unlike the other operations.
    pool.exchange_rate = Rate::ratio(pool.algos_balance, pool.tokens_balance)?.raw();

    Ok(LiquidityDeposit {
        tokens,
        algos,
        minted,
    })
}

/// Solo call. `burn` is only checked against the caller's holdings: the
/// redemption is computed from the full holding and liquidity tokens are left
/// in place.
pub fn remove_liquidity(
    pool: &mut PoolState,
    local: &mut LocalState,
    group: &Vec<Txn>,
    index: u32,
    burn: i128,
) -> Result<Redemption, PoolError> {
    require_solo(group, index)?;
    if local.user_liquidity_tokens < burn {
        return Err(PoolError::InsufficientLiquidity);
    }

    // Both shares truncate, leaving the remainder in the pool.
    let algos = mul_div(
        pool.algos_balance,
        local.user_liquidity_tokens,
        pool.total_liquidity_tokens,
    )?;
    let tokens = mul_div(
        pool.tokens_balance,
        local.user_liquidity_tokens,
        pool.total_liquidity_tokens,
    )?;
    if algos >= pool.algos_balance || tokens >= pool.tokens_balance {
        return Err(PoolError::InsufficientReserves);
    }

    local.algos_to_withdraw = credit(local.algos_to_withdraw, algos)?;
    local.tokens_to_withdraw = credit(local.tokens_to_withdraw, tokens)?;
    pool.algos_balance = debit(pool.algos_balance, algos)?;
    pool.tokens_balance = debit(pool.tokens_balance, tokens)?;
    reprice_tokens_per_algo(pool)?;

    Ok(Redemption { tokens, algos })
}

/// Group: [0] this call, [1] token transfer or payment to escrow. The owed
/// amount overwrites the matching pending field.
pub fn swap(
    pool: &mut PoolState,
    local: &mut LocalState,
    group: &Vec<Txn>,
    index: u32,
) -> Result<SwapFill, PoolError> {
    require_shape(group, index, 2)?;
    let escrow = registered_escrow(pool)?;
    let rate = Rate::from_raw(pool.exchange_rate);

    let fill = match member(group, 1)? {
        Txn::AssetTransfer(leg) => {
            let tokens_in = deposited(&leg, &escrow)?;
            pool.tokens_balance = credit(pool.tokens_balance, tokens_in)?;
            let algos_out = rate.apply(net_of_swap_fee(tokens_in)?)?;
            local.algos_to_withdraw = algos_out;
            pool.algos_balance = debit(pool.algos_balance, algos_out)?;
            SwapFill::TokensForAlgos {
                tokens_in,
                algos_out,
            }
        }
        Txn::Payment(leg) => {
            let algos_in = deposited(&leg, &escrow)?;
            pool.algos_balance = credit(pool.algos_balance, algos_in)?;
            let tokens_out = rate.apply_inverse(net_of_swap_fee(algos_in)?)?;
            local.tokens_to_withdraw = tokens_out;
            pool.tokens_balance = debit(pool.tokens_balance, tokens_out)?;
            SwapFill::AlgosForTokens {
                algos_in,
                tokens_out,
            }
        }
        Txn::AppCall(_) => return Err(PoolError::UnexpectedTransaction),
    };

    reprice_tokens_per_algo(pool)?;
    Ok(fill)
}

/// Group: [0] this call, [1] release from escrow to the caller of exactly one
/// pending amount. The flat fee always comes out of the algo reserve.
pub fn withdraw(
    pool: &mut PoolState,
    local: &mut LocalState,
    group: &Vec<Txn>,
    index: u32,
    caller: &Address,
) -> Result<Release, PoolError> {
    require_shape(group, index, 2)?;
    let escrow = registered_escrow(pool)?;
    let releases_to_caller =
        |leg: &Transfer| leg.sender == escrow && leg.receiver == *caller;

    let release = match member(group, 1)? {
        Txn::AssetTransfer(leg)
            if releases_to_caller(&leg) && leg.amount == local.tokens_to_withdraw =>
        {
            local.tokens_to_withdraw = 0;
            Release::Tokens(leg.amount)
        }
        Txn::Payment(leg)
            if releases_to_caller(&leg) && leg.amount == local.algos_to_withdraw =>
        {
            local.algos_to_withdraw = 0;
            Release::Algos(leg.amount)
        }
        _ => return Err(PoolError::WithdrawalMismatch),
    };

    pool.algos_balance = debit(pool.algos_balance, WITHDRAW_FEE)?;
    reprice_tokens_per_algo(pool)?;
    Ok(release)
}
