use crate::events::{
    EscrowRegistered, Exited, LiquidityAdded, LiquidityRemoved, OptedIn, Swapped, Withdrawn,
};
use crate::exit_guard::permits_exit;
use crate::operations::{self, Operation, Release, SwapFill};
use crate::storage;
use asaswap_interface::{LocalState, PoolError, PoolInterface, PoolState, Txn};
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

fn opted_in(e: &Env, account: &Address) -> Result<LocalState, PoolError> {
    storage::read_local(e, account).ok_or(PoolError::NotOptedIn)
}

#[contract]
pub struct AsaSwapPool;

#[contractimpl]
impl AsaSwapPool {
    /// Creates the pool with empty reserves and no escrow
    ///
    /// # Arguments
    /// * `e` - The environment
    /// * `creator` - The account allowed to register the escrow and delete the pool
    /// * `ledger` - The only contract allowed to run groups against the pool
    pub fn __constructor(e: Env, creator: Address, ledger: Address) {
        storage::write_ledger(&e, &ledger);
        storage::write_pool(
            &e,
            &PoolState {
                creator,
                escrow: None,
                tokens_balance: 0,
                algos_balance: 0,
                total_liquidity_tokens: 0,
                exchange_rate: 0,
            },
        );
    }
}

#[contractimpl]
impl PoolInterface for AsaSwapPool {
    /// Validates the application call at `group[index]` against the rest of the
    /// group and applies it
    ///
    /// # Arguments
    /// * `e` - The environment
    /// * `group` - Every member of the atomic group, in order
    /// * `index` - Position of the call addressed to this pool
    ///
    /// # Errors
    /// Any [`PoolError`]; nothing is written when one is returned
    fn execute(e: Env, group: Vec<Txn>, index: u32) -> Result<(), PoolError> {
        storage::bump_instance(&e);
        // Only the ledger runs groups against the pool
        storage::read_ledger(&e).require_auth();

        let call = group
            .get(index)
            .and_then(|txn| txn.app_call())
            .ok_or(PoolError::UnexpectedTransaction)?;
        if call.app != e.current_contract_address() {
            return Err(PoolError::WrongApplication);
        }
        call.sender.require_auth();

        let caller = call.sender.clone();
        let mut pool = storage::read_pool(&e);

        let operation = Operation::parse(&e, &call)?;
        if operation.is_lifecycle() {
            operations::require_solo(&group, index)?;
        }

        match operation {
            Operation::RegisterEscrow(escrow) => {
                operations::register_escrow(&mut pool, &caller, escrow.clone())?;
                storage::write_pool(&e, &pool);
                EscrowRegistered {
                    creator: caller,
                    escrow,
                }
                .publish(&e);
            }
            Operation::Delete => operations::delete(&pool, &caller)?,
            Operation::OptIn => {
                if storage::read_local(&e, &caller).is_some() {
                    return Err(PoolError::AlreadyOptedIn);
                }
                storage::write_local(&e, &caller, &LocalState::default());
                OptedIn { account: caller }.publish(&e);
            }
            Operation::Exit => {
                let local = opted_in(&e, &caller)?;
                if !permits_exit(&local) {
                    return Err(PoolError::UnsettledClaims);
                }
                storage::remove_local(&e, &caller);
                Exited { account: caller }.publish(&e);
            }
            Operation::AddLiquidity => {
                let mut local = opted_in(&e, &caller)?;
                let deposit = operations::add_liquidity(&mut pool, &mut local, &group, index)?;
                storage::write_pool(&e, &pool);
                storage::write_local(&e, &caller, &local);
                LiquidityAdded {
                    provider: caller,
                    tokens: deposit.tokens,
                    algos: deposit.algos,
                    minted: deposit.minted,
                    exchange_rate: pool.exchange_rate,
                }
                .publish(&e);
            }
            Operation::RemoveLiquidity(burn) => {
                let mut local = opted_in(&e, &caller)?;
                let redemption =
                    operations::remove_liquidity(&mut pool, &mut local, &group, index, burn)?;
                storage::write_pool(&e, &pool);
                storage::write_local(&e, &caller, &local);
                LiquidityRemoved {
                    provider: caller,
                    requested_burn: burn,
                    tokens: redemption.tokens,
                    algos: redemption.algos,
                    exchange_rate: pool.exchange_rate,
                }
                .publish(&e);
            }
            Operation::Swap => {
                let mut local = opted_in(&e, &caller)?;
                let fill = operations::swap(&mut pool, &mut local, &group, index)?;
                storage::write_pool(&e, &pool);
                storage::write_local(&e, &caller, &local);
                let (tokens_in, algos_in, tokens_out, algos_out) = match fill {
                    SwapFill::TokensForAlgos {
                        tokens_in,
                        algos_out,
                    } => (tokens_in, 0, 0, algos_out),
                    SwapFill::AlgosForTokens {
                        algos_in,
                        tokens_out,
                    } => (0, algos_in, tokens_out, 0),
                };
                Swapped {
                    trader: caller,
                    tokens_in,
                    algos_in,
                    tokens_out,
                    algos_out,
                    exchange_rate: pool.exchange_rate,
                }
                .publish(&e);
            }
            Operation::Withdraw => {
                let mut local = opted_in(&e, &caller)?;
                let release = operations::withdraw(&mut pool, &mut local, &group, index, &caller)?;
                storage::write_pool(&e, &pool);
                storage::write_local(&e, &caller, &local);
                let (tokens, algos) = match release {
                    Release::Tokens(amount) => (amount, 0),
                    Release::Algos(amount) => (0, amount),
                };
                Withdrawn {
                    account: caller,
                    tokens,
                    algos,
                    exchange_rate: pool.exchange_rate,
                }
                .publish(&e);
            }
        }

        Ok(())
    }

    /// Returns the global pool record
    fn pool_state(e: Env) -> PoolState {
        storage::bump_instance(&e);
        storage::read_pool(&e)
    }

    /// Returns the account's local record, or `None` when it is not opted in
    fn local_state(e: Env, account: Address) -> Option<LocalState> {
        storage::bump_instance(&e);
        storage::read_local(&e, &account)
    }
}
