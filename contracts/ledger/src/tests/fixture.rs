use crate::{AssetClass, GroupLedger, GroupLedgerClient};
use asaswap_escrow::EscrowLogic;
use asaswap_interface::{AppArg, AppCall, OnCompletion, PoolClient, Transfer, Txn};
use asaswap_pool::AsaSwapPool;
use soroban_sdk::{testutils::Address as _, vec, Address, Env, Vec};

/// Ledger with one pool deployed, its escrow opted in to the token and
/// registered with the pool.
pub struct AsaSwapTest<'a> {
    pub env: Env,
    pub creator: Address,
    pub ledger: GroupLedgerClient<'a>,
    pub pool: PoolClient<'a>,
    pub escrow: Address,
}

impl<'a> AsaSwapTest<'a> {
    pub fn setup() -> Self {
        let env = Env::default();
        // Pool calls authenticate their sender below the ledger's own frame
        env.mock_all_auths_allowing_non_root_auth();

        let admin = Address::generate(&env);
        let creator = Address::generate(&env);

        let ledger_id = env.register(GroupLedger, (&admin,));
        let ledger = GroupLedgerClient::new(&env, &ledger_id);

        let pool_id = env.register(AsaSwapPool, (&creator, &ledger_id));
        let pool = PoolClient::new(&env, &pool_id);

        let escrow = env.register(EscrowLogic, (&pool_id,));
        ledger.register_logic_account(&escrow);

        let test = AsaSwapTest {
            env,
            creator,
            ledger,
            pool,
            escrow,
        };

        // The escrow vouches for its own asset opt-in
        test.submit(vec![
            &test.env,
            test.asset(&test.escrow, &test.escrow, 0),
        ]);

        let args = vec![&test.env, AppArg::Account(test.escrow.clone())];
        test.submit(vec![
            &test.env,
            test.call(&test.creator, OnCompletion::UpdateApplication, args),
        ]);

        test
    }

    pub fn submit(&self, group: Vec<Txn>) {
        self.ledger.submit(&group);
    }

    pub fn call(&self, sender: &Address, on_completion: OnCompletion, args: Vec<AppArg>) -> Txn {
        Txn::AppCall(AppCall {
            app: self.pool.address.clone(),
            sender: sender.clone(),
            on_completion,
            args,
        })
    }

    pub fn op(&self, sender: &Address, name: &str) -> Txn {
        self.call(
            sender,
            OnCompletion::NoOp,
            vec![&self.env, AppArg::name(&self.env, name)],
        )
    }

    pub fn asset(&self, sender: &Address, receiver: &Address, amount: i128) -> Txn {
        Txn::AssetTransfer(Transfer {
            sender: sender.clone(),
            receiver: receiver.clone(),
            amount,
        })
    }

    pub fn pay(&self, sender: &Address, receiver: &Address, amount: i128) -> Txn {
        Txn::Payment(Transfer {
            sender: sender.clone(),
            receiver: receiver.clone(),
            amount,
        })
    }

    /// New account opted in to the pool and the token, holding the given balances.
    pub fn onboard(&self, tokens: i128, algos: i128) -> Address {
        let user = Address::generate(&self.env);
        self.submit(vec![
            &self.env,
            self.call(&user, OnCompletion::OptIn, Vec::new(&self.env)),
        ]);
        self.submit(vec![&self.env, self.asset(&user, &user, 0)]);
        self.ledger.fund(&user, &AssetClass::Token, &tokens);
        self.ledger.fund(&user, &AssetClass::Native, &algos);
        user
    }

    pub fn add_liquidity_group(&self, user: &Address, tokens: i128, algos: i128) -> Vec<Txn> {
        vec![
            &self.env,
            self.op(user, asaswap_interface::ADD_LIQUIDITY),
            self.asset(user, &self.escrow, tokens),
            self.pay(user, &self.escrow, algos),
        ]
    }

    pub fn add_liquidity(&self, user: &Address, tokens: i128, algos: i128) {
        self.submit(self.add_liquidity_group(user, tokens, algos));
    }

    pub fn tokens(&self, account: &Address) -> i128 {
        self.ledger.balance(account, &AssetClass::Token)
    }

    pub fn algos(&self, account: &Address) -> i128 {
        self.ledger.balance(account, &AssetClass::Native)
    }
}
