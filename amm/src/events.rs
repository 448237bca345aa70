use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowRegistered {
    #[topic]
    pub creator: Address,
    pub escrow: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptedIn {
    #[topic]
    pub account: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Exited {
    #[topic]
    pub account: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidityAdded {
    #[topic]
    pub provider: Address,
    pub tokens: i128,
    pub algos: i128,
    pub minted: i128,
    pub exchange_rate: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidityRemoved {
    #[topic]
    pub provider: Address,
    pub requested_burn: i128,
    pub tokens: i128,
    pub algos: i128,
    pub exchange_rate: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Swapped {
    #[topic]
    pub trader: Address,
    pub tokens_in: i128,
    pub algos_in: i128,
    pub tokens_out: i128,
    pub algos_out: i128,
    pub exchange_rate: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    #[topic]
    pub account: Address,
    pub tokens: i128,
    pub algos: i128,
    pub exchange_rate: i128,
}
