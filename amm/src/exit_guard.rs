//! Guard evaluated when an account asks to drop its local record.

use asaswap_interface::LocalState;

/// An account may leave only when nothing is owed to it and it holds no liquidity.
pub fn permits_exit(local: &LocalState) -> bool {
    local.tokens_to_withdraw == 0 && local.algos_to_withdraw == 0 && local.user_liquidity_tokens == 0
}
