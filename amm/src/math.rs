//! Scaled-integer helpers shared by every pool operation.
//!
//! All operands are non-negative, so the truncating division used throughout
//! rounds toward zero, which is also rounding down. Any overflow or division by
//! zero surfaces as [`PoolError::Arithmetic`] and rejects the whole group.

use asaswap_interface::{PoolError, SCALE, SWAP_FEE_DENOMINATOR, SWAP_FEE_NUMERATOR};

/// `a * b / d`, truncated toward zero.
pub fn mul_div(a: i128, b: i128, d: i128) -> Result<i128, PoolError> {
    a.checked_mul(b)
        .and_then(|product| product.checked_div(d))
        .ok_or(PoolError::Arithmetic)
}

pub fn credit(balance: i128, amount: i128) -> Result<i128, PoolError> {
    balance.checked_add(amount).ok_or(PoolError::Arithmetic)
}

/// Subtracts `amount` from `balance`, refusing to go below zero.
pub fn debit(balance: i128, amount: i128) -> Result<i128, PoolError> {
    if amount > balance {
        return Err(PoolError::InsufficientReserves);
    }
    Ok(balance - amount)
}

/// Part of an incoming swap amount that is actually converted. Truncates, so the
/// fee retained by the pool is never less than 3/103 of the input.
pub fn net_of_swap_fee(amount: i128) -> Result<i128, PoolError> {
    mul_div(amount, SWAP_FEE_NUMERATOR, SWAP_FEE_DENOMINATOR)
}

/// A price scaled by [`SCALE`]. The zero rate stands for "no price yet".
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct Rate(i128);

impl Rate {
    pub fn from_raw(raw: i128) -> Self {
        Rate(raw)
    }

    pub fn raw(self) -> i128 {
        self.0
    }

    pub fn is_set(self) -> bool {
        self.0 != 0
    }

    /// `numerator * SCALE / denominator`, truncated.
    pub fn ratio(numerator: i128, denominator: i128) -> Result<Self, PoolError> {
        mul_div(numerator, SCALE, denominator).map(Rate)
    }

    /// `self * amount / SCALE`, truncated.
    pub fn apply(self, amount: i128) -> Result<i128, PoolError> {
        mul_div(self.0, amount, SCALE)
    }

    /// `amount * SCALE / self`, truncated. Fails on the zero rate.
    pub fn apply_inverse(self, amount: i128) -> Result<i128, PoolError> {
        mul_div(amount, SCALE, self.0)
    }

    /// `|self - other| * SCALE / self`, truncated.
    pub fn deviation(self, other: Rate) -> Result<i128, PoolError> {
        let distance = self
            .0
            .checked_sub(other.0)
            .and_then(i128::checked_abs)
            .ok_or(PoolError::Arithmetic)?;
        mul_div(distance, SCALE, self.0)
    }
}
